// main.rs
//
// Minimal run of the view radius computation on a hand-built scene: one
// square envelope surrounded by a few context buildings. Set RUST_LOG=debug
// to see per-site details.

use isovist::color::{Color, MeshColors};
use isovist::float_types::Real;
use isovist::{Envelope, Mass, ViewRadiusInputs, execute};
use nalgebra::Point2;

fn rect(x0: Real, y0: Real, x1: Real, y1: Real) -> Vec<Point2<Real>> {
    vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ]
}

fn main() {
    env_logger::init();

    // Two stacked envelopes on the same 10x10 lot; only the lower one spans z=5
    let envelopes = vec![
        Envelope::new(rect(-5.0, -5.0, 5.0, 5.0), 0.0, 10.0),
        Envelope::new(rect(-5.0, -5.0, 5.0, 5.0), 10.0, 20.0),
    ];

    // Context: a slab to the east, a tower to the north, a low shed to the west
    let buildings: Vec<Mass<&str>> = vec![
        Mass::extruded(&rect(15.0, -10.0, 20.0, 10.0), 0.0, 30.0, Some("slab")),
        Mass::extruded(&rect(-4.0, 12.0, 4.0, 20.0), 0.0, 60.0, Some("tower")),
        Mass::extruded(&rect(-14.0, -3.0, -9.0, 3.0), 0.0, 3.0, Some("shed")),
    ];

    // Red where a ray is stopped close by, fading to green at the cast radius
    let inputs = ViewRadiusInputs::new(5.0, 20.0).with_colors(MeshColors {
        near: Color::rgba(0.9, 0.1, 0.1, 1.0),
        far: Color::rgba(0.1, 0.8, 0.2, 1.0),
    });
    let outputs = match execute(&inputs, Some(envelopes.as_slice()), Some(buildings.as_slice())) {
        Ok(outputs) => outputs,
        Err(e) => {
            eprintln!("view radius failed: {e}");
            std::process::exit(1);
        },
    };

    println!("score: {:.2}", outputs.score);
    for (i, (site, isovist)) in outputs.sites.iter().zip(&outputs.isovists).enumerate() {
        println!(
            "site {i}: {:.2}% visible, {:.0}% of rays obstructed",
            site.percentage(),
            100.0 * isovist.obstructed_fraction()
        );
    }

    #[cfg(feature = "stl-io")]
    {
        let _ = std::fs::create_dir_all("stl");
        for (i, mesh) in outputs.meshes.iter().enumerate() {
            let name = format!("isovist_{i}");
            let _ = std::fs::write(format!("stl/{name}.stl"), mesh.to_stl_ascii(&name));
            // Colored variant for viewers that read facet attributes
            match mesh.to_stl_binary(&name) {
                Ok(bytes) => {
                    let _ = std::fs::write(format!("stl/{name}_colored.stl"), bytes);
                },
                Err(e) => eprintln!("binary STL for {name} failed: {e}"),
            }
        }
    }
}
