//! STL export of isovist meshes.
//!
//! ASCII output carries geometry only. Binary output also stores each
//! facet's color in its attribute word, using the VisCAM/SolidView layout
//! understood by most colored-STL viewers.

use crate::color::Color;
use crate::mesh::IsovistMesh;
use crate::triangulated::Triangulated3D;
use crate::vertex::Vertex;
use std::fmt::Write as _;
use std::io::Cursor;

/// Binary STL header size in bytes.
const HEADER_LEN: usize = 80;
/// Header plus the `u32` facet count.
const PREAMBLE_LEN: usize = HEADER_LEN + 4;
/// Normal, three vertices and the attribute word.
const FACET_LEN: usize = 50;

/// Write `shape` as an ASCII STL solid called `name`.
///
/// ```rust
/// # use isovist::{isovist::Isovist, mesh::IsovistMesh, color::MeshColors, polygon::Polygon, site::ObserverSite};
/// # use nalgebra::Point3;
/// let site = ObserverSite::new(Point3::new(0.0, 0.0, 5.0), 5.0, 20.0).unwrap();
/// let open: Vec<&Polygon<()>> = Vec::new();
/// let isovist = Isovist::build(&site, &open, 16).unwrap();
/// let mesh = IsovistMesh::from_isovist(&isovist, &MeshColors::default());
/// let text = mesh.to_stl_ascii("isovist");
/// assert!(text.starts_with("solid isovist"));
/// assert_eq!(text.matches("endfacet").count(), 16);
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = format!("solid {name}\n");

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        // Writing into a String cannot fail
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri {
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", v.pos.x, v.pos.y, v.pos.z);
        }
        out.push_str("    endloop\n  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Write `shape` as a binary STL.
///
/// `name` fills the start of the 80-byte header (truncated to fit). Every
/// facet's attribute word holds the mean color of its three vertices, see
/// [`facet_attribute`].
#[allow(clippy::unnecessary_cast)]
pub fn to_stl_binary<T: Triangulated3D>(shape: &T, name: &str) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex as StlVertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();
    let mut attributes = Vec::<u16>::new();

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|v| StlVertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])),
        });
        attributes.push(facet_attribute(&tri));
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    let mut bytes = cursor.into_inner();

    let label = &name.as_bytes()[..name.len().min(HEADER_LEN)];
    bytes[..label.len()].copy_from_slice(label);

    for (i, attribute) in attributes.iter().enumerate() {
        let at = PREAMBLE_LEN + (i + 1) * FACET_LEN - 2;
        if let Some(word) = bytes.get_mut(at..at + 2) {
            word.copy_from_slice(&attribute.to_le_bytes());
        }
    }
    Ok(bytes)
}

/// 15-bit facet color: bit 15 marks the color as valid, then five bits each
/// of red, green and blue from high to low.
pub fn facet_attribute(tri: &[Vertex; 3]) -> u16 {
    let mean = tri[0].color.lerp(&tri[1].color, 0.5).lerp(&tri[2].color, 1.0 / 3.0);
    0x8000 | (channel(mean.r) << 10) | (channel(mean.g) << 5) | channel(mean.b)
}

fn channel(c: crate::float_types::Real) -> u16 {
    (c.clamp(0.0, 1.0) * 31.0).round() as u16
}

impl IsovistMesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self, name: &str) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self, name)
    }
}
