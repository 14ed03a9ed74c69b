//! Triangle-based export backends.
//!
//! Anything implementing [`Triangulated3D`](crate::triangulated::Triangulated3D)
//! can be written out; in practice that is [`IsovistMesh`](crate::mesh::IsovistMesh).

#[cfg(feature = "stl-io")]
pub mod stl;
