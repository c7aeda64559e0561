//! Mesh processing algorithms.
//!
//! - **Subdivision**: Doo-Sabin subdivision of polygon meshes
//! - **Progress**: callbacks for long multi-level runs

pub mod progress;
pub mod subdivide;

pub use progress::Progress;
