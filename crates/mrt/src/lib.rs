//! Mental-rotation puzzle generation from voxel polycubes.
//!
//! Pipeline
//! - `catalog`: named polycube shapes (integer cube origins).
//! - `geometry`: cube origins → explicit corner vertex sets.
//! - `transform`: centroid-anchored rotations and reflections, plus the
//!   `Operation` dispatcher used by the retry wrapper.
//! - `retry`: re-apply a transform until the result differs from its input.
//! - `puzzle`: candidate assembly, similar-shape selection, shuffling, labels,
//!   and the render/metadata sink seams.
//!
//! Determinism: every random draw goes through an explicit `RandomSources`
//! value; equal seeds and equal call sequences give identical puzzles.

pub mod catalog;
pub mod cfg;
pub mod difficulty;
pub mod geometry;
pub mod puzzle;
pub mod retry;
pub mod rng;
pub mod transform;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use catalog::{Catalog, CatalogError, ShapeDefinition, UnknownShapeError};
pub use cfg::GeneratorCfg;
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use geometry::{build_vertices, VertexSet};
pub use rng::RandomSources;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::catalog::{Catalog, ShapeDefinition};
    pub use crate::cfg::GeneratorCfg;
    pub use crate::difficulty::Difficulty;
    pub use crate::geometry::{build_vertices, VertexSet};
    pub use crate::puzzle::{
        emit, Candidate, EmitError, Figure, FigureStyle, GenerateError, Generator, JsonlSink,
        MetadataSink, Panel, PuzzleInstance, PuzzleRecord, RenderSink, Tag,
    };
    pub use crate::retry::until_distinct;
    pub use crate::rng::RandomSources;
    pub use crate::transform::{mirror, rotate, Axis, Operation, OperationKind, Transform};
    pub use nalgebra::{Matrix3 as Mat3, Vector3 as Vec3};
}
