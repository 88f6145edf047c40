//! Puzzle assembly: one original shape, one correct rotation, and chiral or
//! cross-family distractors, shuffled and labelled.
//!
//! Per-instance stages
//! 1. Select a shape from the difficulty's subset (general stream).
//! 2. Build its vertices.
//! 3. Build candidates: `rotate` (correct), `mirror` (mirror then rotate),
//!    `similar` (another shape, rotated), and for complex mode `mirror2`.
//! 4. Shuffle and record where `rotate` landed.
//! 5. Emit to the render and metadata sinks (`emit`).
//!
//! Draw order is fixed, so a seed fully determines every instance of a run.

mod emit;
mod similar;

pub use emit::{
    emit, EmitError, Figure, FigureStyle, JsonlSink, MetadataSink, Panel, PuzzleRecord,
    RenderSink, ORIGINAL_TITLE,
};
pub use similar::{pick_similar, SimilarityMapping};

use crate::catalog::{Catalog, UnknownShapeError};
use crate::cfg::GeneratorCfg;
use crate::difficulty::Difficulty;
use crate::geometry::{build_vertices, VertexSet};
use crate::retry::until_distinct;
use crate::rng::RandomSources;
use crate::transform::Operation;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a candidate; `Rotate` is the correct answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Rotate,
    Mirror,
    Mirror2,
    Similar,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Rotate => "rotate",
            Tag::Mirror => "mirror",
            Tag::Mirror2 => "mirror2",
            Tag::Similar => "similar",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct Candidate {
    pub tag: Tag,
    pub vertices: VertexSet,
}

/// Option letter for a zero-based position: 0 → 'A', 1 → 'B', ...
#[inline]
pub fn option_letter(index: usize) -> char {
    debug_assert!(index < 26);
    char::from(b'A' + index as u8)
}

#[inline]
pub fn option_title(index: usize) -> String {
    format!("Option {}", option_letter(index))
}

/// One generated puzzle, consumed by the sinks and then dropped.
///
/// Invariant: exactly one candidate is tagged `Rotate`, at `answer_index`.
#[derive(Clone, Debug)]
pub struct PuzzleInstance {
    pub index: usize,
    pub difficulty: Difficulty,
    pub shape: String,
    pub original: VertexSet,
    pub candidates: Vec<Candidate>,
    pub answer_index: usize,
}

impl PuzzleInstance {
    #[inline]
    pub fn answer(&self) -> char {
        option_letter(self.answer_index)
    }

    pub fn candidate_order(&self) -> Vec<Tag> {
        self.candidates.iter().map(|c| c.tag).collect()
    }

    /// `<shape>_<index>.<extension>`
    pub fn filename(&self, extension: &str) -> String {
        format!("{}_{}.{}", self.shape, self.index, extension)
    }

    pub fn record(&self, filename: String) -> PuzzleRecord {
        PuzzleRecord {
            filename,
            difficulty: self.difficulty,
            shape: self.shape.clone(),
            candidate_order: self.candidate_order(),
            answer: self.answer().to_string(),
        }
    }
}

#[derive(Debug)]
pub enum GenerateError {
    UnknownShape(UnknownShapeError),
    Emit(EmitError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownShape(e) => e.fmt(f),
            Self::Emit(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownShape(e) => Some(e),
            Self::Emit(e) => Some(e),
        }
    }
}

impl From<UnknownShapeError> for GenerateError {
    fn from(e: UnknownShapeError) -> Self {
        Self::UnknownShape(e)
    }
}

impl From<EmitError> for GenerateError {
    fn from(e: EmitError) -> Self {
        Self::Emit(e)
    }
}

/// Sequential puzzle generator over a fixed catalog.
///
/// Owns the random sources; the catalog and derived similarity mapping are
/// read-only. Instances are produced one at a time, in call order.
pub struct Generator<'c> {
    catalog: &'c Catalog,
    similar: SimilarityMapping,
    cfg: GeneratorCfg,
    rng: RandomSources,
}

impl<'c> Generator<'c> {
    pub fn new(catalog: &'c Catalog, cfg: GeneratorCfg, rng: RandomSources) -> Self {
        Self {
            catalog,
            similar: SimilarityMapping::from_catalog(catalog),
            cfg,
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn cfg(&self) -> &GeneratorCfg {
        &self.cfg
    }

    /// Pick a shape for `difficulty` and build a full instance.
    pub fn generate(
        &mut self,
        index: usize,
        difficulty: Difficulty,
    ) -> Result<PuzzleInstance, UnknownShapeError> {
        let shape = {
            let pool = self.catalog.shapes_for(difficulty);
            // Catalog construction guarantees a non-empty pool.
            pool[self.rng.general.gen_range(0..pool.len())].to_string()
        };
        self.generate_for_shape(index, difficulty, &shape)
    }

    /// Build an instance around a given shape (skips shape selection).
    pub fn generate_for_shape(
        &mut self,
        index: usize,
        difficulty: Difficulty,
        shape: &str,
    ) -> Result<PuzzleInstance, UnknownShapeError> {
        let original = build_vertices(self.catalog, shape, self.cfg.cube_size)?;

        let correct = self.distinct(Operation::rotate(difficulty), &original);
        let mirrored = self.distinct(Operation::mirror_rotate(difficulty), &original);
        let similar = pick_similar(
            self.catalog,
            &self.similar,
            shape,
            &original,
            &self.cfg,
            difficulty,
            &mut self.rng,
        )
        .unwrap_or_else(|| {
            tracing::debug!(shape, "no similar shape accepted; reusing mirror candidate");
            mirrored.clone()
        });

        let mut candidates = vec![
            Candidate {
                tag: Tag::Rotate,
                vertices: correct,
            },
            Candidate {
                tag: Tag::Mirror,
                vertices: mirrored,
            },
            Candidate {
                tag: Tag::Similar,
                vertices: similar,
            },
        ];
        if difficulty == Difficulty::Complex {
            let mirrored2 = self.distinct(Operation::mirror_rotate(difficulty), &original);
            candidates.push(Candidate {
                tag: Tag::Mirror2,
                vertices: mirrored2,
            });
        }

        candidates.shuffle(&mut self.rng.general);
        let answer_index = candidates
            .iter()
            .position(|c| c.tag == Tag::Rotate)
            .unwrap_or_default();

        let instance = PuzzleInstance {
            index,
            difficulty,
            shape: shape.to_string(),
            original,
            candidates,
            answer_index,
        };
        tracing::debug!(
            index,
            shape,
            answer = %instance.answer(),
            order = ?instance.candidate_order(),
            "puzzle generated"
        );
        Ok(instance)
    }

    /// Generate and emit `count` instances with indices `0..count`.
    pub fn run<R, M>(
        &mut self,
        difficulty: Difficulty,
        count: usize,
        style: &FigureStyle,
        render: &mut R,
        metadata: &mut M,
    ) -> Result<Vec<PuzzleRecord>, GenerateError>
    where
        R: RenderSink + ?Sized,
        M: MetadataSink + ?Sized,
    {
        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            let instance = self.generate(index, difficulty)?;
            records.push(emit(&instance, style, render, metadata)?);
        }
        Ok(records)
    }

    fn distinct(&mut self, op: Operation, original: &VertexSet) -> VertexSet {
        until_distinct(
            &op,
            original,
            self.cfg.max_attempts,
            self.cfg.atol,
            &mut self.rng,
        )
    }
}
