//! Sink seams: figure rendering and metadata persistence.
//!
//! The core never draws or touches the filesystem itself. `emit` hands one
//! finished instance to a `RenderSink`, then its summary record to a
//! `MetadataSink`; a failure in either propagates.

use super::{PuzzleInstance, Tag};
use crate::difficulty::Difficulty;
use crate::geometry::VertexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

pub const ORIGINAL_TITLE: &str = "Original Shape";

/// Presentation knobs handed through to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureStyle {
    pub facecolor: String,
    /// Suppress panes, grid, and frame (complex mode).
    pub hide_axes: bool,
    /// Figure size in inches (width, height).
    pub size_in: (f64, f64),
    pub dpi: u32,
}

impl FigureStyle {
    pub fn for_difficulty(difficulty: Difficulty, facecolor: impl Into<String>) -> Self {
        let (size_in, hide_axes) = match difficulty {
            Difficulty::Easy => ((6.0, 6.0), false),
            Difficulty::Complex => ((12.0, 8.0), true),
        };
        Self {
            facecolor: facecolor.into(),
            hide_axes,
            size_in,
            dpi: 120,
        }
    }

    /// Pixel size at `dpi`.
    pub fn size_px(&self) -> (u32, u32) {
        let d = self.dpi as f64;
        (
            (self.size_in.0 * d).round() as u32,
            (self.size_in.1 * d).round() as u32,
        )
    }
}

/// One titled view of a vertex set.
#[derive(Clone, Copy, Debug)]
pub struct Panel<'a> {
    pub title: &'a str,
    pub vertices: &'a VertexSet,
}

/// Everything a renderer needs for one puzzle image.
#[derive(Clone, Debug)]
pub struct Figure<'a> {
    pub filename: &'a str,
    pub style: &'a FigureStyle,
    pub original: Panel<'a>,
    /// Shuffled candidates, titled "Option A", "Option B", ...
    pub options: Vec<Panel<'a>>,
}

pub trait RenderSink {
    /// Extension (without dot) of the artifacts this sink produces.
    fn extension(&self) -> &str;
    fn render(&mut self, figure: &Figure<'_>) -> io::Result<()>;
}

pub trait MetadataSink {
    fn record(&mut self, record: &PuzzleRecord) -> io::Result<()>;
}

/// Persisted summary of one instance. Field order is the on-disk key order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub filename: String,
    pub difficulty: Difficulty,
    pub shape: String,
    pub candidate_order: Vec<Tag>,
    pub answer: String,
}

/// One compact JSON object per line.
pub struct JsonlSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetadataSink for JsonlSink<W> {
    fn record(&mut self, record: &PuzzleRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

#[derive(Debug)]
pub enum EmitError {
    Render(io::Error),
    Metadata(io::Error),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(e) => write!(f, "rendering failed: {e}"),
            Self::Metadata(e) => write!(f, "writing metadata failed: {e}"),
        }
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(e) | Self::Metadata(e) => Some(e),
        }
    }
}

/// Render `instance`, then persist its record. Returns the record written.
pub fn emit<R, M>(
    instance: &PuzzleInstance,
    style: &FigureStyle,
    render: &mut R,
    metadata: &mut M,
) -> Result<PuzzleRecord, EmitError>
where
    R: RenderSink + ?Sized,
    M: MetadataSink + ?Sized,
{
    let filename = instance.filename(render.extension());
    let titles: Vec<String> = (0..instance.candidates.len())
        .map(super::option_title)
        .collect();
    {
        let figure = Figure {
            filename: &filename,
            style,
            original: Panel {
                title: ORIGINAL_TITLE,
                vertices: &instance.original,
            },
            options: instance
                .candidates
                .iter()
                .zip(&titles)
                .map(|(c, title)| Panel {
                    title: title.as_str(),
                    vertices: &c.vertices,
                })
                .collect(),
        };
        render.render(&figure).map_err(EmitError::Render)?;
    }

    let record = instance.record(filename);
    metadata.record(&record).map_err(EmitError::Metadata)?;
    Ok(record)
}
