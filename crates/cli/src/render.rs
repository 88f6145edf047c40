//! SVG rendering sink.
//!
//! Orthographic projection at a fixed 3D view (elevation 30°, azimuth −60°).
//! Each panel is fitted to an equal-aspect box around its own vertices; cube
//! faces are painted far-to-near with the fill colour and black edges.
//! Layout: two rows with height ratios 0.5 : 1, the original spanning the top
//! row and one column per option below.

use mrt::puzzle::{Figure, FigureStyle, Panel, RenderSink};
use nalgebra::{Vector2, Vector3};
use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Corner indices of the six faces of a cube (see `mrt::geometry::cube_vertices`).
const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [1, 2, 6, 5],
    [0, 3, 7, 4],
];

const TITLE_PX: f64 = 28.0;
const TOP_ROW_SHARE: f64 = 0.5 / 1.5;
/// Widest projected extent of a unit box.
const UNIT_BOX_SPAN: f64 = 1.732_050_808;

#[derive(Clone, Copy, Debug)]
pub struct View {
    pub elev_deg: f64,
    pub azim_deg: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            elev_deg: 30.0,
            azim_deg: -60.0,
        }
    }
}

impl View {
    /// Screen right, screen up, and the direction toward the viewer.
    pub fn basis(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        let (e, a) = (self.elev_deg.to_radians(), self.azim_deg.to_radians());
        let toward = Vector3::new(e.cos() * a.cos(), e.cos() * a.sin(), e.sin());
        let right = Vector3::new(-a.sin(), a.cos(), 0.0);
        let up = Vector3::new(-e.sin() * a.cos(), -e.sin() * a.sin(), e.cos());
        (right, up, toward)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// Writes `<outdir>/<figure.filename>` as SVG.
pub struct SvgRenderer {
    outdir: PathBuf,
    view: View,
}

impl SvgRenderer {
    pub fn new(outdir: impl AsRef<Path>) -> Self {
        Self {
            outdir: outdir.as_ref().to_path_buf(),
            view: View::default(),
        }
    }
}

impl RenderSink for SvgRenderer {
    fn extension(&self) -> &str {
        "svg"
    }

    fn render(&mut self, figure: &Figure<'_>) -> io::Result<()> {
        let svg = figure_svg(figure, &self.view)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(self.outdir.join(figure.filename), svg)
    }
}

pub fn figure_svg(figure: &Figure<'_>, view: &View) -> Result<String, fmt::Error> {
    let style = figure.style;
    let (w, h) = style.size_px();
    let (w, h) = (w as f64, h as f64);
    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

    let top = h * TOP_ROW_SHARE;
    panel_svg(&mut out, &figure.original, Rect { x: 0.0, y: 0.0, w, h: top }, style, view)?;
    let n = figure.options.len().max(1) as f64;
    let col = w / n;
    for (i, panel) in figure.options.iter().enumerate() {
        let rect = Rect {
            x: i as f64 * col,
            y: top,
            w: col,
            h: h - top,
        };
        panel_svg(&mut out, panel, rect, style, view)?;
    }
    writeln!(out, "</svg>")?;
    Ok(out)
}

fn panel_svg(
    out: &mut String,
    panel: &Panel<'_>,
    rect: Rect,
    style: &FigureStyle,
    view: &View,
) -> fmt::Result {
    let cx = rect.x + rect.w / 2.0;
    writeln!(
        out,
        r#"<text x="{cx:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="16">{}</text>"#,
        rect.y + TITLE_PX * 0.7,
        escape(panel.title)
    )?;
    let Some((lo, hi)) = panel.vertices.bounds() else {
        return Ok(());
    };
    let mid = (lo + hi) / 2.0;
    let range = (hi - lo).max();
    let range = if range > 0.0 { range } else { 1.0 };

    let plot_h = (rect.h - TITLE_PX).max(1.0);
    let scale = 0.9 * rect.w.min(plot_h) / UNIT_BOX_SPAN;
    let center = Vector2::new(cx, rect.y + TITLE_PX + plot_h / 2.0);
    let (right, up, toward) = view.basis();
    let project = |p: &Vector3<f64>| -> (Vector2<f64>, f64) {
        let q = (p - mid) / range;
        let screen = Vector2::new(q.dot(&right), -q.dot(&up)) * scale + center;
        (screen, q.dot(&toward))
    };

    if !style.hide_axes {
        let frame = mrt::geometry::cube_vertices(Vector3::repeat(-0.5), 1.0);
        for [a, b] in FRAME_EDGES {
            let (pa, _) = project(&(frame[a] * range + mid));
            let (pb, _) = project(&(frame[b] * range + mid));
            writeln!(
                out,
                r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#d0d0d0" stroke-width="1"/>"##,
                pa.x, pa.y, pb.x, pb.y
            )?;
        }
    }

    let mut faces: Vec<(f64, [Vector2<f64>; 4])> = Vec::with_capacity(panel.vertices.cube_count() * 6);
    for cube in panel.vertices.cubes() {
        for face in FACES {
            let mut pts = [Vector2::zeros(); 4];
            let mut depth = 0.0;
            for (k, &corner) in face.iter().enumerate() {
                let (s, d) = project(&cube[corner]);
                pts[k] = s;
                depth += d / 4.0;
            }
            faces.push((depth, pts));
        }
    }
    faces.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let fill = escape(&style.facecolor);
    for (_, pts) in &faces {
        write!(out, r#"<polygon points=""#)?;
        for (k, p) in pts.iter().enumerate() {
            if k > 0 {
                out.push(' ');
            }
            write!(out, "{:.2},{:.2}", p.x, p.y)?;
        }
        writeln!(
            out,
            r#"" fill="{fill}" stroke="black" stroke-width="1" stroke-linejoin="round"/>"#
        )?;
    }
    Ok(())
}

/// The 12 edges of a cube in `cube_vertices` corner order.
const FRAME_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
