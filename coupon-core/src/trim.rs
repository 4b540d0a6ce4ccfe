//! Cut-guide ticks around the label grid.
//!
//! Coordinates use the PDF convention: origin at the bottom-left corner of
//! the sheet, y growing upward. The grid hangs from the top margin.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::grid::used_extent;

/// Distance between the grid edge and the start of a tick: 1 mm in points.
pub const TRIM_OFFSET_PT: f64 = 2.83465;
/// Tick length: 3 mm in points.
pub const TICK_LENGTH_PT: f64 = 8.5039;
/// Stroke width renderers use for ticks, in points.
pub const STROKE_WIDTH_PT: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    /// Leading edge of the grid and trailing edge of every label.
    Primary,
    /// Far side of an interior gap.
    Secondary,
}

/// Which side of the grid a tick sits beyond.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimMark {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub kind: MarkKind,
    pub edge: Edge,
}

impl TrimMark {
    /// Ticks above and below the grid mark a vertical cut.
    pub fn is_vertical(&self) -> bool {
        matches!(self.edge, Edge::Top | Edge::Bottom)
    }
}

/// Offset and tick length, in the same unit as the layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimStyle {
    pub offset: f64,
    pub length: f64,
}

impl TrimStyle {
    pub const POINTS: TrimStyle = TrimStyle {
        offset: TRIM_OFFSET_PT,
        length: TICK_LENGTH_PT,
    };
}

impl Default for TrimStyle {
    fn default() -> Self {
        TrimStyle::POINTS
    }
}

/// Trim marks for `config` with the point-based default style.
pub fn generate(config: &LayoutConfig) -> Vec<TrimMark> {
    generate_with(config, TrimStyle::POINTS)
}

/// Trim marks for every column and row cut of the grid described by
/// `config`, using its margins as given. An infeasible grid gets no marks.
pub fn generate_with(config: &LayoutConfig, style: TrimStyle) -> Vec<TrimMark> {
    let grid = config.grid();
    if !grid.feasible {
        return Vec::new();
    }
    let (columns, rows) = (grid.columns, grid.rows);
    let label = config.label;
    let gap = config.gap;

    let grid_width = used_extent(columns, label.width, gap.x);
    let grid_height = used_extent(rows, label.height, gap.y);
    let start_x = config.margins.left;
    let start_y = config.sheet.height - config.margins.top - grid_height;
    let end_x = start_x + grid_width;
    let end_y = start_y + grid_height;

    let ticks = Ticks {
        start_x,
        start_y,
        end_x,
        end_y,
        style,
    };

    let mut marks = Vec::with_capacity(2 * (columns as usize + rows as usize + 2) * 2);

    for x in cuts(start_x, columns, label.width, gap.x) {
        ticks.vertical(&mut marks, x, MarkKind::Primary);
    }
    for y in cuts(start_y, rows, label.height, gap.y) {
        ticks.horizontal(&mut marks, y, MarkKind::Primary);
    }

    if gap.x > 0.0 {
        for x in gap_far_edges(start_x, columns, label.width, gap.x) {
            ticks.vertical(&mut marks, x, MarkKind::Secondary);
        }
    }
    if gap.y > 0.0 {
        for y in gap_far_edges(start_y, rows, label.height, gap.y) {
            ticks.horizontal(&mut marks, y, MarkKind::Secondary);
        }
    }

    marks
}

/// `count + 1` cut positions: the grid's leading edge, then each label's
/// trailing edge.
fn cuts(start: f64, count: u32, label: f64, gap: f64) -> impl Iterator<Item = f64> {
    (0..=count).map(move |i| {
        let i = f64::from(i);
        start + i * label + (i - 1.0).max(0.0) * gap
    })
}

/// Far side of each interior gap, where the next label begins.
fn gap_far_edges(start: f64, count: u32, label: f64, gap: f64) -> impl Iterator<Item = f64> {
    (0..count.saturating_sub(1)).map(move |i| {
        let i = f64::from(i);
        let label_end = start + (i + 1.0) * label + i * gap;
        label_end + gap
    })
}

struct Ticks {
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
    style: TrimStyle,
}

impl Ticks {
    fn vertical(&self, out: &mut Vec<TrimMark>, x: f64, kind: MarkKind) {
        let TrimStyle { offset, length } = self.style;
        out.push(TrimMark {
            x1: x,
            y1: self.start_y - offset - length,
            x2: x,
            y2: self.start_y - offset,
            kind,
            edge: Edge::Bottom,
        });
        out.push(TrimMark {
            x1: x,
            y1: self.end_y + offset,
            x2: x,
            y2: self.end_y + offset + length,
            kind,
            edge: Edge::Top,
        });
    }

    fn horizontal(&self, out: &mut Vec<TrimMark>, y: f64, kind: MarkKind) {
        let TrimStyle { offset, length } = self.style;
        out.push(TrimMark {
            x1: self.start_x - offset - length,
            y1: y,
            x2: self.start_x - offset,
            y2: y,
            kind,
            edge: Edge::Left,
        });
        out.push(TrimMark {
            x1: self.end_x + offset,
            y1: y,
            x2: self.end_x + offset + length,
            y2: y,
            kind,
            edge: Edge::Right,
        });
    }
}
