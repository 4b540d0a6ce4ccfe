use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::grid::{GridResult, used_extent};
use crate::paginate::{Sheet, SheetCursor, paginate_from};
use crate::trim::{self, TrimMark};

/// Axis-aligned rectangle in sheet coordinates (origin bottom-left).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Resolved margins, grid and trim marks for one configuration.
///
/// Built once per configuration change and shared by every sheet of the
/// job; sheets differ only in which labels they carry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutPlan {
    config: LayoutConfig,
    grid: GridResult,
    trim_marks: Vec<TrimMark>,
}

impl LayoutPlan {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        let config = config.resolved()?;
        let grid = config.grid();
        if !grid.feasible {
            warn!(
                sheet_width = config.sheet.width,
                sheet_height = config.sheet.height,
                label_width = config.label.width,
                label_height = config.label.height,
                "label grid does not fit on sheet"
            );
        }
        let trim_marks = trim::generate(&config);
        debug!(
            capacity = grid.capacity,
            marks = trim_marks.len(),
            "layout planned"
        );
        Ok(LayoutPlan {
            config,
            grid,
            trim_marks,
        })
    }

    /// Configuration with margins filled in.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn grid(&self) -> GridResult {
        self.grid
    }

    pub fn trim_marks(&self) -> &[TrimMark] {
        &self.trim_marks
    }

    pub fn is_feasible(&self) -> bool {
        self.grid.feasible
    }

    pub fn capacity(&self) -> usize {
        self.grid.capacity
    }

    fn ensure_feasible(&self) -> Result<(), LayoutError> {
        if self.grid.feasible {
            Ok(())
        } else {
            Err(LayoutError::Infeasible {
                sheet: self.config.sheet,
                label: self.config.label,
            })
        }
    }

    pub fn paginate<'a, T>(&self, labels: &'a [T]) -> Result<Vec<Sheet<'a, T>>, LayoutError> {
        self.paginate_from(labels, SheetCursor::default())
            .map(|(sheets, _)| sheets)
    }

    /// Paginate another job in the same run, continuing sheet numbering.
    pub fn paginate_from<'a, T>(
        &self,
        labels: &'a [T],
        cursor: SheetCursor,
    ) -> Result<(Vec<Sheet<'a, T>>, SheetCursor), LayoutError> {
        self.ensure_feasible()?;
        paginate_from(labels, self.grid.capacity, cursor)
    }

    /// Packed grid rectangle, or `None` when nothing fits.
    pub fn grid_bounds(&self) -> Option<Rect> {
        if !self.grid.feasible {
            return None;
        }
        let c = &self.config;
        let width = used_extent(self.grid.columns, c.label.width, c.gap.x);
        let height = used_extent(self.grid.rows, c.label.height, c.gap.y);
        Some(Rect {
            x: c.margins.left,
            y: c.sheet.height - c.margins.top - height,
            width,
            height,
        })
    }

    /// Cell of the `slot`-th label on a sheet, filled left to right and top
    /// to bottom.
    pub fn slot_rect(&self, slot: usize) -> Option<Rect> {
        if slot >= self.grid.capacity {
            return None;
        }
        let columns = self.grid.columns as usize;
        let (row, col) = (slot / columns, slot % columns);
        let c = &self.config;
        let x = c.margins.left + col as f64 * (c.label.width + c.gap.x);
        let top = c.sheet.height - c.margins.top - row as f64 * (c.label.height + c.gap.y);
        Some(Rect {
            x,
            y: top - c.label.height,
            width: c.label.width,
            height: c.label.height,
        })
    }

    /// Bottom-left corner of the `slot`-th label cell.
    pub fn slot_origin(&self, slot: usize) -> Option<(f64, f64)> {
        self.slot_rect(slot).map(|r| (r.x, r.y))
    }
}
