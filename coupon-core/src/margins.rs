use tracing::debug;

use crate::config::{LayoutConfig, Margins};
use crate::grid::{fit, used_extent};

/// Fraction of the sheet dimension taken off each centered margin.
///
/// Compensates for printer drift and sub-point rounding so the outermost
/// labels are not clipped at the physical sheet edge. Empirically tuned on
/// production presses; keep it as is.
pub const SHRINK_EPSILON: f64 = 0.00008;

/// Margins that center the largest grid the bare sheet can hold.
///
/// The grid is sized with zero margins, the leftover space is split evenly
/// between opposite edges and then shrunk by [`SHRINK_EPSILON`] of the sheet
/// dimension. Margins are clamped at zero after the shrink, so a grid that
/// fills the sheet exactly gets zero margins instead of slightly negative
/// ones. Existing margins on `config` are ignored, which keeps the solver
/// idempotent.
pub fn solve(config: &LayoutConfig) -> Margins {
    let grid = fit(config.sheet, config.label, config.gap, &Margins::ZERO);
    let used_width = used_extent(grid.columns, config.label.width, config.gap.x);
    let used_height = used_extent(grid.rows, config.label.height, config.gap.y);

    let horizontal = centered(config.sheet.width, used_width);
    let vertical = centered(config.sheet.height, used_height);
    debug!(
        columns = grid.columns,
        rows = grid.rows,
        horizontal,
        vertical,
        "auto margins solved"
    );
    Margins::symmetric(horizontal, vertical)
}

fn centered(sheet: f64, used: f64) -> f64 {
    let base = ((sheet - used) / 2.0).max(0.0);
    (base - sheet * SHRINK_EPSILON).max(0.0)
}
