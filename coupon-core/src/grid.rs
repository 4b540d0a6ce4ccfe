use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Gap, LayoutConfig, Margins, Size};

/// Most labels a single row or column may hold. A fit that would exceed it
/// is reported as infeasible rather than truncated.
pub const MAX_LABELS_PER_AXIS: u32 = 10_000;

/// How many whole labels fit on a sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridResult {
    pub columns: u32,
    pub rows: u32,
    pub capacity: usize,
    /// False when the usable area is empty or either count is zero.
    pub feasible: bool,
}

impl GridResult {
    pub const INFEASIBLE: GridResult = GridResult {
        columns: 0,
        rows: 0,
        capacity: 0,
        feasible: false,
    };

    fn from_counts(columns: u32, rows: u32) -> Self {
        GridResult {
            columns,
            rows,
            capacity: columns as usize * rows as usize,
            feasible: columns > 0 && rows > 0,
        }
    }
}

/// Fit the largest label grid inside the area left by `margins`.
///
/// `n` labels need only `n - 1` interior gaps, so one gap is added to the
/// usable span before dividing by the label pitch.
pub fn fit(sheet: Size, label: Size, gap: Gap, margins: &Margins) -> GridResult {
    let usable_width = sheet.width - margins.left - margins.right;
    let usable_height = sheet.height - margins.top - margins.bottom;
    if usable_width <= 0.0 || usable_height <= 0.0 {
        debug!(usable_width, usable_height, "no usable area on sheet");
        return GridResult::INFEASIBLE;
    }

    let columns = fit_axis(usable_width, label.width, gap.x);
    let rows = fit_axis(usable_height, label.height, gap.y);
    let result = GridResult::from_counts(columns, rows);
    debug!(
        columns,
        rows,
        capacity = result.capacity,
        feasible = result.feasible,
        "grid fitted"
    );
    result
}

impl LayoutConfig {
    /// Grid for the margins currently stored in the config.
    pub fn grid(&self) -> GridResult {
        fit(self.sheet, self.label, self.gap, &self.margins)
    }
}

/// Labels of size `label` separated by `gap` that fit in `span`, or 0 when
/// the count would pass [`MAX_LABELS_PER_AXIS`].
pub(crate) fn fit_axis(span: f64, label: f64, gap: f64) -> u32 {
    let pitch = label + gap;
    if span <= 0.0 || pitch <= 0.0 {
        return 0;
    }
    let count = ((span + gap) / pitch).floor();
    if !(0.0..=f64::from(MAX_LABELS_PER_AXIS)).contains(&count) {
        debug!(span, label, gap, count, "axis count out of range");
        return 0;
    }
    count as u32
}

/// Length covered by `count` labels and the gaps between them.
pub(crate) fn used_extent(count: u32, label: f64, gap: f64) -> f64 {
    let count = f64::from(count);
    count * label + (count - 1.0).max(0.0) * gap
}

#[cfg(test)]
mod tests {
    use super::*;

    const A3: Size = Size::new(297.0, 420.0);

    #[test]
    fn a3_sheet_holds_seven_by_five() {
        let grid = fit(A3, Size::new(42.0, 75.0), Gap::ZERO, &Margins::ZERO);
        assert_eq!(grid.columns, 7);
        assert_eq!(grid.rows, 5);
        assert_eq!(grid.capacity, 35);
        assert!(grid.feasible);
    }

    #[test]
    fn label_wider_than_sheet_is_infeasible() {
        let grid = fit(A3, Size::new(300.0, 75.0), Gap::ZERO, &Margins::ZERO);
        assert_eq!(grid.columns, 0);
        assert_eq!(grid.capacity, 0);
        assert!(!grid.feasible);
    }

    #[test]
    fn margins_eating_the_sheet_are_infeasible() {
        let margins = Margins::symmetric(150.0, 0.0);
        let grid = fit(A3, Size::new(42.0, 75.0), Gap::ZERO, &margins);
        assert_eq!(grid, GridResult::INFEASIBLE);
    }

    #[test]
    fn gap_counts_only_between_labels() {
        // 3 * 90 + 2 * 10 = 290 fits into 290 exactly; a 4th would need 390.
        let grid = fit(
            Size::new(290.0, 100.0),
            Size::new(90.0, 100.0),
            Gap::new(10.0, 0.0),
            &Margins::ZERO,
        );
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.rows, 1);
    }

    #[test]
    fn fitted_counts_are_maximal() {
        let cases = [
            (297.0, 42.0, 0.0),
            (297.0, 42.0, 3.0),
            (420.0, 75.0, 5.5),
            (210.0, 63.0, 2.0),
            (612.0, 144.0, 9.0),
            (100.0, 100.0, 4.0),
        ];
        for (span, label, gap) in cases {
            let n = fit_axis(span, label, gap);
            assert!(
                used_extent(n, label, gap) <= span,
                "{n} labels overflow {span}"
            );
            assert!(
                used_extent(n + 1, label, gap) > span,
                "{} labels would still fit in {span}",
                n + 1
            );
        }
    }

    #[test]
    fn counts_past_the_axis_limit_are_infeasible() {
        let grid = fit(
            Size::new(1000.0, 10.0),
            Size::new(1e-7, 10.0),
            Gap::ZERO,
            &Margins::ZERO,
        );
        assert_eq!(grid.columns, 0);
        assert_eq!(grid.capacity, 0);
        assert!(!grid.feasible);

        assert_eq!(fit_axis(10_000.0, 1.0, 0.0), MAX_LABELS_PER_AXIS);
        assert_eq!(fit_axis(10_001.0, 1.0, 0.0), 0);
    }

    #[test]
    fn config_grid_uses_stored_margins() {
        let config = LayoutConfig::new(A3, Size::new(42.0, 75.0))
            .unwrap()
            .with_margins(Margins::symmetric(0.0, 30.0))
            .unwrap();
        assert_eq!(config.grid().rows, 4);
    }

    #[test]
    fn used_extent_has_no_gap_for_a_single_label() {
        assert_eq!(used_extent(0, 42.0, 3.0), 0.0);
        assert_eq!(used_extent(1, 42.0, 3.0), 42.0);
        assert_eq!(used_extent(3, 42.0, 3.0), 132.0);
    }
}
