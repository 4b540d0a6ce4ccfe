use thiserror::Error;

use crate::config::Size;

/// Caller errors raised by the layout core.
///
/// A grid that does not fit is not an error by itself: `GridResult::feasible`
/// reports it. `Infeasible` only appears when a caller asks to paginate
/// against such a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveDimension { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    NegativeSpacing { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} is too small: more than {limit} labels per row or column")]
    TooDense { field: &'static str, limit: u32 },

    #[error("cannot paginate with a capacity of zero labels per sheet")]
    ZeroCapacity,

    #[error(
        "label {}x{} does not fit on sheet {}x{} with the current gaps and margins",
        .label.width, .label.height, .sheet.width, .sheet.height
    )]
    Infeasible { sheet: Size, label: Size },
}
