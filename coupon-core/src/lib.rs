//! Layout math for printing repeated rectangular labels on fixed-size sheets.
//!
//! Everything in this crate is a pure function over plain values: the same
//! inputs always produce bit-identical coordinates. Unit conversion,
//! rendering and file handling belong to the callers.

pub mod config;
pub mod error;
pub mod grid;
pub mod margins;
pub mod paginate;
pub mod plan;
pub mod trim;
pub mod units;

pub use config::{Gap, LayoutConfig, Margins, Size};
pub use error::LayoutError;
pub use grid::{GridResult, MAX_LABELS_PER_AXIS, fit};
pub use margins::{SHRINK_EPSILON, solve};
pub use paginate::{Sheet, SheetCursor, paginate, paginate_from, sheet_count};
pub use plan::{LayoutPlan, Rect};
pub use trim::{Edge, MarkKind, TrimMark, TrimStyle, generate, generate_with};
pub use units::{Orientation, PaperSize, Unit};
