use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LayoutError;

/// One physical sheet's share of the label sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sheet<'a, T> {
    pub labels: &'a [T],
    /// Zero-based sheet index, continuing across jobs when a cursor is used.
    pub index: usize,
    /// Labels placed on all earlier sheets.
    pub starting_label_offset: usize,
}

impl<T> Sheet<'_, T> {
    /// One-based sheet number for "Sheet i/N" captions.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Running position when several jobs are printed back to back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCursor {
    pub sheet_index: usize,
    pub label_offset: usize,
}

/// Sheets needed for `label_count` labels at `capacity` per sheet.
pub fn sheet_count(label_count: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    label_count.div_ceil(capacity)
}

/// Split `labels` into consecutive sheets of at most `capacity` labels.
pub fn paginate<T>(labels: &[T], capacity: usize) -> Result<Vec<Sheet<'_, T>>, LayoutError> {
    paginate_from(labels, capacity, SheetCursor::default()).map(|(sheets, _)| sheets)
}

/// Like [`paginate`], numbering sheets from `cursor`. Returns the cursor
/// positioned after the last sheet.
pub fn paginate_from<T>(
    labels: &[T],
    capacity: usize,
    cursor: SheetCursor,
) -> Result<(Vec<Sheet<'_, T>>, SheetCursor), LayoutError> {
    if capacity == 0 {
        return Err(LayoutError::ZeroCapacity);
    }

    let sheets: Vec<Sheet<'_, T>> = labels
        .chunks(capacity)
        .enumerate()
        .map(|(i, chunk)| Sheet {
            labels: chunk,
            index: cursor.sheet_index + i,
            starting_label_offset: cursor.label_offset + i * capacity,
        })
        .collect();

    let next = SheetCursor {
        sheet_index: cursor.sheet_index + sheets.len(),
        label_offset: cursor.label_offset + labels.len(),
    };
    debug!(
        labels = labels.len(),
        capacity,
        sheets = sheets.len(),
        "paginated"
    );
    Ok((sheets, next))
}
