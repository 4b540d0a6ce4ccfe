use std::path::PathBuf;

use coupon_core::LayoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("job file is missing `{0}`")]
    MissingField(&'static str),

    #[error("records must be a JSON array of objects; entry {index} is not an object")]
    RecordShape { index: usize },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}
