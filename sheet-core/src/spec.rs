use std::fs;
use std::path::Path;

use coupon_core::{Gap, LayoutConfig, Margins, Orientation, PaperSize, Size, Unit};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::SheetError;
use crate::job::JobMeta;

/// One label's fields. Only the content renderer looks inside.
pub type Record = Map<String, Value>;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Dims {
    pub w: Option<f64>,
    pub h: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct GapSpec {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct MarginSpec {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

/// Job description as written by hand or exported by the front end.
///
/// Paper and margins are in `unit` (millimeters when absent). Label size
/// and gaps are in `label_unit`, falling back to `unit`. Supplying
/// `margins` pins them; otherwise they are centered automatically.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JobSpec {
    pub unit: Option<Unit>,
    pub label_unit: Option<Unit>,
    pub preset: Option<PaperSize>,
    pub paper: Option<Dims>,
    pub orientation: Option<Orientation>,
    pub label: Option<Dims>,
    pub gap: Option<GapSpec>,
    pub margins: Option<MarginSpec>,
    pub code: Option<String>,
    pub lot: Option<String>,
    pub job: Option<String>,
}

impl JobSpec {
    pub fn from_path(path: &Path) -> Result<Self, SheetError> {
        let txt = read(path)?;
        let spec: JobSpec = serde_json::from_str(&txt).map_err(|source| SheetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "job file loaded");
        Ok(spec)
    }

    /// Convert to points and validate. Absent gaps mean zero.
    pub fn to_layout_config(&self) -> Result<LayoutConfig, SheetError> {
        let unit = self.unit.unwrap_or_default();
        let label_unit = self.label_unit.unwrap_or(unit);
        let sheet = match (self.preset, self.paper) {
            (Some(preset), _) => preset.size_pt(),
            (None, Some(paper)) => unit.size_to_points(Size::new(
                paper.w.ok_or(SheetError::MissingField("paper.w"))?,
                paper.h.ok_or(SheetError::MissingField("paper.h"))?,
            )),
            (None, None) => return Err(SheetError::MissingField("paper")),
        };
        let sheet = match self.orientation {
            Some(orientation) => orientation.orient(sheet),
            None => sheet,
        };

        let label = self.label.ok_or(SheetError::MissingField("label"))?;
        let label = label_unit.size_to_points(Size::new(
            label.w.ok_or(SheetError::MissingField("label.w"))?,
            label.h.ok_or(SheetError::MissingField("label.h"))?,
        ));

        let gap = self.gap.unwrap_or_default();
        let gap = Gap::new(
            label_unit.to_points(gap.x.unwrap_or(0.0)),
            label_unit.to_points(gap.y.unwrap_or(0.0)),
        );

        let config = LayoutConfig::new(sheet, label)?.with_gap(gap)?;
        let config = match self.margins {
            Some(m) => config.with_margins(Margins {
                left: unit.to_points(m.left.unwrap_or(0.0)),
                right: unit.to_points(m.right.unwrap_or(0.0)),
                top: unit.to_points(m.top.unwrap_or(0.0)),
                bottom: unit.to_points(m.bottom.unwrap_or(0.0)),
            })?,
            None => config,
        };
        info!(
            sheet_width = config.sheet.width,
            sheet_height = config.sheet.height,
            label_width = config.label.width,
            label_height = config.label.height,
            margin_override = config.margin_override,
            "layout configured"
        );
        Ok(config)
    }

    /// Metadata given in the job file; empty where not set.
    pub fn meta(&self) -> JobMeta {
        JobMeta {
            code: self.code.clone().unwrap_or_default(),
            lot: self.lot.clone().unwrap_or_default(),
            job: self.job.clone().unwrap_or_default(),
        }
    }
}

/// Load a JSON array of objects.
pub fn load_records(path: &Path) -> Result<Vec<Record>, SheetError> {
    let txt = read(path)?;
    let values: Vec<Value> = serde_json::from_str(&txt).map_err(|source| SheetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let records = values
        .into_iter()
        .enumerate()
        .map(|(index, v)| match v {
            Value::Object(map) => Ok(map),
            _ => Err(SheetError::RecordShape { index }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), count = records.len(), "records loaded");
    Ok(records)
}

fn read(path: &Path) -> Result<String, SheetError> {
    fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use coupon_core::LayoutError;

    fn parse(json: &str) -> JobSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn millimeter_job_converts_to_points() {
        let spec = parse(r#"{"paper":{"w":297,"h":420},"label":{"w":42,"h":75}}"#);
        let config = spec.to_layout_config().unwrap();
        assert!((config.sheet.width - 841.8898).abs() < 1e-3);
        assert!((config.label.height - 212.5984).abs() < 1e-3);
        assert_eq!(config.gap, Gap::ZERO);
        assert!(!config.margin_override);
    }

    #[test]
    fn preset_and_orientation() {
        let spec = parse(
            r#"{"unit":"pt","preset":"letter","orientation":"landscape","label":{"w":100,"h":50}}"#,
        );
        let config = spec.to_layout_config().unwrap();
        assert_eq!(config.sheet, Size::new(792.0, 612.0));
        assert_eq!(config.label, Size::new(100.0, 50.0));
    }

    #[test]
    fn label_unit_overrides_paper_unit() {
        let spec = parse(
            r#"{"unit":"pt","paper":{"w":600,"h":800},
                "label_unit":"in","label":{"w":2,"h":1},"gap":{"x":0.5}}"#,
        );
        let config = spec.to_layout_config().unwrap();
        assert_eq!(config.sheet, Size::new(600.0, 800.0));
        assert_eq!(config.label, Size::new(144.0, 72.0));
        assert_eq!(config.gap, Gap::new(36.0, 0.0));
    }

    #[test]
    fn margins_in_file_pin_the_layout() {
        let spec = parse(
            r#"{"unit":"pt","paper":{"w":600,"h":800},"label":{"w":100,"h":100},
                "margins":{"left":10,"top":20}}"#,
        );
        let config = spec.to_layout_config().unwrap();
        assert!(config.margin_override);
        assert_eq!(config.margins.left, 10.0);
        assert_eq!(config.margins.right, 0.0);
        assert_eq!(config.margins.top, 20.0);
    }

    #[test]
    fn missing_label_is_reported() {
        let spec = parse(r#"{"paper":{"w":297,"h":420}}"#);
        assert!(matches!(
            spec.to_layout_config(),
            Err(SheetError::MissingField("label"))
        ));
    }

    #[test]
    fn negative_gap_surfaces_layout_error() {
        let spec = parse(
            r#"{"paper":{"w":297,"h":420},"label":{"w":42,"h":75},"gap":{"x":-1}}"#,
        );
        assert!(matches!(
            spec.to_layout_config(),
            Err(SheetError::Layout(LayoutError::NegativeSpacing { field: "gap.x", .. }))
        ));
    }

    #[test]
    fn meta_defaults_to_empty() {
        let spec = parse(r#"{"code":"ABC","lot":"3"}"#);
        let meta = spec.meta();
        assert_eq!(meta.code, "ABC");
        assert_eq!(meta.lot, "3");
        assert_eq!(meta.job, "");
    }
}
