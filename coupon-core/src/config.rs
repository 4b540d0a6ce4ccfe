use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::grid::MAX_LABELS_PER_AXIS;
use crate::margins;

/// Width and height in print units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Spacing between adjacent labels on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Gap {
    pub const ZERO: Gap = Gap { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Gap { x, y }
    }
}

/// Distance between each sheet edge and the label grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub const ZERO: Margins = Margins {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// Same margin on both sides of each axis.
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Margins {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }
}

/// One layout computation's worth of configuration, passed by value.
///
/// All fields share a single unit (points in practice). When
/// `margin_override` is false the margins are owned by the auto-margin
/// solver and get replaced by [`LayoutConfig::resolved`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub sheet: Size,
    pub label: Size,
    #[serde(default)]
    pub gap: Gap,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub margin_override: bool,
}

impl LayoutConfig {
    /// Zero gaps, auto margins.
    pub fn new(sheet: Size, label: Size) -> Result<Self, LayoutError> {
        let config = LayoutConfig {
            sheet,
            label,
            gap: Gap::ZERO,
            margins: Margins::ZERO,
            margin_override: false,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_gap(self, gap: Gap) -> Result<Self, LayoutError> {
        let config = LayoutConfig { gap, ..self };
        config.validate()?;
        Ok(config)
    }

    /// Pin the margins; the auto solver will leave them alone.
    pub fn with_margins(self, margins: Margins) -> Result<Self, LayoutError> {
        let config = LayoutConfig {
            margins,
            margin_override: true,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the caller preconditions. Negative gaps are rejected rather
    /// than clamped.
    pub fn validate(&self) -> Result<(), LayoutError> {
        positive("sheet.width", self.sheet.width)?;
        positive("sheet.height", self.sheet.height)?;
        positive("label.width", self.label.width)?;
        positive("label.height", self.label.height)?;
        non_negative("gap.x", self.gap.x)?;
        non_negative("gap.y", self.gap.y)?;
        not_too_dense("label.width", self.sheet.width, self.label.width)?;
        not_too_dense("label.height", self.sheet.height, self.label.height)?;
        if self.margin_override {
            non_negative("margins.left", self.margins.left)?;
            non_negative("margins.right", self.margins.right)?;
            non_negative("margins.top", self.margins.top)?;
            non_negative("margins.bottom", self.margins.bottom)?;
        }
        Ok(())
    }

    /// Validate and fill in the solver's margins unless they are pinned.
    pub fn resolved(&self) -> Result<Self, LayoutError> {
        self.validate()?;
        if self.margin_override {
            return Ok(*self);
        }
        Ok(LayoutConfig {
            margins: margins::solve(self),
            ..*self
        })
    }

    pub fn usable_width(&self) -> f64 {
        self.sheet.width - self.margins.left - self.margins.right
    }

    pub fn usable_height(&self) -> f64 {
        self.sheet.height - self.margins.top - self.margins.bottom
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), LayoutError> {
    if !value.is_finite() {
        return Err(LayoutError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(LayoutError::NonPositiveDimension { field, value });
    }
    Ok(())
}

/// Gaps and margins only lower the count, so the sheet-to-label ratio
/// bounds every grid this config can produce.
fn not_too_dense(field: &'static str, sheet: f64, label: f64) -> Result<(), LayoutError> {
    if sheet / label > f64::from(MAX_LABELS_PER_AXIS) {
        return Err(LayoutError::TooDense {
            field,
            limit: MAX_LABELS_PER_AXIS,
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), LayoutError> {
    if !value.is_finite() {
        return Err(LayoutError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(LayoutError::NegativeSpacing { field, value });
    }
    Ok(())
}
