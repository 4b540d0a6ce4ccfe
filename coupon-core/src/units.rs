//! Conversion from user-facing units to points. The layout functions never
//! call these; callers convert once before building a `LayoutConfig`.

use serde::{Deserialize, Serialize};

use crate::config::Size;

/// Points per millimeter.
pub const MM_TO_PT: f64 = 2.834645669;
/// Points per inch.
pub const IN_TO_PT: f64 = 72.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pt,
    #[default]
    Mm,
    Cm,
    In,
}

impl Unit {
    pub fn to_points(self, value: f64) -> f64 {
        match self {
            Unit::Pt => value,
            Unit::Mm => value * MM_TO_PT,
            Unit::Cm => value * 10.0 * MM_TO_PT,
            Unit::In => value * IN_TO_PT,
        }
    }

    pub fn size_to_points(self, size: Size) -> Size {
        Size::new(self.to_points(size.width), self.to_points(size.height))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Put the long edge vertical for portrait, horizontal for landscape.
    pub fn orient(self, size: Size) -> Size {
        let (short, long) = if size.width <= size.height {
            (size.width, size.height)
        } else {
            (size.height, size.width)
        };
        match self {
            Orientation::Portrait => Size::new(short, long),
            Orientation::Landscape => Size::new(long, short),
        }
    }
}

/// Common stock sizes, stored portrait.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Tabloid,
}

impl PaperSize {
    pub fn size_pt(self) -> Size {
        match self {
            PaperSize::A3 => Unit::Mm.size_to_points(Size::new(297.0, 420.0)),
            PaperSize::A4 => Unit::Mm.size_to_points(Size::new(210.0, 297.0)),
            PaperSize::A5 => Unit::Mm.size_to_points(Size::new(148.0, 210.0)),
            PaperSize::Letter => Unit::In.size_to_points(Size::new(8.5, 11.0)),
            PaperSize::Tabloid => Unit::In.size_to_points(Size::new(11.0, 17.0)),
        }
    }
}
