use coupon_core::{LayoutPlan, Sheet};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use serde::Serialize;

pub mod error;
pub mod job;
pub mod pdf;
pub mod spec;
pub mod svg;

pub use error::SheetError;
pub use job::JobMeta;
pub use spec::{JobSpec, Record, load_records};

/// Caption font size in points.
pub const CAPTION_FONT_PT: f64 = 18.0;
/// Space between the outer end of the trim ticks and the caption.
const CAPTION_PAD_PT: f64 = 4.0;

/// What a renderer needs to draw one sheet. Label content is drawn by
/// other collaborators; proofs only show the occupied cells.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SheetProof {
    pub number: usize,
    pub labels: usize,
    pub caption: String,
}

impl SheetProof {
    pub fn from_sheet<T>(
        sheet: &Sheet<'_, T>,
        meta: &JobMeta,
        total_labels: usize,
        total_sheets: usize,
    ) -> Self {
        SheetProof {
            number: sheet.number(),
            labels: sheet.len(),
            caption: meta.caption(total_labels, sheet.number(), total_sheets),
        }
    }
}

/// Horizontal alignment of a caption against its anchor x.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Align {
    Start,
    End,
}

/// Caption baseline in sheet coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CaptionAnchor {
    pub x: f64,
    pub y: f64,
    pub align: Align,
}

/// Baselines for the caption above and below the grid. The top caption
/// ends at the grid's right edge, the bottom one starts at its left edge.
/// A caption that would leave the sheet is dropped.
pub(crate) fn caption_anchors(plan: &LayoutPlan) -> Vec<CaptionAnchor> {
    let Some(bounds) = plan.grid_bounds() else {
        return Vec::new();
    };
    let clearance = coupon_core::trim::TRIM_OFFSET_PT
        + coupon_core::trim::TICK_LENGTH_PT
        + CAPTION_PAD_PT;
    let sheet_height = plan.config().sheet.height;
    let mut anchors = Vec::with_capacity(2);
    let above = bounds.y + bounds.height + clearance;
    if above + CAPTION_FONT_PT <= sheet_height {
        anchors.push(CaptionAnchor {
            x: bounds.x + bounds.width,
            y: above,
            align: Align::End,
        });
    }
    let below = bounds.y - clearance - CAPTION_FONT_PT;
    if below >= 0.0 {
        anchors.push(CaptionAnchor {
            x: bounds.x,
            y: below,
            align: Align::Start,
        });
    }
    anchors
}

// Shared PNG encoder: RGBA -> PNG bytes (deterministic for same input)
pub fn encode_rgba_to_png_bytes(
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_filter(FilterType::NoFilter);
        enc.set_compression(Compression::Default);
        {
            let mut writer = enc.write_header()?;
            writer.write_image_data(rgba)?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coupon_core::{LayoutConfig, Margins, Size};

    #[test]
    fn png_encoding_is_deterministic() {
        let rgba: Vec<u8> = (0..4 * 3 * 2).map(|i| (i * 11) as u8).collect();
        let a = encode_rgba_to_png_bytes(3, 2, &rgba).unwrap();
        let b = encode_rgba_to_png_bytes(3, 2, &rgba).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn png_rejects_short_buffer() {
        assert!(encode_rgba_to_png_bytes(4, 4, &[0; 8]).is_err());
    }

    #[test]
    fn captions_need_room_outside_the_ticks() {
        let roomy = LayoutConfig::new(Size::new(200.0, 300.0), Size::new(100.0, 100.0))
            .unwrap()
            .with_margins(Margins::symmetric(0.0, 50.0))
            .unwrap();
        let plan = LayoutPlan::new(roomy).unwrap();
        let anchors = caption_anchors(&plan);
        assert_eq!(anchors.len(), 2);
        assert_eq!((anchors[0].x, anchors[0].align), (200.0, Align::End));
        assert_eq!((anchors[1].x, anchors[1].align), (0.0, Align::Start));
        assert!(anchors[0].y > 250.0 && anchors[1].y < 50.0);

        let tight = LayoutConfig::new(Size::new(200.0, 200.0), Size::new(100.0, 100.0))
            .unwrap()
            .with_margins(Margins::ZERO)
            .unwrap();
        let plan = LayoutPlan::new(tight).unwrap();
        assert!(caption_anchors(&plan).is_empty());
    }

    #[test]
    fn proof_numbers_sheets_from_one() {
        let records = [1, 2, 3, 4, 5];
        let sheets = coupon_core::paginate(&records, 2).unwrap();
        let meta = JobMeta {
            code: "X1".into(),
            lot: "2".into(),
            job: "7".into(),
        };
        let proof = SheetProof::from_sheet(&sheets[2], &meta, records.len(), sheets.len());
        assert_eq!(proof.number, 3);
        assert_eq!(proof.labels, 1);
        assert!(proof.caption.ends_with("Sheet 3/3"));
    }
}
