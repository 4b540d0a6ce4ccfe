use coupon_core::LayoutPlan;
use coupon_core::trim::STROKE_WIDTH_PT;

use crate::{Align, CAPTION_FONT_PT, SheetProof, caption_anchors};

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Proof image of one sheet: occupied label cells, trim marks and the
/// caption bands. Returns the SVG text and its pixel size.
pub fn build_sheet_svg(plan: &LayoutPlan, proof: &SheetProof, px_per_pt: f64) -> (String, u32, u32) {
    let sheet = plan.config().sheet;
    let w_px = (sheet.width * px_per_pt).ceil() as u32;
    let h_px = (sheet.height * px_per_pt).ceil() as u32;
    // Sheet space has its origin bottom-left; SVG top-left.
    let to_px = |x: f64, y: f64| (x * px_per_pt, (sheet.height - y) * px_per_pt);

    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" fill=\"none\" font-family=\"sans-serif\">\n", w_px, h_px, w_px, h_px));
    s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    for slot in 0..proof.labels {
        let Some(cell) = plan.slot_rect(slot) else {
            break;
        };
        let (x, y) = to_px(cell.x, cell.y + cell.height);
        s.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
            x,
            y,
            cell.width * px_per_pt,
            cell.height * px_per_pt
        ));
    }

    let stroke = (STROKE_WIDTH_PT * px_per_pt).max(1.0);
    for m in plan.trim_marks() {
        let (x1, y1) = to_px(m.x1, m.y1);
        let (x2, y2) = to_px(m.x2, m.y2);
        s.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" stroke=\"#000\" stroke-width=\"{:.2}\"/>\n",
            x1, y1, x2, y2, stroke
        ));
    }

    let font_px = CAPTION_FONT_PT * px_per_pt;
    for anchor in caption_anchors(plan) {
        let (x, y) = to_px(anchor.x, anchor.y);
        let text_anchor = match anchor.align {
            Align::Start => "start",
            Align::End => "end",
        };
        s.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" fill=\"#000\" font-size=\"{:.2}\" font-weight=\"bold\">{}</text>\n",
            x,
            y,
            text_anchor,
            font_px,
            svg_escape(&proof.caption)
        ));
    }
    s.push_str("</svg>\n");
    (s, w_px, h_px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coupon_core::{LayoutConfig, Margins, Size};

    fn plan() -> LayoutPlan {
        let config = LayoutConfig::new(Size::new(200.0, 300.0), Size::new(100.0, 100.0))
            .unwrap()
            .with_margins(Margins::symmetric(0.0, 50.0))
            .unwrap();
        LayoutPlan::new(config).unwrap()
    }

    fn proof(labels: usize) -> SheetProof {
        SheetProof {
            number: 1,
            labels,
            caption: "Lot: 1 | A&B | Qty: 3 | SKU No: 2 | Sheet 1/1".into(),
        }
    }

    #[test]
    fn draws_one_frame_per_occupied_slot() {
        let (svg, w, h) = build_sheet_svg(&plan(), &proof(3), 2.0);
        assert_eq!((w, h), (400, 600));
        assert_eq!(svg.matches("stroke=\"#ccc\"").count(), 3);
        assert_eq!(svg.matches("<path").count(), plan().trim_marks().len());
    }

    #[test]
    fn first_cell_is_top_left() {
        let (svg, _, _) = build_sheet_svg(&plan(), &proof(1), 1.0);
        // Grid top sits 50pt below the sheet top.
        assert!(svg.contains("<rect x=\"0.00\" y=\"50.00\" width=\"100.00\" height=\"100.00\""));
    }

    #[test]
    fn caption_is_escaped() {
        let (svg, _, _) = build_sheet_svg(&plan(), &proof(0), 1.0);
        assert_eq!(svg.matches("A&amp;B").count(), 2);
        assert!(!svg.contains("A&B"));
    }

    #[test]
    fn top_caption_ends_at_the_grid_edge() {
        let (svg, _, _) = build_sheet_svg(&plan(), &proof(0), 1.0);
        assert!(svg.contains("<text x=\"200.00\" y=\"34.66\" text-anchor=\"end\""));
        assert!(svg.contains("<text x=\"0.00\" y=\"283.34\" text-anchor=\"start\""));
    }
}
