use coupon_core::LayoutPlan;
use coupon_core::trim::STROKE_WIDTH_PT;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use tracing::debug;

use crate::{Align, CAPTION_FONT_PT, CaptionAnchor, SheetProof, caption_anchors};

const FONT_NAME: Name<'static> = Name(b"F1");

/// Helvetica advance widths for 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];
/// Width used for bytes outside the ASCII table.
const HELVETICA_DEFAULT_WIDTH: u16 = 556;

/// Write every sheet as one page of a PDF. Each page carries the trim
/// marks, a light frame per occupied cell and the caption.
pub fn write_pdf(plan: &LayoutPlan, proofs: &[SheetProof]) -> Vec<u8> {
    let sheet = plan.config().sheet;
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    // Two objects per page: the page itself and its content stream.
    let page_ids: Vec<Ref> = (0..proofs.len())
        .map(|i| Ref::new(4 + 2 * i as i32))
        .collect();

    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(proofs.len() as i32);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let anchors = caption_anchors(plan);
    for (proof, page_id) in proofs.iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);

        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, sheet.width as f32, sheet.height as f32));
        page.parent(tree_id);
        page.contents(content_id);
        page.resources().fonts().pair(FONT_NAME, font_id);
        page.finish();

        let content = page_content(plan, proof, &anchors);
        pdf.stream(content_id, &content);
        debug!(sheet = proof.number, labels = proof.labels, "pdf page written");
    }

    pdf.finish()
}

fn page_content(plan: &LayoutPlan, proof: &SheetProof, anchors: &[CaptionAnchor]) -> Vec<u8> {
    let mut content = Content::new();

    content.save_state();
    content.set_stroke_gray(0.8);
    content.set_line_width(0.5);
    for cell in (0..proof.labels).map_while(|slot| plan.slot_rect(slot)) {
        content.rect(
            cell.x as f32,
            cell.y as f32,
            cell.width as f32,
            cell.height as f32,
        );
    }
    content.stroke();
    content.restore_state();

    content.set_line_width(STROKE_WIDTH_PT as f32);
    for m in plan.trim_marks() {
        content.move_to(m.x1 as f32, m.y1 as f32);
        content.line_to(m.x2 as f32, m.y2 as f32);
    }
    content.stroke();

    let caption = win_ansi(&proof.caption);
    let caption_width = text_width(&caption, CAPTION_FONT_PT);
    for anchor in anchors {
        let x = match anchor.align {
            Align::Start => anchor.x,
            Align::End => anchor.x - caption_width,
        };
        content.begin_text();
        content.set_font(FONT_NAME, CAPTION_FONT_PT as f32);
        content.next_line(x as f32, anchor.y as f32);
        content.show(Str(&caption));
        content.end_text();
    }

    content.finish().to_vec()
}

/// Encode `text` for a WinAnsi simple font. Characters the encoding lacks
/// become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            'Š' => 0x8a,
            'š' => 0x9a,
            'Œ' => 0x8c,
            'œ' => 0x9c,
            'Ž' => 0x8e,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

/// Advance width of WinAnsi `bytes` set in Helvetica at `size` points.
fn text_width(bytes: &[u8], size: f64) -> f64 {
    let units: u32 = bytes
        .iter()
        .map(|&b| {
            let w = match b {
                0x20..=0x7e => HELVETICA_WIDTHS[usize::from(b - 0x20)],
                _ => HELVETICA_DEFAULT_WIDTH,
            };
            u32::from(w)
        })
        .sum();
    f64::from(units) * size / 1000.0
}
