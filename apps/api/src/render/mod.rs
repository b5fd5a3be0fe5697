//! PDF rendering backend.
//!
//! Maps the abstract [`LabelDocument`] tree to PDF bytes with printpdf:
//! one US letter page per sheet, built-in Helvetica for body lines and
//! Helvetica-Bold for the name line. Pages carry the sheet dimensions 1:1 —
//! the file must be printed at actual size for the slots to line up with the
//! physical label stock.
//!
//! The layout tree uses top-left origins in points; printpdf positions text
//! from the bottom-left in millimetres, so coordinates are converted here
//! and nowhere else.

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::labels::layout::{LabelDocument, LayoutSheet, SlotContent, TextLine};

/// Inner padding between the slot edge and its text, matching the label
/// template this layout was lifted from.
const SLOT_PADDING_PT: f32 = 4.0;
/// Vertical advance per text line, as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.3;
/// Extra space after the bold name line.
const NAME_GAP_PT: f32 = 2.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

fn pt_to_mm(value_pt: f32) -> Mm {
    Mm(value_pt * MM_PER_PT)
}

/// Serializes the laid-out document to PDF bytes.
///
/// printpdf always emits at least one page, so a zero-sheet document renders
/// to a single blank page; the HTTP handler rejects the empty case before
/// rendering ever runs.
pub fn render_pdf(document: &LabelDocument) -> Result<Vec<u8>> {
    let page_width = pt_to_mm(document.page_width_pt);
    let page_height = pt_to_mm(document.page_height_pt);

    let (doc, first_page, first_layer) =
        PdfDocument::new("Mailing Labels", page_width, page_height, "labels");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("failed to register Helvetica")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("failed to register Helvetica-Bold")?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (index, sheet) in document.sheets.iter().enumerate() {
        if index > 0 {
            let (page, new_layer) = doc.add_page(page_width, page_height, "labels");
            layer = doc.get_page(page).get_layer(new_layer);
        }
        draw_sheet(&layer, sheet, document.page_height_pt, &regular, &bold);
    }

    doc.save_to_bytes().context("failed to serialize PDF")
}

fn draw_sheet(
    layer: &PdfLayerReference,
    sheet: &LayoutSheet,
    page_height_pt: f32,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for slot in &sheet.slots {
        let SlotContent::Label(lines) = &slot.content else {
            continue; // empty slots reserve their geometry but draw nothing
        };
        draw_label(
            layer,
            lines,
            slot.bounds.x_pt + SLOT_PADDING_PT,
            slot.bounds.y_pt + SLOT_PADDING_PT,
            page_height_pt,
            regular,
            bold,
        );
    }
}

fn draw_label(
    layer: &PdfLayerReference,
    lines: &[TextLine],
    x_pt: f32,
    top_pt: f32,
    page_height_pt: f32,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let mut cursor_pt = top_pt;
    for line in lines {
        let size = line.style.font_size_pt;
        let baseline_pt = cursor_pt + size;
        let font = if line.style.bold { bold } else { regular };
        layer.use_text(
            line.text.clone(),
            size,
            pt_to_mm(x_pt),
            // Flip to printpdf's bottom-left coordinate space.
            pt_to_mm(page_height_pt - baseline_pt),
            font,
        );
        cursor_pt += size * LINE_HEIGHT;
        if line.style.bold {
            cursor_pt += NAME_GAP_PT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::geometry::AVERY_3424;
    use crate::labels::layout::{layout, AddressRecord};

    fn make_records(count: usize) -> Vec<AddressRecord> {
        (0..count)
            .map(|n| {
                AddressRecord::new(
                    &format!("First{n}"),
                    "Last",
                    "123 Main St",
                    "Indore",
                    "Indore",
                    "MP",
                    "452001",
                )
            })
            .collect()
    }

    #[test]
    fn test_render_emits_pdf_bytes() {
        let document = layout(&make_records(3), &AVERY_3424);
        let bytes = render_pdf(&document).expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF"), "output should be a PDF file");
    }

    #[test]
    fn test_render_handles_multi_sheet_documents() {
        let document = layout(&make_records(22), &AVERY_3424);
        assert_eq!(document.sheets.len(), 2);
        let bytes = render_pdf(&document).expect("render should succeed");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_point_to_mm_conversion() {
        // 72 pt = 1 inch = 25.4 mm
        let Mm(mm) = pt_to_mm(72.0);
        assert!((mm - 25.4).abs() < 1e-4);
    }
}
