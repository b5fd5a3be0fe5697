//! Label layout engine.
//!
//! Takes an ordered list of address records and deterministically paginates
//! them onto label sheets: chunk into groups of `slots_per_sheet`, fill each
//! sheet row-major, pad the final sheet with explicit empty slots so the
//! renderer always sees a complete grid.
//!
//! The engine is a pure function of its input — no clock, no randomness, no
//! shared state — so concurrent invocations need no coordination. It performs
//! no reordering (the subscriber store sorts before calling) and no
//! truncation (content overflowing the fixed slot height is a rendering
//! concern).

use serde::Serialize;

use crate::labels::geometry::{SheetGeometry, SlotBox, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};

// ────────────────────────────────────────────────────────────────────────────
// Input
// ────────────────────────────────────────────────────────────────────────────

/// City / district / state composite, rendered as a single line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Locality {
    pub city: String,
    pub district: String,
    pub state: String,
}

impl Locality {
    /// `"{city}, {district}, {state}"`, trimmed as a whole. Emitted
    /// unconditionally — an empty component yields output like
    /// `", Indore, MP"` rather than being suppressed.
    pub fn as_line(&self) -> String {
        format!("{}, {}, {}", self.city, self.district, self.state)
            .trim()
            .to_string()
    }
}

/// One mailing address, already selected and sorted by the subscriber store.
///
/// The store guarantees the underlying fields are non-null; the engine only
/// guards against empty renderable fragments (blank address lines).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressRecord {
    pub display_name: String,
    pub address_lines: Vec<String>,
    pub locality: Locality,
    pub postal_code: String,
}

impl AddressRecord {
    /// Builds a record from raw subscriber fields: the display name is the
    /// trimmed "first last" pair, the address is split into physical lines
    /// with blank lines discarded and order preserved.
    pub fn new(
        first_name: &str,
        last_name: &str,
        address: &str,
        city: &str,
        district: &str,
        state: &str,
        pincode: &str,
    ) -> Self {
        let display_name = format!("{first_name} {last_name}").trim().to_string();
        let address_lines = address
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        AddressRecord {
            display_name,
            address_lines,
            locality: Locality {
                city: city.to_string(),
                district: district.to_string(),
                state: state.to_string(),
            },
            postal_code: pincode.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output document tree
// ────────────────────────────────────────────────────────────────────────────

/// Presentation attributes for one text line. Kept as metadata next to the
/// content so the document tree stays renderer-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size_pt: f32,
    pub bold: bool,
}

/// Display name line: larger and bold.
pub const NAME_STYLE: TextStyle = TextStyle {
    font_size_pt: 10.0,
    bold: true,
};

/// Address, locality, and pincode lines.
pub const BODY_STYLE: TextStyle = TextStyle {
    font_size_pt: 9.0,
    bold: false,
};

/// One visual line inside a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub style: TextStyle,
}

/// A slot either carries a composed label or is explicitly empty. Empty
/// slots keep their full geometry so the physical grid stays complete and
/// the renderer never collapses spacing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SlotContent {
    Label(Vec<TextLine>),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub bounds: SlotBox,
    pub content: SlotContent,
}

/// One sheet: always exactly `slots_per_sheet` slots, row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSheet {
    pub slots: Vec<Slot>,
}

/// The full paginated document, consumed once by the rendering backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelDocument {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub sheets: Vec<LayoutSheet>,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Paginates `records` onto label sheets.
///
/// `ceil(n / slots_per_sheet)` sheets; record `k` lands on sheet
/// `k / slots_per_sheet` in slot `k % slots_per_sheet`. Zero records yield a
/// zero-sheet document, not an error — rejecting the empty case is the
/// caller's concern.
pub fn layout(records: &[AddressRecord], geometry: &SheetGeometry) -> LabelDocument {
    let per_sheet = geometry.slots_per_sheet();

    let sheets = records
        .chunks(per_sheet)
        .map(|chunk| {
            let mut slots = Vec::with_capacity(per_sheet);
            for (i, record) in chunk.iter().enumerate() {
                slots.push(Slot {
                    bounds: geometry.slot_box(i),
                    content: SlotContent::Label(compose_label(record)),
                });
            }
            // Pad the short final chunk so every sheet accounts for the
            // complete physical grid.
            for i in chunk.len()..per_sheet {
                slots.push(Slot {
                    bounds: geometry.slot_box(i),
                    content: SlotContent::Empty,
                });
            }
            LayoutSheet { slots }
        })
        .collect();

    LabelDocument {
        page_width_pt: PAGE_WIDTH_PT,
        page_height_pt: PAGE_HEIGHT_PT,
        sheets,
    }
}

/// Composes the text lines for one label, in fixed vertical order:
/// name, address lines, locality, pincode. No line cap — overflow past the
/// slot height is left to the renderer.
fn compose_label(record: &AddressRecord) -> Vec<TextLine> {
    let mut lines = Vec::with_capacity(record.address_lines.len() + 3);
    lines.push(TextLine {
        text: record.display_name.clone(),
        style: NAME_STYLE,
    });
    for address_line in &record.address_lines {
        // Blank fragments are filtered even if the caller bypassed
        // AddressRecord::new and supplied raw lines.
        if address_line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine {
            text: address_line.trim().to_string(),
            style: BODY_STYLE,
        });
    }
    lines.push(TextLine {
        text: record.locality.as_line(),
        style: BODY_STYLE,
    });
    lines.push(TextLine {
        text: record.postal_code.clone(),
        style: BODY_STYLE,
    });
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::geometry::AVERY_3424;

    fn make_record(n: usize) -> AddressRecord {
        AddressRecord::new(
            &format!("First{n}"),
            &format!("Last{n}"),
            "123 Main St\nSector 4",
            "Indore",
            "Indore",
            "MP",
            "452001",
        )
    }

    fn make_records(count: usize) -> Vec<AddressRecord> {
        (0..count).map(make_record).collect()
    }

    fn real_slot_count(sheet: &LayoutSheet) -> usize {
        sheet
            .slots
            .iter()
            .filter(|s| matches!(s.content, SlotContent::Label(_)))
            .count()
    }

    // ── pagination ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_zero_sheets() {
        let doc = layout(&[], &AVERY_3424);
        assert!(doc.sheets.is_empty());
    }

    #[test]
    fn test_single_record_fills_one_sheet_with_padding() {
        let doc = layout(&make_records(1), &AVERY_3424);
        assert_eq!(doc.sheets.len(), 1);
        assert_eq!(doc.sheets[0].slots.len(), 21);
        assert_eq!(real_slot_count(&doc.sheets[0]), 1);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_slots() {
        let doc = layout(&make_records(21), &AVERY_3424);
        assert_eq!(doc.sheets.len(), 1);
        assert_eq!(real_slot_count(&doc.sheets[0]), 21);
    }

    #[test]
    fn test_twenty_two_records_spill_onto_second_sheet() {
        let doc = layout(&make_records(22), &AVERY_3424);
        assert_eq!(doc.sheets.len(), 2);
        assert_eq!(real_slot_count(&doc.sheets[0]), 21);
        assert_eq!(real_slot_count(&doc.sheets[1]), 1);
        assert_eq!(doc.sheets[1].slots.len(), 21);
    }

    #[test]
    fn test_sheet_count_is_ceiling_of_n_over_21() {
        for n in [0usize, 1, 20, 21, 22, 42, 43, 100] {
            let doc = layout(&make_records(n), &AVERY_3424);
            let expected = n.div_ceil(21);
            assert_eq!(doc.sheets.len(), expected, "n = {n}");
            for sheet in &doc.sheets {
                assert_eq!(sheet.slots.len(), 21, "n = {n}");
            }
        }
    }

    #[test]
    fn test_fill_order_is_row_major() {
        let doc = layout(&make_records(5), &AVERY_3424);
        let slots = &doc.sheets[0].slots;
        // Record 3 wraps to row 1, column 0.
        assert_eq!((slots[3].bounds.x_pt, slots[3].bounds.y_pt), (13.5, 225.0));
        // Record 4 sits beside it in column 1.
        assert_eq!((slots[4].bounds.x_pt, slots[4].bounds.y_pt), (94.5, 225.0));
        // Fill order matches record order.
        for (i, slot) in slots.iter().take(5).enumerate() {
            match &slot.content {
                SlotContent::Label(lines) => {
                    assert_eq!(lines[0].text, format!("First{i} Last{i}"));
                }
                SlotContent::Empty => panic!("slot {i} should hold a record"),
            }
        }
    }

    #[test]
    fn test_empty_slots_keep_full_geometry() {
        let doc = layout(&make_records(1), &AVERY_3424);
        let last = &doc.sheets[0].slots[20];
        assert_eq!(last.content, SlotContent::Empty);
        assert_eq!(last.bounds, AVERY_3424.slot_box(20));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let records = make_records(25);
        let a = layout(&records, &AVERY_3424);
        let b = layout(&records, &AVERY_3424);
        assert_eq!(a, b);
    }

    #[test]
    fn test_document_carries_letter_page_size() {
        let doc = layout(&make_records(1), &AVERY_3424);
        assert_eq!(doc.page_width_pt, 612.0);
        assert_eq!(doc.page_height_pt, 792.0);
    }

    // ── text composition ────────────────────────────────────────────────────

    #[test]
    fn test_label_line_order_and_styles() {
        let doc = layout(&make_records(1), &AVERY_3424);
        let SlotContent::Label(lines) = &doc.sheets[0].slots[0].content else {
            panic!("expected a label in slot 0");
        };
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].text, "First0 Last0");
        assert_eq!(lines[0].style, NAME_STYLE);
        assert_eq!(lines[1].text, "123 Main St");
        assert_eq!(lines[2].text, "Sector 4");
        assert_eq!(lines[3].text, "Indore, Indore, MP");
        assert_eq!(lines[4].text, "452001");
        assert!(lines[1..].iter().all(|l| l.style == BODY_STYLE));
    }

    #[test]
    fn test_blank_address_lines_are_dropped() {
        let record = AddressRecord::new(
            "Asha", "Verma", "123 Main St\n\n  \n", "Indore", "Indore", "MP", "452001",
        );
        assert_eq!(record.address_lines, vec!["123 Main St".to_string()]);

        let doc = layout(&[record], &AVERY_3424);
        let SlotContent::Label(lines) = &doc.sheets[0].slots[0].content else {
            panic!("expected a label in slot 0");
        };
        // name + 1 address line + locality + pincode
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_locality_line_is_not_suppressed_for_empty_component() {
        let record = AddressRecord::new("Asha", "Verma", "123 Main St", "", "Indore", "MP", "452001");
        let doc = layout(&[record], &AVERY_3424);
        let SlotContent::Label(lines) = &doc.sheets[0].slots[0].content else {
            panic!("expected a label in slot 0");
        };
        assert_eq!(lines[2].text, ", Indore, MP");
    }

    #[test]
    fn test_fully_blank_address_yields_name_locality_pincode_only() {
        let record = AddressRecord::new("Asha", "Verma", "\n \n", "Indore", "Indore", "MP", "452001");
        let doc = layout(&[record], &AVERY_3424);
        let SlotContent::Label(lines) = &doc.sheets[0].slots[0].content else {
            panic!("expected a label in slot 0");
        };
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "Indore, Indore, MP");
    }

    #[test]
    fn test_display_name_is_trimmed_pair() {
        let record = AddressRecord::new("Asha", "", "x", "a", "b", "c", "1");
        assert_eq!(record.display_name, "Asha");
    }
}
