//! Avery 3424 sheet geometry.
//!
//! All dimensions are in PostScript points (72/inch), measured from the
//! top-left corner of the sheet. The exact values reproduce the physical
//! Avery 3424 stock (3 columns × 7 rows of 1" × 2.625" labels on US letter)
//! and downstream print alignment depends on them — the page must be
//! printed at actual size, never fit-to-page.

use serde::Serialize;

/// US letter page width, 8.5".
pub const PAGE_WIDTH_PT: f32 = 612.0;
/// US letter page height, 11".
pub const PAGE_HEIGHT_PT: f32 = 792.0;

// ────────────────────────────────────────────────────────────────────────────
// Sheet geometry
// ────────────────────────────────────────────────────────────────────────────

/// Grid and margin parameters for a label sheet.
///
/// Slot origins are derived arithmetically from the slot index rather than
/// through any flow/wrap layout primitive, so the fill order (left-to-right
/// across a row, then down) is explicit:
/// column = `i % columns`, row = `i / columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetGeometry {
    pub columns: usize,
    pub rows: usize,
    pub slot_width_pt: f32,
    pub slot_height_pt: f32,
    pub top_margin_pt: f32,
    pub left_margin_pt: f32,
    /// Spacing between adjacent columns. Rows are vertically contiguous
    /// (no vertical gap) on this stock.
    pub horizontal_gap_pt: f32,
}

/// Avery 3424: 3 × 7 grid of 1" × 2.625" labels, 0.5" top margin,
/// 0.1875" left margin, 0.125" column gap.
pub const AVERY_3424: SheetGeometry = SheetGeometry {
    columns: 3,
    rows: 7,
    slot_width_pt: 72.0,
    slot_height_pt: 189.0,
    top_margin_pt: 36.0,
    left_margin_pt: 13.5,
    horizontal_gap_pt: 9.0,
};

/// Absolute bounding box of one slot, top-left origin, in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotBox {
    pub x_pt: f32,
    pub y_pt: f32,
    pub width_pt: f32,
    pub height_pt: f32,
}

impl SheetGeometry {
    /// Labels per sheet (21 for Avery 3424).
    pub const fn slots_per_sheet(&self) -> usize {
        self.columns * self.rows
    }

    /// Top-left origin of slot `index` (0-based, row-major) relative to the
    /// sheet's top-left corner.
    pub fn slot_origin(&self, index: usize) -> (f32, f32) {
        let column = index % self.columns;
        let row = index / self.columns;
        let x = self.left_margin_pt + column as f32 * (self.slot_width_pt + self.horizontal_gap_pt);
        let y = self.top_margin_pt + row as f32 * self.slot_height_pt;
        (x, y)
    }

    /// Full bounding box of slot `index`.
    pub fn slot_box(&self, index: usize) -> SlotBox {
        let (x_pt, y_pt) = self.slot_origin(index);
        SlotBox {
            x_pt,
            y_pt,
            width_pt: self.slot_width_pt,
            height_pt: self.slot_height_pt,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avery_3424_point_values_are_exact() {
        // Physical print alignment depends on these exact values.
        assert_eq!(AVERY_3424.columns, 3);
        assert_eq!(AVERY_3424.rows, 7);
        assert_eq!(AVERY_3424.slot_width_pt, 72.0);
        assert_eq!(AVERY_3424.slot_height_pt, 189.0);
        assert_eq!(AVERY_3424.top_margin_pt, 36.0);
        assert_eq!(AVERY_3424.left_margin_pt, 13.5);
        assert_eq!(AVERY_3424.horizontal_gap_pt, 9.0);
        assert_eq!(AVERY_3424.slots_per_sheet(), 21);
    }

    #[test]
    fn test_slot_zero_is_top_left() {
        assert_eq!(AVERY_3424.slot_origin(0), (13.5, 36.0));
    }

    #[test]
    fn test_slot_one_advances_by_width_plus_gap() {
        // 13.5 + 72 + 9 = 94.5
        assert_eq!(AVERY_3424.slot_origin(1), (94.5, 36.0));
    }

    #[test]
    fn test_slot_three_starts_second_row() {
        // 36 + 189 = 225, x back at the left margin
        assert_eq!(AVERY_3424.slot_origin(3), (13.5, 225.0));
    }

    #[test]
    fn test_row_major_mapping() {
        for i in 0..AVERY_3424.slots_per_sheet() {
            let (x, y) = AVERY_3424.slot_origin(i);
            let expected_x = 13.5 + (i % 3) as f32 * 81.0;
            let expected_y = 36.0 + (i / 3) as f32 * 189.0;
            assert_eq!((x, y), (expected_x, expected_y), "slot {i}");
        }
    }

    #[test]
    fn test_slot_box_carries_slot_dimensions() {
        let bbox = AVERY_3424.slot_box(4);
        assert_eq!(bbox.width_pt, 72.0);
        assert_eq!(bbox.height_pt, 189.0);
        assert_eq!((bbox.x_pt, bbox.y_pt), AVERY_3424.slot_origin(4));
    }
}
