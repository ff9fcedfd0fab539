//! Printer's marks for booklet sheets
//!
//! Two kinds of marks are produced, all outside the trim box:
//! - Fold marks: short vertical strokes at the spine, from the sheet edge to
//!   the trim box, top and bottom
//! - Corner trim marks: at each trim corner, one horizontal and one vertical
//!   stroke running from the sheet edge to `offset` short of the corner

use crate::constants::{CROP_MARK_OFFSET, CROP_MARK_WIDTH};
use crate::layout::SheetGeometry;
use crate::types::{Color, CropMarkSegment, Point};

/// Stroke settings for generated marks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub thickness: f32,
    pub color: Color,
    /// Gap between a trim mark and the trim corner it points at
    pub offset: f32,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            thickness: CROP_MARK_WIDTH,
            color: Color::BLACK,
            offset: CROP_MARK_OFFSET,
        }
    }
}

/// Generate fold and corner trim marks for one sheet side.
///
/// With a zero margin the trim box is the whole sheet; marks then collapse onto
/// the sheet edge or point outward past it, which is harmless.
pub fn generate_marks(geometry: &SheetGeometry, style: &MarkStyle) -> Vec<CropMarkSegment> {
    let mut marks = generate_fold_marks(geometry, style);
    marks.extend(generate_corner_marks(geometry, style));
    marks
}

fn generate_fold_marks(geometry: &SheetGeometry, style: &MarkStyle) -> Vec<CropMarkSegment> {
    let trim = geometry.trim_box();
    let x = geometry.fold_x();

    vec![
        segment(style, (x, geometry.output_height), (x, trim.top())),
        segment(style, (x, 0.0), (x, trim.y)),
    ]
}

fn generate_corner_marks(geometry: &SheetGeometry, style: &MarkStyle) -> Vec<CropMarkSegment> {
    let trim = geometry.trim_box();
    let (left, right, bottom, top) = (trim.x, trim.right(), trim.y, trim.top());
    let (width, height) = (geometry.output_width, geometry.output_height);
    let offset = style.offset;

    vec![
        // Top left
        segment(style, (left, height), (left, top + offset)),
        segment(style, (0.0, top), (left - offset, top)),
        // Top right
        segment(style, (right, height), (right, top + offset)),
        segment(style, (width, top), (right + offset, top)),
        // Bottom left
        segment(style, (left, 0.0), (left, bottom - offset)),
        segment(style, (0.0, bottom), (left - offset, bottom)),
        // Bottom right
        segment(style, (right, 0.0), (right, bottom - offset)),
        segment(style, (width, bottom), (right + offset, bottom)),
    ]
}

fn segment(style: &MarkStyle, start: (f32, f32), end: (f32, f32)) -> CropMarkSegment {
    CropMarkSegment {
        start: Point::new(start.0, start.1),
        end: Point::new(end.0, end.1),
        thickness: style.thickness,
        color: style.color,
    }
}

/// Render marks as PDF content stream operations
pub fn marks_to_content(marks: &[CropMarkSegment]) -> String {
    if marks.is_empty() {
        return String::new();
    }

    let mut ops = String::new();
    ops.push_str("q\n");
    for mark in marks {
        ops.push_str(&format!(
            "{} {} {} RG {} w {} {} m {} {} l S\n",
            mark.color.r,
            mark.color.g,
            mark.color.b,
            mark.thickness,
            mark.start.x,
            mark.start.y,
            mark.end.x,
            mark.end.y
        ));
    }
    ops.push_str("Q\n");
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::mm_to_pt;
    use crate::types::PageDimensions;

    fn geometry(margin: f32) -> SheetGeometry {
        SheetGeometry::compose(PageDimensions::new(600.0, 800.0), margin)
    }

    #[test]
    fn test_mark_count() {
        let marks = generate_marks(&geometry(mm_to_pt(5.0)), &MarkStyle::default());
        assert_eq!(marks.len(), 10);
    }

    #[test]
    fn test_fold_marks_at_spine() {
        let g = geometry(20.0);
        let marks = generate_fold_marks(&g, &MarkStyle::default());

        assert_eq!(marks[0].start, Point::new(620.0, 840.0));
        assert_eq!(marks[0].end, Point::new(620.0, 820.0));
        assert_eq!(marks[1].start, Point::new(620.0, 0.0));
        assert_eq!(marks[1].end, Point::new(620.0, 20.0));
    }

    #[test]
    fn test_corner_marks_stop_short_of_corner() {
        let g = geometry(20.0);
        let marks = generate_corner_marks(&g, &MarkStyle::default());

        // Top left vertical: sheet top edge down to 2pt above the trim corner
        assert_eq!(marks[0].start, Point::new(20.0, 840.0));
        assert_eq!(marks[0].end, Point::new(20.0, 822.0));
        // Top left horizontal: sheet left edge to 2pt left of the trim corner
        assert_eq!(marks[1].start, Point::new(0.0, 820.0));
        assert_eq!(marks[1].end, Point::new(18.0, 820.0));
        // Bottom right horizontal
        assert_eq!(marks[7].start, Point::new(1240.0, 20.0));
        assert_eq!(marks[7].end, Point::new(1222.0, 20.0));
    }

    #[test]
    fn test_marks_stay_outside_trim_box() {
        for margin_mm in [0.0, 1.0, 5.0, 10.0] {
            let g = geometry(mm_to_pt(margin_mm));
            let trim = g.trim_box();
            for mark in generate_marks(&g, &MarkStyle::default()) {
                assert!(!trim.contains_strictly(mark.start), "margin {}", margin_mm);
                assert!(!trim.contains_strictly(mark.end), "margin {}", margin_mm);
            }
        }
    }

    #[test]
    fn test_zero_margin_does_not_fail() {
        let marks = generate_marks(&geometry(0.0), &MarkStyle::default());
        assert_eq!(marks.len(), 10);
        // Fold marks collapse to points on the sheet edge
        assert_eq!(marks[0].start, marks[0].end);
    }

    #[test]
    fn test_marks_to_content() {
        let marks = generate_marks(&geometry(10.0), &MarkStyle::default());
        let content = marks_to_content(&marks);

        assert!(content.starts_with("q\n"));
        assert!(content.ends_with("Q\n"));
        assert_eq!(content.matches(" S\n").count(), 10);
        assert!(content.contains("0 0 0 RG 0.5 w 610 820 m 610 810 l S"));
        assert!(marks_to_content(&[]).is_empty());
    }
}
