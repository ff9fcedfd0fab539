//! Sheet geometry
//!
//! An output sheet holds a two-page spread inside a uniform margin:
//!
//! ```text
//! ┌──────────────────────────────┐  ─┬─ margin
//! │  ┌────────────┬────────────┐  │
//! │  │    left    │   right    │  │  content height
//! │  └────────────┴────────────┘  │
//! └──────────────────────────────┘  ─┴─ margin
//! ```
//!
//! The margin is uniform on all four sides, including the spine side of each
//! page; it is not a true printer's bleed.

use crate::types::*;

/// Which half of the spread a page is placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadSlot {
    Left,
    Right,
}

/// Size of an output sheet and the placement of its two half-pages
///
/// All pages share page 0's dimensions, so one geometry serves every sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub output_width: f32,
    pub output_height: f32,
    pub margin: f32,
    /// Height of the trim box (equals the page height)
    pub content_height: f32,
    /// Width of one logical page
    pub half_page_width: f32,
}

impl SheetGeometry {
    /// Compose the sheet for pages of `page` size and a margin in points.
    pub fn compose(page: PageDimensions, margin: f32) -> Self {
        let output_width = 2.0 * page.width + 2.0 * margin;
        let output_height = page.height + 2.0 * margin;
        Self {
            output_width,
            output_height,
            margin,
            content_height: output_height - 2.0 * margin,
            half_page_width: page.width,
        }
    }

    /// Where a page in the given half of the spread is drawn
    pub fn placement(&self, slot: SpreadSlot) -> Rect {
        let x = match slot {
            SpreadSlot::Left => self.margin,
            SpreadSlot::Right => self.margin + self.half_page_width,
        };
        Rect::new(x, self.margin, self.half_page_width, self.content_height)
    }

    /// The final, post-cut area of the sheet
    pub fn trim_box(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.output_width - 2.0 * self.margin,
            self.output_height - 2.0 * self.margin,
        )
    }

    /// X coordinate of the spine fold
    pub fn fold_x(&self) -> f32 {
        self.margin + self.half_page_width
    }
}
