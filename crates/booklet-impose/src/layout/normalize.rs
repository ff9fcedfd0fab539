//! Page sequence normalization
//!
//! A saddle-stitched booklet consumes pages four at a time, so the source
//! sequence is padded with blank pages sized like page 0. The source document
//! itself is left untouched: padding lives in a [`NormalizedPages`] view.

use crate::constants::PAGES_PER_SHEET;
use crate::render::page_dimensions;
use crate::types::*;
use lopdf::{Document, ObjectId};

/// One entry of the normalized page sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePage {
    /// A page of the source document
    Source(ObjectId),
    /// A synthetic blank page appended for padding
    Blank,
}

/// The source page sequence extended with padding blanks
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPages {
    pages: Vec<SequencePage>,
    dimensions: PageDimensions,
    source_pages: usize,
}

impl NormalizedPages {
    pub fn pages(&self) -> &[SequencePage] {
        &self.pages
    }

    pub fn get(&self, index: usize) -> Option<SequencePage> {
        self.pages.get(index).copied()
    }

    /// Page count after padding (always a multiple of 4)
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Dimensions of page 0, applied to every page of the booklet
    pub fn dimensions(&self) -> PageDimensions {
        self.dimensions
    }

    pub fn source_pages(&self) -> usize {
        self.source_pages
    }

    pub fn blank_pages_added(&self) -> usize {
        self.pages.len() - self.source_pages
    }
}

/// Number of blank pages needed to reach the next multiple of 4
pub fn pages_to_add(page_count: usize) -> usize {
    (PAGES_PER_SHEET - page_count % PAGES_PER_SHEET) % PAGES_PER_SHEET
}

/// Build the padded page sequence for a source document.
///
/// Fails with [`ImposeError::EmptyDocument`] before any sizing decision when the
/// document has no pages. Pages whose size differs from page 0 are logged; they
/// are still laid out with page 0's dimensions.
pub fn normalize_pages(source: &Document) -> Result<NormalizedPages> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    let Some(&first_page) = page_ids.first() else {
        return Err(ImposeError::EmptyDocument);
    };

    let dimensions = page_dimensions(source, first_page).map_err(ImposeError::Decode)?;

    for (index, &page_id) in page_ids.iter().enumerate().skip(1) {
        match page_dimensions(source, page_id) {
            Ok(dims) if !dims.approx_eq(&dimensions) => log::warn!(
                "Page {} is {}x{}pt but page 1 is {}x{}pt; it will be stretched to fit",
                index + 1,
                dims.width,
                dims.height,
                dimensions.width,
                dimensions.height
            ),
            Ok(_) => {}
            Err(e) => log::warn!("Could not measure page {}: {}", index + 1, e),
        }
    }

    let source_pages = page_ids.len();
    let blanks = pages_to_add(source_pages);
    let mut pages: Vec<SequencePage> = page_ids.into_iter().map(SequencePage::Source).collect();
    pages.extend(std::iter::repeat_n(SequencePage::Blank, blanks));

    log::debug!(
        "Normalized {} source pages to {} ({} blank)",
        source_pages,
        pages.len(),
        blanks
    );

    Ok(NormalizedPages {
        pages,
        dimensions,
        source_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_to_add() {
        assert_eq!(pages_to_add(0), 0);
        assert_eq!(pages_to_add(1), 3);
        assert_eq!(pages_to_add(2), 2);
        assert_eq!(pages_to_add(3), 1);
        assert_eq!(pages_to_add(4), 0);
        assert_eq!(pages_to_add(6), 2);
        assert_eq!(pages_to_add(9), 3);
    }

    #[test]
    fn test_padding_reaches_multiple_of_four() {
        for page_count in 1..=64 {
            let padded = page_count + pages_to_add(page_count);
            assert_eq!(padded % PAGES_PER_SHEET, 0, "page_count {}", page_count);
            assert!(padded - page_count <= 3, "page_count {}", page_count);
        }
    }
}
