use crate::constants::PAGES_PER_SHEET;
use crate::layout::pages_to_add;
use crate::types::*;
use lopdf::Document;

/// Calculate booklet counts for a source page count without building anything
pub fn calculate_summary(source_pages: usize) -> Result<ImpositionSummary> {
    if source_pages == 0 {
        return Err(ImposeError::EmptyDocument);
    }

    let blank_pages_added = pages_to_add(source_pages);
    let normalized_page_count = source_pages + blank_pages_added;
    let total_sheets = normalized_page_count / PAGES_PER_SHEET;

    Ok(ImpositionSummary {
        source_pages,
        normalized_page_count,
        blank_pages_added,
        total_sheets,
        // Front and back of each sheet
        output_pages: total_sheets * 2,
    })
}

/// Calculate booklet counts for a decoded document
pub fn calculate_statistics(document: &Document) -> Result<ImpositionSummary> {
    calculate_summary(document.get_pages().len())
}
