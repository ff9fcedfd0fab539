//! Saddle-stitch signature pairing
//!
//! Each physical sheet carries four logical pages. Sheet `s` of a booklet with
//! `n` (padded) pages holds, counting 0-based:
//!
//! ```text
//!            left         right
//! front:   n - 1 - 2s      2s
//! back:      2s + 1     n - 2 - 2s
//! ```
//!
//! so the first sheet carries the outermost pages. For 8 pages:
//!
//! ```text
//! Sheet 0   front [7, 0]   back [1, 6]
//! Sheet 1   front [5, 2]   back [3, 4]
//! ```
//!
//! Nesting the folded sheets in order reproduces reading order 0..n-1.

use crate::constants::PAGES_PER_SHEET;
use crate::types::*;

/// Number of physical sheets for a padded page count
pub fn sheet_count(normalized_page_count: usize) -> usize {
    normalized_page_count / PAGES_PER_SHEET
}

/// Pairing for one sheet of a booklet with `normalized_page_count` pages.
///
/// Returns `None` when `sheet` is past the last sheet.
pub fn sheet_pairing(normalized_page_count: usize, sheet: usize) -> Option<SheetPairing> {
    if sheet >= sheet_count(normalized_page_count) {
        return None;
    }

    let last = normalized_page_count - 1 - 2 * sheet;
    let first = 2 * sheet;
    Some(SheetPairing {
        sheet,
        front: PagePairing::new(last, first),
        back: PagePairing::new(first + 1, last - 1),
    })
}

/// Calculate the pairings for every sheet, outermost sheet first.
///
/// The page count must already be padded to a multiple of 4; zero pages yields
/// zero sheets.
pub fn signature_pairings(normalized_page_count: usize) -> Result<Vec<SheetPairing>> {
    if normalized_page_count % PAGES_PER_SHEET != 0 {
        return Err(ImposeError::Config(format!(
            "Page count {} is not a multiple of {}",
            normalized_page_count, PAGES_PER_SHEET
        )));
    }

    Ok((0..sheet_count(normalized_page_count))
        .filter_map(|sheet| sheet_pairing(normalized_page_count, sheet))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(pairings: &[SheetPairing]) -> Vec<usize> {
        pairings
            .iter()
            .flat_map(|p| [p.front.left, p.front.right, p.back.left, p.back.right])
            .collect()
    }

    #[test]
    fn test_four_pages() {
        let pairings = signature_pairings(4).unwrap();
        assert_eq!(pairings.len(), 1);
        assert_eq!(pairings[0].front, PagePairing::new(3, 0));
        assert_eq!(pairings[0].back, PagePairing::new(1, 2));
    }

    #[test]
    fn test_eight_pages() {
        let pairings = signature_pairings(8).unwrap();
        assert_eq!(pairings.len(), 2);
        assert_eq!(pairings[0].front, PagePairing::new(7, 0));
        assert_eq!(pairings[0].back, PagePairing::new(1, 6));
        assert_eq!(pairings[1].front, PagePairing::new(5, 2));
        assert_eq!(pairings[1].back, PagePairing::new(3, 4));
        assert_eq!(pairings[1].sheet, 1);
    }

    #[test]
    fn test_zero_pages() {
        assert!(signature_pairings(0).unwrap().is_empty());
    }

    #[test]
    fn test_unpadded_count_rejected() {
        assert!(matches!(signature_pairings(6), Err(ImposeError::Config(_))));
    }

    #[test]
    fn test_every_index_used_once() {
        for sheets in 0..=40 {
            let n = sheets * PAGES_PER_SHEET;
            let mut indices = flatten(&signature_pairings(n).unwrap());
            indices.sort_unstable();
            assert_eq!(indices, (0..n).collect::<Vec<_>>(), "n = {}", n);
        }
    }

    #[test]
    fn test_reading_order_after_folding() {
        // Unfolding the nested stack reads the right page of each front, then
        // the back left/right, outer sheets first for the first half and inner
        // sheets first for the second half.
        let n = 12;
        let pairings = signature_pairings(n).unwrap();
        let mut order = Vec::new();
        for p in &pairings {
            order.push(p.front.right);
            order.push(p.back.left);
        }
        for p in pairings.iter().rev() {
            order.push(p.back.right);
            order.push(p.front.left);
        }
        assert_eq!(order, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn test_side_accessor() {
        let pairing = sheet_pairing(8, 1).unwrap();
        assert_eq!(pairing.side(SheetSide::Front), PagePairing::new(5, 2));
        assert_eq!(pairing.side(SheetSide::Back), PagePairing::new(3, 4));
    }

    #[test]
    fn test_sheet_out_of_range() {
        assert_eq!(sheet_pairing(0, 0), None);
        assert_eq!(sheet_pairing(8, 2), None);
        assert_eq!(sheet_pairing(8, usize::MAX), None);
        assert!(sheet_pairing(4, 0).is_some());
    }
}
