//! Shared constants for booklet imposition
//!
//! This module centralizes magic numbers and constants used throughout
//! the imposition process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Margins
// =============================================================================

/// Smallest accepted sheet margin (mm)
pub const MIN_MARGIN_MM: f32 = 0.0;

/// Largest accepted sheet margin (mm)
pub const MAX_MARGIN_MM: f32 = 10.0;

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

// =============================================================================
// Printer's Marks
// =============================================================================

/// Line width for fold and trim marks (points)
pub const CROP_MARK_WIDTH: f32 = 0.5;

/// Gap left between a trim mark and the trim corner (points)
pub const CROP_MARK_OFFSET: f32 = 2.0;

// =============================================================================
// Signatures
// =============================================================================

/// Logical pages carried by one folded sheet (two per side)
pub const PAGES_PER_SHEET: usize = 4;
