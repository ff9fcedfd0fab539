//! Booklet layout calculations
//!
//! This module contains the pure arithmetic of saddle-stitch imposition:
//! - Padding the page sequence to whole sheets
//! - Pairing page indices onto sheet sides
//! - Computing sheet size and half-page placements

mod geometry;
mod normalize;
mod pairing;

pub use geometry::*;
pub use normalize::*;
pub use pairing::*;
