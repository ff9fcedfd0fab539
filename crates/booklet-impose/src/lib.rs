mod cancel;
mod constants;
pub mod impose;
pub mod layout;
pub mod marks;
mod options;
pub mod render;
mod stats;
mod types;

pub use cancel::CancellationToken;
pub use constants::{MAX_MARGIN_MM, MIN_MARGIN_MM, POINTS_PER_MM, mm_to_pt, pt_to_mm};
pub use impose::{
    BookletOutput, ImposedBooklet, ImpositionStage, impose, impose_document,
    impose_document_with_progress, load_document, load_pdf, save_pdf, serialize_document,
};
pub use options::*;
pub use stats::{calculate_statistics, calculate_summary};
pub use types::*;
