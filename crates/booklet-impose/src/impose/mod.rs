//! Booklet imposition - arranging pages for saddle-stitch binding
//!
//! This module orchestrates the imposition process:
//! 1. Pad the source pages to a multiple of 4
//! 2. Compose the sheet geometry once
//! 3. For each sheet, front then back: pair pages, embed and place them, add marks
//! 4. Assemble the page tree of the output document
//!
//! Any failure drops the partially built output document.

mod io;

pub use io::{load_document, load_pdf, save_pdf, serialize_document};

use crate::cancel::CancellationToken;
use crate::layout::{
    NormalizedPages, SequencePage, SheetGeometry, SpreadSlot, normalize_pages, signature_pairings,
};
use crate::marks::{MarkStyle, generate_marks};
use crate::options::ImpositionConfig;
use crate::render::{
    EmbeddedPage, Placement, create_blank_xobject, create_page_xobject, render_sheet_page,
};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Progress of an imposition run, reported to the stage observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpositionStage {
    Normalizing,
    PairingAndComposing { sheet: usize, side: SheetSide },
    Finalizing,
    Done,
    Failed,
}

/// A fully composed booklet and its counts
#[derive(Debug, Clone)]
pub struct ImposedBooklet {
    pub document: Document,
    pub summary: ImpositionSummary,
}

/// Encoded booklet bytes and counts, as returned by [`impose`]
#[derive(Debug, Clone, PartialEq)]
pub struct BookletOutput {
    pub bytes: Vec<u8>,
    pub summary: ImpositionSummary,
}

/// Decode a PDF, impose it as a booklet and encode the result.
///
/// The work runs on a blocking thread. Cancelling `cancel` stops the run before
/// the next sheet side and yields [`ImposeError::Cancelled`].
pub async fn impose(
    source_bytes: Vec<u8>,
    config: ImpositionConfig,
    cancel: CancellationToken,
) -> Result<BookletOutput> {
    tokio::task::spawn_blocking(move || {
        let source = load_document(&source_bytes)?;
        let booklet = impose_document(&source, &config, &cancel)?;
        let bytes = serialize_document(booklet.document)?;
        Ok(BookletOutput {
            bytes,
            summary: booklet.summary,
        })
    })
    .await?
}

/// Impose an already decoded document
pub fn impose_document(
    source: &Document,
    config: &ImpositionConfig,
    cancel: &CancellationToken,
) -> Result<ImposedBooklet> {
    impose_document_with_progress(source, config, cancel, |_| {})
}

/// Impose an already decoded document, reporting every stage transition
pub fn impose_document_with_progress(
    source: &Document,
    config: &ImpositionConfig,
    cancel: &CancellationToken,
    mut on_stage: impl FnMut(ImpositionStage),
) -> Result<ImposedBooklet> {
    let mut report = |stage: ImpositionStage| {
        log::debug!("Imposition stage: {:?}", stage);
        on_stage(stage);
    };

    let result = run_imposition(source, config, cancel, &mut report);
    match &result {
        Ok(booklet) => {
            report(ImpositionStage::Done);
            log::info!(
                "{} pages processed in {} sheets",
                booklet.summary.normalized_page_count,
                booklet.summary.total_sheets
            );
        }
        Err(e) => {
            report(ImpositionStage::Failed);
            log::debug!("Imposition aborted: {}", e);
        }
    }
    result
}

fn run_imposition(
    source: &Document,
    config: &ImpositionConfig,
    cancel: &CancellationToken,
    report: &mut dyn FnMut(ImpositionStage),
) -> Result<ImposedBooklet> {
    report(ImpositionStage::Normalizing);
    let pages = normalize_pages(source)?;

    let geometry = SheetGeometry::compose(pages.dimensions(), config.margin_pt());
    let marks = if config.add_crop_marks {
        generate_marks(&geometry, &MarkStyle::default())
    } else {
        Vec::new()
    };
    let pairings = signature_pairings(pages.len())?;

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut embedder = PageEmbedder::new(source, &pages);
    let mut page_refs = Vec::with_capacity(pairings.len() * 2);

    for pairing in &pairings {
        for side in [SheetSide::Front, SheetSide::Back] {
            if cancel.is_cancelled() {
                return Err(ImposeError::Cancelled);
            }
            report(ImpositionStage::PairingAndComposing {
                sheet: pairing.sheet,
                side,
            });

            let pair = pairing.side(side);
            let fail = |source: lopdf::Error| ImposeError::ImpositionFailed {
                sheet: pairing.sheet,
                side,
                source,
            };
            let left = embedder.embed(&mut output, pair.left).map_err(fail)?;
            let right = embedder.embed(&mut output, pair.right).map_err(fail)?;

            let placements = [
                Placement {
                    page: left,
                    rect: geometry.placement(SpreadSlot::Left),
                },
                Placement {
                    page: right,
                    rect: geometry.placement(SpreadSlot::Right),
                },
            ];
            let page_id =
                render_sheet_page(&mut output, pages_tree_id, &geometry, &placements, &marks);
            page_refs.push(Object::Reference(page_id));
        }
    }

    report(ImpositionStage::Finalizing);
    let output_pages = page_refs.len();
    finalize_document(&mut output, pages_tree_id, page_refs);

    Ok(ImposedBooklet {
        document: output,
        summary: ImpositionSummary {
            source_pages: pages.source_pages(),
            normalized_page_count: pages.len(),
            blank_pages_added: pages.blank_pages_added(),
            total_sheets: pairings.len(),
            output_pages,
        },
    })
}

/// Copies pages of the normalized sequence into the output document
struct PageEmbedder<'a> {
    source: &'a Document,
    pages: &'a NormalizedPages,
    object_cache: HashMap<ObjectId, ObjectId>,
    blank: Option<EmbeddedPage>,
}

impl<'a> PageEmbedder<'a> {
    fn new(source: &'a Document, pages: &'a NormalizedPages) -> Self {
        Self {
            source,
            pages,
            object_cache: HashMap::new(),
            blank: None,
        }
    }

    fn embed(&mut self, output: &mut Document, index: usize) -> lopdf::Result<EmbeddedPage> {
        // Pairings only produce indices below the normalized page count
        match self.pages.pages()[index] {
            SequencePage::Source(page_id) => {
                create_page_xobject(output, self.source, page_id, &mut self.object_cache)
            }
            SequencePage::Blank => {
                let dimensions = self.pages.dimensions();
                Ok(*self
                    .blank
                    .get_or_insert_with(|| create_blank_xobject(output, dimensions)))
            }
        }
    }
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
