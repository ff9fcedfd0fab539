//! Document I/O operations for imposition

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Decode a PDF held in memory
pub fn load_document(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(ImposeError::Decode)
}

/// Encode a document to PDF bytes, compressing its streams
pub fn serialize_document(mut doc: Document) -> Result<Vec<u8>> {
    doc.compress();
    let mut writer = Vec::new();
    doc.save_to(&mut writer)
        .map_err(|e| ImposeError::Encode(e.to_string()))?;
    Ok(writer)
}

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    tokio::task::spawn_blocking(move || load_document(&bytes)).await?
}

/// Save a document to disk
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || serialize_document(doc)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
