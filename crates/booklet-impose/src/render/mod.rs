//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Embedding source pages as Form XObjects
//! - Building output sheet pages
//! - Reading page dimensions from the page tree

mod page;
mod xobject;

pub use page::*;
pub use xobject::{
    EmbeddedPage, copy_object_deep, create_blank_xobject, create_page_xobject, page_dimensions,
};
