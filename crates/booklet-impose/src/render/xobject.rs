//! Embedding source pages as Form XObjects
//!
//! Each source page is copied into the output document as a Form XObject,
//! which the sheet content stream then places with a transformation.

use crate::constants::{DEFAULT_PAGE_HEIGHT_PT, DEFAULT_PAGE_WIDTH_PT};
use crate::types::PageDimensions;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// An embedded page in the output document, with the box it was cut from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbeddedPage {
    pub xobject_id: ObjectId,
    /// Lower-left corner of the page's box in its own coordinates
    pub origin: (f32, f32),
    pub dimensions: PageDimensions,
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Create an XObject from a source page.
///
/// `cache` maps source object ids to their copies in `output`, so resources
/// shared between pages are copied only once.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> lopdf::Result<EmbeddedPage> {
    let page_dict = source.get_dictionary(page_id)?;
    let media_box = page_box(source, page_id)?;

    let content = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", box_array(&media_box));
    xobject_dict.set("FormType", Object::Integer(1));
    for (key, value) in &content.encoding {
        xobject_dict.set(*key, copy_object_deep(output, source, value, cache)?);
    }

    if let Some(resources) = inherited_attribute(source, page_id, b"Resources")? {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, &resources, cache)?,
        );
    }

    let xobject_id = output.add_object(Stream::new(xobject_dict, content.data));
    Ok(EmbeddedPage {
        xobject_id,
        origin: (
            media_box[0].min(media_box[2]),
            media_box[1].min(media_box[3]),
        ),
        dimensions: box_dimensions(&media_box),
    })
}

/// Create an empty XObject standing in for a padding page
pub fn create_blank_xobject(output: &mut Document, dimensions: PageDimensions) -> EmbeddedPage {
    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set(
        "BBox",
        box_array(&[0.0, 0.0, dimensions.width, dimensions.height]),
    );
    xobject_dict.set("FormType", Object::Integer(1));
    xobject_dict.set("Resources", Object::Dictionary(Dictionary::new()));

    let xobject_id = output.add_object(Stream::new(xobject_dict, Vec::new()));
    EmbeddedPage {
        xobject_id,
        origin: (0.0, 0.0),
        dimensions,
    }
}

fn box_array(values: &[f32; 4]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Real(v)).collect())
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Page content as it goes into the Form XObject
#[derive(Debug, Default)]
struct PageContent {
    data: Vec<u8>,
    /// `Filter` and `DecodeParms` of a stream that was kept encoded
    encoding: Vec<(&'static str, Object)>,
}

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> lopdf::Result<PageContent> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(PageContent::default()), // No content = blank page
    };

    match contents {
        Object::Reference(id) => get_single_content_stream(doc, *id),
        Object::Array(arr) => match arr.as_slice() {
            [Object::Reference(id)] => get_single_content_stream(doc, *id),
            _ => get_concatenated_content_streams(doc, arr),
        },
        _ => Ok(PageContent::default()),
    }
}

/// Decode a content stream; one that cannot be decoded is kept as is, together
/// with the filters needed to read it.
fn get_single_content_stream(doc: &Document, id: ObjectId) -> lopdf::Result<PageContent> {
    let stream = doc.get_object(id)?.as_stream()?;
    if !stream.dict.has(b"Filter") {
        return Ok(PageContent {
            data: stream.content.clone(),
            encoding: Vec::new(),
        });
    }

    match stream.decompressed_content() {
        Ok(data) => Ok(PageContent {
            data,
            encoding: Vec::new(),
        }),
        Err(e) => {
            log::debug!("Keeping content stream {:?} encoded: {}", id, e);
            let encoding = ["Filter", "DecodeParms"]
                .into_iter()
                .filter_map(|key| {
                    stream
                        .dict
                        .get(key.as_bytes())
                        .ok()
                        .map(|value| (key, value.clone()))
                })
                .collect();
            Ok(PageContent {
                data: stream.content.clone(),
                encoding,
            })
        }
    }
}

fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> lopdf::Result<PageContent> {
    let mut data = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            let part = get_single_content_stream(doc, *id)?;
            // Encoded bytes cannot be joined with decoded ones
            if !part.encoding.is_empty() {
                log::warn!("Dropping undecodable content stream {:?}", id);
                continue;
            }
            data.extend_from_slice(&part.data);
            data.push(b'\n');
        }
    }

    Ok(PageContent {
        data,
        encoding: Vec::new(),
    })
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> lopdf::Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            // Reserve the id before recursing so reference cycles terminate
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                // Parent links would drag the whole source page tree along
                if key.as_slice() == b"Parent" {
                    continue;
                }
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: lopdf::Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        _ => Ok(obj.clone()),
    }
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Get source page dimensions in points
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> lopdf::Result<PageDimensions> {
    Ok(box_dimensions(&page_box(doc, page_id)?))
}

fn box_dimensions(media_box: &[f32; 4]) -> PageDimensions {
    PageDimensions::new(
        (media_box[2] - media_box[0]).abs(),
        (media_box[3] - media_box[1]).abs(),
    )
}

/// The page's MediaBox as `[x0, y0, x1, y1]`, inherited from the page tree if needed
fn page_box(doc: &Document, page_id: ObjectId) -> lopdf::Result<[f32; 4]> {
    let default_box = [0.0, 0.0, DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT];

    let Some(media_box) = inherited_attribute(doc, page_id, b"MediaBox")? else {
        return Ok(default_box);
    };
    let values = match &media_box {
        Object::Array(arr) => arr,
        Object::Reference(id) => doc.get_object(*id)?.as_array()?,
        _ => return Ok(default_box),
    };
    if values.len() != 4 {
        return Ok(default_box);
    }

    let mut result = [0.0; 4];
    for (slot, value) in result.iter_mut().zip(values) {
        *slot = extract_number(doc, value)?;
    }
    Ok(result)
}

/// Look up an inheritable page attribute, walking up `Parent` links
fn inherited_attribute(
    doc: &Document,
    page_id: ObjectId,
    key: &[u8],
) -> lopdf::Result<Option<Object>> {
    let mut node = doc.get_dictionary(page_id)?;
    // Bounded walk guards against cyclic page trees
    for _ in 0..64 {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value.clone()));
        }
        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => node = doc.get_dictionary(parent_id)?,
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

fn extract_number(doc: &Document, obj: &Object) -> lopdf::Result<f32> {
    match obj {
        Object::Reference(id) => doc.get_object(*id)?.as_float(),
        _ => obj.as_float(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with_content(content: Stream) -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.7");
        let content_id = doc.add_object(content);
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(200),
                    Object::Integer(300),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]));
        (doc, page_id)
    }

    fn embed(source: &Document, page_id: ObjectId) -> Stream {
        let mut output = Document::with_version("1.7");
        let page = create_page_xobject(&mut output, source, page_id, &mut HashMap::new()).unwrap();
        output
            .get_object(page.xobject_id)
            .unwrap()
            .as_stream()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_compressed_content_is_decoded() {
        let mut content = Stream::new(Dictionary::new(), b"0 0 m 10 10 l S ".repeat(20));
        content.compress().unwrap();
        assert!(content.dict.has(b"Filter"));

        let (source, page_id) = document_with_content(content);
        let xobject = embed(&source, page_id);

        assert!(!xobject.dict.has(b"Filter"));
        assert_eq!(xobject.content, b"0 0 m 10 10 l S ".repeat(20));
    }

    #[test]
    fn test_undecodable_content_keeps_its_filter() {
        let mut dict = Dictionary::new();
        dict.set("Filter", Object::Name(b"RunLengthDecode".to_vec()));
        dict.set(
            "DecodeParms",
            Dictionary::from_iter(vec![("Columns", Object::Integer(4))]),
        );
        let raw = vec![2, b'q', b' ', b'Q', 128];
        let (source, page_id) = document_with_content(Stream::new(dict, raw.clone()));

        let xobject = embed(&source, page_id);

        assert_eq!(xobject.content, raw);
        assert_eq!(
            xobject.dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"RunLengthDecode"
        );
        assert!(xobject.dict.has(b"DecodeParms"));
        assert_eq!(
            xobject.dict.get(b"Subtype").unwrap().as_name().unwrap(),
            b"Form"
        );
    }

    #[test]
    fn test_undecodable_part_of_content_array_is_dropped() {
        let mut doc = Document::with_version("1.7");
        let plain_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let mut dict = Dictionary::new();
        dict.set("Filter", Object::Name(b"RunLengthDecode".to_vec()));
        let encoded_id = doc.add_object(Stream::new(dict, vec![0, b'x', 128]));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            (
                "Contents",
                Object::Array(vec![
                    Object::Reference(plain_id),
                    Object::Reference(encoded_id),
                ]),
            ),
        ]));

        let xobject = embed(&doc, page_id);

        assert_eq!(xobject.content, b"q Q\n");
        assert!(!xobject.dict.has(b"Filter"));
    }
}
