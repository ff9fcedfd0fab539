//! Output sheet rendering
//!
//! Builds one output page: the embedded half-pages placed at their rectangles,
//! followed by any printer's marks.

use crate::layout::SheetGeometry;
use crate::marks::marks_to_content;
use crate::types::{CropMarkSegment, Rect};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::xobject::EmbeddedPage;

/// An embedded page and the rectangle it is stretched into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: EmbeddedPage,
    pub rect: Rect,
}

/// Add one sheet side to the output document and return its page id.
///
/// The page is not linked into the page tree; the caller collects the ids and
/// writes the `Kids` array once all sheets are rendered.
pub fn render_sheet_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    geometry: &SheetGeometry,
    placements: &[Placement],
    marks: &[CropMarkSegment],
) -> ObjectId {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(geometry.output_width),
            Object::Real(geometry.output_height),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (idx, placement) in placements.iter().enumerate() {
        let xobject_name = format!("P{}", idx);
        xobjects.set(
            xobject_name.as_bytes(),
            Object::Reference(placement.page.xobject_id),
        );
        content_ops.push(generate_placement_command(&xobject_name, placement));
    }

    content_ops.push(marks_to_content(marks));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Generate the content stream command that maps an embedded page onto its rectangle.
fn generate_placement_command(xobject_name: &str, placement: &Placement) -> String {
    let rect = &placement.rect;
    let dims = placement.page.dimensions;
    let (origin_x, origin_y) = placement.page.origin;

    let scale_x = if dims.width > 0.0 {
        rect.width / dims.width
    } else {
        1.0
    };
    let scale_y = if dims.height > 0.0 {
        rect.height / dims.height
    } else {
        1.0
    };

    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        scale_x,
        scale_y,
        rect.x - origin_x * scale_x,
        rect.y - origin_y * scale_y,
        xobject_name
    )
}
