//! Visibility Oracle

use fos_dom::{Document, NodeId};

/// Whether an element is currently rendered: it has a non-zero offset
/// width or height, or at least one client rect.
pub fn is_element_visible(doc: &Document, element: NodeId) -> bool {
    doc.offset_width(element) != 0.0
        || doc.offset_height(element) != 0.0
        || !doc.client_rects(element).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::ElementGeometry;

    #[test]
    fn test_visibility_follows_display() {
        let mut doc = Document::default();
        let panel = doc.create_element("div");
        doc.append_child(doc.body(), panel).unwrap();
        assert!(is_element_visible(&doc, panel));

        doc.set_style_property(panel, "display", "none").unwrap();
        assert!(!is_element_visible(&doc, panel));
    }

    #[test]
    fn test_zero_sized_box_still_visible() {
        let mut doc = Document::default();
        let marker = doc.create_element("span");
        doc.append_child(doc.body(), marker).unwrap();
        doc.set_geometry(marker, ElementGeometry::sized(0.0, 0.0));

        // One (empty) client rect is enough
        assert!(is_element_visible(&doc, marker));
    }

    #[test]
    fn test_non_elements_not_visible() {
        let mut doc = Document::default();
        let text = doc.create_text("hello");
        doc.append_child(doc.body(), text).unwrap();
        assert!(!is_element_visible(&doc, text));
        assert!(!is_element_visible(&doc, NodeId::NONE));
    }
}
