//! Document - High-level document API
//!
//! Wraps the tree with everything that needs document-wide state: id
//! lookup, the display cascade, geometry, focus and mutation observers.
//! Attribute writes that go through `Document` notify observers; writes
//! straight to the tree (used while parsing) do not.

use std::collections::HashMap;

use crate::{
    DOMRectList, Display, DomTree, ElementGeometry, InlineStyle, MutationObservers,
    NodeId, Result, SimpleSelector, StyleSheet,
};

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    #[default]
    Loading,
    Interactive,
    Complete,
}

/// Viewport width, matching the engine's default render size
const VIEWPORT_WIDTH: f64 = 800.0;

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    ready_state: ReadyState,
    active_element: Option<NodeId>,
    ua_styles: StyleSheet,
    author_styles: StyleSheet,
    geometry: HashMap<NodeId, ElementGeometry>,
    observers: MutationObservers,
}

impl Document {
    /// Create a document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        // Fresh detached nodes always attach
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create a document with no structure (parser target)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            ready_state: ReadyState::Loading,
            active_element: None,
            ua_styles: StyleSheet::user_agent(),
            author_styles: StyleSheet::new(),
            geometry: HashMap::new(),
            observers: MutationObservers::new(),
        }
    }

    /// Locate html/head/body and collect `<style>` rules after the tree
    /// was built directly.
    pub fn finalize(&mut self) {
        let find_child = |tree: &DomTree, parent: NodeId, tag: &str| {
            tree.children(parent)
                .map(|(id, _)| id)
                .find(|&id| tree.tag_name(id) == Some(tag))
                .unwrap_or(NodeId::NONE)
        };

        self.html_element = find_child(&self.tree, self.tree.root(), "html");
        if self.html_element.is_valid() {
            self.head_element = find_child(&self.tree, self.html_element, "head");
            self.body_element = find_child(&self.tree, self.html_element, "body");
        }

        let mut sheet = StyleSheet::new();
        for style in self.query_all("style") {
            sheet.extend(StyleSheet::parse(&self.tree.text_content(style)));
        }
        tracing::debug!("Collected {} display rules", sheet.len());
        self.author_styles = sheet;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    pub fn head(&self) -> NodeId {
        self.head_element
    }

    pub fn body(&self) -> NodeId {
        self.body_element
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable tree access. Changes made here bypass mutation observers.
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn observers(&self) -> &MutationObservers {
        &self.observers
    }

    pub fn observers_mut(&mut self) -> &mut MutationObservers {
        &mut self.observers
    }

    // ---------------------------------------------------------------
    // Tree building and queries
    // ---------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.tree.append_child(parent, child)
    }

    /// First connected element with the given id, in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(self.tree.root())
            .find(|&n| self.tree.element_id(n) == Some(id))
    }

    /// All connected elements matching a simple selector, in document order
    pub fn select_all(&self, selector: &SimpleSelector) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .filter(|&n| selector.matches(&self.tree, n))
            .collect()
    }

    /// Like `select_all` but parses the selector; unsupported selectors
    /// match nothing.
    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        match SimpleSelector::parse(selector) {
            Some(sel) => self.select_all(&sel),
            None => {
                tracing::debug!("Unsupported selector {:?}", selector);
                Vec::new()
            }
        }
    }

    /// Elements carrying an attribute, in document order
    pub fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.select_all(&SimpleSelector::Attribute { name: name.to_ascii_lowercase(), value: None })
    }

    /// First element whose attribute equals `value` exactly
    pub fn first_with_attribute_value(&self, name: &str, value: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&n| self.tree.attribute(n, name) == Some(value))
    }

    // ---------------------------------------------------------------
    // Attributes (observed)
    // ---------------------------------------------------------------

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.tree.attribute(id, &name.to_ascii_lowercase())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute and queue a mutation record
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        self.tree.set_attr(id, &name, value)?;
        tracing::trace!("{:?} {}={:?}", id, name, value);
        self.observers.notify_attribute(id, &name);
        Ok(())
    }

    /// Remove an attribute; returns whether it existed
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool> {
        let name = name.to_ascii_lowercase();
        let old = self.tree.remove_attr(id, &name)?;
        if old.is_some() {
            self.observers.notify_attribute(id, &name);
        }
        Ok(old.is_some())
    }

    // ---------------------------------------------------------------
    // Style
    // ---------------------------------------------------------------

    /// Parsed `style` attribute
    pub fn inline_style(&self, id: NodeId) -> InlineStyle {
        self.get_attribute(id, "style").map(InlineStyle::parse).unwrap_or_default()
    }

    /// `element.style.<property>`
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.inline_style(id).get(property).map(str::to_string)
    }

    /// `element.style.<property> = value`; rewrites the `style` attribute
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) -> Result<()> {
        let mut style = self.inline_style(id);
        style.set(property, value);
        self.set_attribute(id, "style", &style.to_string())
    }

    /// Add author display rules
    pub fn add_stylesheet(&mut self, css: &str) {
        self.author_styles.extend(StyleSheet::parse(css));
    }

    /// Computed `display` of a single element, ignoring ancestors.
    ///
    /// Precedence, highest first: important inline, important author,
    /// inline, author, UA. Within the author and UA origins important
    /// rules come first, then higher specificity, then later rules.
    pub fn computed_display(&self, id: NodeId) -> Display {
        let Some(tag) = self.tree.tag_name(id) else { return Display::None };
        let inline = self.inline_style(id).display_declaration();

        let cascade = |sheet: &StyleSheet| {
            let mut best: Option<((bool, (u8, u8, u8)), Display)> = None;
            for rule in sheet.rules() {
                if rule.selector.matches(&self.tree, id) {
                    let rank = (rule.important, rule.selector.specificity());
                    if best.is_none_or(|(r, _)| rank >= r) {
                        best = Some((rank, rule.display));
                    }
                }
            }
            best.map(|((important, _), display)| (display, important))
        };
        let author = cascade(&self.author_styles);

        match (inline, author) {
            (Some((display, true)), _) => display,
            (_, Some((display, true))) => display,
            (Some((display, false)), _) => display,
            (None, Some((display, false))) => display,
            (None, None) => cascade(&self.ua_styles)
                .map(|(display, _)| display)
                .unwrap_or_else(|| Display::default_for(tag)),
        }
    }

    /// Whether the element takes part in rendering: connected, and neither
    /// it nor any ancestor computes to `display: none`.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        if self.tree.element(id).is_none() || !self.tree.is_connected(id) {
            return false;
        }
        std::iter::once(id)
            .chain(self.tree.ancestors(id))
            .filter(|&n| self.tree.element(n).is_some())
            .all(|n| self.computed_display(n) != Display::None)
    }

    // ---------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------

    /// Record the box a layout pass assigned to an element
    pub fn set_geometry(&mut self, id: NodeId, geometry: ElementGeometry) {
        self.geometry.insert(id, geometry);
    }

    /// Box of a rendered element. Without explicit geometry this is a
    /// block-flow approximation: full viewport width, zero height.
    pub fn layout_box(&self, id: NodeId) -> Option<ElementGeometry> {
        if !self.is_rendered(id) || self.computed_display(id) == Display::Contents {
            return None;
        }
        Some(
            self.geometry
                .get(&id)
                .copied()
                .unwrap_or_else(|| ElementGeometry::sized(VIEWPORT_WIDTH, 0.0)),
        )
    }

    pub fn offset_width(&self, id: NodeId) -> f64 {
        self.layout_box(id).map_or(0.0, |b| b.offset_width)
    }

    pub fn offset_height(&self, id: NodeId) -> f64 {
        self.layout_box(id).map_or(0.0, |b| b.offset_height)
    }

    /// `getClientRects()`: one rect per generated box
    pub fn client_rects(&self, id: NodeId) -> DOMRectList {
        let mut rects = DOMRectList::new();
        if let Some(b) = self.layout_box(id) {
            rects.push(b.bounding_client_rect());
        }
        rects
    }

    // ---------------------------------------------------------------
    // Focus
    // ---------------------------------------------------------------

    /// Whether `focus()` would succeed on this element
    pub fn is_focusable_area(&self, id: NodeId) -> bool {
        let Some(tag) = self.tree.tag_name(id) else { return false };
        if !self.is_rendered(id) {
            return false;
        }

        let has_tabindex = self
            .get_attribute(id, "tabindex")
            .is_some_and(|v| v.trim().parse::<i32>().is_ok());

        match tag {
            "button" | "input" | "select" | "textarea" => !self.has_attribute(id, "disabled"),
            "a" | "area" => self.has_attribute(id, "href") || has_tabindex,
            _ => has_tabindex,
        }
    }

    /// Currently focused element
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Focus an element; no-op (returning false) if it cannot take focus
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_focusable_area(id) {
            tracing::trace!("{:?} is not focusable", id);
            return false;
        }
        self.active_element = Some(id);
        true
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
