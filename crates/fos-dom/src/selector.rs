//! Simple Selectors
//!
//! Single-compound selectors (`tag`, `.class`, `#id`, `[attr]`,
//! `[attr="value"]`, `*`) used by display rules and attribute queries.

use crate::{DomTree, NodeId};

/// Simple selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Attribute { name: String, value: Option<String> },
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string. Combinators and compound selectors
    /// are not supported and yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.contains(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~' | ':')) {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            is_ident(id).then(|| Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            is_ident(class).then(|| Self::Class(class.to_string()))
        } else if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Self::parse_attribute(inner)
        } else {
            is_ident(s).then(|| Self::Tag(s.to_ascii_lowercase()))
        }
    }

    fn parse_attribute(inner: &str) -> Option<Self> {
        match inner.split_once('=') {
            None => {
                let name = inner.trim();
                is_ident(name).then(|| Self::Attribute { name: name.to_ascii_lowercase(), value: None })
            }
            Some((name, value)) => {
                let name = name.trim();
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                is_ident(name).then(|| Self::Attribute {
                    name: name.to_ascii_lowercase(),
                    value: Some(value.to_string()),
                })
            }
        }
    }

    /// Specificity as (ids, classes/attributes, tags)
    pub fn specificity(&self) -> (u8, u8, u8) {
        match self {
            Self::Id(_) => (1, 0, 0),
            Self::Class(_) | Self::Attribute { .. } => (0, 1, 0),
            Self::Tag(_) => (0, 0, 1),
            Self::Universal => (0, 0, 0),
        }
    }

    /// Check an element against this selector
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        if tree.element(element).is_none() {
            return false;
        }
        match self {
            Self::Universal => true,
            Self::Tag(tag) => tree.tag_name(element) == Some(tag.as_str()),
            Self::Id(id) => tree.element_id(element) == Some(id.as_str()),
            Self::Class(class) => tree.class_list(element).is_some_and(|c| c.contains(class)),
            Self::Attribute { name, value: None } => tree.has_attribute(element, name),
            Self::Attribute { name, value: Some(v) } => tree.attribute(element, name) == Some(v.as_str()),
        }
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_selector_parse() {
        assert_eq!(SimpleSelector::parse("DIV"), Some(SimpleSelector::Tag("div".into())));
        assert_eq!(SimpleSelector::parse(".is-hidden"), Some(SimpleSelector::Class("is-hidden".into())));
        assert_eq!(SimpleSelector::parse("#menu"), Some(SimpleSelector::Id("menu".into())));
        assert_eq!(SimpleSelector::parse("*"), Some(SimpleSelector::Universal));
        assert_eq!(
            SimpleSelector::parse("[role=\"dialog\"]"),
            Some(SimpleSelector::Attribute { name: "role".into(), value: Some("dialog".into()) })
        );
    }

    #[test]
    fn test_rejects_complex_selectors() {
        assert_eq!(SimpleSelector::parse("nav a"), None);
        assert_eq!(SimpleSelector::parse("ul > li"), None);
        assert_eq!(SimpleSelector::parse("a:hover"), None);
        assert_eq!(SimpleSelector::parse(""), None);
    }

    #[test]
    fn test_matches_element() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div).unwrap();
        tree.set_attr(div, "id", "panel").unwrap();
        tree.set_attr(div, "class", "collapsed").unwrap();
        tree.set_attr(div, "hidden", "").unwrap();

        assert!(SimpleSelector::parse("div").unwrap().matches(&tree, div));
        assert!(SimpleSelector::parse("#panel").unwrap().matches(&tree, div));
        assert!(SimpleSelector::parse(".collapsed").unwrap().matches(&tree, div));
        assert!(SimpleSelector::parse("[hidden]").unwrap().matches(&tree, div));
        assert!(!SimpleSelector::parse("span").unwrap().matches(&tree, div));
        assert!(!SimpleSelector::Universal.matches(&tree, tree.root()));
    }
}
