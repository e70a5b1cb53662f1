//! DOMTokenList (classList)
//!
//! Space-separated token set backing the `class` attribute.

/// Ordered set of tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for token in s.split_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn set_value(&mut self, value: &str) {
        *self = Self::from_string(value);
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_dedups() {
        let list = DOMTokenList::from_string("  menu  open menu ");
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_string(), "menu open");
    }

    #[test]
    fn test_set_value_replaces_tokens() {
        let mut list = DOMTokenList::from_string("menu is-hidden");
        assert!(list.contains("is-hidden"));
        list.set_value("menu");
        assert!(!list.contains("is-hidden"));
        list.set_value("");
        assert!(list.is_empty());
    }
}
