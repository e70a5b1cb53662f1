//! ARIA Support
//!
//! The attribute names the bindings read and write.

/// Attribute naming the element a control operates on
pub const ARIA_CONTROLS: &str = "aria-controls";

/// Attribute reflecting whether the controlled element is shown
pub const ARIA_EXPANDED: &str = "aria-expanded";

/// Role attribute
pub const ROLE: &str = "role";

/// `aria-expanded` attribute value for a visibility state
pub fn expanded_value(expanded: bool) -> &'static str {
    if expanded { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_value() {
        assert_eq!(expanded_value(true), "true");
        assert_eq!(expanded_value(false), "false");
    }
}
