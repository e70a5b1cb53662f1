//! Inline Style and Display Rules
//!
//! Only the `display` property takes part in cascade here; it is the one
//! property that decides whether an element generates a box at all. Other
//! inline declarations are preserved verbatim.

use crate::SimpleSelector;

/// Computed `display` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Inline,
    InlineBlock,
    Flex,
    InlineFlex,
    Grid,
    ListItem,
    Table,
    Contents,
}

impl Display {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "block" => Self::Block,
            "inline" => Self::Inline,
            "inline-block" => Self::InlineBlock,
            "flex" => Self::Flex,
            "inline-flex" => Self::InlineFlex,
            "grid" => Self::Grid,
            "list-item" => Self::ListItem,
            "table" => Self::Table,
            "contents" => Self::Contents,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Block => "block",
            Self::Inline => "inline",
            Self::InlineBlock => "inline-block",
            Self::Flex => "flex",
            Self::InlineFlex => "inline-flex",
            Self::Grid => "grid",
            Self::ListItem => "list-item",
            Self::Table => "table",
            Self::Contents => "contents",
        }
    }

    /// Initial display for a tag when nothing else applies
    pub fn default_for(tag: &str) -> Self {
        match tag {
            "span" | "a" | "label" | "em" | "strong" | "b" | "i" | "code" | "abbr" | "small" => Self::Inline,
            "button" | "input" | "select" | "textarea" | "img" => Self::InlineBlock,
            "li" => Self::ListItem,
            "table" => Self::Table,
            _ => Self::Block,
        }
    }
}

/// One `name: value` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    /// Parse `name: value [!important]`
    fn parse(text: &str) -> Option<Self> {
        let (name, value) = text.split_once(':')?;
        let name = name.trim().to_ascii_lowercase();
        let (value, important) = split_important(value.trim());
        if name.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self { name, value: value.to_string(), important })
    }
}

/// Split a trailing `!important` off a declared value
fn split_important(value: &str) -> (&str, bool) {
    if let Some(bang) = value.rfind('!') {
        if value[bang + 1..].trim().eq_ignore_ascii_case("important") {
            return (value[..bang].trim_end(), true);
        }
    }
    (value, false)
}

/// Parsed `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    pub fn parse(text: &str) -> Self {
        Self {
            declarations: text.split(';').filter_map(Declaration::parse).collect(),
        }
    }

    /// Declaration in effect for a property: the last important one if
    /// any, otherwise the last one.
    pub fn declaration(&self, property: &str) -> Option<&Declaration> {
        let mut winner: Option<&Declaration> = None;
        for decl in self.declarations.iter().filter(|d| d.name.eq_ignore_ascii_case(property)) {
            if winner.is_none_or(|w| decl.important || !w.important) {
                winner = Some(decl);
            }
        }
        winner
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declaration(property).map(|d| d.value.as_str())
    }

    /// Set a property, replacing an existing declaration in place. The
    /// new declaration is never `!important`.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        match self.declarations.iter().position(|d| d.name == property) {
            Some(pos) => {
                self.declarations[pos].value = value.to_string();
                self.declarations[pos].important = false;
                // Later duplicates would shadow the new value
                let mut seen = 0;
                self.declarations.retain(|d| {
                    if d.name != property {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.declarations.push(Declaration {
                name: property,
                value: value.to_string(),
                important: false,
            }),
        }
    }

    pub fn display(&self) -> Option<Display> {
        self.display_declaration().map(|(display, _)| display)
    }

    /// Declared `display` and whether it is `!important`
    pub fn display_declaration(&self) -> Option<(Display, bool)> {
        let decl = self.declaration("display")?;
        Display::parse(&decl.value).map(|display| (display, decl.important))
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl std::fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, decl) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {}", decl.name, decl.value)?;
            if decl.important {
                f.write_str(" !important")?;
            }
            f.write_str(";")?;
        }
        Ok(())
    }
}

/// A `selector { display: ... }` rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: SimpleSelector,
    pub display: Display,
    pub important: bool,
}

/// Ordered list of display rules
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules every document gets before author styles
    pub fn user_agent() -> Self {
        let mut sheet = Self::new();
        for sel in ["[hidden]", "head", "script", "style", "title", "meta", "link", "template"] {
            if let Some(selector) = SimpleSelector::parse(sel) {
                sheet.push(StyleRule { selector, display: Display::None, important: false });
            }
        }
        sheet
    }

    /// Parse the `display` rules out of a stylesheet. Rules with selectors
    /// that are not simple selectors, and declarations other than
    /// `display`, are skipped.
    pub fn parse(css: &str) -> Self {
        let mut sheet = Self::new();
        let css = strip_comments(css);

        for block in css.split('}') {
            let Some((selectors, body)) = block.split_once('{') else { continue };
            let Some((display, important)) = InlineStyle::parse(body).display_declaration() else {
                continue;
            };

            for sel in selectors.split(',') {
                match SimpleSelector::parse(sel) {
                    Some(selector) => sheet.push(StyleRule { selector, display, important }),
                    None => tracing::trace!("skipping unsupported selector {:?}", sel.trim()),
                }
            }
        }
        sheet
    }

    pub fn push(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, other: StyleSheet) {
        self.rules.extend(other.rules);
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_style_roundtrip_keeps_other_props() {
        let mut style = InlineStyle::parse("color: red; display:none");
        assert_eq!(style.display(), Some(Display::None));

        style.set("display", "block");
        assert_eq!(style.to_string(), "color: red; display: block;");
    }

    #[test]
    fn test_inline_style_ignores_garbage() {
        let style = InlineStyle::parse(";;display;: red; margin: 0");
        assert_eq!(style.get("margin"), Some("0"));
        assert_eq!(style.display(), None);
    }

    #[test]
    fn test_stylesheet_collects_display_rules() {
        let sheet = StyleSheet::parse(
            "/* menu */ .is-hidden, #drawer { display: none } nav a { display: none } .row { color: red }",
        );
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rules()[0].selector, SimpleSelector::Class("is-hidden".into()));
        assert_eq!(sheet.rules()[1].display, Display::None);
    }

    #[test]
    fn test_inline_important_flag() {
        let style = InlineStyle::parse("display: none !important; display: block");
        assert_eq!(style.display_declaration(), Some((Display::None, true)));
        assert_eq!(style.get("display"), Some("none"));
        assert_eq!(InlineStyle::parse("display:none!IMPORTANT").display(), Some(Display::None));
        assert_eq!(style.to_string(), "display: none !important; display: block;");
    }

    #[test]
    fn test_set_clears_important() {
        let mut style = InlineStyle::parse("display: none !important");
        style.set("display", "block");
        assert_eq!(style.display_declaration(), Some((Display::Block, false)));
        assert_eq!(style.to_string(), "display: block;");
    }

    #[test]
    fn test_stylesheet_important_rule() {
        let sheet = StyleSheet::parse(".hide { display: none !important; }");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rules()[0].display, Display::None);
        assert!(sheet.rules()[0].important);
    }

    #[test]
    fn test_default_display() {
        assert_eq!(Display::default_for("div"), Display::Block);
        assert_eq!(Display::default_for("button"), Display::InlineBlock);
        assert_eq!(Display::default_for("span"), Display::Inline);
    }
}
