//! Edge case tests for fos-html
//!
//! Malformed markup and unusual attribute values.

use fos_html::HtmlParser;

#[test]
fn test_parse_unclosed_tags() {
    let doc = HtmlParser::new().parse("<div><p><span>text").unwrap();
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_parse_mismatched_tags() {
    let doc = HtmlParser::new().parse("<div><p></div></p>").unwrap();
    assert!(doc.tree().len() > 1);
}

#[test]
fn test_duplicate_ids_first_wins() {
    let doc = HtmlParser::new()
        .parse(r#"<div id="dup" class="first"></div><div id="dup" class="second"></div>"#)
        .unwrap();
    let found = doc.get_element_by_id("dup").unwrap();
    assert!(doc.tree().class_list(found).unwrap().contains("first"));
}

#[test]
fn test_empty_attribute_value() {
    let doc = HtmlParser::new().parse(r#"<button aria-controls="">x</button>"#).unwrap();
    let button = doc.query_all("button")[0];
    assert_eq!(doc.get_attribute(button, "aria-controls"), Some(""));
}

#[test]
fn test_whitespace_text_dropped() {
    let doc = HtmlParser::new().parse("<div id=\"a\">   \n   </div>").unwrap();
    let div = doc.get_element_by_id("a").unwrap();
    assert_eq!(doc.tree().children(div).count(), 0);
}

#[test]
fn test_unsupported_selectors_in_style_are_ignored() {
    let doc = HtmlParser::new()
        .parse("<style>nav > a { display: none } a:hover { display: none }</style><nav><a id=\"l\" href=\"#\">x</a></nav>")
        .unwrap();
    assert!(doc.is_rendered(doc.get_element_by_id("l").unwrap()));
}
