//! Edge case tests for fos-a11y

use fos_a11y::{A11yConfig, A11yError, FocusTrapMembership, Page, ARIA_EXPANDED};
use fos_dom::{Document, ElementGeometry, NodeId, ReadyState};

fn load(html: &str) -> Page {
    Page::load(fos_html::parse(html).unwrap()).unwrap()
}

fn load_with(html: &str, config: A11yConfig) -> Page {
    let mut page = Page::with_config(fos_html::parse(html).unwrap(), config);
    page.install().unwrap();
    page.finish_parsing().unwrap();
    page
}

fn el(page: &Page, id: &str) -> NodeId {
    page.document().get_element_by_id(id).unwrap()
}

fn display(page: &Page, id: &str) -> Option<String> {
    page.document().style_property(el(page, id), "display")
}

// ============================================================================
// Reference resolution
// ============================================================================

#[test]
fn test_empty_and_multi_token_controls_skipped() {
    let page = load(
        r#"<button id="a" aria-controls="">A</button>
           <button id="b" aria-controls="x y">B</button>
           <div id="x"></div><div id="y"></div>"#,
    );
    assert!(page.toggles().is_empty());
    assert!(page.document().observers().is_empty());
    assert_eq!(page.document().get_attribute(el(&page, "b"), ARIA_EXPANDED), None);
}

#[test]
fn test_duplicate_ids_bind_first_match() {
    let page = load(
        r#"<button id="t" aria-controls="p">T</button>
           <div id="p" class="first"></div>
           <div id="p" class="second" style="display: none"></div>"#,
    );
    let target = page.toggles()[0].target;
    assert!(page.document().tree().class_list(target).unwrap().contains("first"));
    assert_eq!(page.document().get_attribute(el(&page, "t"), ARIA_EXPANDED), Some("true"));
}

#[test]
fn test_dialog_without_trigger_or_id_skipped() {
    let page = load(
        r#"<div id="lonely" role="dialog"><button>x</button></div>
           <div role="dialog"><button>y</button></div>"#,
    );
    assert!(page.dialogs().is_empty());
    assert!(page.registry().is_empty());
}

#[test]
fn test_role_must_match_exactly() {
    let page = load(
        r#"<button aria-controls="d">Open</button>
           <div id="d" role="alertdialog"><button>x</button></div>"#,
    );
    assert!(page.dialogs().is_empty());
    assert_eq!(page.toggles().len(), 1);
}

#[test]
fn test_first_trigger_owns_dialog() {
    let mut page = load(
        r#"<button id="one" aria-controls="d">One</button>
           <button id="two" aria-controls="d">Two</button>
           <div id="d" role="dialog" style="display: none"><button id="x">x</button></div>"#,
    );
    let (one, two) = (el(&page, "one"), el(&page, "two"));
    assert_eq!(page.dialogs()[0].trigger, one);

    page.click(two).unwrap();
    assert_eq!(display(&page, "d").as_deref(), Some("none"));

    page.click(one).unwrap();
    assert_eq!(display(&page, "d").as_deref(), Some("block"));

    // The second trigger still mirrors visibility once the debounce settles
    page.flush_timers().unwrap();
    assert_eq!(page.document().get_attribute(two, ARIA_EXPANDED), Some("true"));
}

// ============================================================================
// Display cascade
// ============================================================================

#[test]
fn test_important_inline_none_is_collapsed() {
    let mut page = load(
        r#"<button id="b" aria-controls="m">Menu</button>
           <div id="m" style="display: none !important">Items</div>"#,
    );
    let (b, m) = (el(&page, "b"), el(&page, "m"));
    assert_eq!(page.document().get_attribute(b, ARIA_EXPANDED), Some("false"));

    // A plain write replaces the declaration and drops the flag
    page.set_style_property(m, "display", "block").unwrap();
    page.advance_time(200).unwrap();
    assert_eq!(page.document().get_attribute(b, ARIA_EXPANDED), Some("true"));
}

#[test]
fn test_important_rule_beats_inline_display() {
    let mut page = load(
        r#"<style>.hide { display: none !important; }</style>
           <button id="b" aria-controls="m">Menu</button>
           <div id="m" class="hide" style="display: block">Items</div>"#,
    );
    let (b, m) = (el(&page, "b"), el(&page, "m"));
    assert_eq!(page.document().get_attribute(b, ARIA_EXPANDED), Some("false"));

    page.set_style_property(m, "display", "flex").unwrap();
    page.advance_time(200).unwrap();
    assert_eq!(page.document().get_attribute(b, ARIA_EXPANDED), Some("false"));

    page.remove_attribute(m, "class").unwrap();
    page.advance_time(200).unwrap();
    assert_eq!(page.document().get_attribute(b, ARIA_EXPANDED), Some("true"));
}

// ============================================================================
// Dialog focus
// ============================================================================

#[test]
fn test_open_dialog_without_focusable_content() {
    let mut page = load(
        r#"<button id="t" aria-controls="d">Open</button>
           <div id="d" role="dialog" style="display: none"><p>Nothing to focus</p></div>"#,
    );
    let (t, d) = (el(&page, "t"), el(&page, "d"));
    page.focus(t).unwrap();

    assert!(page.open_dialog(d).unwrap());
    assert_eq!(page.document().active_element(), Some(t));
    assert!(page.dialog_binding(d).unwrap().trap.first().is_none());
    assert_eq!(page.document().get_attribute(t, ARIA_EXPANDED), Some("true"));
}

#[test]
fn test_open_dialog_unbound_element() {
    let mut page = load(r#"<div id="plain"></div>"#);
    let plain = el(&page, "plain");
    assert!(!page.open_dialog(plain).unwrap());
    assert!(!page.close_dialog(plain).unwrap());
}

#[test]
fn test_zero_sized_members_left_out_of_trap() {
    let mut page = load(
        r#"<button id="t" aria-controls="d">Open</button>
           <div id="d" role="dialog" style="display: none">
             <button id="a">a</button><button id="ghost">g</button><button id="c">c</button>
           </div>"#,
    );
    let (d, a, c, ghost) = (el(&page, "d"), el(&page, "a"), el(&page, "c"), el(&page, "ghost"));
    page.document_mut().set_geometry(ghost, ElementGeometry::sized(0.0, 0.0));

    page.open_dialog(d).unwrap();
    assert_eq!(page.dialog_binding(d).unwrap().trap.elements(), &[a, c]);
}

#[test]
fn test_snapshot_membership_keeps_bind_time_list() {
    let html = r#"<button id="t" aria-controls="d">Open</button>
                  <div id="d" role="dialog" style="display: none"><button id="a">a</button></div>"#;
    let config = A11yConfig::default().with_trap_membership(FocusTrapMembership::Snapshot);
    let mut page = load_with(html, config);
    let (d, a) = (el(&page, "d"), el(&page, "a"));

    page.open_dialog(d).unwrap();
    // Focus still moves in; only the trap list is stale
    assert_eq!(page.document().active_element(), Some(a));
    assert!(page.dialog_binding(d).unwrap().trap.elements().is_empty());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_hidden_attribute_needs_opt_in() {
    let html = r#"<button id="t" aria-controls="p">T</button><div id="p"></div>"#;

    let mut page = load(html);
    let p = el(&page, "p");
    page.set_attribute(p, "hidden", "").unwrap();
    page.flush_timers().unwrap();
    assert_eq!(page.document().get_attribute(el(&page, "t"), ARIA_EXPANDED), Some("true"));

    let config = A11yConfig::default().with_observed_attributes(&["style", "class", "hidden"]);
    let mut page = load_with(html, config);
    let p = el(&page, "p");
    page.set_attribute(p, "hidden", "").unwrap();
    page.flush_timers().unwrap();
    assert_eq!(page.document().get_attribute(el(&page, "t"), ARIA_EXPANDED), Some("false"));
}

#[test]
fn test_custom_debounce_delay() {
    let html = r#"<button id="t" aria-controls="p">T</button><div id="p"></div>"#;
    let mut page = load_with(html, A11yConfig::default().with_debounce_ms(10));
    let p = el(&page, "p");

    page.set_style_property(p, "display", "none").unwrap();
    page.advance_time(10).unwrap();
    assert_eq!(page.document().get_attribute(el(&page, "t"), ARIA_EXPANDED), Some("false"));
}

#[test]
fn test_timer_step_limit_ignores_backlog() {
    let html = r#"<button id="one" aria-controls="p">1</button><button id="two" aria-controls="q">2</button>
                  <div id="p"></div><div id="q"></div>"#;
    let mut page = load_with(html, A11yConfig::default().with_timer_step_limit(1));
    let (p, q) = (el(&page, "p"), el(&page, "q"));

    page.set_attribute(p, "class", "x").unwrap();
    page.set_attribute(q, "class", "x").unwrap();
    page.set_style_property(q, "display", "none").unwrap();
    assert_eq!(page.advance_time(200).unwrap(), 2);
    assert_eq!(page.document().get_attribute(el(&page, "one"), ARIA_EXPANDED), Some("true"));
    assert_eq!(page.document().get_attribute(el(&page, "two"), ARIA_EXPANDED), Some("false"));
}

#[test]
fn test_timer_step_limit_stops_self_rescheduling_sync() {
    // The trigger observes its own aria-expanded, so every sync queues another
    let html = r#"<button id="b" aria-controls="b">Self</button>"#;
    let config = A11yConfig::default()
        .with_observed_attributes(&["aria-expanded"])
        .with_timer_step_limit(5);
    let mut page = load_with(html, config);

    let err = page.flush_timers().unwrap_err();
    assert!(matches!(err, A11yError::TimerStepLimit(5)));
}

// ============================================================================
// Host
// ============================================================================

#[test]
fn test_install_on_loaded_document_binds_immediately() {
    let mut doc = fos_html::parse(r#"<button aria-controls="p">T</button><div id="p"></div>"#).unwrap();
    doc.set_ready_state(ReadyState::Complete);

    let mut page = Page::new(doc);
    page.install().unwrap();
    assert!(page.is_bootstrapped());
    assert_eq!(page.toggles().len(), 1);
}

#[test]
fn test_nothing_bound_before_content_loaded() {
    let mut page = Page::new(fos_html::parse(r#"<button aria-controls="p">T</button><div id="p"></div>"#).unwrap());
    page.install().unwrap();
    assert!(page.toggles().is_empty());
    assert_eq!(page.registry().len(), 1);
}

#[test]
fn test_errors_for_unknown_nodes() {
    let mut page = Page::load(Document::default()).unwrap();
    assert!(matches!(page.click(NodeId::NONE), Err(A11yError::UnknownElement(_))));
    assert!(matches!(page.focus(NodeId::NONE), Err(A11yError::UnknownElement(_))));
    assert!(matches!(page.set_attribute(NodeId::NONE, "class", "x"), Err(A11yError::Dom(_))));
}

#[test]
fn test_enter_on_link_trigger_activates_once() {
    let mut page = load(
        r##"<a id="t" href="#d" aria-controls="d">Open</a>
           <div id="d" role="dialog" style="display: none"><button>x</button></div>"##,
    );
    let t = el(&page, "t");

    // Activation listener prevents the default click, so the dialog
    // toggles exactly once
    page.key_down_on(t, "Enter").unwrap();
    assert_eq!(display(&page, "d").as_deref(), Some("block"));
}
