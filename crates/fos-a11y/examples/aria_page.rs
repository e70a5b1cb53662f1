//! Example: ARIA bindings on a parsed page
//!
//! Run with `RUST_LOG=fos_a11y=debug` to see binding decisions.

use fos_a11y::{Page, ARIA_EXPANDED};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><style>.collapsed { display: none }</style></head>
<body>
  <button id="nav-toggle" aria-controls="nav">Navigation</button>
  <nav id="nav" class="collapsed"><a href="/">Home</a></nav>

  <button id="prefs" aria-controls="prefs-dialog">Preferences</button>
  <div id="prefs-dialog" role="dialog" style="display: none">
    <input id="name">
    <button id="save">Save</button>
  </div>
</body>
</html>"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let document = fos_html::parse(PAGE)?;
    let mut page = Page::load(document)?;

    let find = |page: &Page, id: &str| {
        page.document()
            .get_element_by_id(id)
            .ok_or_else(|| anyhow::anyhow!("missing #{id}"))
    };
    let nav_toggle = find(&page, "nav-toggle")?;
    let nav = find(&page, "nav")?;
    let prefs = find(&page, "prefs")?;

    let expanded = |page: &Page, node| page.document().get_attribute(node, ARIA_EXPANDED).unwrap_or("-").to_string();

    println!("nav-toggle aria-expanded = {}", expanded(&page, nav_toggle));
    page.set_attribute(nav, "class", "")?;
    page.advance_time(100)?;
    println!("after expanding nav:      {}", expanded(&page, nav_toggle));

    page.click(prefs)?;
    println!("prefs dialog open, focus on {:?}", page.document().active_element());
    page.key_down("Tab")?;
    page.key_down("Tab")?;
    println!("after two Tabs, focus on   {:?}", page.document().active_element());
    page.key_down("Escape")?;
    println!("after Escape, prefs aria-expanded = {}", expanded(&page, prefs));

    page.teardown();
    println!("torn down: {} listener(s) left", page.registry().len());
    Ok(())
}
