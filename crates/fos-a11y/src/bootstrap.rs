//! Bootstrapper
//!
//! Runs the toggle-button and dialog binders once the document structure
//! is ready.

use fos_dom::{EventType, NodeId, ReadyState};

use crate::page::Page;
use crate::registry::Listener;
use crate::{dialog, toggle, Result};

/// Hook the binders to `DOMContentLoaded`, or run them now if that has
/// already fired.
pub fn install(page: &mut Page) -> Result<()> {
    if page.bootstrapped || page.bootstrap_listener.is_some() {
        return Ok(());
    }
    if page.document.ready_state() != ReadyState::Loading {
        return run(page);
    }
    let id = page.registry.add(NodeId::ROOT, EventType::DOMContentLoaded, Listener::Bootstrap);
    page.bootstrap_listener = Some(id);
    Ok(())
}

/// Bind toggles, then dialogs. Runs at most once per page.
pub fn run(page: &mut Page) -> Result<()> {
    if let Some(id) = page.bootstrap_listener.take() {
        page.registry.remove(id);
    }
    if page.bootstrapped {
        return Ok(());
    }
    page.bootstrapped = true;

    let toggles = toggle::bind_toggle_buttons(page)?;
    let dialogs = dialog::bind_dialogs(page);
    tracing::info!(
        "ARIA bindings ready for {}: {} toggle(s), {} dialog(s)",
        page.document.url(),
        toggles,
        dialogs
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::Document;

    #[test]
    fn test_install_waits_for_content_loaded() {
        let mut page = Page::new(Document::default());
        install(&mut page).unwrap();
        install(&mut page).unwrap();
        assert_eq!(page.registry().len(), 1);
        assert!(!page.is_bootstrapped());

        page.finish_parsing().unwrap();
        assert!(page.is_bootstrapped());
        assert!(page.registry().is_empty());
    }

    #[test]
    fn test_install_after_load_runs_immediately() {
        let mut doc = Document::default();
        doc.set_ready_state(ReadyState::Complete);
        let mut page = Page::new(doc);

        install(&mut page).unwrap();
        assert!(page.is_bootstrapped());
        assert!(page.registry().is_empty());
    }

    #[test]
    fn test_run_is_once_only() {
        let mut doc = Document::default();
        let button = doc.create_element("button");
        let panel = doc.create_element("div");
        doc.append_child(doc.body(), button).unwrap();
        doc.append_child(doc.body(), panel).unwrap();
        doc.set_attribute(button, "aria-controls", "panel").unwrap();
        doc.set_attribute(panel, "id", "panel").unwrap();
        let mut page = Page::new(doc);

        run(&mut page).unwrap();
        run(&mut page).unwrap();
        assert_eq!(page.toggles().len(), 1);
        assert_eq!(page.document().observers().len(), 1);
    }
}
