//! Toggle Buttons
//!
//! Keeps `aria-expanded` on every `aria-controls` trigger in step with the
//! visibility of the element it controls, and lets Enter/Space activate
//! the trigger like a click.

use fos_dom::{DomEvent, EventType, MutationObserverInit, NodeId, ObserverId};

use crate::aria::{expanded_value, ARIA_CONTROLS, ARIA_EXPANDED};
use crate::debounce::Debouncer;
use crate::page::{Page, Task};
use crate::registry::{Listener, ListenerId};
use crate::visibility::is_element_visible;
use crate::Result;

/// One trigger bound to the element it controls
#[derive(Debug, Clone)]
pub struct ToggleBinding {
    pub trigger: NodeId,
    pub target: NodeId,
    pub observer: ObserverId,
    pub key_listener: ListenerId,
    pub(crate) debouncer: Debouncer<Task>,
}

impl ToggleBinding {
    /// Whether a resync is waiting on the debounce timer
    pub fn sync_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

/// Bind every `aria-controls` trigger in the document. Triggers whose
/// target does not exist are skipped. Returns the number bound.
pub fn bind_toggle_buttons(page: &mut Page) -> Result<usize> {
    let triggers = page.document.elements_with_attribute(ARIA_CONTROLS);
    let mut bound = 0;

    for trigger in triggers {
        let id = page.document.get_attribute(trigger, ARIA_CONTROLS).unwrap_or_default();
        let Some(target) = page.document.get_element_by_id(id) else {
            tracing::debug!("{:?}: no element with id {:?}, skipping", trigger, id);
            continue;
        };

        let attrs: Vec<&str> = page.config.observed_attributes.iter().map(String::as_str).collect();
        let observers = page.document.observers_mut();
        let observer = observers.create();
        observers.observe(observer, target, MutationObserverInit::attributes(&attrs));
        page.registry.track_observer(observer);

        let key_listener = page.registry.add(trigger, EventType::KeyDown, Listener::KeyActivation { trigger });

        let index = page.toggles.len();
        page.toggles.push(ToggleBinding {
            trigger,
            target,
            observer,
            key_listener,
            debouncer: Debouncer::new(page.config.debounce_ms, Task::SyncExpanded(index)),
        });

        // Initial state, without waiting for a mutation
        sync_expanded(page, index)?;
        bound += 1;
    }

    tracing::debug!("Bound {} toggle button(s)", bound);
    Ok(bound)
}

/// Write the target's current visibility into the trigger's `aria-expanded`
pub fn sync_expanded(page: &mut Page, index: usize) -> Result<()> {
    let Some(binding) = page.toggles.get(index) else { return Ok(()) };
    let (trigger, target) = (binding.trigger, binding.target);

    let visible = is_element_visible(&page.document, target);
    tracing::trace!("{:?} {}={}", trigger, ARIA_EXPANDED, visible);
    page.document.set_attribute(trigger, ARIA_EXPANDED, expanded_value(visible))?;
    Ok(())
}

/// Keydown on a trigger: activation keys act as a click
pub(crate) fn handle_activation_key(page: &mut Page, trigger: NodeId, event: &mut DomEvent) -> Result<()> {
    let Some(key) = event.key() else { return Ok(()) };
    if !page.config.is_activation_key(key) {
        return Ok(());
    }
    event.prevent_default();
    page.dispatch_click(trigger)?;
    Ok(())
}
