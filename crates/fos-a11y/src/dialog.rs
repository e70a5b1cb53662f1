//! Dialogs
//!
//! Binds `role="dialog"` elements to the trigger that controls them.
//! Opening shows the dialog, traps focus inside and moves focus in;
//! closing hides it, releases the trap and hands focus back to the trigger.

use fos_dom::{DomEvent, EventType, NodeId, SimpleSelector};

use crate::aria::{expanded_value, ARIA_CONTROLS, ARIA_EXPANDED, ROLE};
use crate::config::FocusTrapMembership;
use crate::focus::{first_focusable_descendant, FocusTrap};
use crate::page::Page;
use crate::registry::{Listener, ListenerId};
use crate::visibility::is_element_visible;
use crate::Result;

/// A dialog and its trigger
#[derive(Debug, Clone)]
pub struct DialogBinding {
    pub dialog: NodeId,
    pub trigger: NodeId,
    pub trap: FocusTrap,
    pub escape_listener: ListenerId,
    pub click_listener: ListenerId,
}

impl DialogBinding {
    pub fn is_trap_active(&self) -> bool {
        self.trap.is_active()
    }
}

/// Bind every dialog that has a trigger. Returns the number bound.
pub fn bind_dialogs(page: &mut Page) -> usize {
    let selector = SimpleSelector::Attribute { name: ROLE.into(), value: Some("dialog".into()) };
    let dialogs = page.document.select_all(&selector);
    let mut bound = 0;

    for dialog in dialogs {
        let Some(id) = page.document.tree().element_id(dialog).filter(|id| !id.is_empty()) else {
            tracing::debug!("Dialog {:?} has no id, skipping", dialog);
            continue;
        };
        let Some(trigger) = page.document.first_with_attribute_value(ARIA_CONTROLS, id) else {
            tracing::debug!("Dialog #{} has no trigger, skipping", id);
            continue;
        };

        let index = page.dialogs.len();
        let trap = FocusTrap::new(&page.document, dialog);
        let escape_listener = page.registry.add(dialog, EventType::KeyDown, Listener::DialogEscape { dialog: index });
        let click_listener = page.registry.add(trigger, EventType::Click, Listener::DialogTrigger { dialog: index });

        page.dialogs.push(DialogBinding { dialog, trigger, trap, escape_listener, click_listener });
        bound += 1;
    }

    tracing::debug!("Bound {} dialog(s)", bound);
    bound
}

/// Open or close the dialog at `index`
pub fn set_dialog_open(page: &mut Page, index: usize, open: bool) -> Result<()> {
    let Some(binding) = page.dialogs.get(index) else { return Ok(()) };
    let (dialog, trigger) = (binding.dialog, binding.trigger);
    tracing::debug!("{} dialog {:?}", if open { "Opening" } else { "Closing" }, dialog);

    page.document.set_style_property(dialog, "display", if open { "block" } else { "none" })?;

    let binding = &mut page.dialogs[index];
    if open {
        if page.config.trap_membership == FocusTrapMembership::RecomputeOnActivate {
            binding.trap.refresh(&page.document);
        }
        binding.trap.activate(&mut page.registry);
        if let Some(first) = first_focusable_descendant(&page.document, dialog) {
            page.document.focus(first);
        }
    } else {
        binding.trap.deactivate(&mut page.registry);
        page.document.focus(trigger);
    }

    page.document.set_attribute(trigger, ARIA_EXPANDED, expanded_value(open))?;
    Ok(())
}

/// Trigger click: toggle on the dialog's current visibility
pub(crate) fn handle_trigger_click(page: &mut Page, index: usize) -> Result<()> {
    let Some(binding) = page.dialogs.get(index) else { return Ok(()) };
    let visible = is_element_visible(&page.document, binding.dialog);
    set_dialog_open(page, index, !visible)
}

/// Escape inside the dialog closes it
pub(crate) fn handle_escape(page: &mut Page, index: usize, event: &mut DomEvent) -> Result<()> {
    if event.key() != Some("Escape") {
        return Ok(());
    }
    event.prevent_default();
    set_dialog_open(page, index, false)
}
