//! Page - A loaded document plus the bindings running on it
//!
//! The page is the single-threaded host: it owns the document, the timer
//! queue and the listener registry, dispatches events, runs timers on a
//! virtual clock and delivers mutation records after every task.

use fos_dom::{Document, DomEvent, EventType, KeyData, NodeId, ReadyState};

use crate::config::A11yConfig;
use crate::dialog::{self, DialogBinding};
use crate::registry::{Listener, ListenerId, ListenerRegistry};
use crate::timers::{ScheduledTask, Scheduler};
use crate::toggle::{self, ToggleBinding};
use crate::{bootstrap, focus, A11yError, Result};

/// Work queued on the page's timer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Write a target's visibility into its trigger's `aria-expanded`
    SyncExpanded(usize),
}

/// A loaded page with ARIA bindings
#[derive(Debug)]
pub struct Page {
    pub(crate) document: Document,
    pub(crate) scheduler: Scheduler<Task>,
    pub(crate) registry: ListenerRegistry,
    pub(crate) toggles: Vec<ToggleBinding>,
    pub(crate) dialogs: Vec<DialogBinding>,
    pub(crate) config: A11yConfig,
    pub(crate) bootstrap_listener: Option<ListenerId>,
    pub(crate) bootstrapped: bool,
}

impl Page {
    /// Wrap a document. Nothing is bound until [`Page::install`].
    pub fn new(document: Document) -> Self {
        Self::with_config(document, A11yConfig::default())
    }

    pub fn with_config(document: Document, config: A11yConfig) -> Self {
        Self {
            document,
            scheduler: Scheduler::new(),
            registry: ListenerRegistry::new(),
            toggles: Vec::new(),
            dialogs: Vec::new(),
            config,
            bootstrap_listener: None,
            bootstrapped: false,
        }
    }

    /// Install the bootstrapper and finish loading the document
    pub fn load(document: Document) -> Result<Self> {
        let mut page = Self::new(document);
        page.install()?;
        page.finish_parsing()?;
        Ok(page)
    }

    /// Register the bootstrapper. Runs the binders right away if the
    /// document is already past `Loading`.
    pub fn install(&mut self) -> Result<()> {
        bootstrap::install(self)?;
        self.checkpoint();
        Ok(())
    }

    /// Mark the document parsed and fire `DOMContentLoaded`
    pub fn finish_parsing(&mut self) -> Result<()> {
        if self.document.ready_state() != ReadyState::Loading {
            return Ok(());
        }
        self.document.set_ready_state(ReadyState::Interactive);
        self.dispatch(DomEvent::content_loaded())?;
        self.checkpoint();
        self.document.set_ready_state(ReadyState::Complete);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access. Mutations made here are delivered at the
    /// next [`Page::checkpoint`].
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &A11yConfig {
        &self.config
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler<Task> {
        &self.scheduler
    }

    pub fn toggles(&self) -> &[ToggleBinding] {
        &self.toggles
    }

    pub fn dialogs(&self) -> &[DialogBinding] {
        &self.dialogs
    }

    /// Dialog binding for a dialog element
    pub fn dialog_binding(&self, dialog: NodeId) -> Option<&DialogBinding> {
        self.dialogs.iter().find(|d| d.dialog == dialog)
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    // ---------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------

    /// Pointer click on an element
    pub fn click(&mut self, target: NodeId) -> Result<DomEvent> {
        self.ensure_element(target)?;
        let event = self.dispatch(DomEvent::click(target))?;
        self.checkpoint();
        Ok(event)
    }

    /// Key press at the focused element (or the body when nothing has focus)
    pub fn key_down(&mut self, key: impl Into<KeyData>) -> Result<DomEvent> {
        let target = self
            .document
            .active_element()
            .or_else(|| Some(self.document.body()).filter(|b| b.is_valid()))
            .or_else(|| Some(self.document.document_element()).filter(|h| h.is_valid()))
            .unwrap_or(NodeId::ROOT);
        self.key_down_on(target, key)
    }

    /// Key press dispatched at a specific element
    pub fn key_down_on(&mut self, target: NodeId, key: impl Into<KeyData>) -> Result<DomEvent> {
        if target != NodeId::ROOT {
            self.ensure_element(target)?;
        }
        let event = self.dispatch(DomEvent::key_down(target, key))?;
        self.run_default_action(&event)?;
        self.checkpoint();
        Ok(event)
    }

    /// Move focus; false when the element cannot take focus
    pub fn focus(&mut self, target: NodeId) -> Result<bool> {
        self.ensure_element(target)?;
        Ok(self.document.focus(target))
    }

    // ---------------------------------------------------------------
    // Observed mutations
    // ---------------------------------------------------------------

    pub fn set_attribute(&mut self, target: NodeId, name: &str, value: &str) -> Result<()> {
        self.document.set_attribute(target, name, value)?;
        self.checkpoint();
        Ok(())
    }

    pub fn remove_attribute(&mut self, target: NodeId, name: &str) -> Result<bool> {
        let removed = self.document.remove_attribute(target, name)?;
        self.checkpoint();
        Ok(removed)
    }

    /// `element.style.<property> = value`
    pub fn set_style_property(&mut self, target: NodeId, property: &str, value: &str) -> Result<()> {
        self.document.set_style_property(target, property, value)?;
        self.checkpoint();
        Ok(())
    }

    // ---------------------------------------------------------------
    // Dialogs
    // ---------------------------------------------------------------

    /// Open a bound dialog; false if the element has no binding
    pub fn open_dialog(&mut self, dialog: NodeId) -> Result<bool> {
        self.set_dialog_open(dialog, true)
    }

    /// Close a bound dialog; false if the element has no binding
    pub fn close_dialog(&mut self, dialog: NodeId) -> Result<bool> {
        self.set_dialog_open(dialog, false)
    }

    fn set_dialog_open(&mut self, dialog: NodeId, open: bool) -> Result<bool> {
        let Some(index) = self.dialogs.iter().position(|d| d.dialog == dialog) else {
            return Ok(false);
        };
        dialog::set_dialog_open(self, index, open)?;
        self.checkpoint();
        Ok(true)
    }

    // ---------------------------------------------------------------
    // Timers
    // ---------------------------------------------------------------

    /// Move the clock forward, running every timer that comes due
    pub fn advance_time(&mut self, ms: u64) -> Result<usize> {
        let target = self.scheduler.now_ms().saturating_add(ms);
        let backlog_end = self.scheduler.next_timer_id();
        let mut ran = 0;
        let mut rescheduled = 0;
        while let Some(task) = self.scheduler.pop_due(target) {
            if task.id >= backlog_end {
                rescheduled = self.count_rescheduled(rescheduled)?;
            }
            self.run_task(task)?;
            ran += 1;
        }
        self.scheduler.advance_to(target);
        Ok(ran)
    }

    /// Run timers until the queue is empty, moving the clock as needed
    pub fn flush_timers(&mut self) -> Result<usize> {
        let backlog_end = self.scheduler.next_timer_id();
        let mut ran = 0;
        let mut rescheduled = 0;
        while let Some(task) = self.scheduler.pop_next() {
            if task.id >= backlog_end {
                rescheduled = self.count_rescheduled(rescheduled)?;
            }
            self.run_task(task)?;
            ran += 1;
        }
        Ok(ran)
    }

    /// Timers queued before an advance/flush always run. Only timers that
    /// running tasks queue again count toward the limit.
    fn count_rescheduled(&self, rescheduled: usize) -> Result<usize> {
        if rescheduled >= self.config.timer_step_limit {
            return Err(A11yError::TimerStepLimit(self.config.timer_step_limit));
        }
        Ok(rescheduled + 1)
    }

    fn run_task(&mut self, timer: ScheduledTask<Task>) -> Result<()> {
        tracing::trace!("[timer] run {:?} at {}ms", timer.task, self.scheduler.now_ms());
        match timer.task {
            Task::SyncExpanded(index) => {
                let Some(binding) = self.toggles.get_mut(index) else { return Ok(()) };
                if !binding.debouncer.complete(timer.id) {
                    return Ok(());
                }
                toggle::sync_expanded(self, index)?;
            }
        }
        self.checkpoint();
        Ok(())
    }

    /// Deliver queued mutation records to their subscribers
    pub fn checkpoint(&mut self) {
        if !self.document.observers().has_pending() {
            return;
        }
        for (observer, records) in self.document.observers_mut().drain_pending() {
            let Some(binding) = self.toggles.iter_mut().find(|b| b.observer == observer) else {
                continue;
            };
            tracing::trace!("{} mutation(s) on {:?}", records.len(), binding.target);
            binding.debouncer.call(&mut self.scheduler);
        }
    }

    /// Remove every listener and observer and drop all bindings
    pub fn teardown(&mut self) {
        let (listeners, observers) = self.registry.drain();
        for observer in &observers {
            self.document.observers_mut().remove(*observer);
        }
        for binding in &mut self.toggles {
            binding.debouncer.cancel(&mut self.scheduler);
        }
        self.toggles.clear();
        self.dialogs.clear();
        self.bootstrap_listener = None;
        tracing::debug!(
            "Teardown: {} listener(s), {} observer(s) removed",
            listeners.len(),
            observers.len()
        );
    }

    // ---------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------

    /// Dispatch an event at its target, then bubble through ancestors
    pub(crate) fn dispatch(&mut self, mut event: DomEvent) -> Result<DomEvent> {
        let mut path = vec![event.target];
        if event.bubbles {
            path.extend(self.document.tree().ancestors(event.target));
        }

        for node in path {
            event.current_target = Some(node);
            for registration in self.registry.listeners_for(node, event.event_type) {
                // An earlier listener may have removed this one
                if !self.registry.contains(registration.id) {
                    continue;
                }
                self.invoke(registration.listener, &mut event)?;
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        event.current_target = None;
        Ok(event)
    }

    /// Synthesized click from inside another task
    pub(crate) fn dispatch_click(&mut self, target: NodeId) -> Result<DomEvent> {
        self.dispatch(DomEvent::click(target))
    }

    fn invoke(&mut self, listener: Listener, event: &mut DomEvent) -> Result<()> {
        match listener {
            Listener::Bootstrap => bootstrap::run(self),
            Listener::KeyActivation { trigger } => toggle::handle_activation_key(self, trigger, event),
            Listener::FocusTrap { container } => {
                if let Some(binding) = self.dialogs.iter().find(|d| d.trap.container() == container) {
                    binding.trap.handle_key(&mut self.document, event);
                }
                Ok(())
            }
            Listener::DialogEscape { dialog } => dialog::handle_escape(self, dialog, event),
            Listener::DialogTrigger { dialog } => dialog::handle_trigger_click(self, dialog),
        }
    }

    /// Browser default actions for key presses nobody prevented
    fn run_default_action(&mut self, event: &DomEvent) -> Result<()> {
        if event.is_default_prevented() || event.event_type != EventType::KeyDown {
            return Ok(());
        }
        let target = event.target;
        let tag = self.document.tree().tag_name(target);
        let is_button = tag == Some("button");
        let is_link = tag == Some("a") && self.document.has_attribute(target, "href");

        match event.key() {
            Some("Tab") => {
                let from = self.document.active_element();
                if let Some(next) = focus::next_in_sequence(&self.document, from, event.shift_key()) {
                    self.document.focus(next);
                }
            }
            Some("Enter") if is_button || is_link => {
                self.dispatch_click(target)?;
            }
            Some(" ") if is_button => {
                self.dispatch_click(target)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn ensure_element(&self, target: NodeId) -> Result<()> {
        if self.document.tree().element(target).is_none() {
            return Err(A11yError::UnknownElement(target));
        }
        Ok(())
    }
}
