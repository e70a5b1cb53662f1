//! Accessibility Configuration

/// When a focus trap computes its member list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTrapMembership {
    /// Once, when the trap is built at bind time
    Snapshot,
    /// Again on every activation, after the dialog is shown
    #[default]
    RecomputeOnActivate,
}

/// Configuration for page bindings
#[derive(Debug, Clone)]
pub struct A11yConfig {
    /// Delay before `aria-expanded` follows a target mutation
    pub debounce_ms: u64,
    /// Attributes of a controlled element that trigger a resync
    pub observed_attributes: Vec<String>,
    /// `KeyboardEvent.key` values that activate a trigger like a click
    pub activation_keys: Vec<String>,
    /// Focus trap membership policy
    pub trap_membership: FocusTrapMembership,
    /// Guard against self-rescheduling loops: the most timers that tasks
    /// may queue and run again within one advance/flush. Timers already
    /// pending when the call starts never count.
    pub timer_step_limit: usize,
}

impl Default for A11yConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            observed_attributes: vec!["style".into(), "class".into()],
            activation_keys: vec!["Enter".into(), " ".into()],
            trap_membership: FocusTrapMembership::default(),
            timer_step_limit: 10_000,
        }
    }
}

impl A11yConfig {
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_trap_membership(mut self, membership: FocusTrapMembership) -> Self {
        self.trap_membership = membership;
        self
    }

    pub fn with_observed_attributes(mut self, attrs: &[&str]) -> Self {
        self.observed_attributes = attrs.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_timer_step_limit(mut self, limit: usize) -> Self {
        self.timer_step_limit = limit.max(1);
        self
    }

    pub fn is_activation_key(&self, key: &str) -> bool {
        self.activation_keys.iter().any(|k| k == key)
    }
}
