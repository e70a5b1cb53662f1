//! fOS Accessibility
//!
//! ARIA state synchronization for fOS pages.
//!
//! Features:
//! - `aria-expanded` kept in sync with the visibility of controlled elements
//! - Dialog open/close with focus trapping and Escape-to-close
//! - Enter/Space activation for custom controls
//!
//! # Example
//! ```rust,ignore
//! use fos_a11y::Page;
//!
//! let doc = fos_html::parse(markup)?;
//! let mut page = Page::load(doc)?;
//! page.click(trigger)?;
//! page.advance_time(100)?;
//! ```

pub mod aria;
pub mod bootstrap;
pub mod config;
pub mod debounce;
pub mod dialog;
pub mod focus;
pub mod page;
pub mod registry;
pub mod timers;
pub mod toggle;
pub mod visibility;

pub use aria::{ARIA_CONTROLS, ARIA_EXPANDED, ROLE};
pub use config::{A11yConfig, FocusTrapMembership};
pub use debounce::Debouncer;
pub use dialog::DialogBinding;
pub use focus::{FocusTrap, TabIndex};
pub use page::{Page, Task};
pub use registry::{Listener, ListenerId, ListenerRegistry, Registration};
pub use timers::{ScheduledTask, Scheduler, TimerId};
pub use toggle::ToggleBinding;
pub use visibility::is_element_visible;

use fos_dom::NodeId;

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Unknown element: {0:?}")]
    UnknownElement(NodeId),

    #[error("Timers kept rescheduling past the step limit ({0} steps)")]
    TimerStepLimit(usize),

    #[error(transparent)]
    Dom(#[from] fos_dom::DomError),
}

/// Result alias for page operations
pub type Result<T> = std::result::Result<T, A11yError>;
