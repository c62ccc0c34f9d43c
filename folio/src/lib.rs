//! A headless page-behavior engine for a single static portfolio page.
//!
//! For the browser binding, see the `folio-web` crate.
//!
//! This crate owns the behavior behind the page's interactive touches: the mobile menu and
//! its scroll lock, smooth in-page navigation, scroll-reactive header/active-link/parallax
//! styling, a looping typing animation, a simulated contact form with validation, transient
//! notifications, one-shot reveal animations and hover effects.
//!
//! It is UI-agnostic. A host (e.g. a DOM binding) is expected to provide:
//! - which page elements exist ([`PageMarkup`])
//! - events translated into [`PageEvent`]s, with a monotonic clock in milliseconds
//! - timer wake-ups at [`PageController::next_deadline`]
//!
//! and to apply the [`Effect`]s the controller queues.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod effect;
mod event;
mod form;
mod markup;
mod nav;
mod notification;
mod options;
mod reveal;
mod scroll;
mod timers;
mod tween;
mod types;
mod typing;

#[cfg(test)]
mod tests;

pub use controller::PageController;
pub use effect::Effect;
pub use event::{Dispatch, EventKind, EventSource, Key, PageEvent, Subscription};
pub use form::{ContactFields, Field, Submission, ValidationError, is_valid_email};
pub use markup::{FormMarkup, PageMarkup};
pub use nav::{NavLink, NavMenu};
pub use notification::{
    NOTIFICATION_BASE_STYLE, Notification, NotificationStage, NotificationSurface,
    notification_style,
};
pub use options::{
    Messages, NotificationTimings, OptionsError, PageOptions, RevealOptions, SmoothScroll,
    TypingTimings,
};
pub use reveal::{RevealSet, intersects};
pub use scroll::{HeaderStyle, ScrollMetrics, active_section, parallax_offset};
pub use timers::{Timer, TimerKind, Timers};
pub use tween::{Easing, TWEEN_FRAME_MS, Tween};
pub use types::{NotificationId, SectionSpan, Severity, Target, ViewportRect};
pub use typing::{TypingPhase, TypingState};
