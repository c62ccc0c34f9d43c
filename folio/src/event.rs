use crate::{ContactFields, ScrollMetrics};

/// Where the host must listen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventSource {
    Window,
    Document,
    NavToggle,
    NavLink(usize),
    ContactForm,
    RevealTarget(usize),
    ProjectCard(usize),
    ResumeButton,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Click,
    KeyDown,
    Scroll,
    Submit,
    PointerEnter,
    PointerLeave,
    /// The element entered the reveal trigger zone.
    Intersect,
    Load,
}

/// One listener the host registers on behalf of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subscription {
    pub source: EventSource,
    pub kind: EventKind,
}

impl Subscription {
    pub const fn new(source: EventSource, kind: EventKind) -> Self {
        Self { source, kind }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Escape,
    Other,
}

impl Key {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// A page event translated by the host.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageEvent {
    NavToggleClick,
    /// `target_top` is the document offset of the link's fragment target, if it exists.
    NavLinkClick {
        index: usize,
        target_top: Option<f64>,
    },
    /// A click anywhere in the document; `inside_nav` is true when the target is inside
    /// the toggle or the menu panel.
    DocumentClick {
        inside_nav: bool,
    },
    KeyDown(Key),
    Scroll(ScrollMetrics),
    Submit(ContactFields),
    ResumeClick,
    CardPointerEnter(usize),
    CardPointerLeave(usize),
    RevealEntered(usize),
    Load,
}

/// What the host should do with the native event after dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub prevent_default: bool,
}

impl Dispatch {
    pub(crate) const PASS: Self = Self {
        prevent_default: false,
    };
    pub(crate) const PREVENT: Self = Self {
        prevent_default: true,
    };
}
