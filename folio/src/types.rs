/// A page element the engine can address in an [`crate::Effect`].
///
/// Indexed variants refer to the position of the element inside the matching collection
/// described by [`crate::PageMarkup`] (document order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Body,
    Navbar,
    NavToggle,
    NavMenu,
    NavLink(usize),
    Hero,
    HeroContent,
    TypingText,
    ContactForm,
    SubmitButton,
    RevealTarget(usize),
    ProjectCard(usize),
    Notification(NotificationId),
}

/// Identity of a mounted notification element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationId(pub u64);

/// Notification category. Drives the CSS modifier class and the background color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// Full class attribute for a notification of this severity.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Info => "notification notification--info",
            Self::Success => "notification notification--success",
            Self::Error => "notification notification--error",
            Self::Warning => "notification notification--warning",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Info => "var(--color-info)",
            Self::Success => "var(--color-success)",
            Self::Error => "var(--color-error)",
            Self::Warning => "var(--color-warning)",
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical extent of an element relative to the viewport (as reported by
/// `getBoundingClientRect`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportRect {
    pub top: f64,
    pub bottom: f64,
}

impl ViewportRect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Whether at least part of the rect lies inside a viewport of the given height.
    pub fn is_partially_visible(&self, viewport_height: f64) -> bool {
        self.bottom > 0.0 && self.top < viewport_height
    }
}

/// A page section in document coordinates (`offsetTop` / `clientHeight`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}
