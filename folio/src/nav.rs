/// A navigation link as described by the page markup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavLink {
    pub href: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// The target id of an in-page link (`"#projects"` → `"projects"`).
    ///
    /// Returns `None` for links that do not start with `#` or that have an empty fragment.
    pub fn fragment(&self) -> Option<&str> {
        self.href.strip_prefix('#').filter(|id| !id.is_empty())
    }
}

/// Open/closed state of the mobile navigation menu.
///
/// Every change goes through [`NavMenu::set_open`] so the `active` classes and the body
/// scroll lock can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns `true` when the state actually changed.
    pub fn set_open(&mut self, open: bool) -> bool {
        if self.open == open {
            return false;
        }
        self.open = open;
        true
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Value for the body `overflow` property.
    pub fn body_overflow(&self) -> &'static str {
        if self.open { "hidden" } else { "" }
    }
}
