use crate::NavLink;

/// The contact form, when the page has one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormMarkup {
    /// Label of the submit button, restored after a simulated submission. `None` when the
    /// form has no submit button.
    pub submit_label: Option<String>,
}

impl FormMarkup {
    pub fn with_submit_label(label: impl Into<String>) -> Self {
        Self {
            submit_label: Some(label.into()),
        }
    }
}

/// Which page elements exist.
///
/// Features whose elements are missing are skipped: they get no subscriptions and never
/// produce effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageMarkup {
    pub navbar: bool,
    pub nav_toggle: bool,
    pub nav_menu: bool,
    pub nav_links: Vec<NavLink>,
    pub contact_form: Option<FormMarkup>,
    pub typing_text: bool,
    pub hero: bool,
    pub hero_content: bool,
    /// Stat cards, project cards and showcases, in document order.
    pub reveal_targets: usize,
    pub project_cards: usize,
    pub resume_button: bool,
}

impl PageMarkup {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full portfolio layout with the given in-page link targets.
    pub fn portfolio<I, S>(section_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            navbar: true,
            nav_toggle: true,
            nav_menu: true,
            nav_links: section_ids
                .into_iter()
                .map(|id| NavLink::new(format!("#{}", id.as_ref())))
                .collect(),
            contact_form: Some(FormMarkup::with_submit_label("Send Message")),
            typing_text: true,
            hero: true,
            hero_content: true,
            reveal_targets: 0,
            project_cards: 0,
            resume_button: true,
        }
    }

    pub fn with_navigation(mut self, toggle: bool, menu: bool) -> Self {
        self.nav_toggle = toggle;
        self.nav_menu = menu;
        self
    }

    pub fn with_navbar(mut self, navbar: bool) -> Self {
        self.navbar = navbar;
        self
    }

    pub fn with_nav_links<I, S>(mut self, hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nav_links = hrefs.into_iter().map(NavLink::new).collect();
        self
    }

    pub fn with_contact_form(mut self, form: Option<FormMarkup>) -> Self {
        self.contact_form = form;
        self
    }

    pub fn with_typing_text(mut self, typing_text: bool) -> Self {
        self.typing_text = typing_text;
        self
    }

    pub fn with_hero(mut self, hero: bool, hero_content: bool) -> Self {
        self.hero = hero;
        self.hero_content = hero_content;
        self
    }

    pub fn with_reveal_targets(mut self, count: usize) -> Self {
        self.reveal_targets = count;
        self
    }

    pub fn with_project_cards(mut self, count: usize) -> Self {
        self.project_cards = count;
        self
    }

    pub fn with_resume_button(mut self, resume_button: bool) -> Self {
        self.resume_button = resume_button;
        self
    }

    /// The menu toggle and panel are both required for menu behavior.
    pub fn has_navigation(&self) -> bool {
        self.nav_toggle && self.nav_menu
    }

    /// Index of the first link pointing at `id`.
    pub fn link_for(&self, id: &str) -> Option<usize> {
        self.nav_links.iter().position(|l| l.fragment() == Some(id))
    }
}
