//! The markup the binding looks for.

pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const NAVBAR_ID: &str = "navbar";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const TYPING_TEXT_ID: &str = "typing-text";
pub const HERO_SECTION_ID: &str = "hero";

pub const NAV_LINKS: &str = ".nav-link";
pub const SECTIONS: &str = "section[id]";
pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
pub const HERO: &str = ".hero";
pub const HERO_CONTENT: &str = ".hero-content";
pub const REVEAL_TARGETS: &str = ".stat-card, .project-card, .portfolio-showcase";
pub const PROJECT_CARDS: &str = ".project-card";
pub const RESUME_BUTTON: &str = ".hero-buttons .btn--primary";

