use crate::Easing;

/// Per-step delays of the typing animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypingTimings {
    /// Delay between revealed characters.
    pub type_ms: u64,
    /// Delay between removed characters.
    pub delete_ms: u64,
    /// Hold once the whole phrase is shown.
    pub hold_full_ms: u64,
    /// Hold once the phrase is fully deleted, before the next phrase starts.
    pub hold_empty_ms: u64,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            hold_full_ms: 2000,
            hold_empty_ms: 500,
        }
    }
}

/// Lifecycle timings of a notification, all relative to its mount time except `exit_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NotificationTimings {
    pub enter_delay_ms: u64,
    pub lifetime_ms: u64,
    /// Slide-out duration before the element is removed.
    pub exit_ms: u64,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100,
            lifetime_ms: 5000,
            exit_ms: 300,
        }
    }
}

/// Reveal-on-scroll trigger geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RevealOptions {
    /// Fraction of the element that must be inside the trigger zone.
    pub threshold: f64,
    /// Bottom root margin in px. Negative values shrink the trigger zone.
    pub root_margin_bottom: f64,
    /// Initial downward offset of hidden elements, in px.
    pub hidden_offset: f64,
}

impl RevealOptions {
    /// The margin formatted the way `IntersectionObserverInit.rootMargin` expects it.
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.root_margin_bottom + 0.0)
    }
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: -50.0,
            hidden_offset: 30.0,
        }
    }
}

/// How navigation clicks scroll the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SmoothScroll {
    /// Emit a single smooth `ScrollTo` and let the host animate it.
    #[default]
    Native,
    /// Animate the offset in the engine, emitting one instant `ScrollTo` per frame.
    Tween { duration_ms: u64, easing: Easing },
}

/// User-facing strings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Messages {
    pub missing_fields: String,
    pub invalid_email: String,
    pub message_sent: String,
    pub sending_label: String,
    pub resume_unavailable: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            missing_fields: "Please fill in all fields.".into(),
            invalid_email: "Please enter a valid email address.".into(),
            message_sent: "Message sent successfully! I'll get back to you soon.".into(),
            sending_label: "Sending...".into(),
            resume_unavailable: "CV download will be available soon!".into(),
        }
    }
}

/// Configuration for [`crate::PageController`].
///
/// Every default is part of the styling contract of the page (offsets, thresholds, timings),
/// so overriding them is mostly useful for tests and alternate layouts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageOptions {
    /// Height of the fixed header subtracted from smooth-scroll destinations.
    pub header_offset: f64,
    /// Scroll position past which the header switches to its opaque variant.
    pub scrolled_threshold: f64,
    /// Offset applied to section tops for active-link tracking.
    pub section_offset: f64,
    /// Hero translation per scrolled px.
    pub parallax_rate: f64,
    pub phrases: Vec<String>,
    pub typing: TypingTimings,
    /// Simulated network latency of the contact form.
    pub submit_delay_ms: u64,
    pub notification: NotificationTimings,
    pub reveal: RevealOptions,
    pub smooth_scroll: SmoothScroll,
    pub messages: Messages,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            header_offset: 70.0,
            scrolled_threshold: 50.0,
            section_offset: 100.0,
            parallax_rate: -0.3,
            phrases: vec![
                "Ready to Innovate".into(),
                "Building the Future".into(),
                "Creating Solutions".into(),
            ],
            typing: TypingTimings::default(),
            submit_delay_ms: 2000,
            notification: NotificationTimings::default(),
            reveal: RevealOptions::default(),
            smooth_scroll: SmoothScroll::default(),
            messages: Messages::default(),
        }
    }
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_offset(mut self, header_offset: f64) -> Self {
        self.header_offset = header_offset;
        self
    }

    pub fn with_scrolled_threshold(mut self, threshold: f64) -> Self {
        self.scrolled_threshold = threshold;
        self
    }

    pub fn with_section_offset(mut self, section_offset: f64) -> Self {
        self.section_offset = section_offset;
        self
    }

    pub fn with_parallax_rate(mut self, rate: f64) -> Self {
        self.parallax_rate = rate;
        self
    }

    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_typing(mut self, typing: TypingTimings) -> Self {
        self.typing = typing;
        self
    }

    pub fn with_submit_delay_ms(mut self, delay_ms: u64) -> Self {
        self.submit_delay_ms = delay_ms;
        self
    }

    pub fn with_notification(mut self, notification: NotificationTimings) -> Self {
        self.notification = notification;
        self
    }

    pub fn with_reveal(mut self, reveal: RevealOptions) -> Self {
        self.reveal = reveal;
        self
    }

    pub fn with_smooth_scroll(mut self, smooth_scroll: SmoothScroll) -> Self {
        self.smooth_scroll = smooth_scroll;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Checks the options for values that would stall or break an animation.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.phrases.is_empty() {
            return Err(OptionsError::NoPhrases);
        }
        if let Some(index) = self.phrases.iter().position(|p| p.is_empty()) {
            return Err(OptionsError::EmptyPhrase(index));
        }
        let t = &self.typing;
        for (name, value) in [("type_ms", t.type_ms), ("delete_ms", t.delete_ms)] {
            if value == 0 {
                return Err(OptionsError::ZeroDelay(name));
            }
        }
        // One-char phrases cycle through the two holds alone.
        if t.hold_full_ms == 0 && t.hold_empty_ms == 0 {
            return Err(OptionsError::NoTypingHold);
        }
        if self.notification.lifetime_ms <= self.notification.enter_delay_ms {
            return Err(OptionsError::NotificationLifetime {
                enter_delay_ms: self.notification.enter_delay_ms,
                lifetime_ms: self.notification.lifetime_ms,
            });
        }
        if let SmoothScroll::Tween { duration_ms: 0, .. } = self.smooth_scroll {
            return Err(OptionsError::ZeroDelay("smooth_scroll.duration_ms"));
        }
        Ok(())
    }
}

/// Rejected configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionsError {
    NoPhrases,
    EmptyPhrase(usize),
    ZeroDelay(&'static str),
    NoTypingHold,
    NotificationLifetime { enter_delay_ms: u64, lifetime_ms: u64 },
}

impl core::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoPhrases => f.write_str("typing animation needs at least one phrase"),
            Self::EmptyPhrase(index) => write!(f, "phrase {index} is empty"),
            Self::ZeroDelay(name) => write!(f, "{name} must be greater than zero"),
            Self::NoTypingHold => f.write_str("typing holds cannot both be zero"),
            Self::NotificationLifetime {
                enter_delay_ms,
                lifetime_ms,
            } => write!(
                f,
                "notification lifetime ({lifetime_ms}ms) must exceed its enter delay ({enter_delay_ms}ms)"
            ),
        }
    }
}

impl std::error::Error for OptionsError {}
