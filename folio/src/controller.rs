use crate::notification::{OFFSCREEN_TRANSFORM, ONSCREEN_TRANSFORM};
use crate::reveal::REVEAL_TRANSITION;
use crate::scroll::{HeaderStyle, active_section, parallax_offset};
use crate::tween::TWEEN_FRAME_MS;
use crate::{
    ContactFields, Dispatch, Effect, EventKind, EventSource, Key, NavMenu, Notification,
    NotificationId, NotificationStage, NotificationSurface, OptionsError, PageEvent, PageMarkup,
    PageOptions, RevealSet, ScrollMetrics, Severity, SmoothScroll, Submission, Subscription,
    Target, TimerKind, Timers, Tween, TypingState, notification_style,
};

const CARD_HOVER_TRANSFORM: &str = "translateY(-8px) scale(1.02)";
const CARD_REST_TRANSFORM: &str = "translateY(0) scale(1)";
const HERO_CONTENT_ANIMATION: &str = "fadeInUp 1s ease forwards";
/// Browsers round scroll offsets, so reports this close to a tween frame are its echo.
const USER_SCROLL_SLOP: f64 = 1.0;

/// The page-behavior controller.
///
/// This type does not hold any UI objects. A host drives it by:
/// - registering the listeners returned by [`PageController::subscriptions`]
/// - forwarding each native event as a [`PageEvent`] to [`PageController::handle`]
/// - calling [`PageController::tick`] once [`PageController::next_deadline`] is reached
/// - applying the queued [`Effect`]s from [`PageController::drain_effects`]
///
/// All times are host-provided monotonic milliseconds, so the whole page can be simulated
/// deterministically.
#[derive(Clone, Debug)]
pub struct PageController {
    options: PageOptions,
    markup: PageMarkup,

    menu: NavMenu,
    header_scrolled: Option<bool>,
    link_active: Vec<bool>,
    scroll_y: f64,
    scroll_tween: Option<Tween>,

    typing: TypingState,
    notifications: NotificationSurface,
    pending_submission: Option<Submission>,
    reveal: RevealSet,
    loaded: bool,

    timers: Timers,
    effects: Vec<Effect>,
}

impl PageController {
    /// Creates the controller and runs page initialization at `now_ms`: reveal targets are
    /// hidden and the typing animation starts.
    pub fn new(options: PageOptions, markup: PageMarkup, now_ms: u64) -> Self {
        fdebug!(
            links = markup.nav_links.len(),
            reveal_targets = markup.reveal_targets,
            project_cards = markup.project_cards,
            "PageController::new"
        );
        let mut c = Self {
            link_active: vec![false; markup.nav_links.len()],
            reveal: RevealSet::new(markup.reveal_targets),
            options,
            markup,
            menu: NavMenu::default(),
            header_scrolled: None,
            scroll_y: 0.0,
            scroll_tween: None,
            typing: TypingState::stopped(),
            notifications: NotificationSurface::default(),
            pending_submission: None,
            loaded: false,
            timers: Timers::new(),
            effects: Vec::new(),
        };
        c.start_typing(now_ms);
        c.hide_reveal_targets();
        finfo!("portfolio page initialized");
        c
    }

    /// Same as [`PageController::new`], but rejects options that would break an animation.
    pub fn try_new(
        options: PageOptions,
        markup: PageMarkup,
        now_ms: u64,
    ) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self::new(options, markup, now_ms))
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    pub fn markup(&self) -> &PageMarkup {
        &self.markup
    }

    /// Listeners the host must register, in registration order.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        let m = &self.markup;
        let mut out = Vec::new();

        if m.has_navigation() {
            out.push(Subscription::new(EventSource::NavToggle, EventKind::Click));
        }
        for i in 0..m.nav_links.len() {
            out.push(Subscription::new(EventSource::NavLink(i), EventKind::Click));
        }
        if m.navbar || !m.nav_links.is_empty() || m.hero || m.typing_text {
            out.push(Subscription::new(EventSource::Window, EventKind::Scroll));
        }
        if m.contact_form.is_some() {
            out.push(Subscription::new(EventSource::ContactForm, EventKind::Submit));
        }
        for i in 0..m.reveal_targets {
            out.push(Subscription::new(
                EventSource::RevealTarget(i),
                EventKind::Intersect,
            ));
        }
        for i in 0..m.project_cards {
            out.push(Subscription::new(
                EventSource::ProjectCard(i),
                EventKind::PointerEnter,
            ));
            out.push(Subscription::new(
                EventSource::ProjectCard(i),
                EventKind::PointerLeave,
            ));
        }
        if m.resume_button {
            out.push(Subscription::new(EventSource::ResumeButton, EventKind::Click));
        }
        if m.has_navigation() {
            out.push(Subscription::new(EventSource::Document, EventKind::Click));
            out.push(Subscription::new(EventSource::Document, EventKind::KeyDown));
        }
        out.push(Subscription::new(EventSource::Window, EventKind::Load));
        out
    }

    /// Handles one page event at `now_ms`.
    pub fn handle(&mut self, event: PageEvent, now_ms: u64) -> Dispatch {
        ftrace!(?event, now_ms, "PageController::handle");
        match event {
            PageEvent::NavToggleClick => {
                if self.markup.has_navigation() {
                    let open = !self.menu.is_open();
                    self.set_menu_open(open);
                }
                Dispatch::PASS
            }
            PageEvent::NavLinkClick { index, target_top } => {
                self.on_nav_link_click(index, target_top, now_ms)
            }
            PageEvent::DocumentClick { inside_nav } => {
                if !inside_nav {
                    self.set_menu_open(false);
                }
                Dispatch::PASS
            }
            PageEvent::KeyDown(Key::Escape) => {
                if self.menu.is_open() {
                    self.set_menu_open(false);
                }
                Dispatch::PASS
            }
            PageEvent::KeyDown(Key::Other) => Dispatch::PASS,
            PageEvent::Scroll(metrics) => {
                self.on_scroll(&metrics, now_ms);
                Dispatch::PASS
            }
            PageEvent::Submit(fields) => self.on_submit(&fields, now_ms),
            PageEvent::ResumeClick => {
                if !self.markup.resume_button {
                    return Dispatch::PASS;
                }
                let message = self.options.messages.resume_unavailable.clone();
                self.show_notification(message, Severity::Info, now_ms);
                Dispatch::PREVENT
            }
            PageEvent::CardPointerEnter(i) => {
                self.set_card_transform(i, CARD_HOVER_TRANSFORM);
                Dispatch::PASS
            }
            PageEvent::CardPointerLeave(i) => {
                self.set_card_transform(i, CARD_REST_TRANSFORM);
                Dispatch::PASS
            }
            PageEvent::RevealEntered(i) => {
                if self.reveal.reveal(i) {
                    let target = Target::RevealTarget(i);
                    self.set_style(target, "opacity", "1");
                    self.set_style(target, "transform", "translateY(0)");
                }
                Dispatch::PASS
            }
            PageEvent::Load => {
                self.on_load();
                Dispatch::PASS
            }
        }
    }

    /// Fires every timer due at `now_ms`, in deadline order.
    ///
    /// Follow-up timers are scheduled relative to the deadline that fired, so a late tick
    /// replays the missed steps exactly.
    pub fn tick(&mut self, now_ms: u64) {
        while let Some(timer) = self.timers.pop_due(now_ms) {
            self.fire(timer.kind, timer.deadline_ms);
        }
    }

    /// The earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    /// Takes the queued effects in the order they were produced.
    pub fn drain_effects(&mut self) -> std::vec::Drain<'_, Effect> {
        self.effects.drain(..)
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn active_link(&self) -> Option<usize> {
        self.link_active.iter().position(|a| *a)
    }

    pub fn typing_state(&self) -> TypingState {
        self.typing
    }

    /// The text the typing element currently shows.
    pub fn typing_text(&self) -> &str {
        if self.typing.is_active() {
            self.typing.display(&self.options.phrases)
        } else {
            self.idle_phrase()
        }
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn is_submit_pending(&self) -> bool {
        self.pending_submission.is_some()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.reveal.is_revealed(index)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Shows a transient notification, replacing any notification already on the page.
    pub fn show_notification(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now_ms: u64,
    ) -> NotificationId {
        let message = message.into();
        fdebug!(%severity, %message, "show_notification");
        let (prev, id) = self.notifications.replace(message.clone(), severity);
        if let Some(prev) = prev {
            self.discard_notification(prev.id);
        }
        self.effects.push(Effect::MountNotification {
            id,
            class_name: severity.class_name(),
            message,
            style: notification_style(severity),
        });
        let t = self.options.notification;
        self.timers.schedule(
            TimerKind::NotificationEnter(id),
            now_ms.saturating_add(t.enter_delay_ms),
        );
        self.timers.schedule(
            TimerKind::NotificationExit(id),
            now_ms.saturating_add(t.lifetime_ms),
        );
        id
    }

    /// Restarts the typing animation from the first phrase.
    ///
    /// No-op when the page has no typing element or the animation is already running.
    pub fn start_typing(&mut self, now_ms: u64) {
        if !self.markup.typing_text || self.typing.is_active() || self.options.phrases.is_empty()
        {
            return;
        }
        fdebug!(now_ms, "typing started");
        self.typing = TypingState::fresh();
        self.set_text(Target::TypingText, String::new());
        self.timers.schedule(
            TimerKind::TypingTick,
            now_ms.saturating_add(self.options.typing.type_ms),
        );
    }

    /// Stops the typing animation, cancels its pending tick and shows the first phrase.
    pub fn stop_typing(&mut self) {
        if !self.typing.is_active() {
            return;
        }
        fdebug!("typing stopped");
        self.typing = TypingState::stopped();
        self.timers.cancel(TimerKind::TypingTick);
        let text = self.idle_phrase().to_owned();
        self.set_text(Target::TypingText, text);
    }

    fn idle_phrase(&self) -> &str {
        self.options.phrases.first().map(String::as_str).unwrap_or("")
    }

    fn fire(&mut self, kind: TimerKind, at_ms: u64) {
        ftrace!(?kind, at_ms, "timer fired");
        match kind {
            TimerKind::TypingTick => self.on_typing_tick(at_ms),
            TimerKind::NotificationEnter(id) => {
                if self.notifications.advance(id, NotificationStage::Shown) {
                    self.set_style(Target::Notification(id), "transform", ONSCREEN_TRANSFORM);
                }
            }
            TimerKind::NotificationExit(id) => {
                if self.notifications.advance(id, NotificationStage::Leaving) {
                    self.set_style(Target::Notification(id), "transform", OFFSCREEN_TRANSFORM);
                    self.timers.schedule(
                        TimerKind::NotificationRemove(id),
                        at_ms.saturating_add(self.options.notification.exit_ms),
                    );
                }
            }
            TimerKind::NotificationRemove(id) => {
                if self.notifications.remove(id) {
                    self.effects.push(Effect::RemoveNotification { id });
                }
            }
            TimerKind::SubmitComplete => self.on_submit_complete(at_ms),
            TimerKind::ScrollFrame => self.on_scroll_frame(at_ms),
        }
    }

    fn on_typing_tick(&mut self, at_ms: u64) {
        let (next, delay) = self.typing.next(&self.options.phrases, &self.options.typing);
        self.typing = next;
        let text = self.typing.display(&self.options.phrases).to_owned();
        self.set_text(Target::TypingText, text);
        if let Some(delay) = delay {
            // A zero delay would refire within the same `tick` forever.
            let at = at_ms.saturating_add(delay.max(1));
            self.timers.schedule(TimerKind::TypingTick, at);
        }
    }

    fn set_menu_open(&mut self, open: bool) {
        if !self.menu.set_open(open) {
            return;
        }
        ftrace!(open, "menu state changed");
        self.effects.push(Effect::SetClass {
            target: Target::NavMenu,
            class: "active",
            enabled: open,
        });
        self.effects.push(Effect::SetClass {
            target: Target::NavToggle,
            class: "active",
            enabled: open,
        });
        let overflow = self.menu.body_overflow();
        self.set_style(Target::Body, "overflow", overflow);
    }

    fn on_nav_link_click(
        &mut self,
        index: usize,
        target_top: Option<f64>,
        now_ms: u64,
    ) -> Dispatch {
        let Some(link) = self.markup.nav_links.get(index) else {
            fwarn!(index, "click on unknown navigation link");
            return Dispatch::PASS;
        };
        let in_page = link.href.starts_with('#');

        self.set_menu_open(false);
        if !in_page {
            return Dispatch::PASS;
        }
        if let Some(top) = target_top {
            let dest = (top - self.options.header_offset).max(0.0);
            self.scroll_to(dest, now_ms);
        }
        Dispatch::PREVENT
    }

    fn scroll_to(&mut self, dest: f64, now_ms: u64) {
        match self.options.smooth_scroll {
            SmoothScroll::Native => {
                self.effects.push(Effect::ScrollTo {
                    top: dest,
                    smooth: true,
                });
            }
            SmoothScroll::Tween {
                duration_ms,
                easing,
            } => {
                match self.scroll_tween.as_mut() {
                    Some(tween) => tween.retarget(now_ms, dest, duration_ms),
                    None => {
                        self.scroll_tween =
                            Some(Tween::new(self.scroll_y, dest, now_ms, duration_ms, easing));
                    }
                }
                self.timers.schedule(
                    TimerKind::ScrollFrame,
                    now_ms.saturating_add(TWEEN_FRAME_MS),
                );
            }
        }
    }

    fn on_scroll_frame(&mut self, at_ms: u64) {
        let Some(tween) = self.scroll_tween else {
            return;
        };
        let top = tween.sample(at_ms);
        self.scroll_y = top;
        self.effects.push(Effect::ScrollTo { top, smooth: false });
        if tween.is_done(at_ms) {
            self.scroll_tween = None;
        } else {
            self.timers.schedule(
                TimerKind::ScrollFrame,
                at_ms.saturating_add(TWEEN_FRAME_MS),
            );
        }
    }

    fn on_scroll(&mut self, m: &ScrollMetrics, now_ms: u64) {
        // `scroll_y` holds the last engine frame while a tween runs; anything else is the user.
        if self.scroll_tween.is_some() && (m.scroll_y - self.scroll_y).abs() > USER_SCROLL_SLOP {
            fdebug!(scroll_y = m.scroll_y, "user scroll cancels scroll tween");
            self.scroll_tween = None;
            self.timers.cancel(TimerKind::ScrollFrame);
        }
        self.scroll_y = m.scroll_y;

        if self.markup.navbar {
            let scrolled = m.scroll_y > self.options.scrolled_threshold;
            if self.header_scrolled != Some(scrolled) {
                self.header_scrolled = Some(scrolled);
                let style = HeaderStyle::for_scroll(m.scroll_y, self.options.scrolled_threshold);
                self.set_style(Target::Navbar, "background", style.background);
                self.set_style(Target::Navbar, "backdrop-filter", style.backdrop_filter);
            }
        }

        let current = active_section(&m.sections, m.scroll_y, self.options.section_offset);
        for i in 0..self.markup.nav_links.len() {
            let active = current.is_some() && self.markup.nav_links[i].fragment() == current;
            if self.link_active[i] != active {
                self.link_active[i] = active;
                self.effects.push(Effect::SetClass {
                    target: Target::NavLink(i),
                    class: "active",
                    enabled: active,
                });
            }
        }

        if let Some(hero) = m.hero {
            if hero.is_partially_visible(m.viewport_height) {
                self.start_typing(now_ms);
            } else {
                self.stop_typing();
            }
        }

        if self.markup.hero {
            let rate = self.options.parallax_rate;
            if let Some(y) = parallax_offset(m.scroll_y, m.viewport_height, rate) {
                self.set_style(Target::Hero, "transform", format!("translateY({y}px)"));
            }
        }
    }

    fn on_submit(&mut self, fields: &ContactFields, now_ms: u64) -> Dispatch {
        let Some(form) = self.markup.contact_form.as_ref() else {
            return Dispatch::PASS;
        };
        if self.pending_submission.is_some() {
            fdebug!("submission ignored: another one is in flight");
            return Dispatch::PREVENT;
        }
        let has_button = form.submit_label.is_some();

        match fields.validate() {
            Err(err) => {
                fdebug!(%err, "contact form rejected");
                let message = err.user_message(&self.options.messages).to_owned();
                self.show_notification(message, Severity::Error, now_ms);
            }
            Ok(submission) => {
                fdebug!(email = %submission.email, "contact form accepted");
                self.pending_submission = Some(submission);
                if has_button {
                    let label = self.options.messages.sending_label.clone();
                    self.set_text(Target::SubmitButton, label);
                    self.effects.push(Effect::SetDisabled {
                        target: Target::SubmitButton,
                        disabled: true,
                    });
                }
                self.timers.schedule(
                    TimerKind::SubmitComplete,
                    now_ms.saturating_add(self.options.submit_delay_ms),
                );
            }
        }
        Dispatch::PREVENT
    }

    fn on_submit_complete(&mut self, at_ms: u64) {
        if self.pending_submission.take().is_none() {
            return;
        }
        let message = self.options.messages.message_sent.clone();
        self.show_notification(message, Severity::Success, at_ms);
        self.effects.push(Effect::ResetForm);
        let label = self
            .markup
            .contact_form
            .as_ref()
            .and_then(|f| f.submit_label.clone());
        if let Some(label) = label {
            self.set_text(Target::SubmitButton, label);
            self.effects.push(Effect::SetDisabled {
                target: Target::SubmitButton,
                disabled: false,
            });
        }
    }

    fn discard_notification(&mut self, id: NotificationId) {
        self.timers.cancel_where(|kind| {
            matches!(
                kind,
                TimerKind::NotificationEnter(n)
                    | TimerKind::NotificationExit(n)
                    | TimerKind::NotificationRemove(n) if n == id
            )
        });
        self.effects.push(Effect::RemoveNotification { id });
    }

    fn hide_reveal_targets(&mut self) {
        let offset = format!("translateY({}px)", self.options.reveal.hidden_offset);
        for i in 0..self.reveal.len() {
            let target = Target::RevealTarget(i);
            self.set_style(target, "opacity", "0");
            self.set_style(target, "transform", offset.clone());
            self.set_style(target, "transition", REVEAL_TRANSITION);
        }
    }

    fn set_card_transform(&mut self, index: usize, transform: &'static str) {
        if index < self.markup.project_cards {
            self.set_style(Target::ProjectCard(index), "transform", transform);
        }
    }

    fn on_load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.effects.push(Effect::SetClass {
            target: Target::Body,
            class: "loaded",
            enabled: true,
        });
        if self.markup.hero_content {
            self.set_style(Target::HeroContent, "animation", HERO_CONTENT_ANIMATION);
        }
    }

    fn set_style(&mut self, target: Target, property: &'static str, value: impl Into<String>) {
        self.effects.push(Effect::SetStyle {
            target,
            property,
            value: value.into(),
        });
    }

    fn set_text(&mut self, target: Target, text: String) {
        self.effects.push(Effect::SetText { target, text });
    }
}
