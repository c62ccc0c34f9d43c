use crate::*;

use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Applies effects the way a DOM host would, so assertions can look at page state.
#[derive(Default, Debug)]
struct FakePage {
    classes: HashSet<(Target, &'static str)>,
    styles: HashMap<(Target, &'static str), String>,
    texts: HashMap<Target, String>,
    disabled: HashSet<Target>,
    notifications: BTreeMap<NotificationId, (&'static str, String)>,
    scrolls: Vec<(f64, bool)>,
    form_resets: usize,
}

impl FakePage {
    fn apply(&mut self, c: &mut PageController) {
        for effect in c.drain_effects() {
            match effect {
                Effect::SetClass {
                    target,
                    class,
                    enabled,
                } => {
                    if enabled {
                        self.classes.insert((target, class));
                    } else {
                        self.classes.remove(&(target, class));
                    }
                }
                Effect::SetStyle {
                    target,
                    property,
                    value,
                } => {
                    self.styles.insert((target, property), value);
                }
                Effect::SetText { target, text } => {
                    self.texts.insert(target, text);
                }
                Effect::SetDisabled { target, disabled } => {
                    if disabled {
                        self.disabled.insert(target);
                    } else {
                        self.disabled.remove(&target);
                    }
                }
                Effect::ResetForm => self.form_resets += 1,
                Effect::ScrollTo { top, smooth } => self.scrolls.push((top, smooth)),
                Effect::MountNotification {
                    id,
                    class_name,
                    message,
                    ..
                } => {
                    self.notifications.insert(id, (class_name, message));
                }
                Effect::RemoveNotification { id } => {
                    self.notifications.remove(&id);
                }
            }
        }
    }

    fn has_class(&self, target: Target, class: &str) -> bool {
        self.classes.iter().any(|(t, c)| *t == target && *c == class)
    }

    fn style(&self, target: Target, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|((t, p), _)| *t == target && *p == property)
            .map(|(_, v)| v.as_str())
    }

    fn text(&self, target: Target) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }
}

const SECTIONS: [&str; 4] = ["hero", "about", "projects", "contact"];

fn markup() -> PageMarkup {
    PageMarkup::portfolio(SECTIONS)
        .with_reveal_targets(3)
        .with_project_cards(2)
}

fn page() -> (PageController, FakePage) {
    let mut c = PageController::new(PageOptions::default(), markup(), 0);
    let mut p = FakePage::default();
    p.apply(&mut c);
    (c, p)
}

fn sections() -> Vec<SectionSpan> {
    vec![
        SectionSpan::new("hero", 0.0, 600.0),
        SectionSpan::new("about", 600.0, 800.0),
        SectionSpan::new("projects", 1400.0, 900.0),
        SectionSpan::new("contact", 2300.0, 700.0),
    ]
}

fn scroll_at(scroll_y: f64) -> PageEvent {
    let viewport_height = 800.0;
    PageEvent::Scroll(ScrollMetrics {
        scroll_y,
        viewport_height,
        hero: Some(ViewportRect::new(-scroll_y, 600.0 - scroll_y)),
        sections: sections(),
    })
}

fn typed_texts(c: &mut PageController) -> Vec<String> {
    c.drain_effects()
        .filter_map(|e| match e {
            Effect::SetText {
                target: Target::TypingText,
                text,
            } => Some(text),
            _ => None,
        })
        .collect()
}

#[test]
fn email_pattern_requires_at_and_dot() {
    assert!(is_valid_email("a@b.c"));
    assert!(is_valid_email("jane.doe@mail.example.org"));
    assert!(!is_valid_email("not-an-email"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.d"));
    assert!(!is_valid_email("a@@b.c"));
    assert!(!is_valid_email("@b.c"));
    assert!(!is_valid_email("a@b."));
}

#[test]
fn validation_trims_and_short_circuits_in_order() {
    let ok = ContactFields::new("  Ada ", " ada@lovelace.io\n", " hi ")
        .validate()
        .unwrap();
    assert_eq!(ok.name, "Ada");
    assert_eq!(ok.email, "ada@lovelace.io");
    assert_eq!(ok.message, "hi");

    // An empty field wins over a malformed email.
    let err = ContactFields::new("", "nope", "hi").validate().unwrap_err();
    assert_eq!(err, ValidationError::MissingField(Field::Name));
    let err = ContactFields::new("Ada", "nope", "hi")
        .validate()
        .unwrap_err();
    assert_eq!(err, ValidationError::InvalidEmail);
}

#[test]
fn blank_field_rejects_submission_with_error_notification() {
    let blanks = [
        ContactFields::new("   ", "a@b.c", "hello"),
        ContactFields::new("Ada", "", "hello"),
        ContactFields::new("Ada", "a@b.c", " \t\n"),
    ];
    for fields in blanks {
        let (mut c, mut p) = page();
        let d = c.handle(PageEvent::Submit(fields), 10);
        p.apply(&mut c);

        assert!(d.prevent_default);
        assert!(!c.is_submit_pending());
        assert!(!c.timers().is_pending(TimerKind::SubmitComplete));
        let (class, message) = p.notifications.values().next().unwrap();
        assert_eq!(*class, "notification notification--error");
        assert_eq!(message, "Please fill in all fields.");
        assert_eq!(p.text(Target::SubmitButton), None);
    }
}

#[test]
fn malformed_email_rejects_submission() {
    let (mut c, mut p) = page();
    c.handle(
        PageEvent::Submit(ContactFields::new("Ada", "a@b", "hello")),
        0,
    );
    p.apply(&mut c);
    let n = c.current_notification().unwrap();
    assert_eq!(n.severity, Severity::Error);
    assert_eq!(n.message, "Please enter a valid email address.");
    assert!(!c.is_submit_pending());
}

#[test]
fn successful_submission_is_simulated_for_two_seconds() {
    let (mut c, mut p) = page();
    let d = c.handle(
        PageEvent::Submit(ContactFields::new("Ada", "a@b.c", "hello")),
        1_000,
    );
    p.apply(&mut c);
    assert!(d.prevent_default);
    assert!(c.is_submit_pending());
    assert_eq!(p.text(Target::SubmitButton), Some("Sending..."));
    assert!(p.disabled.contains(&Target::SubmitButton));

    // A second submit while pending is swallowed.
    let d = c.handle(
        PageEvent::Submit(ContactFields::new("Bob", "b@c.d", "again")),
        1_500,
    );
    assert!(d.prevent_default);
    assert_eq!(c.timers().deadline(TimerKind::SubmitComplete), Some(3_000));

    c.tick(2_999);
    p.apply(&mut c);
    assert_eq!(p.form_resets, 0);

    c.tick(3_000);
    p.apply(&mut c);
    assert!(!c.is_submit_pending());
    assert_eq!(p.form_resets, 1);
    assert_eq!(p.text(Target::SubmitButton), Some("Send Message"));
    assert!(!p.disabled.contains(&Target::SubmitButton));
    let n = c.current_notification().unwrap();
    assert_eq!(n.severity, Severity::Success);
    assert_eq!(
        n.message,
        "Message sent successfully! I'll get back to you soon."
    );
}

#[test]
fn typing_reveals_first_char_after_100ms() {
    let mut c = PageController::new(PageOptions::default(), markup(), 0);
    assert_eq!(typed_texts(&mut c), vec![String::new()]);

    c.tick(99);
    assert!(typed_texts(&mut c).is_empty());

    c.tick(100);
    assert_eq!(typed_texts(&mut c), vec!["R".to_string()]);
    assert_eq!(c.typing_text(), "R");
}

#[test]
fn typing_holds_full_phrase_then_deletes_every_50ms() {
    let mut c = PageController::new(PageOptions::default(), markup(), 0);
    let _ = typed_texts(&mut c);

    // "Ready to Innovate" has 17 chars: the last one lands at 1700ms.
    c.tick(1_700);
    let texts = typed_texts(&mut c);
    assert_eq!(texts.len(), 17);
    assert_eq!(texts.last().map(String::as_str), Some("Ready to Innovate"));
    assert_eq!(c.typing_state().phase, TypingPhase::PausingFull);

    c.tick(3_699);
    assert!(typed_texts(&mut c).is_empty());

    c.tick(3_700);
    assert_eq!(typed_texts(&mut c), vec!["Ready to Innovat".to_string()]);
    c.tick(3_749);
    assert!(typed_texts(&mut c).is_empty());
    c.tick(3_750);
    assert_eq!(typed_texts(&mut c), vec!["Ready to Innova".to_string()]);
}

#[test]
fn typing_cycles_to_next_phrase_after_empty_pause() {
    let timings = TypingTimings {
        type_ms: 10,
        delete_ms: 5,
        hold_full_ms: 100,
        hold_empty_ms: 50,
    };
    let phrases = ["ab", "c"];
    let mut s = TypingState::fresh();
    let mut trace = Vec::new();
    for _ in 0..9 {
        let (next, delay) = s.next(&phrases, &timings);
        s = next;
        trace.push((s.display(&phrases).to_string(), delay));
    }
    let expect = [
        ("a", Some(10)),
        ("ab", Some(100)),
        ("a", Some(5)),
        ("", Some(50)),
        ("c", Some(100)),
        ("", Some(50)),
        ("a", Some(10)),
        ("ab", Some(100)),
        ("a", Some(5)),
    ];
    let expect: Vec<(String, Option<u64>)> =
        expect.iter().map(|(t, d)| (t.to_string(), *d)).collect();
    assert_eq!(trace, expect);
}

#[test]
fn stopped_machine_never_ticks() {
    let (s, delay) = TypingState::stopped().next(&["abc"], &TypingTimings::default());
    assert_eq!(s, TypingState::stopped());
    assert_eq!(delay, None);
    let empty: [&str; 0] = [];
    assert_eq!(TypingState::fresh().next(&empty, &TypingTimings::default()).1, None);
}

#[test]
fn typing_count_stays_within_phrase_bounds() {
    let phrases = ["Ready to Innovate", "Building the Future", "", "é✓"];
    let timings = TypingTimings::default();
    let mut rng = Lcg::new(7);
    let mut s = TypingState::fresh();

    for _ in 0..5_000 {
        let before = s;
        let (next, delay) = s.next(&phrases, &timings);
        let len = phrases[next.phrase].chars().count();
        assert!(next.count <= len, "count {} > len {len}", next.count);
        if before.phase == TypingPhase::Deleting && next.phrase != before.phrase {
            panic!("left a phrase while deleting at count {}", before.count);
        }
        if next.phase == TypingPhase::PausingFull {
            assert_eq!(next.count, len);
        }
        assert!(delay.is_some());
        s = next;

        if rng.gen_range_u64(0, 50) == 0 {
            s = TypingState::fresh();
        }
    }
}

#[test]
fn typing_stops_when_hero_leaves_and_restarts_fresh() {
    let (mut c, mut p) = page();
    c.tick(300);
    p.apply(&mut c);
    assert_eq!(p.text(Target::TypingText), Some("Rea"));

    c.handle(scroll_at(900.0), 350);
    p.apply(&mut c);
    assert_eq!(p.text(Target::TypingText), Some("Ready to Innovate"));
    assert!(!c.typing_state().is_active());
    assert!(!c.timers().is_pending(TimerKind::TypingTick));

    c.tick(60_000);
    assert!(typed_texts(&mut c).is_empty());
    assert_eq!(c.typing_text(), "Ready to Innovate");

    // Scrolling within the hidden zone keeps it stopped.
    c.handle(scroll_at(1_200.0), 60_010);
    assert!(typed_texts(&mut c).is_empty());

    c.handle(scroll_at(0.0), 61_000);
    assert_eq!(typed_texts(&mut c), vec![String::new()]);
    c.tick(61_100);
    assert_eq!(typed_texts(&mut c), vec!["R".to_string()]);
}

#[test]
fn notification_replaces_previous_one() {
    let (mut c, mut p) = page();
    let first = c.show_notification("first", Severity::Info, 0);
    let second = c.show_notification("second", Severity::Warning, 10);
    p.apply(&mut c);

    assert_ne!(first, second);
    assert_eq!(p.notifications.len(), 1);
    let (class, message) = &p.notifications[&second];
    assert_eq!(*class, "notification notification--warning");
    assert_eq!(message, "second");

    // The discarded notification's timers are gone.
    assert!(!c.timers().is_pending(TimerKind::NotificationEnter(first)));
    assert!(!c.timers().is_pending(TimerKind::NotificationExit(first)));
}

#[test]
fn notification_slides_in_then_out_and_is_removed() {
    let (mut c, mut p) = page();
    let id = c.show_notification("hello", Severity::default(), 1_000);
    p.apply(&mut c);
    let target = Target::Notification(id);
    assert_eq!(p.style(target, "transform"), None);

    c.tick(1_100);
    p.apply(&mut c);
    assert_eq!(p.style(target, "transform"), Some("translateX(0)"));
    assert_eq!(
        c.current_notification().map(|n| n.stage),
        Some(NotificationStage::Shown)
    );

    c.tick(6_000);
    p.apply(&mut c);
    assert_eq!(p.style(target, "transform"), Some("translateX(400px)"));
    assert!(p.notifications.contains_key(&id));

    c.tick(6_299);
    p.apply(&mut c);
    assert!(p.notifications.contains_key(&id));
    c.tick(6_300);
    p.apply(&mut c);
    assert!(p.notifications.is_empty());
    assert!(c.current_notification().is_none());
}

#[test]
fn notification_style_is_color_coded() {
    assert!(notification_style(Severity::Success).ends_with("background: var(--color-success);"));
    assert!(notification_style(Severity::Info).contains("position: fixed"));
    assert_eq!(Severity::Error.class_name(), "notification notification--error");
}

#[test]
fn active_link_follows_section_span() {
    let (mut c, mut p) = page();
    c.handle(scroll_at(1_500.0), 0);
    p.apply(&mut c);

    let projects = c.markup().link_for("projects").unwrap();
    assert_eq!(c.active_link(), Some(projects));
    for i in 0..SECTIONS.len() {
        assert_eq!(p.has_class(Target::NavLink(i), "active"), i == projects);
    }

    // 100px before a section starts already counts as inside it.
    c.handle(scroll_at(2_200.0), 0);
    p.apply(&mut c);
    assert_eq!(c.active_link(), c.markup().link_for("contact"));
    assert!(!p.has_class(Target::NavLink(projects), "active"));
}

#[test]
fn no_matching_section_clears_active_links() {
    let spans = sections();
    assert_eq!(active_section(&spans, 10_000.0, 100.0), None);
    assert_eq!(active_section(&spans, 0.0, 100.0), Some("hero"));

    let overlapping = vec![
        SectionSpan::new("a", 0.0, 1_000.0),
        SectionSpan::new("b", 200.0, 300.0),
    ];
    assert_eq!(active_section(&overlapping, 300.0, 100.0), Some("b"));

    let (mut c, mut p) = page();
    c.handle(scroll_at(700.0), 0);
    c.handle(scroll_at(10_000.0), 0);
    p.apply(&mut c);
    assert_eq!(c.active_link(), None);
    assert!(!p.classes.iter().any(|(t, _)| matches!(t, Target::NavLink(_))));
}

#[test]
fn header_switches_past_threshold() {
    let (mut c, mut p) = page();
    c.handle(scroll_at(50.0), 0);
    p.apply(&mut c);
    assert_eq!(p.style(Target::Navbar, "background"), Some("rgba(38, 40, 40, 0.9)"));
    assert_eq!(p.style(Target::Navbar, "backdrop-filter"), Some("blur(10px)"));

    c.handle(scroll_at(51.0), 0);
    p.apply(&mut c);
    assert_eq!(p.style(Target::Navbar, "background"), Some("rgba(38, 40, 40, 0.95)"));
    assert_eq!(p.style(Target::Navbar, "backdrop-filter"), Some("blur(15px)"));

    // Unchanged side of the threshold emits nothing for the header.
    c.handle(scroll_at(300.0), 0);
    assert!(
        c.drain_effects()
            .all(|e| e.target() != Some(Target::Navbar))
    );
}

#[test]
fn parallax_moves_hero_within_first_viewport() {
    assert_eq!(parallax_offset(100.0, 800.0, -0.3), Some(-30.0));
    assert_eq!(parallax_offset(800.0, 800.0, -0.3), None);

    let (mut c, mut p) = page();
    c.handle(scroll_at(0.0), 0);
    p.apply(&mut c);
    assert_eq!(p.style(Target::Hero, "transform"), Some("translateY(0px)"));

    c.handle(scroll_at(100.0), 0);
    p.apply(&mut c);
    assert_eq!(p.style(Target::Hero, "transform"), Some("translateY(-30px)"));

    c.handle(scroll_at(900.0), 0);
    p.apply(&mut c);
    assert_eq!(p.style(Target::Hero, "transform"), Some("translateY(-30px)"));
}

#[test]
fn toggle_twice_restores_closed_menu_and_scrolling() {
    let (mut c, mut p) = page();
    c.handle(PageEvent::NavToggleClick, 0);
    p.apply(&mut c);
    assert!(c.is_menu_open());
    assert!(p.has_class(Target::NavMenu, "active"));
    assert!(p.has_class(Target::NavToggle, "active"));
    assert_eq!(p.style(Target::Body, "overflow"), Some("hidden"));

    c.handle(PageEvent::NavToggleClick, 0);
    p.apply(&mut c);
    assert!(!c.is_menu_open());
    assert!(!p.has_class(Target::NavMenu, "active"));
    assert!(!p.has_class(Target::NavToggle, "active"));
    assert_eq!(p.style(Target::Body, "overflow"), Some(""));
}

#[test]
fn escape_and_outside_click_close_menu() {
    let (mut c, mut p) = page();
    c.handle(PageEvent::NavToggleClick, 0);
    c.handle(PageEvent::DocumentClick { inside_nav: true }, 0);
    assert!(c.is_menu_open());
    c.handle(PageEvent::KeyDown(Key::from_name("a")), 0);
    assert!(c.is_menu_open());
    c.handle(PageEvent::KeyDown(Key::from_name("Escape")), 0);
    assert!(!c.is_menu_open());

    c.handle(PageEvent::NavToggleClick, 0);
    c.handle(PageEvent::DocumentClick { inside_nav: false }, 0);
    p.apply(&mut c);
    assert!(!c.is_menu_open());
    assert_eq!(p.style(Target::Body, "overflow"), Some(""));

    // Closing an already-closed menu is silent.
    c.handle(PageEvent::DocumentClick { inside_nav: false }, 0);
    assert!(!c.has_effects());
}

#[test]
fn nav_link_click_scrolls_below_fixed_header() {
    let (mut c, mut p) = page();
    c.handle(PageEvent::NavToggleClick, 0);
    let d = c.handle(
        PageEvent::NavLinkClick {
            index: 2,
            target_top: Some(1_400.0),
        },
        0,
    );
    p.apply(&mut c);
    assert!(d.prevent_default);
    assert!(!c.is_menu_open());
    assert_eq!(p.scrolls, vec![(1_330.0, true)]);

    c.handle(
        PageEvent::NavLinkClick {
            index: 0,
            target_top: Some(0.0),
        },
        0,
    );
    p.apply(&mut c);
    assert_eq!(p.scrolls.last(), Some(&(0.0, true)));
}

#[test]
fn nav_link_without_target_only_closes_menu() {
    let (mut c, mut p) = page();
    c.handle(PageEvent::NavToggleClick, 0);
    let d = c.handle(
        PageEvent::NavLinkClick {
            index: 1,
            target_top: None,
        },
        0,
    );
    p.apply(&mut c);
    assert!(d.prevent_default);
    assert!(!c.is_menu_open());
    assert!(p.scrolls.is_empty());

    let mut m = markup();
    m.nav_links.push(NavLink::new("https://example.com/blog"));
    let mut c = PageController::new(PageOptions::default(), m, 0);
    let d = c.handle(
        PageEvent::NavLinkClick {
            index: 4,
            target_top: None,
        },
        0,
    );
    assert!(!d.prevent_default);
}

#[test]
fn tween_scroll_animates_in_frames_and_retargets() {
    let options = PageOptions::default().with_smooth_scroll(SmoothScroll::Tween {
        duration_ms: 160,
        easing: Easing::Linear,
    });
    let mut c = PageController::new(options, markup(), 0);
    let mut p = FakePage::default();
    c.handle(scroll_at(0.0), 0);
    c.handle(
        PageEvent::NavLinkClick {
            index: 1,
            target_top: Some(1_070.0),
        },
        0,
    );
    p.apply(&mut c);
    assert!(p.scrolls.is_empty());

    c.tick(80);
    p.apply(&mut c);
    assert!(p.scrolls.iter().all(|(_, smooth)| !smooth));
    let mut last = 0.0;
    for (top, _) in &p.scrolls {
        assert!(*top >= last);
        last = *top;
    }
    assert_eq!(p.scrolls.len(), 5);
    assert_eq!(p.scrolls.last(), Some(&(500.0, false)));

    c.tick(160);
    p.apply(&mut c);
    assert_eq!(p.scrolls.last(), Some(&(1_000.0, false)));
    assert!(!c.timers().is_pending(TimerKind::ScrollFrame));

    // Back to the top, then a click mid-flight restarts from the current sample.
    c.handle(
        PageEvent::NavLinkClick {
            index: 0,
            target_top: Some(70.0),
        },
        200,
    );
    c.tick(280);
    p.apply(&mut c);
    assert_eq!(p.scrolls.last(), Some(&(500.0, false)));

    c.handle(
        PageEvent::NavLinkClick {
            index: 1,
            target_top: Some(1_070.0),
        },
        280,
    );
    c.tick(296);
    p.apply(&mut c);
    assert_eq!(p.scrolls.last(), Some(&(550.0, false)));

    c.tick(1_000);
    p.apply(&mut c);
    assert_eq!(p.scrolls.last(), Some(&(1_000.0, false)));
    assert!(!c.timers().is_pending(TimerKind::ScrollFrame));
}

#[test]
fn user_scroll_cancels_tween_but_frame_echo_does_not() {
    let options = PageOptions::default().with_smooth_scroll(SmoothScroll::Tween {
        duration_ms: 160,
        easing: Easing::Linear,
    });
    let mut c = PageController::new(options, markup(), 0);
    let mut p = FakePage::default();
    c.handle(scroll_at(0.0), 0);
    c.handle(
        PageEvent::NavLinkClick {
            index: 1,
            target_top: Some(1_070.0),
        },
        0,
    );
    c.tick(80);
    p.apply(&mut c);
    assert_eq!(p.scrolls.last(), Some(&(500.0, false)));

    // The browser reports the frame back, rounded.
    c.handle(scroll_at(500.4), 85);
    assert!(c.timers().is_pending(TimerKind::ScrollFrame));

    c.handle(scroll_at(300.0), 90);
    assert!(!c.timers().is_pending(TimerKind::ScrollFrame));
    p.apply(&mut c);
    let frames = p.scrolls.len();

    c.tick(400);
    p.apply(&mut c);
    assert_eq!(p.scrolls.len(), frames);
}

#[test]
fn easing_curves_hit_endpoints() {
    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
        assert!((easing.sample(0.5) - 0.5).abs() < 1e-9);
    }
    let t = Tween::new(100.0, 0.0, 0, 0, Easing::Linear);
    assert_eq!(t.duration_ms, 1);
    assert!(t.is_done(1));
    assert_eq!(t.sample(5), 0.0);
}

#[test]
fn reveal_targets_start_hidden_and_reveal_once() {
    let (mut c, mut p) = page();
    for i in 0..3 {
        let t = Target::RevealTarget(i);
        assert_eq!(p.style(t, "opacity"), Some("0"));
        assert_eq!(p.style(t, "transform"), Some("translateY(30px)"));
        assert_eq!(
            p.style(t, "transition"),
            Some("opacity 0.6s ease, transform 0.6s ease")
        );
    }

    c.handle(PageEvent::RevealEntered(1), 0);
    p.apply(&mut c);
    assert!(c.is_revealed(1));
    assert_eq!(p.style(Target::RevealTarget(1), "opacity"), Some("1"));
    assert_eq!(p.style(Target::RevealTarget(1), "transform"), Some("translateY(0)"));
    assert_eq!(p.style(Target::RevealTarget(0), "opacity"), Some("0"));

    c.handle(PageEvent::RevealEntered(1), 10);
    c.handle(PageEvent::RevealEntered(99), 10);
    assert!(!c.has_effects());
}

#[test]
fn reveal_geometry_honors_margin_and_threshold() {
    let o = RevealOptions::default();
    assert_eq!(o.root_margin(), "0px 0px -50px 0px");
    // 100px card whose top sits 20px inside the shrunken zone (800 - 50).
    assert!(intersects(ViewportRect::new(730.0, 830.0), 800.0, &o));
    // Only 5% inside.
    assert!(!intersects(ViewportRect::new(745.0, 845.0), 800.0, &o));
    // Inside the viewport but within the bottom margin.
    assert!(!intersects(ViewportRect::new(760.0, 860.0), 800.0, &o));
    assert!(!intersects(ViewportRect::new(-200.0, -100.0), 800.0, &o));

    let mut set = RevealSet::new(3);
    assert!(set.reveal(2));
    assert!(!set.reveal(2));
    assert_eq!(set.pending().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn project_cards_hover_and_rest() {
    let (mut c, mut p) = page();
    c.handle(PageEvent::CardPointerEnter(1), 0);
    p.apply(&mut c);
    assert_eq!(
        p.style(Target::ProjectCard(1), "transform"),
        Some("translateY(-8px) scale(1.02)")
    );
    c.handle(PageEvent::CardPointerLeave(1), 0);
    p.apply(&mut c);
    assert_eq!(
        p.style(Target::ProjectCard(1), "transform"),
        Some("translateY(0) scale(1)")
    );
    c.handle(PageEvent::CardPointerEnter(7), 0);
    assert!(!c.has_effects());
}

#[test]
fn resume_button_shows_info_instead_of_downloading() {
    let (mut c, mut p) = page();
    let d = c.handle(PageEvent::ResumeClick, 0);
    p.apply(&mut c);
    assert!(d.prevent_default);
    let (class, message) = p.notifications.values().next().unwrap();
    assert_eq!(*class, "notification notification--info");
    assert_eq!(message, "CV download will be available soon!");
}

#[test]
fn load_marks_body_once() {
    let (mut c, mut p) = page();
    c.handle(PageEvent::Load, 0);
    p.apply(&mut c);
    assert!(c.is_loaded());
    assert!(p.has_class(Target::Body, "loaded"));
    assert_eq!(
        p.style(Target::HeroContent, "animation"),
        Some("fadeInUp 1s ease forwards")
    );
    c.handle(PageEvent::Load, 5);
    assert!(!c.has_effects());
}

#[test]
fn missing_elements_skip_their_features() {
    let mut c = PageController::new(PageOptions::default(), PageMarkup::new(), 0);
    assert_eq!(
        c.subscriptions(),
        vec![Subscription::new(EventSource::Window, EventKind::Load)]
    );
    assert!(!c.has_effects());
    assert_eq!(c.next_deadline(), None);

    c.handle(PageEvent::NavToggleClick, 0);
    c.handle(scroll_at(100.0), 0);
    c.handle(PageEvent::CardPointerEnter(0), 0);
    c.handle(PageEvent::RevealEntered(0), 0);
    let d = c.handle(PageEvent::ResumeClick, 0);
    assert!(!d.prevent_default);
    let d = c.handle(
        PageEvent::Submit(ContactFields::new("Ada", "a@b.c", "hi")),
        0,
    );
    assert!(!d.prevent_default);
    assert!(!c.is_menu_open());
    assert!(!c.has_effects());
}

#[test]
fn subscriptions_follow_registration_order() {
    let c = PageController::new(
        PageOptions::default(),
        PageMarkup::portfolio(["about"]).with_project_cards(1),
        0,
    );
    assert_eq!(
        c.subscriptions(),
        vec![
            Subscription::new(EventSource::NavToggle, EventKind::Click),
            Subscription::new(EventSource::NavLink(0), EventKind::Click),
            Subscription::new(EventSource::Window, EventKind::Scroll),
            Subscription::new(EventSource::ContactForm, EventKind::Submit),
            Subscription::new(EventSource::ProjectCard(0), EventKind::PointerEnter),
            Subscription::new(EventSource::ProjectCard(0), EventKind::PointerLeave),
            Subscription::new(EventSource::ResumeButton, EventKind::Click),
            Subscription::new(EventSource::Document, EventKind::Click),
            Subscription::new(EventSource::Document, EventKind::KeyDown),
            Subscription::new(EventSource::Window, EventKind::Load),
        ]
    );

    let toggle_only = PageMarkup::new().with_navigation(true, false);
    let c = PageController::new(PageOptions::default(), toggle_only, 0);
    assert!(
        !c.subscriptions()
            .iter()
            .any(|s| s.source == EventSource::NavToggle)
    );
}

#[test]
fn timers_fire_in_deadline_then_schedule_order() {
    let mut t = Timers::new();
    t.schedule(TimerKind::SubmitComplete, 50);
    t.schedule(TimerKind::TypingTick, 20);
    t.schedule(TimerKind::ScrollFrame, 20);
    assert_eq!(t.next_deadline(), Some(20));

    // Rescheduling replaces the pending deadline.
    t.schedule(TimerKind::SubmitComplete, 10);
    assert_eq!(t.len(), 3);

    assert_eq!(t.pop_due(5), None);
    let order: Vec<TimerKind> = std::iter::from_fn(|| t.pop_due(100))
        .map(|timer| timer.kind)
        .collect();
    assert_eq!(
        order,
        vec![
            TimerKind::SubmitComplete,
            TimerKind::TypingTick,
            TimerKind::ScrollFrame
        ]
    );
    assert!(t.is_empty());
    assert!(!t.cancel(TimerKind::TypingTick));
}

#[test]
fn random_event_stream_keeps_single_notification_and_bounded_typing() {
    let mut rng = Lcg::new(42);
    let (mut c, mut p) = page();
    let mut now = 0u64;

    for _ in 0..2_000 {
        now += rng.gen_range_u64(0, 400);
        let event = match rng.gen_range_u64(0, 6) {
            0 => scroll_at(rng.gen_range_u64(0, 3_000) as f64),
            1 => PageEvent::NavToggleClick,
            2 => PageEvent::DocumentClick {
                inside_nav: rng.gen_bool(),
            },
            3 => PageEvent::Submit(ContactFields::new(
                "Ada",
                if rng.gen_bool() { "a@b.c" } else { "a@b" },
                "hi",
            )),
            4 => PageEvent::ResumeClick,
            _ => PageEvent::KeyDown(Key::Escape),
        };
        c.handle(event, now);
        c.tick(now);
        p.apply(&mut c);

        assert!(p.notifications.len() <= 1);
        let s = c.typing_state();
        let phrases = &c.options().phrases;
        assert!(s.count <= phrases[s.phrase].chars().count());
        assert_eq!(
            p.style(Target::Body, "overflow").unwrap_or(""),
            if c.is_menu_open() { "hidden" } else { "" }
        );
        if let Some(deadline) = c.next_deadline() {
            assert!(deadline > now);
        }
    }
}

#[test]
fn options_validation_rejects_stalling_values() {
    assert_eq!(PageOptions::default().validate(), Ok(()));

    let empty: [&str; 0] = [];
    let err = PageOptions::default().with_phrases(empty).validate().unwrap_err();
    assert_eq!(err, OptionsError::NoPhrases);

    let err = PageOptions::default()
        .with_typing(TypingTimings {
            delete_ms: 0,
            ..TypingTimings::default()
        })
        .validate()
        .unwrap_err();
    assert_eq!(err.to_string(), "delete_ms must be greater than zero");

    let err = PageController::try_new(
        PageOptions::default().with_notification(NotificationTimings {
            enter_delay_ms: 100,
            lifetime_ms: 100,
            exit_ms: 300,
        }),
        markup(),
        0,
    )
    .unwrap_err();
    assert!(matches!(err, OptionsError::NotificationLifetime { .. }));
}

#[test]
fn empty_phrases_and_zero_holds_are_rejected() {
    let err = PageOptions::default()
        .with_phrases(["Hi", ""])
        .validate()
        .unwrap_err();
    assert_eq!(err, OptionsError::EmptyPhrase(1));
    assert_eq!(err.to_string(), "phrase 1 is empty");

    let no_holds = TypingTimings {
        hold_full_ms: 0,
        hold_empty_ms: 0,
        ..TypingTimings::default()
    };
    let err = PageOptions::default()
        .with_phrases(["a"])
        .with_typing(no_holds)
        .validate()
        .unwrap_err();
    assert_eq!(err, OptionsError::NoTypingHold);

    let one_hold = TypingTimings {
        hold_full_ms: 0,
        ..TypingTimings::default()
    };
    assert_eq!(PageOptions::default().with_typing(one_hold).validate(), Ok(()));
}

#[test]
fn unvalidated_zero_delays_still_advance_time() {
    let options = PageOptions::default()
        .with_phrases([""])
        .with_typing(TypingTimings {
            hold_full_ms: 0,
            hold_empty_ms: 0,
            ..TypingTimings::default()
        });
    let markup = PageMarkup::new().with_typing_text(true);
    let mut c = PageController::new(options, markup, 0);

    c.tick(1_000);
    assert!(c.next_deadline().is_some_and(|d| d > 1_000));
    assert_eq!(c.typing_text(), "");
}

#[test]
fn typing_alone_still_follows_hero_visibility() {
    let markup = PageMarkup::new().with_typing_text(true);
    let mut c = PageController::new(PageOptions::default(), markup, 0);
    assert!(
        c.subscriptions()
            .contains(&Subscription::new(EventSource::Window, EventKind::Scroll))
    );

    c.tick(300);
    assert_eq!(c.typing_text(), "Rea");

    c.handle(scroll_at(700.0), 300);
    assert!(!c.typing_state().is_active());
    assert!(!c.timers().is_pending(TimerKind::TypingTick));
    assert_eq!(c.typing_text(), "Ready to Innovate");
}
