use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use folio::{
    ContactFields, Dispatch, Effect, EventKind, EventSource, Field, FormMarkup, Key,
    NotificationId, PageController, PageEvent, PageMarkup, PageOptions, ScrollMetrics,
    SectionSpan, Target, ViewportRect, intersects,
};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Node, ScrollBehavior, ScrollToOptions, Window,
};

use crate::{WebError, parse_options, selectors};

thread_local! {
    static RUNTIME: RefCell<Option<Rc<Runtime>>> = const { RefCell::new(None) };
}

/// Boots the page behavior with the default options.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    boot(PageOptions::default()).map_err(Into::into)
}

/// Boots the page behavior with options parsed from a (partial) JSON document.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    let options = parse_options(json)?;
    boot(options).map_err(Into::into)
}

/// Removes every listener, pending timeout and notification installed by `start`.
#[wasm_bindgen]
pub fn stop() {
    let Some(rt) = RUNTIME.with(|slot| slot.borrow_mut().take()) else {
        return;
    };
    rt.listeners.borrow_mut().clear();
    rt.timeout.borrow_mut().take();
    if let Some((observer, _callback)) = rt.observer.borrow_mut().take() {
        observer.disconnect();
    }
    for (_, el) in std::mem::take(&mut *rt.notifications.borrow_mut()) {
        el.remove();
    }
    tracing::info!(target: "folio_web", "page behavior stopped");
}

fn boot(options: PageOptions) -> Result<(), WebError> {
    stop();
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let elements = Elements::query(&document)?;
    let markup = elements.markup();
    let now_ms = now(&window);

    let rt = Rc::new(Runtime {
        controller: RefCell::new(PageController::new(options, markup, now_ms)),
        window,
        document,
        elements,
        notifications: RefCell::new(BTreeMap::new()),
        timeout: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
        observer: RefCell::new(None),
        reveal_by_geometry: RefCell::new(false),
    });
    Runtime::wire(&rt);
    rt.flush();
    // Sync scroll-dependent state with wherever the page was restored to.
    rt.dispatch(PageEvent::Scroll(rt.scroll_metrics()));

    RUNTIME.with(|slot| *slot.borrow_mut() = Some(rt));
    tracing::info!(target: "folio_web", "page behavior started");
    Ok(())
}

fn now(window: &Window) -> u64 {
    window
        .performance()
        .map(|p| p.now().max(0.0) as u64)
        .unwrap_or(0)
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, WebError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn query_html(document: &Document, selector: &str) -> Result<Option<HtmlElement>, WebError> {
    Ok(document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn field_value(form: &HtmlFormElement, name: &str) -> String {
    let Ok(Some(el)) = form.query_selector(&format!("[name=\"{name}\"]")) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

/// The page elements, looked up once at boot.
struct Elements {
    body: HtmlElement,
    navbar: Option<HtmlElement>,
    nav_toggle: Option<Element>,
    nav_menu: Option<Element>,
    nav_links: Vec<Element>,
    sections: Vec<HtmlElement>,
    contact_form: Option<HtmlFormElement>,
    submit_button: Option<HtmlElement>,
    typing_text: Option<HtmlElement>,
    hero_section: Option<Element>,
    hero: Option<HtmlElement>,
    hero_content: Option<HtmlElement>,
    reveal_targets: Vec<HtmlElement>,
    project_cards: Vec<HtmlElement>,
    resume_button: Option<Element>,
}

impl Elements {
    fn query(document: &Document) -> Result<Self, WebError> {
        let html = |els: Vec<Element>| -> Vec<HtmlElement> {
            els.into_iter()
                .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
                .collect()
        };
        let by_id = |id: &str| document.get_element_by_id(id);

        let contact_form = by_id(selectors::CONTACT_FORM_ID)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        let submit_button = match &contact_form {
            Some(form) => form
                .query_selector(selectors::SUBMIT_BUTTON)?
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            None => None,
        };

        Ok(Self {
            body: document.body().ok_or(WebError::NoBody)?,
            navbar: by_id(selectors::NAVBAR_ID).and_then(|el| el.dyn_into().ok()),
            nav_toggle: by_id(selectors::NAV_TOGGLE_ID),
            nav_menu: by_id(selectors::NAV_MENU_ID),
            nav_links: query_all(document, selectors::NAV_LINKS)?,
            sections: html(query_all(document, selectors::SECTIONS)?),
            contact_form,
            submit_button,
            typing_text: by_id(selectors::TYPING_TEXT_ID).and_then(|el| el.dyn_into().ok()),
            hero_section: by_id(selectors::HERO_SECTION_ID),
            hero: query_html(document, selectors::HERO)?,
            hero_content: query_html(document, selectors::HERO_CONTENT)?,
            reveal_targets: html(query_all(document, selectors::REVEAL_TARGETS)?),
            project_cards: html(query_all(document, selectors::PROJECT_CARDS)?),
            resume_button: document.query_selector(selectors::RESUME_BUTTON)?,
        })
    }

    fn markup(&self) -> PageMarkup {
        PageMarkup {
            navbar: self.navbar.is_some(),
            nav_toggle: self.nav_toggle.is_some(),
            nav_menu: self.nav_menu.is_some(),
            nav_links: self
                .nav_links
                .iter()
                .map(|a| folio::NavLink::new(a.get_attribute("href").unwrap_or_default()))
                .collect(),
            contact_form: self.contact_form.as_ref().map(|_| FormMarkup {
                submit_label: self
                    .submit_button
                    .as_ref()
                    .map(|b| b.text_content().unwrap_or_default()),
            }),
            typing_text: self.typing_text.is_some(),
            hero: self.hero.is_some(),
            hero_content: self.hero_content.is_some(),
            reveal_targets: self.reveal_targets.len(),
            project_cards: self.project_cards.len(),
            resume_button: self.resume_button.is_some(),
        }
    }

    fn element(&self, target: Target) -> Option<Element> {
        match target {
            Target::Body => Some(self.body.clone().into()),
            Target::Navbar => self.navbar.clone().map(Into::into),
            Target::NavToggle => self.nav_toggle.clone(),
            Target::NavMenu => self.nav_menu.clone(),
            Target::NavLink(i) => self.nav_links.get(i).cloned(),
            Target::Hero => self.hero.clone().map(Into::into),
            Target::HeroContent => self.hero_content.clone().map(Into::into),
            Target::TypingText => self.typing_text.clone().map(Into::into),
            Target::ContactForm => self.contact_form.clone().map(Into::into),
            Target::SubmitButton => self.submit_button.clone().map(Into::into),
            Target::RevealTarget(i) => self.reveal_targets.get(i).cloned().map(Into::into),
            Target::ProjectCard(i) => self.project_cards.get(i).cloned().map(Into::into),
            Target::Notification(_) => None,
        }
    }

    fn contains_nav(&self, node: &Node) -> bool {
        [&self.nav_toggle, &self.nav_menu]
            .into_iter()
            .flatten()
            .any(|el| el.contains(Some(node)))
    }
}

/// The observer plus the callback it calls into, which must outlive it.
type RevealObserver = (IntersectionObserver, Closure<dyn FnMut(Array, IntersectionObserver)>);

struct Runtime {
    window: Window,
    document: Document,
    elements: Elements,
    controller: RefCell<PageController>,
    notifications: RefCell<BTreeMap<NotificationId, HtmlElement>>,
    timeout: RefCell<Option<(u64, Timeout)>>,
    listeners: RefCell<Vec<EventListener>>,
    observer: RefCell<Option<RevealObserver>>,
    reveal_by_geometry: RefCell<bool>,
}

impl Runtime {
    fn now(&self) -> u64 {
        now(&self.window)
    }

    fn dispatch(self: &Rc<Self>, event: PageEvent) -> Dispatch {
        let now_ms = self.now();
        let d = self.controller.borrow_mut().handle(event, now_ms);
        self.flush();
        d
    }

    fn on_timeout(self: &Rc<Self>) {
        self.timeout.borrow_mut().take();
        let now_ms = self.now();
        self.controller.borrow_mut().tick(now_ms);
        self.flush();
    }

    /// Applies queued effects, then arms one timeout for the next deadline.
    fn flush(self: &Rc<Self>) {
        let effects: Vec<Effect> = self.controller.borrow_mut().drain_effects().collect();
        for effect in effects {
            if let Err(err) = self.apply(effect) {
                tracing::warn!(target: "folio_web", ?err, "failed to apply effect");
            }
        }
        self.arm_timeout();
    }

    fn arm_timeout(self: &Rc<Self>) {
        let Some(deadline) = self.controller.borrow().next_deadline() else {
            self.timeout.borrow_mut().take();
            return;
        };
        if matches!(&*self.timeout.borrow(), Some((armed, _)) if *armed == deadline) {
            return;
        }
        let delay = deadline.saturating_sub(self.now()).min(u32::MAX as u64) as u32;
        let weak = Rc::downgrade(self);
        let timeout = Timeout::new(delay, move || {
            if let Some(rt) = weak.upgrade() {
                rt.on_timeout();
            }
        });
        // Replacing the old handle cancels it.
        *self.timeout.borrow_mut() = Some((deadline, timeout));
    }

    fn html(&self, target: Target) -> Option<HtmlElement> {
        match target {
            Target::Notification(id) => self.notifications.borrow().get(&id).cloned(),
            _ => self
                .elements
                .element(target)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        }
    }

    fn apply(&self, effect: Effect) -> Result<(), JsValue> {
        match effect {
            Effect::SetClass {
                target,
                class,
                enabled,
            } => {
                if let Some(el) = self.html(target) {
                    el.class_list().toggle_with_force(class, enabled)?;
                }
            }
            Effect::SetStyle {
                target,
                property,
                value,
            } => {
                if let Some(el) = self.html(target) {
                    let style = el.style();
                    if value.is_empty() {
                        style.remove_property(property)?;
                    } else {
                        style.set_property(property, &value)?;
                    }
                }
            }
            Effect::SetText { target, text } => {
                if let Some(el) = self.html(target) {
                    el.set_text_content(Some(&text));
                }
            }
            Effect::SetDisabled { target, disabled } => {
                if let Some(el) = self.html(target) {
                    match el.dyn_ref::<HtmlButtonElement>() {
                        Some(button) => button.set_disabled(disabled),
                        None if disabled => el.set_attribute("disabled", "")?,
                        None => el.remove_attribute("disabled")?,
                    }
                }
            }
            Effect::ResetForm => {
                if let Some(form) = &self.elements.contact_form {
                    form.reset();
                }
            }
            Effect::ScrollTo { top, smooth } => {
                let opts = ScrollToOptions::new();
                opts.set_top(top);
                opts.set_behavior(if smooth {
                    ScrollBehavior::Smooth
                } else {
                    ScrollBehavior::Instant
                });
                self.window.scroll_to_with_scroll_to_options(&opts);
            }
            Effect::MountNotification {
                id,
                class_name,
                message,
                style,
            } => {
                let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
                el.set_class_name(class_name);
                el.set_text_content(Some(&message));
                el.style().set_css_text(&style);
                self.elements.body.append_child(&el)?;
                self.notifications.borrow_mut().insert(id, el);
            }
            Effect::RemoveNotification { id } => {
                if let Some(el) = self.notifications.borrow_mut().remove(&id) {
                    el.remove();
                }
            }
        }
        Ok(())
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let e = &self.elements;
        ScrollMetrics {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            viewport_height: self.viewport_height(),
            hero: e.hero_section.as_ref().map(|hero| {
                let r = hero.get_bounding_client_rect();
                ViewportRect::new(r.top(), r.bottom())
            }),
            sections: e
                .sections
                .iter()
                .map(|s| SectionSpan::new(s.id(), s.offset_top() as f64, s.client_height() as f64))
                .collect(),
        }
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    /// Registers every listener the controller subscribed to, in order.
    fn wire(rt: &Rc<Self>) {
        let subscriptions = rt.controller.borrow().subscriptions();
        let mut listeners = Vec::with_capacity(subscriptions.len());
        let mut reveal = Vec::new();

        for sub in subscriptions {
            let weak = Rc::downgrade(rt);
            let e = &rt.elements;
            let listener = match (sub.source, sub.kind) {
                (EventSource::NavToggle, EventKind::Click) => e.nav_toggle.as_ref().map(|el| {
                    on(el, "click", false, weak, |rt, _| {
                        rt.dispatch(PageEvent::NavToggleClick)
                    })
                }),
                (EventSource::NavLink(index), EventKind::Click) => {
                    e.nav_links.get(index).map(|el| {
                        on(el, "click", true, weak, move |rt, _| {
                            let target_top = rt.link_target_top(index);
                            rt.dispatch(PageEvent::NavLinkClick { index, target_top })
                        })
                    })
                }
                (EventSource::Window, EventKind::Scroll) => {
                    Some(on(&rt.window, "scroll", false, weak, |rt, _| rt.on_scroll()))
                }
                (EventSource::Window, EventKind::Load) => {
                    Some(on(&rt.window, "load", false, weak, |rt, _| {
                        rt.dispatch(PageEvent::Load)
                    }))
                }
                (EventSource::ContactForm, EventKind::Submit) => {
                    e.contact_form.as_ref().map(|form| {
                        on(form, "submit", true, weak, |rt, _| {
                            let fields = rt.contact_fields();
                            rt.dispatch(PageEvent::Submit(fields))
                        })
                    })
                }
                (EventSource::RevealTarget(index), EventKind::Intersect) => {
                    reveal.push(index);
                    None
                }
                (EventSource::ProjectCard(index), EventKind::PointerEnter) => {
                    e.project_cards.get(index).map(|el| {
                        on(el, "mouseenter", false, weak, move |rt, _| {
                            rt.dispatch(PageEvent::CardPointerEnter(index))
                        })
                    })
                }
                (EventSource::ProjectCard(index), EventKind::PointerLeave) => {
                    e.project_cards.get(index).map(|el| {
                        on(el, "mouseleave", false, weak, move |rt, _| {
                            rt.dispatch(PageEvent::CardPointerLeave(index))
                        })
                    })
                }
                (EventSource::ResumeButton, EventKind::Click) => e.resume_button.as_ref().map(|el| {
                    on(el, "click", true, weak, |rt, _| rt.dispatch(PageEvent::ResumeClick))
                }),
                (EventSource::Document, EventKind::Click) => {
                    Some(on(&rt.document, "click", false, weak, |rt, event| {
                        let inside_nav = event
                            .target()
                            .and_then(|t| t.dyn_into::<Node>().ok())
                            .is_some_and(|node| rt.elements.contains_nav(&node));
                        rt.dispatch(PageEvent::DocumentClick { inside_nav })
                    }))
                }
                (EventSource::Document, EventKind::KeyDown) => {
                    Some(on(&rt.document, "keydown", false, weak, |rt, event| {
                        let key = event
                            .dyn_ref::<KeyboardEvent>()
                            .map(|k| Key::from_name(&k.key()))
                            .unwrap_or(Key::Other);
                        rt.dispatch(PageEvent::KeyDown(key))
                    }))
                }
                (source, kind) => {
                    tracing::warn!(target: "folio_web", ?source, ?kind, "unsupported subscription");
                    None
                }
            };
            listeners.extend(listener);
        }

        *rt.listeners.borrow_mut() = listeners;
        if !reveal.is_empty() {
            rt.observe_reveal_targets(&reveal);
        }
    }

    fn on_scroll(self: &Rc<Self>) -> Dispatch {
        let d = self.dispatch(PageEvent::Scroll(self.scroll_metrics()));
        if *self.reveal_by_geometry.borrow() {
            self.reveal_from_geometry();
        }
        d
    }

    fn link_target_top(&self, index: usize) -> Option<f64> {
        let controller = self.controller.borrow();
        let id = controller.markup().nav_links.get(index)?.fragment()?;
        let target = self.document.get_element_by_id(id)?;
        let target: HtmlElement = target.dyn_into().ok()?;
        Some(target.offset_top() as f64)
    }

    fn contact_fields(&self) -> ContactFields {
        let Some(form) = &self.elements.contact_form else {
            return ContactFields::default();
        };
        ContactFields::new(
            field_value(form, Field::Name.as_str()),
            field_value(form, Field::Email.as_str()),
            field_value(form, Field::Message.as_str()),
        )
    }

    fn observe_reveal_targets(self: &Rc<Self>, indexes: &[usize]) {
        let reveal = self.controller.borrow().options().reveal;
        let weak = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let Some(rt) = weak.upgrade() else {
                    return;
                };
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    let index = rt
                        .elements
                        .reveal_targets
                        .iter()
                        .position(|el| el.is_same_node(Some(&target)));
                    if let Some(index) = index {
                        rt.dispatch(PageEvent::RevealEntered(index));
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(reveal.threshold));
        init.set_root_margin(&reveal.root_margin());
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for &i in indexes {
                    if let Some(el) = self.elements.reveal_targets.get(i) {
                        observer.observe(el);
                    }
                }
                *self.observer.borrow_mut() = Some((observer, callback));
            }
            Err(err) => {
                tracing::warn!(
                    target: "folio_web",
                    ?err,
                    "IntersectionObserver unavailable; revealing from scroll geometry"
                );
                *self.reveal_by_geometry.borrow_mut() = true;
                self.reveal_from_geometry();
            }
        }
    }

    fn reveal_from_geometry(self: &Rc<Self>) {
        let viewport_height = self.viewport_height();
        let reveal = self.controller.borrow().options().reveal;
        let entered: Vec<usize> = self
            .elements
            .reveal_targets
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.controller.borrow().is_revealed(*i))
            .filter(|(_, el)| {
                let r = el.get_bounding_client_rect();
                intersects(ViewportRect::new(r.top(), r.bottom()), viewport_height, &reveal)
            })
            .map(|(i, _)| i)
            .collect();
        for index in entered {
            self.dispatch(PageEvent::RevealEntered(index));
        }
    }
}

/// Registers a listener that forwards to the runtime while it is alive.
///
/// `prevent` must be set for listeners that may cancel the native event; gloo listeners
/// are passive otherwise.
fn on<F>(
    target: &web_sys::EventTarget,
    event_type: &'static str,
    prevent: bool,
    rt: Weak<Runtime>,
    mut handler: F,
) -> EventListener
where
    F: FnMut(&Rc<Runtime>, &Event) -> Dispatch + 'static,
{
    let options = if prevent {
        EventListenerOptions::enable_prevent_default()
    } else {
        EventListenerOptions::default()
    };
    EventListener::new_with_options(target, event_type, options, move |event: &Event| {
        let Some(rt) = rt.upgrade() else {
            return;
        };
        if handler(&rt, event).prevent_default {
            event.prevent_default();
        }
    })
}
