// Example: a host simulating a visitor on the page without a browser.
use folio::{
    ContactFields, Effect, PageController, PageEvent, PageMarkup, PageOptions, ScrollMetrics,
    SectionSpan, ViewportRect,
};

fn scroll(scroll_y: f64) -> PageEvent {
    PageEvent::Scroll(ScrollMetrics {
        scroll_y,
        viewport_height: 800.0,
        hero: Some(ViewportRect::new(-scroll_y, 700.0 - scroll_y)),
        sections: vec![
            SectionSpan::new("hero", 0.0, 700.0),
            SectionSpan::new("about", 700.0, 900.0),
            SectionSpan::new("projects", 1600.0, 1200.0),
            SectionSpan::new("contact", 2800.0, 800.0),
        ],
    })
}

fn flush(c: &mut PageController, now_ms: u64) {
    for effect in c.drain_effects() {
        match effect {
            Effect::SetText { target, text } => println!("t={now_ms}ms text {target:?} = {text:?}"),
            other => println!("t={now_ms}ms {other:?}"),
        }
    }
}

fn run_until(c: &mut PageController, until_ms: u64) {
    while let Some(deadline) = c.next_deadline() {
        if deadline > until_ms {
            break;
        }
        c.tick(deadline);
        flush(c, deadline);
    }
}

fn main() {
    let markup = PageMarkup::portfolio(["hero", "about", "projects", "contact"])
        .with_reveal_targets(4)
        .with_project_cards(2);
    let mut c = PageController::new(PageOptions::default(), markup, 0);
    for sub in c.subscriptions() {
        println!("listen {:?} on {:?}", sub.kind, sub.source);
    }
    flush(&mut c, 0);

    c.handle(PageEvent::Load, 5);
    flush(&mut c, 5);
    run_until(&mut c, 600);

    // The visitor jumps to the projects section.
    let d = c.handle(
        PageEvent::NavLinkClick {
            index: 2,
            target_top: Some(1600.0),
        },
        600,
    );
    println!("prevent_default={}", d.prevent_default);
    c.handle(scroll(1530.0), 900);
    c.handle(PageEvent::RevealEntered(1), 900);
    flush(&mut c, 900);

    // And sends a message.
    c.handle(
        PageEvent::Submit(ContactFields::new("Ada", "ada@example.com", "Hello!")),
        1_000,
    );
    flush(&mut c, 1_000);
    run_until(&mut c, 9_000);
}
