//! Browser binding: wires page events and the animation-frame loop to the
//! dashboard controller stored in a thread-local.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, window};

mod modal;
mod surface;

pub use modal::present;
pub use surface::DomSurface;

use crate::config::DashboardConfig;
use crate::dashboard::{ChallengeInput, Dashboard};
use crate::error::DashboardError;
use crate::games::ChallengeKind;
use surface::select_all;

thread_local! {
    static DASHBOARD: RefCell<Option<Dashboard<DomSurface>>> = const { RefCell::new(None) };
}

pub(crate) fn now_ms() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

/// Runs `f` once after `ms` milliseconds. Used for cosmetic resets only.
pub(crate) fn after(ms: u32, f: impl FnOnce() + 'static) {
    let Some(win) = window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    if win
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32)
        .is_err()
    {
        log::debug!("setTimeout rejected");
    }
}

/// Runs `f` against the live dashboard, if one is installed.
fn with_dashboard<R>(f: impl FnOnce(&mut Dashboard<DomSurface>, f64) -> R) -> Option<R> {
    let now = now_ms();
    DASHBOARD.with(|cell| cell.borrow_mut().as_mut().map(|d| f(d, now)))
}

fn on<T, F>(target: &T, event: &str, f: F) -> Result<(), JsValue>
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    target.as_ref().add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_id<F>(doc: &Document, id: &str, event: &str, f: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    match doc.get_element_by_id(id) {
        Some(el) => on(&el, event, f),
        None => Ok(()),
    }
}

/// `Element` that fired `evt`, if any.
fn event_element(evt: &Event) -> Option<Element> {
    evt.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn child_text(el: &Element, selector: &str) -> String {
    el.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.text_content())
        .unwrap_or_default()
}

pub fn start(cfg: DashboardConfig) -> Result<(), DashboardError> {
    let win = window().ok_or(DashboardError::NoWindow)?;
    let doc = win.document().ok_or(DashboardError::NoDocument)?;
    let now = win.performance().ok_or(DashboardError::NoPerformance)?.now();

    if DASHBOARD.with(|cell| cell.borrow().is_some()) {
        return Err(DashboardError::AlreadyStarted);
    }

    let surface = DomSurface::new(doc.clone(), cfg.wealth.pulse_ms, cfg.market.flash_ms);
    let dash = Dashboard::new(cfg, surface, StdRng::from_entropy(), now)?;
    DASHBOARD.with(|cell| cell.replace(Some(dash)));

    bind_navigation(&doc)?;
    bind_alerts(&doc)?;
    bind_reaction(&doc)?;
    bind_challenge(&doc)?;
    bind_savings(&doc)?;
    bind_dialogue(&doc)?;

    on(&doc, "keydown", |evt: Event| {
        if let Some(key) = evt.dyn_ref::<KeyboardEvent>() {
            let code = key.code();
            with_dashboard(|d, _| d.on_key(&code));
        }
    })?;

    start_loop();
    log::info!("dashboard started");
    Ok(())
}

fn bind_navigation(doc: &Document) -> Result<(), JsValue> {
    for btn in select_all(doc, ".nav-btn[data-view]") {
        let target = btn.get_attribute("data-view").unwrap_or_default();
        on(&btn, "click", move |_| {
            with_dashboard(|d, _| d.navigate(&target));
        })?;
    }
    on_id(doc, "toggle-visibility", "click", |_| {
        with_dashboard(|d, _| d.toggle_visibility());
    })
}

fn bind_alerts(doc: &Document) -> Result<(), JsValue> {
    for card in select_all(doc, ".investment-card") {
        let el = card.clone();
        on(&card, "click", move |_| {
            let shape = child_text(&el, ".shape");
            let name = child_text(&el, "h4");
            let rate = child_text(&el, ".return");
            with_dashboard(|d, _| d.show_investment(&shape, &name, &rate));
        })?;
    }
    for btn in select_all(doc, ".action-btn") {
        let deposit = btn.class_list().contains("green");
        let el = btn.clone();
        on(&btn, "click", move |_| {
            // Press feedback, then the alert once the button springs back.
            if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
                html.style().set_property("transform", "scale(0.95)").ok();
            }
            let el = el.clone();
            after(150, move || {
                if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
                    html.style().set_property("transform", "scale(1)").ok();
                }
                with_dashboard(|d, _| d.account_action(deposit));
            });
        })?;
    }
    for btn in select_all(doc, ".contact-advisor") {
        on(&btn, "click", |_| {
            with_dashboard(|d, _| d.contact_advisor());
        })?;
    }
    for btn in select_all(doc, ".help-btn") {
        on(&btn, "click", |_| {
            with_dashboard(|d, _| d.help());
        })?;
    }
    Ok(())
}

fn bind_reaction(doc: &Document) -> Result<(), JsValue> {
    on_id(doc, "reaction-start", "click", |_| {
        with_dashboard(|d, now| d.start_reaction(now));
    })?;
    on_id(doc, "reaction-action", "click", |_| {
        with_dashboard(|d, now| d.transact(now));
    })
}

fn bind_challenge(doc: &Document) -> Result<(), JsValue> {
    on_id(doc, "challenge-start", "click", |_| {
        with_dashboard(|d, now| d.start_challenge(now));
    })?;
    for btn in select_all(doc, ".challenge-btn[data-challenge]") {
        let Some(kind) = btn.get_attribute("data-challenge").and_then(|k| ChallengeKind::from_key(&k))
        else {
            log::warn!("challenge button with unknown data-challenge");
            continue;
        };
        on(&btn, "click", move |_| {
            with_dashboard(|d, now| d.begin_challenge(kind, now));
        })?;
    }
    let Some(pad) = doc.get_element_by_id("challenge-pad") else {
        return Ok(());
    };
    let inputs = [
        ("click", ChallengeInput::Click),
        ("dblclick", ChallengeInput::DoubleClick),
        ("mousedown", ChallengeInput::Press),
        ("mouseenter", ChallengeInput::HoverEnter),
        ("mouseleave", ChallengeInput::HoverLeave),
    ];
    for (event, input) in inputs {
        on(&pad, event, move |_| {
            with_dashboard(|d, now| d.challenge_input(input, now));
        })?;
    }
    // A hold ends wherever the button comes up, including off the pad.
    on(doc, "mouseup", |_| {
        with_dashboard(|d, now| d.challenge_input(ChallengeInput::Release, now));
    })
}

fn bind_savings(doc: &Document) -> Result<(), JsValue> {
    on_id(doc, "savings-start", "click", |_| {
        with_dashboard(|d, _| d.start_savings());
    })?;
    for el in select_all(doc, ".savings-step[data-step]") {
        let Some(step) = el.get_attribute("data-step").and_then(|s| s.parse::<usize>().ok()) else {
            continue;
        };
        on(&el, "click", move |_| {
            with_dashboard(|d, _| d.attempt_step(step));
        })?;
    }
    Ok(())
}

fn bind_dialogue(doc: &Document) -> Result<(), JsValue> {
    on_id(doc, "dialogue-start", "click", |_| {
        with_dashboard(|d, _| d.start_dialogue());
    })?;
    // Choice buttons are re-rendered per prompt, so listen on the container.
    on_id(doc, "dialogue-choices", "click", |evt: Event| {
        let choice = event_element(&evt)
            .and_then(|el| el.get_attribute("data-choice"))
            .and_then(|c| c.parse::<usize>().ok());
        if let Some(choice) = choice {
            with_dashboard(|d, _| d.choose(choice));
        }
    })
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        DASHBOARD.with(|cell| {
            if let Some(dash) = cell.borrow_mut().as_mut() {
                dash.tick(ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
