//! `Surface` backed by the live page.

use std::collections::HashSet;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::{after, modal};
use crate::games::{
    ChallengeGame, ChallengeKind, DialogueGame, GameId, GameStatus, Light, Outcome, ReactionGame,
    SAVINGS_STEPS, StepsGame,
};
use crate::market::ReturnMove;
use crate::stats::{PlayerStats, format_amount};
use crate::surface::{Capability, Surface};
use crate::view::View;

pub struct DomSurface {
    doc: Document,
    caps: HashSet<Capability>,
    pulse_ms: u32,
    flash_ms: u32,
    savings_percent: Option<u32>,
}

impl DomSurface {
    pub fn new(doc: Document, pulse_ms: u32, flash_ms: u32) -> Self {
        let caps = probe(&doc);
        log::debug!("page capabilities: {:?}", caps);
        Self { doc, caps, pulse_ms, flash_ms, savings_percent: None }
    }

    fn text(&self, id: &str, value: &str) {
        if let Some(el) = self.doc.get_element_by_id(id) {
            el.set_text_content(Some(value));
        }
    }

    fn all(&self, selector: &str) -> Vec<Element> {
        select_all(&self.doc, selector)
    }
}

/// Works out which features the current markup can host.
fn probe(doc: &Document) -> HashSet<Capability> {
    let has_id = |id: &str| doc.get_element_by_id(id).is_some();
    let has_sel = |sel: &str| doc.query_selector(sel).ok().flatten().is_some();
    let mut caps = HashSet::new();
    let mut add = |cap, present: bool| {
        if present {
            caps.insert(cap);
        }
    };
    add(Capability::Navigation, has_sel(".nav-btn[data-view]"));
    add(Capability::Title, has_id("page-title"));
    add(
        Capability::Wealth,
        has_id("toggle-visibility") && has_id("wealth-amount") && has_id("eye-icon"),
    );
    add(Capability::Stats, has_id("stats-panel"));
    add(Capability::Market, has_sel(".return"));
    add(Capability::Game(GameId::Reaction), has_id("reaction-game"));
    add(Capability::Game(GameId::Challenge), has_id("challenge-game"));
    add(Capability::Game(GameId::Steps), has_id("savings-game"));
    add(Capability::Game(GameId::Dialogue), has_id("dialogue-game"));
    caps
}

pub(crate) fn select_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn set_style(el: &Element, prop: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        html.style().set_property(prop, value).ok();
    }
}

fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    if on {
        list.add_1(class).ok();
    } else {
        list.remove_1(class).ok();
    }
}

fn status_text(status: GameStatus, idle: &str) -> String {
    match status {
        GameStatus::Idle => idle.to_string(),
        GameStatus::Active => "In progress".to_string(),
        GameStatus::Ended(Outcome::Won) => "Survived".to_string(),
        GameStatus::Ended(Outcome::Lost) => "Eliminated".to_string(),
    }
}

/// Scale pulse used for balances: shrink now, restore after `ms`.
fn pulse(el: &Element, ms: u32) {
    set_style(el, "transform", "scale(0.8)");
    let el = el.clone();
    after(ms, move || set_style(&el, "transform", "scale(1)"));
}

impl Surface for DomSurface {
    fn supports(&self, cap: Capability) -> bool {
        self.caps.contains(&cap)
    }

    fn show_view(&mut self, view: View) {
        for panel in self.all(".view") {
            set_class(&panel, "active", false);
        }
        if let Some(panel) = self.doc.get_element_by_id(&view.panel_id()) {
            set_class(&panel, "active", true);
        }
    }

    fn set_title(&mut self, title: &str) {
        self.text("page-title", title);
    }

    fn highlight_nav(&mut self, view: View) {
        for btn in self.all(".nav-btn") {
            let on = btn.get_attribute("data-view").as_deref() == Some(view.name());
            set_class(&btn, "active", on);
        }
    }

    fn play_entrance(&mut self, view: View) {
        match view {
            View::Home => {}
            View::Cash => {
                if let Some(amount) = self.all(".amount").first() {
                    pulse(amount, 300);
                }
            }
            View::Investments => {
                for (i, card) in self.all(".investment-card").into_iter().enumerate() {
                    set_style(&card, "opacity", "0");
                    set_style(&card, "transform", "translateY(20px)");
                    after(i as u32 * 100, move || {
                        set_style(&card, "transition", "all 0.5s ease");
                        set_style(&card, "opacity", "1");
                        set_style(&card, "transform", "translateY(0)");
                    });
                }
            }
            View::Savings => {
                if let Some(fill) = self.all(".progress-fill").into_iter().next() {
                    let width = format!("{}%", self.savings_percent.unwrap_or(60));
                    set_style(&fill, "width", "0%");
                    after(500, move || set_style(&fill, "width", &width));
                }
            }
            View::Advisory => {
                for (i, item) in self.all(".advice-item").into_iter().enumerate() {
                    set_style(&item, "opacity", "0");
                    set_style(&item, "transform", "translateX(-20px)");
                    after(i as u32 * 200, move || {
                        set_style(&item, "transition", "all 0.4s ease");
                        set_style(&item, "opacity", "1");
                        set_style(&item, "transform", "translateX(0)");
                    });
                }
            }
        }
    }

    fn set_wealth(&mut self, text: &str, visible: bool) {
        self.text("wealth-amount", text);
        if let Some(icon) = self.doc.get_element_by_id("eye-icon") {
            icon.set_class_name(if visible { "fas fa-eye" } else { "fas fa-eye-slash" });
        }
    }

    fn pulse_wealth(&mut self) {
        if let Some(el) = self.doc.get_element_by_id("wealth-amount") {
            pulse(&el, self.pulse_ms);
        }
    }

    fn render_stats(&mut self, stats: &PlayerStats) {
        self.text("stat-level", &stats.level().to_string());
        self.text("stat-points", &stats.survivor_points.to_string());
        self.text("stat-wins", &stats.games_won.to_string());
        self.text("stat-earnings", &format_amount(stats.total_earnings as f64 / 100.0));
    }

    fn render_reaction(&mut self, game: &ReactionGame, now: f64) {
        if let Some(light) = self.doc.get_element_by_id("reaction-light") {
            let active = game.is_active();
            set_class(&light, "green", active && game.light() == Light::Green);
            set_class(&light, "red", active && game.light() == Light::Red);
        }
        self.text("reaction-score", &game.score().to_string());
        self.text("reaction-progress", &format!("{}/{}", game.transactions(), game.goal()));
        self.text("reaction-time", &format!("{}s", game.secs_left(now)));
        self.text("reaction-lives", &"♥".repeat(game.lives() as usize));
        self.text("reaction-status", &status_text(game.status(), "Press start"));
    }

    fn render_challenge(&mut self, game: &ChallengeGame, now: f64) {
        for btn in self.all(".challenge-btn[data-challenge]") {
            let kind = btn.get_attribute("data-challenge").and_then(|k| ChallengeKind::from_key(&k));
            if let Some(kind) = kind {
                set_class(&btn, "completed", game.is_completed(kind));
                set_class(&btn, "active", game.current() == Some(kind));
            }
        }
        self.text("challenge-attempts", &game.attempts_left().to_string());
        let progress = match game.progress(now) {
            Some((kind @ (ChallengeKind::Hold | ChallengeKind::Hover), ms)) => {
                format!("{}: {:.1}s / {:.1}s", kind.title(), ms as f64 / 1000.0, game.target(kind) as f64 / 1000.0)
            }
            Some((kind, count)) => format!("{}: {}/{}", kind.title(), count, game.target(kind)),
            None => format!("{}/4 trials cleared", game.completed_count()),
        };
        self.text("challenge-progress", &progress);
        self.text("challenge-status", &status_text(game.status(), "Press start"));
    }

    fn render_steps(&mut self, game: &StepsGame) {
        for el in self.all(".savings-step[data-step]") {
            let step = el.get_attribute("data-step").and_then(|s| s.parse::<usize>().ok());
            if let Some(step) = step {
                set_class(&el, "completed", game.is_completed(step));
                if let Some((name, deposit)) = SAVINGS_STEPS.get(step) {
                    el.set_attribute("title", &format!("{name}: +{deposit}")).ok();
                }
            }
        }
        self.text("savings-total", &game.total().to_string());
        self.text("savings-status", &status_text(game.status(), "Press start"));
        let percent = game.percent();
        self.savings_percent = Some(percent);
        if let Some(fill) = self.all(".progress-fill").into_iter().next() {
            set_style(&fill, "width", &format!("{percent}%"));
        }
    }

    fn render_dialogue(&mut self, game: &DialogueGame, response: Option<&str>) {
        let prompt = game.prompt();
        let prompt_text = match (prompt, game.status()) {
            (Some(p), _) => p.text,
            (None, GameStatus::Ended(_)) => "The Front Man has nothing more to say.",
            (None, _) => "Press start to meet the Front Man.",
        };
        self.text("dialogue-prompt", prompt_text);
        if let Some(response) = response {
            self.text("dialogue-response", response);
        }
        let Some(container) = self.doc.get_element_by_id("dialogue-choices") else {
            return;
        };
        container.set_text_content(None);
        for (i, &(label, _)) in prompt.map(|p| p.choices).unwrap_or_default().iter().enumerate() {
            let Ok(btn) = self.doc.create_element("button") else {
                continue;
            };
            btn.set_class_name("dialogue-choice");
            btn.set_attribute("data-choice", &i.to_string()).ok();
            btn.set_text_content(Some(label));
            container.append_child(&btn).ok();
        }
    }

    fn flash_step(&mut self, step: usize, success: bool) {
        let selector = format!(".savings-step[data-step=\"{step}\"]");
        let Some(el) = self.all(&selector).into_iter().next() else {
            return;
        };
        let class = if success { "success" } else { "failed" };
        set_class(&el, class, true);
        after(600, move || set_class(&el, class, false));
    }

    fn return_labels(&self) -> Vec<String> {
        self.all(".return").iter().map(|el| el.text_content().unwrap_or_default()).collect()
    }

    fn set_return(&mut self, mv: &ReturnMove) {
        let Some(el) = self.all(".return").into_iter().nth(mv.index) else {
            return;
        };
        el.set_text_content(Some(&mv.text));
        set_style(&el, "color", if mv.rising { "#2ed573" } else { "#ff4757" });
        after(self.flash_ms, move || set_style(&el, "color", "#2ed573"));
    }

    fn present(&mut self, message: &str) {
        if let Err(e) = modal::present(&self.doc, message) {
            log::warn!("alert not shown: {:?}", e);
        }
    }
}
