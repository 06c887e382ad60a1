//! Full-screen alert overlay.
//!
//! Each call appends an independent overlay; there is no queue. The overlay is
//! removed by its OK button or by a click on the backdrop itself.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event};

pub const OVERLAY_CLASS: &str = "sb-modal-overlay";
pub const ANIMATION_STYLE_ID: &str = "modal-animations";

const OVERLAY_STYLE: &str = "position:fixed; top:0; left:0; width:100%; height:100%; background:rgba(0,0,0,0.8); display:flex; align-items:center; justify-content:center; z-index:1000; backdrop-filter:blur(5px);";
const BOX_STYLE: &str = "background:linear-gradient(135deg, #1a1a1a, #2a2a2a); border:2px solid #ff4757; border-radius:16px; padding:2rem; max-width:320px; margin:1rem; text-align:center; box-shadow:0 20px 40px rgba(255,71,87,0.3); animation:modalSlideIn 0.3s ease-out;";
const TEXT_STYLE: &str = "color:#fff; font-size:1rem; line-height:1.5; margin-bottom:1.5rem; white-space:pre-line;";
const BUTTON_STYLE: &str = "background:#ff4757; color:white; border:none; padding:0.75rem 2rem; border-radius:8px; font-size:1rem; font-weight:600; cursor:pointer; transition:background 0.3s;";
const KEYFRAMES: &str = "@keyframes modalSlideIn { from { opacity: 0; transform: translateY(-50px) scale(0.8); } to { opacity: 1; transform: translateY(0) scale(1); } }";

/// Registers the slide-in keyframes. Idempotent per page.
fn ensure_animation_style(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(ANIMATION_STYLE_ID).is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id(ANIMATION_STYLE_ID);
    style.set_text_content(Some(KEYFRAMES));
    match doc.head() {
        Some(head) => head.append_child(&style)?,
        None => doc.document_element().ok_or("no root element")?.append_child(&style)?,
    };
    Ok(())
}

/// Shows `message` in a new overlay and returns the overlay element.
pub fn present(doc: &Document, message: &str) -> Result<Element, JsValue> {
    ensure_animation_style(doc)?;
    let body = doc.body().ok_or("no body")?;

    let overlay = doc.create_element("div")?;
    overlay.set_class_name(OVERLAY_CLASS);
    overlay.set_attribute("style", OVERLAY_STYLE)?;

    let modal = doc.create_element("div")?;
    modal.set_attribute("style", BOX_STYLE)?;

    let text = doc.create_element("div")?;
    text.set_attribute("style", TEXT_STYLE)?;
    // Text content, never markup: messages can echo page text.
    text.set_text_content(Some(message));

    let button = doc.create_element("button")?;
    button.set_attribute("style", BUTTON_STYLE)?;
    button.set_text_content(Some("OK"));

    {
        let target = overlay.clone();
        let closure = Closure::wrap(Box::new(move |_evt: Event| {
            target.remove();
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let target = overlay.clone();
        let closure = Closure::wrap(Box::new(move |evt: Event| {
            // Only the backdrop itself dismisses; clicks inside the box bubble here too.
            let hit = evt.target().map(JsValue::from);
            if hit == Some(JsValue::from(target.clone())) {
                target.remove();
            }
        }) as Box<dyn FnMut(_)>);
        overlay.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    modal.append_child(&text)?;
    modal.append_child(&button)?;
    overlay.append_child(&modal)?;
    body.append_child(&overlay)?;
    Ok(overlay)
}
