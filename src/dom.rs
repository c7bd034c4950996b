//! DOM presenter
//!
//! Mirrors a stream into page elements: one absolutely positioned `.note`
//! element per card, the detail overlay and the loading indicator. It also
//! drives the page chrome: the info overlay and the background audio mute
//! button. Element ids follow the host page (`#modal`, `#full-note-text`,
//! `#loading`, `#info-modal`, `#background-audio`, `#audio-icon`).

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAudioElement, HtmlElement, HtmlImageElement};

use crate::api::types::{FrameUpdate, ItemView};

const MODAL_ID: &str = "modal";
const FULL_TEXT_ID: &str = "full-note-text";
const LOADING_ID: &str = "loading";
const INFO_MODAL_ID: &str = "info-modal";
const AUDIO_ID: &str = "background-audio";
const AUDIO_ICON_ID: &str = "audio-icon";

pub const PLAY_ICON: &str = "play-icon.png";
pub const MUTE_ICON: &str = "mute-icon.png";

/// Icon shown on the audio button for a mute state
pub fn audio_icon(muted: bool) -> &'static str {
    if muted {
        MUTE_ICON
    } else {
        PLAY_ICON
    }
}

pub struct DomPresenter {
    document: Document,
    container: Element,
    cards: HashMap<u32, HtmlElement>,
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

impl DomPresenter {
    /// Attach to the element with `container_id`, or to `<body>`
    pub fn new(container_id: Option<&str>) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let container: Element = match container_id {
            Some(id) => document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", id)))?,
            None => document
                .body()
                .ok_or_else(|| JsValue::from_str("No document body"))?
                .into(),
        };

        Ok(Self {
            document,
            container,
            cards: HashMap::new(),
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn create_card(&mut self, view: &ItemView) -> Result<(), JsValue> {
        let element: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        element.set_class_name("note");
        element.dataset().set("itemId", &view.id.to_string())?;
        element.set_text_content(Some(&view.preview));

        let style = element.style();
        style.set_property("font-size", "12px")?;
        style.set_property("left", &px(view.x))?;
        style.set_property("top", &px(view.y))?;

        self.container.append_child(&element)?;
        self.cards.insert(view.id, element);
        Ok(())
    }

    /// Create, move and remove card elements for one frame
    pub fn apply(&mut self, update: &FrameUpdate) -> Result<(), JsValue> {
        for view in &update.spawned {
            self.create_card(view)?;
        }

        for position in &update.positions {
            if let Some(element) = self.cards.get(&position.id) {
                let style = element.style();
                style.set_property("left", &px(position.x))?;
                style.set_property("top", &px(position.y))?;
            }
        }

        for id in &update.removed {
            if let Some(element) = self.cards.remove(id) {
                element.remove();
            }
        }
        Ok(())
    }

    /// Cursor feedback while a card is dragged
    pub fn set_grabbing(&self, id: u32, grabbing: bool) -> Result<(), JsValue> {
        if let Some(element) = self.cards.get(&id) {
            let cursor = if grabbing { "grabbing" } else { "pointer" };
            element.style().set_property("cursor", cursor)?;
        }
        Ok(())
    }

    fn element(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", id)))
    }

    fn set_display(&self, id: &str, display: &str) -> Result<(), JsValue> {
        let element: HtmlElement = self.element(id)?.dyn_into()?;
        element.style().set_property("display", display)
    }

    /// Fill the detail overlay with formatted note HTML and show it
    pub fn show_note(&self, html: &str) -> Result<(), JsValue> {
        self.element(FULL_TEXT_ID)?.set_inner_html(html);
        self.set_display(MODAL_ID, "flex")
    }

    pub fn hide_note(&self) -> Result<(), JsValue> {
        self.set_display(MODAL_ID, "none")
    }

    pub fn hide_loading(&self) -> Result<(), JsValue> {
        self.set_display(LOADING_ID, "none")
    }

    pub fn show_info(&self) -> Result<(), JsValue> {
        self.set_display(INFO_MODAL_ID, "flex")
    }

    pub fn hide_info(&self) -> Result<(), JsValue> {
        self.set_display(INFO_MODAL_ID, "none")
    }

    /// Flip the background audio between muted and playing; returns the new mute state
    pub fn toggle_audio(&self) -> Result<bool, JsValue> {
        let audio: HtmlAudioElement = self.element(AUDIO_ID)?.dyn_into()?;
        let muted = !audio.muted();
        audio.set_muted(muted);
        if !muted {
            // The returned promise rejects when autoplay is blocked; the button stays usable
            if let Err(err) = audio.play() {
                log::warn!("Background audio did not start: {:?}", err);
            }
        }

        let icon: HtmlImageElement = self.element(AUDIO_ICON_ID)?.dyn_into()?;
        icon.set_src(audio_icon(muted));
        log::debug!("Background audio {}", if muted { "muted" } else { "playing" });
        Ok(muted)
    }

    /// Replace the loading indicator text with a load failure
    pub fn show_load_error(&self, message: &str) -> Result<(), JsValue> {
        self.element(LOADING_ID)?
            .set_text_content(Some(&format!("Error loading notes: {}", message)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_icon_follows_mute_state() {
        assert_eq!(audio_icon(true), "mute-icon.png");
        assert_eq!(audio_icon(false), "play-icon.png");
    }
}
