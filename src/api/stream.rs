//! WASM API for the drifting note stream
//!
//! `ThoughtStream` wraps one `Scene`. The host calls `frame(performance.now())`
//! from `requestAnimationFrame` and forwards pointer events with the same
//! clock. When attached to the DOM the stream updates card elements itself;
//! otherwise the host applies the returned `FrameUpdate`.

use wasm_bindgen::prelude::*;

use super::feed::FeedHandle;
use super::helpers::{config_from_js, deserialize, serialize, to_js_error};
use super::types::{FrameUpdate, StreamSnapshot};
use crate::dom::DomPresenter;
use crate::interaction::Release;
use crate::models::{ItemId, Note, Vec2};
use crate::scene::Scene;
use crate::text::{format_note_html, preview_text};
use crate::utils::FrameMonitor;
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

#[wasm_bindgen]
pub struct ThoughtStream {
    scene: Scene,
    monitor: FrameMonitor,
    presenter: Option<DomPresenter>,
}

#[wasm_bindgen]
impl ThoughtStream {
    /// Create a stream for a screen of `width` x `height`
    ///
    /// `config` is a partial `StreamConfig` object (camelCase keys) or `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config: JsValue) -> Result<ThoughtStream, JsValue> {
        let config = config_from_js(config)?;
        let scene = Scene::new(config, width, height).map_err(to_js_error)?;
        wasm_info!("ThoughtStream created: {}x{}", width, height);

        Ok(Self {
            scene,
            monitor: FrameMonitor::default(),
            presenter: None,
        })
    }

    /// Render cards into the element with `container_id`, or into `<body>`
    pub fn attach(&mut self, container_id: Option<String>) -> Result<(), JsValue> {
        self.presenter = Some(DomPresenter::new(container_id.as_deref())?);
        Ok(())
    }

    /// Load the notes collected by a finished feed loader
    #[wasm_bindgen(js_name = loadFeed)]
    pub fn load_feed(&mut self, feed: &FeedHandle) -> Result<usize, JsValue> {
        self.take_notes(feed.notes())
    }

    /// Load notes from an array of `{ content }` objects
    #[wasm_bindgen(js_name = loadNotes)]
    pub fn load_notes(&mut self, notes: JsValue) -> Result<usize, JsValue> {
        let notes: Vec<Note> = deserialize(notes, "Invalid notes")?;
        self.take_notes(notes)
    }

    /// Show a load failure in place of the loading indicator
    ///
    /// The stream will not start until notes are loaded again.
    #[wasm_bindgen(js_name = reportLoadError)]
    pub fn report_load_error(&mut self, message: &str) -> Result<(), JsValue> {
        wasm_error!("Error loading notes: {}", message);
        self.scene.mark_load_failed();
        match &self.presenter {
            Some(presenter) => presenter.show_load_error(message),
            None => Ok(()),
        }
    }

    /// Place the initial batch and start the spawn and density timers
    pub fn start(&mut self, now: f64) -> usize {
        let spawned = self.scene.start(now);
        wasm_info!("Stream started at {:.0}ms with {} cards", now, spawned);
        spawned
    }

    /// Advance one frame; returns the `FrameUpdate` for the host
    pub fn frame(&mut self, now: f64) -> Result<JsValue, JsValue> {
        let events = self.scene.frame(now);
        self.monitor.record_frame(now);

        let update = FrameUpdate::build(&self.scene, &events);
        if !events.is_empty() {
            wasm_log!(
                "Frame {}: +{} -{} ({} active)",
                update.frame,
                update.spawned.len(),
                update.removed.len(),
                update.positions.len()
            );
        }

        if let Some(presenter) = self.presenter.as_mut() {
            presenter.apply(&update)?;
        }
        serialize(&update, "Failed to serialize frame")
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, id: u32, offset_x: f64, offset_y: f64, now: f64) {
        self.scene
            .pointer_down(ItemId(id), Vec2::new(offset_x, offset_y), now);
    }

    /// Returns whether a card is being dragged
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64, now: f64) -> Result<bool, JsValue> {
        let moved = self.scene.pointer_move(Vec2::new(x, y), now);
        if moved {
            if let (Some(presenter), Some(id)) = (&self.presenter, self.scene.held()) {
                presenter.set_grabbing(id.0, true)?;
            }
        }
        Ok(moved)
    }

    /// Returns whether a drag ended
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, now: f64) -> Result<bool, JsValue> {
        match self.scene.pointer_up(now) {
            Release::Dropped(id) => {
                if let Some(presenter) = &self.presenter {
                    presenter.set_grabbing(id.0, false)?;
                }
                Ok(true)
            }
            Release::Click(_) | Release::Idle => Ok(false),
        }
    }

    /// Open a card; returns the detail HTML, or `undefined` for a tap that ends a drag
    pub fn tap(&self, id: u32, now: f64) -> Result<Option<String>, JsValue> {
        let Some(note) = self.scene.tap(ItemId(id), now) else {
            return Ok(None);
        };
        let html = format_note_html(&note.content);
        if let Some(presenter) = &self.presenter {
            presenter.show_note(&html)?;
        }
        Ok(Some(html))
    }

    /// Show the informational overlay
    #[wasm_bindgen(js_name = showInfo)]
    pub fn show_info(&self) -> Result<(), JsValue> {
        match &self.presenter {
            Some(presenter) => presenter.show_info(),
            None => Ok(()),
        }
    }

    #[wasm_bindgen(js_name = closeInfo)]
    pub fn close_info(&self) -> Result<(), JsValue> {
        match &self.presenter {
            Some(presenter) => presenter.hide_info(),
            None => Ok(()),
        }
    }

    /// Mute or unmute the background audio; returns whether it is now muted
    #[wasm_bindgen(js_name = toggleAudio)]
    pub fn toggle_audio(&self) -> Result<bool, JsValue> {
        match &self.presenter {
            Some(presenter) => presenter.toggle_audio(),
            None => Err(JsValue::from_str("Stream is not attached to the page")),
        }
    }

    #[wasm_bindgen(js_name = closeNote)]
    pub fn close_note(&self) -> Result<(), JsValue> {
        match &self.presenter {
            Some(presenter) => presenter.hide_note(),
            None => Ok(()),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        self.scene.resize(width, height);
    }

    #[wasm_bindgen(js_name = activeCount)]
    pub fn active_count(&self) -> usize {
        self.scene.items().len()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = StreamSnapshot {
            running: self.scene.is_running(),
            notes: self.scene.store().len(),
            active: self.scene.items().len(),
            held: self.scene.held().map(|id| id.0),
            frame: self.scene.frame_count(),
            frames_per_second: self.monitor.frames_per_second(),
            next_spawn_ms: self.scene.scheduler().map(|s| s.next_spawn()),
        };
        serialize(&snapshot, "Failed to serialize snapshot")
    }
}

impl ThoughtStream {
    fn take_notes(&mut self, notes: Vec<Note>) -> Result<usize, JsValue> {
        if !self.scene.load_notes(notes) {
            wasm_warn!("Notes already loaded into a running stream; reload ignored");
        }
        if let Some(presenter) = &self.presenter {
            presenter.hide_loading()?;
        }
        Ok(self.scene.store().len())
    }
}

/// Detail-view HTML for a note
#[wasm_bindgen(js_name = formatNote)]
pub fn format_note(content: &str) -> String {
    format_note_html(content)
}

/// Card preview for a note
#[wasm_bindgen(js_name = previewText)]
pub fn preview(content: &str, word_limit: usize) -> String {
    preview_text(content, word_limit)
}
