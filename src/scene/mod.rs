//! Scene: one independent thought stream session
//!
//! A `Scene` owns everything that changes while the stream runs: the note
//! store, the active cards, the drag state, the timers and the random source.
//! Nothing is global, so several scenes can run side by side (and tests can
//! build as many as they like).
//!
//! The host drives a scene with two calls: `start(now)` once notes are loaded,
//! then `frame(now)` on every refresh. Pointer events go through the
//! `pointer_*` and `tap` methods with the same clock.

pub mod scheduler;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::interaction::{DragTiming, DragTracker, Release};
use crate::layout::{self, MotionBounds, PlacementRules};
use crate::models::{ConfigError, ItemId, Note, NoteStore, StreamConfig, Vec2, VisibleItem};

pub use scheduler::{Due, Interval, Scheduler};

/// Changes to the set of cards since the previous frame
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FrameEvents {
    pub spawned: Vec<ItemId>,
    pub removed: Vec<ItemId>,
}

impl FrameEvents {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.removed.is_empty()
    }
}

pub struct Scene {
    config: StreamConfig,
    width: f64,
    height: f64,
    store: NoteStore,
    items: Vec<VisibleItem>,
    drag: DragTracker,
    scheduler: Option<Scheduler>,
    rng: SmallRng,
    next_id: u32,
    frames: u64,
    pending: FrameEvents,
    load_failed: bool,
}

impl Scene {
    /// Create a scene seeded from the platform's entropy source
    pub fn new(config: StreamConfig, width: f64, height: f64) -> Result<Self, ConfigError> {
        Self::with_rng(config, width, height, SmallRng::from_entropy())
    }

    /// Create a scene with a fixed seed, for reproducible runs
    pub fn with_seed(
        config: StreamConfig,
        width: f64,
        height: f64,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, width, height, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: StreamConfig,
        width: f64,
        height: f64,
        rng: SmallRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            width,
            height,
            store: NoteStore::default(),
            items: Vec::new(),
            drag: DragTracker::new(),
            scheduler: None,
            rng,
            next_id: 0,
            frames: 0,
            pending: FrameEvents::default(),
            load_failed: false,
        })
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn items(&self) -> &[VisibleItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&VisibleItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Note shown by a card
    pub fn note_of(&self, id: ItemId) -> Option<&Note> {
        self.item(id).and_then(|item| self.store.get(item.note_index))
    }

    pub fn held(&self) -> Option<ItemId> {
        self.drag.held()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> Option<&Scheduler> {
        self.scheduler.as_ref()
    }

    /// Replace the note collection
    ///
    /// Live cards index into the store, so a running scene keeps its notes
    /// and the reload is refused. Returns whether the notes were taken.
    pub fn load_notes(&mut self, notes: Vec<Note>) -> bool {
        if self.is_running() {
            log::warn!(
                "Ignoring reload of {} notes: stream already running with {} items",
                notes.len(),
                self.items.len()
            );
            return false;
        }
        self.store = NoteStore::from_notes(notes, &mut self.rng);
        self.load_failed = false;
        log::info!("Loaded {} unique notes", self.store.len());
        true
    }

    /// Record that the feed could not be loaded; `start` stays a no-op
    /// until notes are loaded again
    pub fn mark_load_failed(&mut self) {
        self.load_failed = true;
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Place the initial batch and start the timers
    ///
    /// Does nothing without notes, after a load failure, when already running
    /// or for a non-finite `now`.
    pub fn start(&mut self, now: f64) -> usize {
        if self.is_running() || self.load_failed || self.store.is_empty() || !now.is_finite() {
            return 0;
        }

        let spawned = self.spawn_initial();
        self.scheduler = Some(Scheduler::new(
            now,
            self.config.spawn_interval_ms,
            self.config.density_reset_interval_ms,
        ));
        log::info!("Stream started with {} items", spawned.len());
        spawned.len()
    }

    fn alloc_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn push_item(&mut self, note_index: usize, position: Vec2) -> ItemId {
        let id = self.alloc_id();
        let velocity = layout::random_velocity(&self.config, &mut self.rng);
        self.items.push(VisibleItem::new(id, note_index, position, velocity));
        self.pending.spawned.push(id);
        id
    }

    /// Spread `min(initial_batch, notes)` distinct notes across the middle of the screen
    pub fn spawn_initial(&mut self) -> Vec<ItemId> {
        let picks = self.store.sample(self.config.initial_batch, &mut self.rng);
        let mut spawned = Vec::with_capacity(picks.len());
        for note_index in picks {
            let position =
                layout::initial_position(&self.config, self.width, self.height, &mut self.rng);
            spawned.push(self.push_item(note_index, position));
        }
        spawned
    }

    /// Bring the next note in from the right edge
    pub fn spawn(&mut self) -> Option<ItemId> {
        let note_index = self.store.next_index(&mut self.rng)?;
        let rules = PlacementRules::from_config(&self.config);
        let y = layout::find_y(&rules, &self.items, self.width, self.height, &mut self.rng);
        Some(self.push_item(note_index, Vec2::new(self.width, y)))
    }

    /// Remove every card at an odd position of the active list
    pub fn density_reset(&mut self) -> Vec<ItemId> {
        let mut removed = Vec::new();
        let mut index = 0;
        self.items.retain(|item| {
            let keep = index % 2 == 0;
            if !keep {
                removed.push(item.id);
            }
            index += 1;
            keep
        });

        for id in &removed {
            self.drag.forget(*id);
        }
        log::debug!("Density reset removed {} items, {} remain", removed.len(), self.items.len());
        self.pending.removed.extend(removed.iter().copied());
        removed
    }

    /// Run timers and move every free card one frame
    ///
    /// A non-finite `now` is ignored: nothing moves and no frame is counted.
    pub fn frame(&mut self, now: f64) -> FrameEvents {
        if !now.is_finite() {
            log::warn!("Ignoring frame with non-finite time {}", now);
            return FrameEvents::default();
        }
        if let Some(scheduler) = self.scheduler.as_mut() {
            let due = scheduler.poll(now);
            if due.spawn {
                self.spawn();
            }
            if due.density_reset {
                self.density_reset();
            }
        }

        let bounds = MotionBounds::new(&self.config, self.height);
        let report = layout::step(&mut self.items, &bounds);
        for id in &report.culled {
            self.drag.forget(*id);
        }
        self.pending.removed.extend(report.culled);
        self.frames += 1;

        std::mem::take(&mut self.pending)
    }

    pub fn pointer_down(&mut self, id: ItemId, offset: Vec2, now: f64) {
        if !now.is_finite() {
            return;
        }
        let timing = DragTiming::from_config(&self.config);
        self.drag.pointer_down(&mut self.items, id, offset, now, &timing);
    }

    pub fn pointer_move(&mut self, pointer: Vec2, now: f64) -> bool {
        if !now.is_finite() {
            return false;
        }
        let timing = DragTiming::from_config(&self.config);
        self.drag.pointer_move(&mut self.items, pointer, now, &timing)
    }

    /// A non-finite `now` leaves any press in place and reports `Idle`
    pub fn pointer_up(&mut self, now: f64) -> Release {
        if !now.is_finite() {
            return Release::Idle;
        }
        let timing = DragTiming::from_config(&self.config);
        self.drag.pointer_up(&mut self.items, now, &timing)
    }

    /// Note to open for a tap on a card, unless the tap ends a drag
    pub fn tap(&self, id: ItemId, now: f64) -> Option<&Note> {
        if !now.is_finite() || !self.drag.accepts_tap(now) {
            return None;
        }
        self.note_of(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(count: usize) -> Vec<Note> {
        (0..count).map(|i| Note::new(format!("2024-01-01\nnote {}", i))).collect()
    }

    fn scene(note_count: usize) -> Scene {
        let mut scene = Scene::with_seed(StreamConfig::default(), 1280.0, 900.0, 17).unwrap();
        scene.load_notes(notes(note_count));
        scene
    }

    #[test]
    fn test_start_without_notes_is_noop() {
        let mut scene = scene(0);
        assert_eq!(scene.start(0.0), 0);
        assert!(!scene.is_running());
        assert!(scene.spawn().is_none());
    }

    #[test]
    fn test_initial_batch_is_capped() {
        let mut few = scene(3);
        assert_eq!(few.start(0.0), 3);

        let mut many = scene(20);
        assert_eq!(many.start(0.0), 8);
        assert_eq!(many.frame(16.0).spawned.len(), 8);
        assert!(many.frame(32.0).is_empty());
    }

    #[test]
    fn test_spawn_enters_at_right_edge() {
        let mut scene = scene(5);
        let id = scene.spawn().unwrap();
        let item = scene.item(id).unwrap();

        assert_eq!(item.position.x, 1280.0);
        assert!(item.velocity.x < 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = StreamConfig {
            base_speed: -1.0,
            ..StreamConfig::default()
        };
        assert!(Scene::with_seed(config, 800.0, 600.0, 1).is_err());
    }

    #[test]
    fn test_non_finite_frame_is_ignored() {
        let mut scene = scene(10);
        scene.start(0.0);
        let before: Vec<Vec2> = scene.items().iter().map(|i| i.position).collect();

        assert!(scene.frame(f64::INFINITY).is_empty());
        assert!(scene.frame(f64::NAN).is_empty());

        let after: Vec<Vec2> = scene.items().iter().map(|i| i.position).collect();
        assert_eq!(before, after);
        assert_eq!(scene.frame_count(), 0);
        assert_eq!(scene.scheduler().unwrap().next_spawn(), 5_000.0);
    }

    #[test]
    fn test_load_failure_blocks_start() {
        let mut scene = scene(10);
        scene.mark_load_failed();

        assert_eq!(scene.start(0.0), 0);
        assert!(!scene.is_running());

        assert!(scene.load_notes(notes(4)));
        assert!(!scene.load_failed());
        assert_eq!(scene.start(0.0), 4);
    }

    #[test]
    fn test_scenes_are_independent() {
        let mut a = scene(10);
        let b = scene(10);
        a.start(0.0);

        assert_eq!(a.items().len(), 8);
        assert!(b.items().is_empty());
    }
}
