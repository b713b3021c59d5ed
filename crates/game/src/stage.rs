//! The letter stage: gameplay mode of the typing game.
//!
//! Five letter objects act as display slots. Words from the message script are
//! revealed into free slots along a jittered horizontal band; typing a shown
//! letter removes it. When the screen and the overflow queue are both empty the
//! word is done, and once every word of a message is done the next message
//! begins after a short pause.

use std::collections::VecDeque;

use audio::{PlayMode, SoundHandle};
use engine_core::{Entity, Vec2, Vec3};
use input::KeyPress;
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::StageConfig;
use crate::cues::Cue;
use crate::mode::Mode;
use crate::script::{split_on_space, MessageScript};
use crate::world::{World, SLOT_COUNT};

/// Word shown before the script starts.
pub const OPENING_WORD: &str = "PLAY";

/// Hidden letters are parked this far behind the camera.
pub const OFFSTAGE_DEPTH: f32 = 10.0;

/// A letter bound to a slot and visible on stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedLetter {
    pub letter: char,
    pub slot: usize,
    pub object: Entity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub right: u32,
    pub wrong: u32,
}

pub struct GameMode<'w> {
    world: &'w mut World,
    config: StageConfig,
    rng: StdRng,
    messages: MessageScript,

    used_letters: [bool; SLOT_COUNT],
    /// Last on-stage position of each slot's object.
    slot_anchors: [Vec2; SLOT_COUNT],
    /// In reveal order.
    displayed_text: Vec<DisplayedLetter>,
    letter_queue: VecDeque<char>,

    /// `None` until the opening word is cleared.
    current_index: Option<usize>,
    current_word: usize,
    current_message: Vec<String>,
    cleared_time: f32,

    num_right: u32,
    num_wrong: u32,
    ambient: Option<SoundHandle>,
}

impl<'w> GameMode<'w> {
    pub fn new(world: &'w mut World, messages: MessageScript, config: StageConfig, rng: StdRng) -> Self {
        let slot_anchors = column_layout(&config);
        let mut mode = Self {
            world,
            config,
            rng,
            messages,
            used_letters: [false; SLOT_COUNT],
            slot_anchors,
            displayed_text: Vec::with_capacity(SLOT_COUNT),
            letter_queue: VecDeque::new(),
            current_index: None,
            current_word: 0,
            current_message: Vec::new(),
            cleared_time: 0.0,
            num_right: 0,
            num_wrong: 0,
            ambient: None,
        };
        mode.reset_letters();
        mode.show_string(OPENING_WORD);

        let position = mode.world.camera_position();
        let volume = mode.config.volume / 2.0;
        match mode
            .world
            .audio
            .play(&Cue::Hum.sample_name(), position, volume, PlayMode::Loop)
        {
            Ok(handle) => mode.ambient = Some(handle),
            Err(e) => log::warn!("Ambient loop unavailable: {}", e),
        }
        mode
    }

    /// Reveal a word: lay its letters out left to right across the band and
    /// bind each to the next free slot. Letters that find no free slot wait
    /// in the queue. Returns false, changing nothing, for words that can't be
    /// shown: empty, longer than the slot count, or with a letter that has no
    /// glyph.
    pub fn show_string(&mut self, message: &str) -> bool {
        let letters: Vec<char> = message.chars().collect();
        if letters.is_empty() || letters.len() > SLOT_COUNT {
            log::debug!("Cannot show {:?}: {} letters", message, letters.len());
            return false;
        }
        if let Some(&letter) = letters.iter().find(|&&c| self.world.glyphs.get(c).is_none()) {
            log::warn!("Cannot show {:?}: no glyph for {:?}", message, letter);
            return false;
        }

        let num_cols = letters.len().min(SLOT_COUNT);
        let spacing = (self.config.x_bound_max - self.config.x_bound_min) / (num_cols as f32 + 1.0);
        let mut prev_y = 0.0;
        for (i, &letter) in letters.iter().enumerate() {
            let x = self.config.x_bound_min + spacing * (i as f32 + 1.0);
            let y = self.jitter_y(prev_y);
            let Some(slot) = self.find_available_slot() else {
                self.letter_queue.extend(&letters[i..]);
                log::debug!("Queued {:?}", &letters[i..]);
                return true;
            };
            self.show_letter(slot, Vec2::new(x, y), letter);
            prev_y = y;
        }
        true
    }

    /// Put `letter` on stage in `slot` at `position`. Does nothing if the slot
    /// is taken.
    pub fn show_letter(&mut self, slot: usize, position: Vec2, letter: char) -> bool {
        if slot >= SLOT_COUNT || self.used_letters[slot] {
            return false;
        }
        let Some(mesh) = self.world.glyphs.get(letter) else {
            log::warn!("No glyph for {:?}", letter);
            return false;
        };
        let object = self.world.letters[slot];
        if let Err(e) = self.world.scene.set_mesh_range(object, mesh) {
            log::error!("Slot {}: {}", slot, e);
        }
        if let Err(e) = self.world.scene.set_position(object, position.extend(0.0)) {
            log::error!("Slot {}: {}", slot, e);
        }
        self.slot_anchors[slot] = position;
        self.displayed_text.push(DisplayedLetter { letter, slot, object });
        self.used_letters[slot] = true;
        true
    }

    /// Park the slot's object behind the camera and free the slot.
    pub fn hide_letter(&mut self, slot: usize) {
        let Some(&object) = self.world.letters.get(slot) else {
            return;
        };
        let offstage = self.world.camera_position() + Vec3::Z * OFFSTAGE_DEPTH;
        if let Err(e) = self.world.scene.set_position(object, offstage) {
            log::error!("Slot {}: {}", slot, e);
        }
        self.used_letters[slot] = false;
    }

    pub fn reset_letters(&mut self) {
        for slot in 0..SLOT_COUNT {
            self.hide_letter(slot);
        }
    }

    /// Match a key against the letters on stage. The first shown letter equal
    /// to the key is removed; otherwise the press counts as a mistake. Returns
    /// false for auto-repeats and keys that aren't letters.
    pub fn handle_keypress(&mut self, press: &KeyPress) -> bool {
        if press.repeat {
            return false;
        }
        let Some(pressed) = press.letter() else {
            return false;
        };

        match self.displayed_text.iter().position(|d| d.letter == pressed) {
            None => {
                log::info!("You made a mistake ({:?})", pressed);
                self.play_cue(Cue::wrong(self.num_wrong));
                self.num_wrong += 1;
            }
            Some(at) => {
                self.play_cue(Cue::right(self.num_right));
                self.num_right += 1;
                let matched = self.displayed_text.remove(at);
                self.hide_letter(matched.slot);
                self.show_from_queue(matched.slot);
            }
        }
        self.check_progress();
        true
    }

    /// Per-frame update. Reveals the next word once the stage has been empty
    /// for longer than the pacing interval.
    pub fn tick(&mut self, elapsed: f32) {
        self.cleared_time += elapsed;
        if self.cleared_time <= self.config.pacing_seconds
            || !self.displayed_text.is_empty()
            || !self.letter_queue.is_empty()
            || !self.messages_remain()
        {
            return;
        }

        match self.current_message.get(self.current_word).cloned() {
            Some(word) => {
                if !self.show_string(&word) {
                    log::warn!("Skipping word {:?}", word);
                    self.check_progress();
                }
            }
            // Blank line: nothing to type.
            None => self.check_progress(),
        }
    }

    /// Move the next queued letter into a freshly freed slot, keeping the
    /// slot's column and jittering around the nearest letter still shown.
    fn show_from_queue(&mut self, slot: usize) {
        let Some(letter) = self.letter_queue.pop_front() else {
            return;
        };
        let x = self.slot_anchors[slot].x;
        let anchor_y = self
            .displayed_text
            .iter()
            .map(|d| self.slot_anchors[d.slot])
            .min_by(|a, b| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
            .map_or(0.0, |p| p.y);
        let y = self.jitter_y(anchor_y);
        if !self.show_letter(slot, Vec2::new(x, y), letter) {
            self.letter_queue.push_front(letter);
        }
    }

    fn check_progress(&mut self) {
        if !self.letter_queue.is_empty() || !self.displayed_text.is_empty() {
            return;
        }
        self.current_word += 1;
        if self.current_word >= self.current_message.len() {
            self.advance_message();
        }
    }

    fn advance_message(&mut self) {
        self.cleared_time = 0.0;
        let next = self.current_index.map_or(0, |i| i + 1);
        self.current_index = Some(next);
        match self.messages.get(next) {
            Some(line) => {
                self.current_message = split_on_space(line);
                self.current_word = 0;
                log::info!("Message {}/{}: {:?}", next + 1, self.messages.len(), line);
            }
            None => log::info!(
                "Script finished: {} right, {} wrong",
                self.num_right,
                self.num_wrong
            ),
        }
    }

    fn messages_remain(&self) -> bool {
        self.current_index.map_or(true, |i| i < self.messages.len())
    }

    fn find_available_slot(&self) -> Option<usize> {
        self.used_letters.iter().position(|used| !used)
    }

    /// Vertical offset within `max_letter_offset` of `anchor`, kept on stage.
    fn jitter_y(&mut self, anchor: f32) -> f32 {
        let bound = self.config.y_bound;
        let min = (anchor - self.config.max_letter_offset).max(-bound);
        let max = (anchor + self.config.max_letter_offset).min(bound);
        if min >= max {
            return min.clamp(-bound, bound);
        }
        self.rng.gen_range(min..=max).clamp(-bound, bound)
    }

    fn play_cue(&mut self, cue: Cue) {
        let position = self.world.camera_position();
        if let Err(e) = self
            .world
            .audio
            .play(&cue.sample_name(), position, self.config.volume, PlayMode::Once)
        {
            log::warn!("Cue {:?}: {}", cue, e);
        }
    }

    pub fn displayed(&self) -> &[DisplayedLetter] {
        &self.displayed_text
    }

    pub fn queued(&self) -> impl Iterator<Item = char> + '_ {
        self.letter_queue.iter().copied()
    }

    pub fn score(&self) -> Score {
        Score {
            right: self.num_right,
            wrong: self.num_wrong,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_word(&self) -> usize {
        self.current_word
    }

    /// Every message has been typed; nothing more will be revealed.
    pub fn is_finished(&self) -> bool {
        !self.messages_remain()
    }
}

impl Mode for GameMode<'_> {
    fn handle_event(&mut self, event: &KeyPress) -> bool {
        self.handle_keypress(event)
    }

    fn update(&mut self, elapsed: f32) {
        self.tick(elapsed);
    }
}

impl Drop for GameMode<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.ambient.take() {
            self.world.audio.stop(handle);
        }
    }
}

/// Evenly spaced columns for a full row, on the centre line.
fn column_layout(config: &StageConfig) -> [Vec2; SLOT_COUNT] {
    let spacing = (config.x_bound_max - config.x_bound_min) / (SLOT_COUNT as f32 + 1.0);
    std::array::from_fn(|i| Vec2::new(config.x_bound_min + spacing * (i as f32 + 1.0), 0.0))
}
