//! Sound cues and the samples behind them.

use audio::AudioSystem;
use std::path::Path;

/// Number of sample variants per right/wrong cue.
pub const VARIANT_COUNT: u32 = 6;

/// Variant picked for the `counter`-th cue of a kind.
pub fn variant(counter: u32) -> u32 {
    counter % VARIANT_COUNT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Ambient loop under the whole mode.
    Hum,
    Right(u32),
    Wrong(u32),
}

impl Cue {
    pub fn right(counter: u32) -> Self {
        Cue::Right(variant(counter))
    }

    pub fn wrong(counter: u32) -> Self {
        Cue::Wrong(variant(counter))
    }

    /// Name the sample is registered under, also its file stem.
    pub fn sample_name(&self) -> String {
        match self {
            Cue::Hum => "hum".to_string(),
            Cue::Right(v) => format!("right-{:03}", v + 1),
            Cue::Wrong(v) => format!("wrong-{:03}", v + 1),
        }
    }

    pub fn all() -> Vec<Cue> {
        let mut cues = vec![Cue::Hum];
        cues.extend((0..VARIANT_COUNT).map(Cue::Right));
        cues.extend((0..VARIANT_COUNT).map(Cue::Wrong));
        cues
    }
}

/// Load every cue sample from `<data_dir>/<name>.wav`. Missing samples are
/// logged and left out. Returns how many loaded.
pub fn load_cues(audio: &mut AudioSystem, data_dir: &Path) -> usize {
    let mut loaded = 0;
    for cue in Cue::all() {
        let name = cue.sample_name();
        let path = data_dir.join(format!("{}.wav", name));
        match audio.load_sound(&name, &path) {
            Ok(()) => loaded += 1,
            Err(e) => log::warn!("Missing sound {:?}: {}", path, e),
        }
    }
    loaded
}
