//! Sound playback for gameplay cues.
//!
//! Gameplay talks to [`SoundOutput`]; [`AudioSystem`] is the Kira-backed
//! implementation with a spatial scene, [`SilentOutput`] stands in when no
//! audio device is available.

use anyhow::{anyhow, Result};
use engine_core::Vec3;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    sound::PlaybackState,
    spatial::{
        emitter::{EmitterHandle, EmitterSettings},
        listener::{ListenerHandle, ListenerSettings},
        scene::{SpatialSceneHandle, SpatialSceneSettings},
    },
    tween::Tween,
};
use std::collections::HashMap;
use std::path::Path;

/// How a sample plays once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    Once,
    /// Repeats until stopped.
    Loop,
}

/// Opaque handle to a playing sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(u64);

impl SoundHandle {
    /// Wrap a backend-specific voice id.
    pub fn from_id(id: u64) -> Self {
        Self(id)
    }
}

/// The two calls gameplay needs from an audio engine.
pub trait SoundOutput {
    /// Start the named sample at a position in the scene.
    fn play(&mut self, name: &str, position: Vec3, volume: f32, mode: PlayMode) -> Result<SoundHandle>;

    /// Stop a sound. Stopping a finished or unknown handle does nothing.
    fn stop(&mut self, handle: SoundHandle);
}

struct Voice {
    sound: StaticSoundHandle,
    // Kept alive for as long as the sound plays through it.
    _emitter: EmitterHandle,
}

/// Main audio system managing samples and spatial playback.
pub struct AudioSystem {
    manager: AudioManager,
    spatial_scene: SpatialSceneHandle,
    listener: ListenerHandle,
    sounds: HashMap<String, StaticSoundData>,
    voices: HashMap<u64, Voice>,
    next_handle: u64,
}

impl AudioSystem {
    /// Create a new audio system on the default output device.
    pub fn new() -> Result<Self> {
        let mut manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;

        let mut spatial_scene = manager.add_spatial_scene(SpatialSceneSettings::default())?;

        let listener = spatial_scene.add_listener(
            mint::Vector3 { x: 0.0, y: 0.0, z: 0.0 },
            mint::Quaternion { v: mint::Vector3 { x: 0.0, y: 0.0, z: 0.0 }, s: 1.0 },
            ListenerSettings::default(),
        )?;

        Ok(Self {
            manager,
            spatial_scene,
            listener,
            sounds: HashMap::new(),
            voices: HashMap::new(),
            next_handle: 0,
        })
    }

    /// Load a sample from a file under the given name.
    pub fn load_sound(&mut self, name: &str, path: &Path) -> Result<()> {
        let sound_data = StaticSoundData::from_file(path)?;
        self.sounds.insert(name.to_string(), sound_data);
        log::debug!("Loaded sound '{}' from {:?}", name, path);
        Ok(())
    }

    /// Move the listener (call when the camera moves).
    pub fn update_listener(&mut self, position: Vec3) {
        self.listener.set_position(
            mint::Vector3 { x: position.x, y: position.y, z: position.z },
            Tween::default(),
        );
    }

    /// Forget voices that have finished playing.
    pub fn cleanup(&mut self) {
        self.voices
            .retain(|_, voice| voice.sound.state() != PlaybackState::Stopped);
    }

}

impl SoundOutput for AudioSystem {
    fn play(&mut self, name: &str, position: Vec3, volume: f32, mode: PlayMode) -> Result<SoundHandle> {
        let sound_data = self
            .sounds
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("sound '{}' is not loaded", name))?;

        self.cleanup();

        let emitter = self.spatial_scene.add_emitter(
            mint::Vector3 { x: position.x, y: position.y, z: position.z },
            EmitterSettings::default(),
        )?;
        let mut settings = StaticSoundSettings::new()
            .volume(volume as f64)
            .output_destination(&emitter);
        if mode == PlayMode::Loop {
            settings = settings.loop_region(..);
        }
        let sound = self.manager.play(sound_data.with_settings(settings))?;

        let handle = SoundHandle(self.next_handle);
        self.next_handle += 1;
        self.voices.insert(handle.0, Voice { sound, _emitter: emitter });
        Ok(handle)
    }

    fn stop(&mut self, handle: SoundHandle) {
        if let Some(mut voice) = self.voices.remove(&handle.0) {
            let _ = voice.sound.stop(Tween::default());
        }
    }
}

/// Output used when no audio device could be opened. Hands out handles so
/// gameplay bookkeeping stays identical, but produces no sound.
#[derive(Debug, Default)]
pub struct SilentOutput {
    next_handle: u64,
}

impl SilentOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundOutput for SilentOutput {
    fn play(&mut self, name: &str, _position: Vec3, _volume: f32, mode: PlayMode) -> Result<SoundHandle> {
        log::trace!("(silent) play '{}' {:?}", name, mode);
        let handle = SoundHandle(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn stop(&mut self, handle: SoundHandle) {
        log::trace!("(silent) stop {:?}", handle);
    }
}
