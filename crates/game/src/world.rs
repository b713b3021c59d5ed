//! Scene handles the letter stage works with.
//!
//! The stage never owns the scene or the audio engine; it borrows a [`World`]
//! built once at startup. Building the world is where a broken scene is
//! caught: every required object must exist exactly once.

use audio::SoundOutput;
use engine_core::{Entity, MeshRange, Scene, SceneError, Transform, Vec3};
use std::collections::HashMap;
use thiserror::Error;

/// Number of letter objects, and so of display slots.
pub const SLOT_COUNT: usize = 5;

/// Where the camera sits in the default stage scene.
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 15.0);

/// Vertex count of one glyph in the bundled glow font buffer.
pub const GLYPH_VERTICES: u32 = 36;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("no glyph mesh for '{0}'")]
    MissingGlyph(char),
}

/// Mesh range of each letter glyph in the shared mesh buffer.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    meshes: HashMap<char, MeshRange>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Glyphs `A..=Z` packed back to back, `vertices` each.
    pub fn contiguous(vertices: u32) -> Self {
        let mut table = Self::new();
        for (i, letter) in ('A'..='Z').enumerate() {
            table.insert(letter, MeshRange::new(i as u32 * vertices, vertices));
        }
        table
    }

    pub fn insert(&mut self, letter: char, range: MeshRange) {
        self.meshes.insert(letter, range);
    }

    pub fn get(&self, letter: char) -> Option<MeshRange> {
        self.meshes.get(&letter).copied()
    }

    /// First letter of the alphabet without a glyph, if any.
    fn first_missing(&self) -> Option<char> {
        ('A'..='Z').find(|c| !self.meshes.contains_key(c))
    }
}

/// Everything the stage writes to: letter objects, camera, audio.
pub struct World {
    pub scene: Scene,
    pub audio: Box<dyn SoundOutput>,
    pub camera: Entity,
    pub letters: [Entity; SLOT_COUNT],
    pub glyphs: GlyphTable,
}

impl World {
    /// Resolve the "Camera" and "Letter0".."Letter4" objects in `scene`.
    pub fn new(scene: Scene, audio: Box<dyn SoundOutput>, glyphs: GlyphTable) -> Result<Self, WorldError> {
        let camera = scene.find("Camera")?;
        let mut letters = [camera; SLOT_COUNT];
        for (slot, letter) in letters.iter_mut().enumerate() {
            *letter = scene.find(&letter_object_name(slot))?;
        }
        if let Some(letter) = glyphs.first_missing() {
            return Err(WorldError::MissingGlyph(letter));
        }
        Ok(Self {
            scene,
            audio,
            camera,
            letters,
            glyphs,
        })
    }

    /// The scene the game ships with: a camera and five letter objects
    /// waiting at the camera until shown.
    pub fn stage_scene(camera_position: Vec3) -> Scene {
        let mut scene = Scene::new();
        scene.spawn_object("Camera", Transform::from_position(camera_position));
        for slot in 0..SLOT_COUNT {
            scene.spawn_object(&letter_object_name(slot), Transform::from_position(camera_position));
        }
        scene
    }

    pub fn camera_position(&self) -> Vec3 {
        self.scene.position(self.camera).unwrap_or(Vec3::ZERO)
    }
}

fn letter_object_name(slot: usize) -> String {
    format!("Letter{}", slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use audio::SilentOutput;

    #[test]
    fn resolves_stage_scene() {
        let scene = World::stage_scene(CAMERA_POSITION);
        let world = World::new(scene, Box::new(SilentOutput::new()), GlyphTable::contiguous(GLYPH_VERTICES)).unwrap();
        assert_eq!(world.camera_position(), CAMERA_POSITION);
        let letters: std::collections::HashSet<Entity> = world.letters.iter().copied().collect();
        assert_eq!(letters.len(), SLOT_COUNT);
        assert!(!letters.contains(&world.camera));
    }

    #[test]
    fn missing_letter_object_is_fatal() {
        let mut scene = Scene::new();
        scene.spawn_object("Camera", Transform::default());
        for slot in 0..SLOT_COUNT - 1 {
            scene.spawn_object(&letter_object_name(slot), Transform::default());
        }
        let err = World::new(scene, Box::new(SilentOutput::new()), GlyphTable::contiguous(GLYPH_VERTICES))
            .err()
            .unwrap();
        assert!(matches!(err, WorldError::Scene(SceneError::MissingObject(ref name)) if name == "Letter4"));
    }

    #[test]
    fn duplicate_camera_is_fatal() {
        let mut scene = World::stage_scene(CAMERA_POSITION);
        scene.spawn_object("Camera", Transform::default());
        let err = World::new(scene, Box::new(SilentOutput::new()), GlyphTable::contiguous(GLYPH_VERTICES))
            .err()
            .unwrap();
        assert!(matches!(err, WorldError::Scene(SceneError::DuplicateObject(_))));
    }

    #[test]
    fn glyph_gap_is_fatal() {
        let mut glyphs = GlyphTable::new();
        for letter in 'A'..='F' {
            glyphs.insert(letter, MeshRange::new(0, 3));
        }
        let err = World::new(World::stage_scene(CAMERA_POSITION), Box::new(SilentOutput::new()), glyphs)
            .err()
            .unwrap();
        assert!(matches!(err, WorldError::MissingGlyph('G')));
    }

    #[test]
    fn contiguous_glyphs_are_packed() {
        let glyphs = GlyphTable::contiguous(10);
        assert_eq!(glyphs.get('A'), Some(MeshRange::new(0, 10)));
        assert_eq!(glyphs.get('C'), Some(MeshRange::new(20, 10)));
        assert_eq!(glyphs.get('a'), None);
    }
}
