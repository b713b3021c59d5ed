//! Named scene objects stored in a `hecs` world.
//!
//! Objects carry a [`Name`], a [`Transform`] and a [`MeshRange`]. Gameplay code
//! holds on to the [`Entity`] handles and only ever writes positions and mesh
//! ranges; everything else about an object belongs to the loader and renderer.

use glam::Vec3;
use hecs::{Entity, World};
use thiserror::Error;

use crate::components::{MeshRange, Name};
use crate::transform::Transform;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("no '{0}' object in scene")]
    MissingObject(String),
    #[error("multiple '{0}' objects in scene")]
    DuplicateObject(String),
    #[error("entity {0:?} is not a scene object")]
    NoSuchObject(Entity),
}

/// Flat collection of named objects.
#[derive(Default)]
pub struct Scene {
    world: World,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object that draws nothing until a mesh range is assigned.
    pub fn spawn_object(&mut self, name: &str, transform: Transform) -> Entity {
        self.world.spawn((Name::new(name), transform, MeshRange::EMPTY))
    }

    /// Look up the single object with the given name.
    pub fn find(&self, name: &str) -> Result<Entity, SceneError> {
        let mut found = None;
        for (entity, object_name) in self.world.query::<&Name>().iter() {
            if object_name.as_str() != name {
                continue;
            }
            if found.is_some() {
                return Err(SceneError::DuplicateObject(name.to_string()));
            }
            found = Some(entity);
        }
        found.ok_or_else(|| SceneError::MissingObject(name.to_string()))
    }

    pub fn set_position(&mut self, object: Entity, position: Vec3) -> Result<(), SceneError> {
        let mut transform = self
            .world
            .get::<&mut Transform>(object)
            .map_err(|_| SceneError::NoSuchObject(object))?;
        transform.position = position;
        Ok(())
    }

    pub fn set_mesh_range(&mut self, object: Entity, range: MeshRange) -> Result<(), SceneError> {
        let mut mesh = self
            .world
            .get::<&mut MeshRange>(object)
            .map_err(|_| SceneError::NoSuchObject(object))?;
        *mesh = range;
        Ok(())
    }

    pub fn position(&self, object: Entity) -> Option<Vec3> {
        self.world.get::<&Transform>(object).ok().map(|t| t.position)
    }

    pub fn mesh_range(&self, object: Entity) -> Option<MeshRange> {
        self.world.get::<&MeshRange>(object).ok().map(|m| *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_name() {
        let mut scene = Scene::new();
        let camera = scene.spawn_object("Camera", Transform::from_position(Vec3::new(0.0, 0.0, 20.0)));
        scene.spawn_object("Letter0", Transform::default());
        assert_eq!(scene.find("Camera"), Ok(camera));
        assert_eq!(scene.position(camera), Some(Vec3::new(0.0, 0.0, 20.0)));
    }

    #[test]
    fn find_reports_missing_and_duplicates() {
        let mut scene = Scene::new();
        scene.spawn_object("Camera", Transform::default());
        scene.spawn_object("Camera", Transform::default());
        assert_eq!(scene.find("Camera"), Err(SceneError::DuplicateObject("Camera".into())));
        assert_eq!(scene.find("Lamp"), Err(SceneError::MissingObject("Lamp".into())));
    }

    #[test]
    fn writes_position_and_mesh_range() {
        let mut scene = Scene::new();
        let letter = scene.spawn_object("Letter0", Transform::default());
        assert_eq!(scene.mesh_range(letter), Some(MeshRange::EMPTY));

        scene.set_position(letter, Vec3::new(1.0, -2.0, 0.0)).unwrap();
        scene.set_mesh_range(letter, MeshRange::new(36, 12)).unwrap();

        assert_eq!(scene.position(letter), Some(Vec3::new(1.0, -2.0, 0.0)));
        assert_eq!(scene.mesh_range(letter), Some(MeshRange::new(36, 12)));
    }

    #[test]
    fn despawned_object_is_rejected() {
        let mut other = World::new();
        let stray = other.spawn((1u8,));
        let mut scene = Scene::new();
        assert_eq!(scene.set_position(stray, Vec3::ZERO), Err(SceneError::NoSuchObject(stray)));
    }
}
