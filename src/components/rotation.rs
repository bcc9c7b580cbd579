use bevy_ecs::prelude::Component;
use glam::Quat;

/// Orientation of an entity.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Rotation {
    pub quat: Quat,
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation {
            quat: Quat::IDENTITY,
        }
    }
}

impl Rotation {
    /// Rotation around the z axis, in degrees.
    pub fn from_degrees(degrees: f32) -> Self {
        Rotation {
            quat: Quat::from_rotation_z(degrees.to_radians()),
        }
    }
}
