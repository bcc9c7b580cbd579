use bevy_ecs::prelude::Component;

/// Classification tag (player, enemy, projectile, ...).
///
/// The time-stop effect selects the bodies it pins by group name.
#[derive(Component, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(pub String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// True if this group is one of `names`.
    pub fn is_any_of(&self, names: &[String]) -> bool {
        names.iter().any(|n| n == &self.0)
    }
}
