// g_local.rs — local definitions for the game module

// Re-export the shared engine types so game files can reach them via
// `use crate::g_local::*`.
pub use rsq_common::q_shared::*;

use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

/// Errors surfaced to the engine. Nothing is recovered at this layer; the
/// engine decides whether to drop the event, abort the tick, or end the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Spawn request for a classname with no entry in the spawn table.
    #[error("no spawn function for classname {0:?}")]
    UnknownClass(String),

    /// Touch/think/blocked/despawn referencing an entity that was never
    /// spawned, or was already despawned.
    #[error("no behavior registered for entity {0}")]
    UnregisteredHandle(EntityId),

    /// Player spawn with nothing in the world to stand on.
    #[error("no spawn point: world has no entities")]
    NoSpawnPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::UnknownClass("misc_whatever".to_string()).to_string(),
            "no spawn function for classname \"misc_whatever\""
        );
        assert_eq!(
            GameError::UnregisteredHandle(EntityId::new(3, 1)).to_string(),
            "no behavior registered for entity 3v1"
        );
    }
}
