// dispatch.rs — live entity registry and event forwarding
//
// The engine guarantees spawn precedes every other event for a handle, and
// that a despawn notification arrives when the entity goes away. Violations
// surface as UnregisteredHandle and are the engine's to resolve.

use std::collections::HashMap;

use crate::g_local::*;
use crate::g_spawn::{self, BehaviorKind};
use crate::game_import::GameImport;
use crate::p_client;

// ============================================================
// Behaviors
// ============================================================

/// Per-entity logic instance. One variant per specialized classname; every
/// other classname in the spawn table gets `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Generic,
    World,
    Player,
}

impl Behavior {
    /// Construct the behavior for a freshly spawned entity, running the
    /// variant's one-time setup.
    fn construct(kind: BehaviorKind, gi: &dyn GameImport, ent: EntityId) -> GameResult<Behavior> {
        match kind {
            BehaviorKind::Generic => Ok(Behavior::Generic),
            BehaviorKind::World => {
                g_spawn::sp_worldspawn(gi, ent);
                Ok(Behavior::World)
            }
            BehaviorKind::Player => {
                p_client::put_client_in_server(gi, ent)?;
                Ok(Behavior::Player)
            }
        }
    }

    fn touch(&self, _gi: &dyn GameImport, _ent: EntityId, _other: EntityId, _other_behavior: &Behavior) {
        match self {
            Behavior::Generic | Behavior::World | Behavior::Player => {}
        }
    }

    fn think(&self, _gi: &dyn GameImport, _ent: EntityId) {
        match self {
            // the player think slot exists but does nothing
            Behavior::Player => {}
            Behavior::Generic | Behavior::World => {}
        }
    }

    fn blocked(&self, _gi: &dyn GameImport, _ent: EntityId, _other: EntityId, _other_behavior: &Behavior) {
        match self {
            Behavior::Generic | Behavior::World | Behavior::Player => {}
        }
    }
}

// ============================================================
// EntityDispatcher
// ============================================================

/// Maps each live entity to its behavior and forwards engine events to it.
/// Single-threaded; the engine invokes callbacks synchronously in its own
/// order and this registry is touched from nowhere else.
#[derive(Debug, Default)]
pub struct EntityDispatcher {
    live: HashMap<EntityId, Behavior>,
}

impl EntityDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live behaviors.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Behavior registered for an entity, if any.
    pub fn behavior(&self, ent: EntityId) -> Option<Behavior> {
        self.live.get(&ent).copied()
    }

    /// Resolve the entity's classname against the spawn table, construct the
    /// mapped behavior and register it. A spawn for an already registered id
    /// replaces the previous behavior (respawn). A failed construction
    /// registers nothing.
    pub fn spawn(&mut self, gi: &dyn GameImport, ent: EntityId) -> GameResult<()> {
        let classname = gi.classname(ent);
        let kind = match g_spawn::spawn_kind(&classname) {
            Some(kind) => kind,
            None => return Err(GameError::UnknownClass(classname)),
        };
        let behavior = Behavior::construct(kind, gi, ent)?;
        log::debug!("{classname} spawned: {ent}");
        self.live.insert(ent, behavior);
        Ok(())
    }

    /// Forward a touch event to `ent`'s behavior, handing it `other`'s
    /// behavior. The engine fires the symmetric event itself.
    pub fn touch(&self, gi: &dyn GameImport, ent: EntityId, other: EntityId) -> GameResult<()> {
        let behavior = self.lookup(ent)?;
        let other_behavior = self.lookup(other)?;
        behavior.touch(gi, ent, other, other_behavior);
        Ok(())
    }

    /// Forward a scheduled think to `ent`'s behavior.
    pub fn think(&self, gi: &dyn GameImport, ent: EntityId) -> GameResult<()> {
        self.lookup(ent)?.think(gi, ent);
        Ok(())
    }

    /// Forward a movement-blocked event to `ent`'s behavior.
    pub fn blocked(&self, gi: &dyn GameImport, ent: EntityId, other: EntityId) -> GameResult<()> {
        let behavior = self.lookup(ent)?;
        let other_behavior = self.lookup(other)?;
        behavior.blocked(gi, ent, other, other_behavior);
        Ok(())
    }

    /// Evict the registry entry for a despawned entity. Must run
    /// synchronously with the engine's despawn so a recycled handle can
    /// never alias the old behavior.
    pub fn despawn(&mut self, ent: EntityId) -> GameResult<()> {
        match self.live.remove(&ent) {
            Some(_) => Ok(()),
            None => Err(GameError::UnregisteredHandle(ent)),
        }
    }

    fn lookup(&self, ent: EntityId) -> GameResult<&Behavior> {
        self.live.get(&ent).ok_or(GameError::UnregisteredHandle(ent))
    }
}
