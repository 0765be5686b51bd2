//! Engine import interface — services the engine provides to the game module.
//!
//! The engine owns every entity and all of its attributes; the game module
//! holds `EntityId` values and goes through this trait for each read, write,
//! or geometry/asset operation. The import is passed by reference into every
//! game operation; there is no global instance.

use parking_lot::Mutex;

use crate::g_local::*;

/// Engine services consumed by the game module.
pub trait GameImport {
    // Diagnostics (engine console)
    fn dprintf(&self, msg: &str);

    // Asset cache. Registration is idempotent engine-side; callers may
    // request the same path any number of times.
    fn precache_sound(&self, path: &str);
    fn precache_model(&self, path: &str);

    // Geometry. These go through the engine rather than plain attribute
    // writes because the engine must relink the entity into its world.
    fn setorigin(&self, ent: EntityId, origin: Vec3);
    fn setsize(&self, ent: EntityId, mins: Vec3, maxs: Vec3);
    fn setmodel(&self, ent: EntityId, model: &str);

    /// Ordered ids of all currently spawned entities.
    fn entities(&self) -> Vec<EntityId>;

    /// Current simulation time in seconds.
    fn time(&self) -> f32;

    // Entity attribute access
    fn classname(&self, ent: EntityId) -> String;
    fn set_classname(&self, ent: EntityId, classname: &str);
    fn origin(&self, ent: EntityId) -> Vec3;
    fn angles(&self, ent: EntityId) -> Vec3;
    fn set_angles(&self, ent: EntityId, angles: Vec3);
    fn set_health(&self, ent: EntityId, health: i32);
    fn set_max_health(&self, ent: EntityId, max_health: i32);
    fn set_solid(&self, ent: EntityId, solid: Solid);
    fn set_movetype(&self, ent: EntityId, movetype: MoveType);
    fn set_flags(&self, ent: EntityId, flags: EntityFlags);
    fn set_deadflag(&self, ent: EntityId, deadflag: i32);
    fn set_velocity(&self, ent: EntityId, velocity: Vec3);
    fn set_view_ofs(&self, ent: EntityId, view_ofs: Vec3);
    fn set_fixangle(&self, ent: EntityId, fixangle: bool);
    fn set_nextthink(&self, ent: EntityId, nextthink: f32);
}

// ============================================================
// StubGameImport
// ============================================================

/// One entity record in the stub's store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Edict {
    pub classname: String,
    pub model: String,
    pub health: i32,
    pub max_health: i32,
    pub solid: Solid,
    pub movetype: MoveType,
    pub flags: EntityFlags,
    pub deadflag: i32,
    pub origin: Vec3,
    pub angles: Vec3,
    pub velocity: Vec3,
    pub view_ofs: Vec3,
    pub mins: Vec3,
    pub maxs: Vec3,
    pub fixangle: bool,
    pub nextthink: f32,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    edict: Option<Edict>,
}

#[derive(Debug, Default)]
struct StubState {
    slots: Vec<Slot>,
    time: f32,
    precached_sounds: Vec<String>,
    precached_models: Vec<String>,
    console: Vec<String>,
}

/// In-memory implementation of `GameImport`.
///
/// Hosts every test in the repository and doubles as a reference for engine
/// integrators. Entity slots are recycled the way the engine recycles
/// edicts: `free` vacates the slot and bumps its generation, so ids held
/// across a free stop resolving.
#[derive(Debug, Default)]
pub struct StubGameImport {
    state: Mutex<StubState>,
}

impl StubGameImport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine-side entity creation. Reuses the first vacant slot, else grows
    /// the store.
    pub fn alloc(&self, classname: &str) -> EntityId {
        let mut state = self.state.lock();
        let edict = Edict {
            classname: classname.to_string(),
            ..Edict::default()
        };
        if let Some(index) = state.slots.iter().position(|s| s.edict.is_none()) {
            state.slots[index].edict = Some(edict);
            return EntityId::new(index as u32, state.slots[index].generation);
        }
        state.slots.push(Slot {
            generation: 0,
            edict: Some(edict),
        });
        EntityId::new(state.slots.len() as u32 - 1, 0)
    }

    /// Engine-side entity removal. Vacates the slot and bumps its
    /// generation; returns false if the id no longer resolves.
    pub fn free(&self, ent: EntityId) -> bool {
        let mut state = self.state.lock();
        match state.slots.get_mut(ent.index as usize) {
            Some(slot) if slot.generation == ent.generation && slot.edict.is_some() => {
                slot.edict = None;
                slot.generation += 1;
                true
            }
            _ => false,
        }
    }

    pub fn set_time(&self, time: f32) {
        self.state.lock().time = time;
    }

    /// Snapshot of an entity record, for assertions.
    pub fn edict(&self, ent: EntityId) -> Option<Edict> {
        let state = self.state.lock();
        state
            .slots
            .get(ent.index as usize)
            .filter(|s| s.generation == ent.generation)
            .and_then(|s| s.edict.clone())
    }

    pub fn precached_sounds(&self) -> Vec<String> {
        self.state.lock().precached_sounds.clone()
    }

    pub fn precached_models(&self) -> Vec<String> {
        self.state.lock().precached_models.clone()
    }

    pub fn console(&self) -> Vec<String> {
        self.state.lock().console.clone()
    }
}

impl StubGameImport {
    fn write<F: FnOnce(&mut Edict)>(&self, ent: EntityId, f: F) {
        let mut state = self.state.lock();
        if let Some(slot) = state.slots.get_mut(ent.index as usize) {
            if slot.generation == ent.generation {
                if let Some(edict) = slot.edict.as_mut() {
                    f(edict);
                }
            }
        }
    }

    fn read<T: Default, F: FnOnce(&Edict) -> T>(&self, ent: EntityId, f: F) -> T {
        let state = self.state.lock();
        state
            .slots
            .get(ent.index as usize)
            .filter(|s| s.generation == ent.generation)
            .and_then(|s| s.edict.as_ref())
            .map(f)
            .unwrap_or_default()
    }
}

impl GameImport for StubGameImport {
    fn dprintf(&self, msg: &str) {
        self.state.lock().console.push(msg.to_string());
    }

    fn precache_sound(&self, path: &str) {
        self.state.lock().precached_sounds.push(path.to_string());
    }

    fn precache_model(&self, path: &str) {
        self.state.lock().precached_models.push(path.to_string());
    }

    fn setorigin(&self, ent: EntityId, origin: Vec3) {
        self.write(ent, |e| e.origin = origin);
    }

    fn setsize(&self, ent: EntityId, mins: Vec3, maxs: Vec3) {
        self.write(ent, |e| {
            e.mins = mins;
            e.maxs = maxs;
        });
    }

    fn setmodel(&self, ent: EntityId, model: &str) {
        self.write(ent, |e| e.model = model.to_string());
    }

    fn entities(&self) -> Vec<EntityId> {
        let state = self.state.lock();
        state
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.edict.is_some())
            .map(|(i, s)| EntityId::new(i as u32, s.generation))
            .collect()
    }

    fn time(&self) -> f32 {
        self.state.lock().time
    }

    fn classname(&self, ent: EntityId) -> String {
        self.read(ent, |e| e.classname.clone())
    }

    fn set_classname(&self, ent: EntityId, classname: &str) {
        self.write(ent, |e| e.classname = classname.to_string());
    }

    fn origin(&self, ent: EntityId) -> Vec3 {
        self.read(ent, |e| e.origin)
    }

    fn angles(&self, ent: EntityId) -> Vec3 {
        self.read(ent, |e| e.angles)
    }

    fn set_angles(&self, ent: EntityId, angles: Vec3) {
        self.write(ent, |e| e.angles = angles);
    }

    fn set_health(&self, ent: EntityId, health: i32) {
        self.write(ent, |e| e.health = health);
    }

    fn set_max_health(&self, ent: EntityId, max_health: i32) {
        self.write(ent, |e| e.max_health = max_health);
    }

    fn set_solid(&self, ent: EntityId, solid: Solid) {
        self.write(ent, |e| e.solid = solid);
    }

    fn set_movetype(&self, ent: EntityId, movetype: MoveType) {
        self.write(ent, |e| e.movetype = movetype);
    }

    fn set_flags(&self, ent: EntityId, flags: EntityFlags) {
        self.write(ent, |e| e.flags = flags);
    }

    fn set_deadflag(&self, ent: EntityId, deadflag: i32) {
        self.write(ent, |e| e.deadflag = deadflag);
    }

    fn set_velocity(&self, ent: EntityId, velocity: Vec3) {
        self.write(ent, |e| e.velocity = velocity);
    }

    fn set_view_ofs(&self, ent: EntityId, view_ofs: Vec3) {
        self.write(ent, |e| e.view_ofs = view_ofs);
    }

    fn set_fixangle(&self, ent: EntityId, fixangle: bool) {
        self.write(ent, |e| e.fixangle = fixangle);
    }

    fn set_nextthink(&self, ent: EntityId, nextthink: f32) {
        self.write(ent, |e| e.nextthink = nextthink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_assigns_ordered_indices() {
        let gi = StubGameImport::new();
        let a = gi.alloc("worldspawn");
        let b = gi.alloc("light");
        assert_eq!(a, EntityId::new(0, 0));
        assert_eq!(b, EntityId::new(1, 0));
        assert_eq!(gi.entities(), vec![a, b]);
    }

    #[test]
    fn test_free_bumps_generation() {
        let gi = StubGameImport::new();
        let a = gi.alloc("light");
        assert!(gi.free(a));
        assert!(!gi.free(a));

        // the slot is recycled under a new generation
        let b = gi.alloc("light_globe");
        assert_eq!(b.index, a.index);
        assert_ne!(b.generation, a.generation);

        // the stale id neither reads nor writes the new occupant
        assert_eq!(gi.classname(a), "");
        gi.set_health(a, 999);
        assert_eq!(gi.edict(b).unwrap().health, 0);
        assert_eq!(gi.classname(b), "light_globe");
    }

    #[test]
    fn test_entities_skips_vacant_slots() {
        let gi = StubGameImport::new();
        let a = gi.alloc("worldspawn");
        let b = gi.alloc("light");
        let c = gi.alloc("func_door");
        gi.free(b);
        assert_eq!(gi.entities(), vec![a, c]);
    }

    #[test]
    fn test_attribute_roundtrip() {
        let gi = StubGameImport::new();
        let e = gi.alloc("player");

        gi.set_health(e, 160);
        gi.setorigin(e, [8.0, 16.0, 24.0]);
        gi.setsize(e, [-16.0, -16.0, -24.0], [16.0, 16.0, 32.0]);
        gi.setmodel(e, "progs/player.mdl");
        gi.set_fixangle(e, true);

        let edict = gi.edict(e).unwrap();
        assert_eq!(edict.health, 160);
        assert_eq!(edict.origin, [8.0, 16.0, 24.0]);
        assert_eq!(edict.mins, [-16.0, -16.0, -24.0]);
        assert_eq!(edict.maxs, [16.0, 16.0, 32.0]);
        assert_eq!(edict.model, "progs/player.mdl");
        assert!(edict.fixangle);
    }

    #[test]
    fn test_precache_records_in_order() {
        let gi = StubGameImport::new();
        gi.precache_sound("misc/talk.wav");
        gi.precache_sound("misc/talk.wav");
        gi.precache_model("progs/player.mdl");
        assert_eq!(gi.precached_sounds(), vec!["misc/talk.wav", "misc/talk.wav"]);
        assert_eq!(gi.precached_models(), vec!["progs/player.mdl"]);
    }

    #[test]
    fn test_time_source() {
        let gi = StubGameImport::new();
        assert_eq!(gi.time(), 0.0);
        gi.set_time(12.5);
        assert_eq!(gi.time(), 12.5);
    }
}
