// p_client.rs -- Player spawning and client lifecycle

use crate::g_local::*;
use crate::g_utils::g_find_classname;
use crate::game_import::GameImport;

const PLAYER_MINS: Vec3 = [-16.0, -16.0, -24.0];
const PLAYER_MAXS: Vec3 = [16.0, 16.0, 32.0];
const PLAYER_VIEW_OFS: Vec3 = [0.0, 0.0, 22.0];
const PLAYER_MODEL: &str = "progs/player.mdl";

const PLAYER_HEALTH: i32 = 160;
const PLAYER_MAX_HEALTH: i32 = 100;

/// Seconds until a freshly spawned player's first scheduled think.
const FIRST_THINK_DELAY: f32 = 3.0;

// ============================================================
// SelectSpawnPoint
// ============================================================

/// Deterministic spawn point search: a test spawn marker beats the standard
/// single player start, which beats whatever the engine enumerates first.
/// None only when the world has no entities at all.
pub fn select_spawn_point(gi: &dyn GameImport) -> Option<EntityId> {
    if let Some(spot) = g_find_classname(gi, "testplayerspawn") {
        return Some(spot);
    }
    if let Some(spot) = g_find_classname(gi, "info_player_start") {
        return Some(spot);
    }
    gi.entities().first().copied()
}

// ============================================================
// PutClientInServer
// ============================================================

/// Set up a freshly spawned player entity: stats, collision, placement at
/// the selected spawn point, hull, model, view.
pub fn put_client_in_server(gi: &dyn GameImport, ent: EntityId) -> GameResult<()> {
    gi.set_health(ent, PLAYER_HEALTH);
    gi.set_max_health(ent, PLAYER_MAX_HEALTH);
    gi.set_solid(ent, Solid::Slidebox);
    gi.set_movetype(ent, MoveType::Walk);
    gi.set_flags(ent, FL_CLIENT);
    gi.set_deadflag(ent, DEAD_NO);

    let spot = select_spawn_point(gi).ok_or(GameError::NoSpawnPoint)?;

    // one unit up so the player starts clear of the floor
    gi.setorigin(ent, vector_add(&gi.origin(spot), &[0.0, 0.0, 1.0]));
    gi.set_angles(ent, vector_copy(&gi.angles(spot)));
    gi.set_fixangle(ent, true);

    gi.setsize(ent, PLAYER_MINS, PLAYER_MAXS);
    gi.setmodel(ent, PLAYER_MODEL);
    gi.set_view_ofs(ent, PLAYER_VIEW_OFS);
    gi.set_velocity(ent, vec3_origin);

    gi.set_nextthink(ent, gi.time() + FIRST_THINK_DELAY);

    Ok(())
}

// ============================================================
// ClientConnect
// ============================================================

pub fn client_connect(gi: &dyn GameImport, ent: EntityId) {
    gi.dprintf(&format!("client {ent} connected\n"));
    log::info!("client {ent} connected");
}
