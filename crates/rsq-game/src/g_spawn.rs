// g_spawn.rs -- Classname resolution and world initialization

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::g_local::*;
use crate::game_import::GameImport;

// ============================================================
// Spawn table
// ============================================================

/// Which behavior variant governs a classname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorKind {
    Generic,
    World,
    Player,
}

/// A spawn table entry mapping a classname to its behavior variant.
pub struct SpawnEntry {
    pub name: &'static str,
    pub kind: BehaviorKind,
}

/// HashMap for O(1) spawn lookup by classname -> index into SPAWNS.
/// Built lazily on first access.
static SPAWNS_INDEX: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();

fn spawns_index() -> &'static HashMap<&'static str, usize> {
    SPAWNS_INDEX.get_or_init(|| {
        SPAWNS.iter().enumerate().map(|(i, s)| (s.name, i)).collect()
    })
}

/// Resolve a classname to its behavior variant.
pub fn spawn_kind(classname: &str) -> Option<BehaviorKind> {
    spawns_index().get(classname).map(|&i| SPAWNS[i].kind)
}

/// The master spawn table. Static, built once, never mutated at runtime.
/// Everything except the world and the player gets the generic behavior.
pub static SPAWNS: &[SpawnEntry] = &[
    SpawnEntry { name: "info_intermission", kind: BehaviorKind::Generic },
    SpawnEntry { name: "info_player_start", kind: BehaviorKind::Generic },
    SpawnEntry { name: "info_player_start2", kind: BehaviorKind::Generic },
    SpawnEntry { name: "info_player_deathmatch", kind: BehaviorKind::Generic },
    SpawnEntry { name: "info_player_coop", kind: BehaviorKind::Generic },
    SpawnEntry { name: "info_null", kind: BehaviorKind::Generic },
    SpawnEntry { name: "info_notnull", kind: BehaviorKind::Generic },
    SpawnEntry { name: "info_teleport_destination", kind: BehaviorKind::Generic },

    SpawnEntry { name: "func_button", kind: BehaviorKind::Generic },
    SpawnEntry { name: "func_door", kind: BehaviorKind::Generic },
    SpawnEntry { name: "func_door_secret", kind: BehaviorKind::Generic },
    SpawnEntry { name: "func_wall", kind: BehaviorKind::Generic },
    SpawnEntry { name: "func_illusionary", kind: BehaviorKind::Generic },
    SpawnEntry { name: "func_episodegate", kind: BehaviorKind::Generic },
    SpawnEntry { name: "func_bossgate", kind: BehaviorKind::Generic },
    SpawnEntry { name: "func_plat", kind: BehaviorKind::Generic },
    SpawnEntry { name: "func_train", kind: BehaviorKind::Generic },

    SpawnEntry { name: "trigger_changelevel", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_multiple", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_once", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_relay", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_secret", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_counter", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_teleport", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_setskill", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_onlyregistered", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_hurt", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_push", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_monsterjump", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trigger_jctest", kind: BehaviorKind::Generic },

    SpawnEntry { name: "item_health", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_armor1", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_armor2", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_armorInv", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_shells", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_spikes", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_rockets", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_cells", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_weapon", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_key1", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_key2", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_sigil", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_artifact_invulnerability", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_artifact_envirosuit", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_artifact_invisibility", kind: BehaviorKind::Generic },
    SpawnEntry { name: "item_artifact_super_damage", kind: BehaviorKind::Generic },

    SpawnEntry { name: "weapon_supershotgun", kind: BehaviorKind::Generic },
    SpawnEntry { name: "weapon_nailgun", kind: BehaviorKind::Generic },
    SpawnEntry { name: "weapon_supernailgun", kind: BehaviorKind::Generic },
    SpawnEntry { name: "weapon_grenadelauncher", kind: BehaviorKind::Generic },
    SpawnEntry { name: "weapon_rocketlauncher", kind: BehaviorKind::Generic },
    SpawnEntry { name: "weapon_lightning", kind: BehaviorKind::Generic },

    SpawnEntry { name: "monster_army", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_boss", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_demon1", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_dog", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_enforcer", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_fish", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_hell_knight", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_knight", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_ogre", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_oldone", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_shalrath", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_shambler", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_tarbaby", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_wizard", kind: BehaviorKind::Generic },
    SpawnEntry { name: "monster_zombie", kind: BehaviorKind::Generic },

    SpawnEntry { name: "light", kind: BehaviorKind::Generic },
    SpawnEntry { name: "light_fluoro", kind: BehaviorKind::Generic },
    SpawnEntry { name: "light_fluorospark", kind: BehaviorKind::Generic },
    SpawnEntry { name: "light_globe", kind: BehaviorKind::Generic },
    SpawnEntry { name: "light_torch_small_walltorch", kind: BehaviorKind::Generic },
    SpawnEntry { name: "light_flame_large_yellow", kind: BehaviorKind::Generic },
    SpawnEntry { name: "light_flame_small_yellow", kind: BehaviorKind::Generic },
    SpawnEntry { name: "light_flame_small_white", kind: BehaviorKind::Generic },

    SpawnEntry { name: "ambient_suck_wind", kind: BehaviorKind::Generic },
    SpawnEntry { name: "ambient_drone", kind: BehaviorKind::Generic },
    SpawnEntry { name: "ambient_flouro_buzz", kind: BehaviorKind::Generic },
    SpawnEntry { name: "ambient_drip", kind: BehaviorKind::Generic },
    SpawnEntry { name: "ambient_comp_hum", kind: BehaviorKind::Generic },
    SpawnEntry { name: "ambient_thunder", kind: BehaviorKind::Generic },
    SpawnEntry { name: "ambient_light_buzz", kind: BehaviorKind::Generic },
    SpawnEntry { name: "ambient_swamp1", kind: BehaviorKind::Generic },
    SpawnEntry { name: "ambient_swamp2", kind: BehaviorKind::Generic },

    SpawnEntry { name: "misc_fireball", kind: BehaviorKind::Generic },
    SpawnEntry { name: "misc_explobox", kind: BehaviorKind::Generic },
    SpawnEntry { name: "misc_explobox2", kind: BehaviorKind::Generic },
    SpawnEntry { name: "misc_noisemaker", kind: BehaviorKind::Generic },
    SpawnEntry { name: "misc_teleporttrain", kind: BehaviorKind::Generic },

    SpawnEntry { name: "trap_spikeshooter", kind: BehaviorKind::Generic },
    SpawnEntry { name: "trap_shooter", kind: BehaviorKind::Generic },

    SpawnEntry { name: "air_bubbles", kind: BehaviorKind::Generic },
    SpawnEntry { name: "event_lightning", kind: BehaviorKind::Generic },
    SpawnEntry { name: "noclass", kind: BehaviorKind::Generic },
    SpawnEntry { name: "path_corner", kind: BehaviorKind::Generic },
    SpawnEntry { name: "test_teleport", kind: BehaviorKind::Generic },
    SpawnEntry { name: "test_fodder", kind: BehaviorKind::Generic },
    SpawnEntry { name: "testplayerspawn", kind: BehaviorKind::Generic },
    SpawnEntry { name: "viewthing", kind: BehaviorKind::Generic },

    SpawnEntry { name: "worldspawn", kind: BehaviorKind::World },
    SpawnEntry { name: "player", kind: BehaviorKind::Player },
];

// ============================================================
// SP_worldspawn
// ============================================================

/// Sounds precached once when the world entity spawns.
static WORLD_SOUNDS: &[&str] = &[
    "demon/dland2.wav",
    "items/armor1.wav",
    "items/damage3.wav",
    "items/itembk2.wav",
    "misc/h2ohit1.wav",
    "misc/outwater.wav",
    "misc/power.wav",
    "misc/r_tele1.wav",
    "misc/r_tele2.wav",
    "misc/r_tele3.wav",
    "misc/r_tele4.wav",
    "misc/r_tele5.wav",
    "misc/talk.wav",
    "misc/water1.wav",
    "misc/water2.wav",
    "player/axhit1.wav",
    "player/axhit2.wav",
    "player/death1.wav",
    "player/death2.wav",
    "player/death3.wav",
    "player/death4.wav",
    "player/death5.wav",
    "player/drown1.wav",
    "player/drown2.wav",
    "player/gasp1.wav",
    "player/gasp2.wav",
    "player/gib.wav",
    "player/h2odeath.wav",
    "player/h2ojump.wav",
    "player/inh2o.wav",
    "player/inlava.wav",
    "player/land.wav",
    "player/land2.wav",
    "player/lburn1.wav",
    "player/lburn2.wav",
    "player/pain1.wav",
    "player/pain2.wav",
    "player/pain3.wav",
    "player/pain4.wav",
    "player/pain5.wav",
    "player/pain6.wav",
    "player/plyrjmp8.wav",
    "player/slimbrn2.wav",
    "player/teledth1.wav",
    "player/tornoff2.wav",
    "player/udeath.wav",
    "weapons/ax1.wav",
    "weapons/bounce.wav",
    "weapons/grenade.wav",
    "weapons/guncock.wav",
    "weapons/lhit.wav",
    "weapons/lock4.wav",
    "weapons/lstart.wav",
    "weapons/pkup.wav",
    "weapons/r_exp3.wav",
    "weapons/ric1.wav",
    "weapons/ric2.wav",
    "weapons/ric3.wav",
    "weapons/rocket1i.wav",
    "weapons/sgun1.wav",
    "weapons/shotgn2.wav",
    "weapons/spike2.wav",
    "weapons/tink1.wav",
];

/// Models precached once when the world entity spawns.
static WORLD_MODELS: &[&str] = &[
    "progs/player.mdl",
    "progs/eyes.mdl",
    "progs/h_player.mdl",
    "progs/gib1.mdl",
    "progs/gib2.mdl",
    "progs/gib3.mdl",
    "progs/s_bubble.spr",
    "progs/s_explod.spr",
    "progs/v_axe.mdl",
    "progs/v_shot.mdl",
    "progs/v_nail.mdl",
    "progs/v_rock.mdl",
    "progs/v_shot2.mdl",
    "progs/v_nail2.mdl",
    "progs/v_rock2.mdl",
    "progs/bolt.mdl",
    "progs/bolt2.mdl",
    "progs/bolt3.mdl",
    "progs/lavaball.mdl",
    "progs/missile.mdl",
    "progs/grenade.mdl",
    "progs/spike.mdl",
    "progs/s_spike.mdl",
    "progs/backpack.mdl",
    "progs/zom_gib.mdl",
    "progs/v_light.mdl",
];

/// Only used for the world entity. Issues the bulk precache pass for the
/// fixed sound and model lists. Each world spawn runs its own pass; the
/// engine's asset cache is the layer that dedups.
pub fn sp_worldspawn(gi: &dyn GameImport, _ent: EntityId) {
    for s in WORLD_SOUNDS {
        gi.precache_sound(s);
    }
    for m in WORLD_MODELS {
        gi.precache_model(m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_import::StubGameImport;
    use std::collections::HashSet;

    #[test]
    fn test_spawn_kind_specializations() {
        assert_eq!(spawn_kind("worldspawn"), Some(BehaviorKind::World));
        assert_eq!(spawn_kind("player"), Some(BehaviorKind::Player));
    }

    #[test]
    fn test_spawn_kind_generic() {
        assert_eq!(spawn_kind("monster_dog"), Some(BehaviorKind::Generic));
        assert_eq!(spawn_kind("light_torch_small_walltorch"), Some(BehaviorKind::Generic));
        assert_eq!(spawn_kind("testplayerspawn"), Some(BehaviorKind::Generic));
        assert_eq!(spawn_kind("item_armorInv"), Some(BehaviorKind::Generic));
    }

    #[test]
    fn test_spawn_kind_unknown() {
        assert_eq!(spawn_kind("misc_whatever"), None);
        assert_eq!(spawn_kind(""), None);
        // lookup is case-sensitive, like the engine's classnames
        assert_eq!(spawn_kind("Worldspawn"), None);
    }

    #[test]
    fn test_spawns_table_has_no_duplicates() {
        let mut seen = HashSet::new();
        for entry in SPAWNS {
            assert!(seen.insert(entry.name), "duplicate spawn entry {}", entry.name);
        }
    }

    #[test]
    fn test_worldspawn_precaches_full_lists_in_order() {
        let gi = StubGameImport::new();
        let world = gi.alloc("worldspawn");
        sp_worldspawn(&gi, world);

        let sounds = gi.precached_sounds();
        let models = gi.precached_models();
        assert_eq!(sounds.len(), 63);
        assert_eq!(models.len(), 26);
        assert_eq!(sounds, WORLD_SOUNDS);
        assert_eq!(models, WORLD_MODELS);
        assert_eq!(sounds.first().map(String::as_str), Some("demon/dland2.wav"));
        assert_eq!(models.last().map(String::as_str), Some("progs/v_light.mdl"));
    }

    #[test]
    fn test_second_worldspawn_precaches_again() {
        let gi = StubGameImport::new();
        let world = gi.alloc("worldspawn");
        sp_worldspawn(&gi, world);
        sp_worldspawn(&gi, world);
        assert_eq!(gi.precached_sounds().len(), 2 * 63);
        assert_eq!(gi.precached_models().len(), 2 * 26);
    }
}
