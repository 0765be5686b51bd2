// rsq-game — game logic module for a Quake-derived server.
//
// The engine owns the simulation loop, physics, networking and the entity
// store. This crate reacts to engine callbacks and mutates entity state only
// through the GameImport services.

pub mod game_import;
pub mod g_local;
pub mod g_utils;
pub mod g_spawn;
pub mod dispatch;
pub mod p_client;
pub mod g_main;
