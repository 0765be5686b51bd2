// g_utils.rs — entity search helpers

use crate::g_local::*;
use crate::game_import::GameImport;

/// First entity in engine enumeration order whose classname matches.
/// Exact, case-sensitive comparison.
pub fn g_find_classname(gi: &dyn GameImport, classname: &str) -> Option<EntityId> {
    gi.entities()
        .into_iter()
        .find(|&ent| gi.classname(ent) == classname)
}
