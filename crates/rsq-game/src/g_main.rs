// g_main.rs — callback surface exposed to the engine

use crate::dispatch::EntityDispatcher;
use crate::g_local::*;
use crate::game_import::GameImport;
use crate::p_client;

// ============================================================
// Events
// ============================================================

/// One engine callback with its payload. `name` mirrors the identifier the
/// engine dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    EntitySpawn(EntityId),
    EntityTouch(EntityId, EntityId),
    EntityThink(EntityId),
    EntityBlocked(EntityId, EntityId),
    EntityDespawn(EntityId),
    StartFrame,
    PlayerPreThink(EntityId),
    PlayerPostThink(EntityId),
    ClientConnect(EntityId),
    ClientKill(EntityId),
    PutClientInServer(EntityId),
    SetNewParms,
    SetChangeParms(EntityId),
}

impl Event {
    /// The engine-side identifier for this callback.
    pub fn name(&self) -> &'static str {
        match self {
            Event::EntitySpawn(_) => "entityspawn",
            Event::EntityTouch(_, _) => "entitytouch",
            Event::EntityThink(_) => "entitythink",
            Event::EntityBlocked(_, _) => "entityblocked",
            Event::EntityDespawn(_) => "entitydespawn",
            Event::StartFrame => "startframe",
            Event::PlayerPreThink(_) => "playerprethink",
            Event::PlayerPostThink(_) => "playerpostthink",
            Event::ClientConnect(_) => "clientconnect",
            Event::ClientKill(_) => "clientkill",
            Event::PutClientInServer(_) => "putclientinserver",
            Event::SetNewParms => "setnewparms",
            Event::SetChangeParms(_) => "setchangeparms",
        }
    }
}

// ============================================================
// Game
// ============================================================

/// Game-side state for one session. The engine constructs this once at
/// session start and passes it, together with its `GameImport`, into every
/// callback. Handlers return `Ok(true)` when the event was handled and the
/// engine's default behavior should be suppressed.
#[derive(Debug, Default)]
pub struct Game {
    dispatch: EntityDispatcher,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatcher(&self) -> &EntityDispatcher {
        &self.dispatch
    }

    /// Route one engine callback to its handler.
    pub fn handle(&mut self, gi: &dyn GameImport, event: Event) -> GameResult<bool> {
        match event {
            Event::EntitySpawn(ent) => self.entity_spawn(gi, ent),
            Event::EntityTouch(ent, other) => self.entity_touch(gi, ent, other),
            Event::EntityThink(ent) => self.entity_think(gi, ent),
            Event::EntityBlocked(ent, other) => self.entity_blocked(gi, ent, other),
            Event::EntityDespawn(ent) => self.entity_despawn(ent),
            Event::StartFrame => self.start_frame(),
            Event::PlayerPreThink(ent) => self.player_pre_think(ent),
            Event::PlayerPostThink(ent) => self.player_post_think(ent),
            Event::ClientConnect(ent) => self.client_connect(gi, ent),
            Event::ClientKill(ent) => self.client_kill(ent),
            Event::PutClientInServer(ent) => self.put_client_in_server(gi, ent),
            Event::SetNewParms => self.set_new_parms(),
            Event::SetChangeParms(ent) => self.set_change_parms(ent),
        }
    }

    pub fn entity_spawn(&mut self, gi: &dyn GameImport, ent: EntityId) -> GameResult<bool> {
        self.dispatch.spawn(gi, ent)?;
        Ok(true)
    }

    pub fn entity_touch(&mut self, gi: &dyn GameImport, ent: EntityId, other: EntityId) -> GameResult<bool> {
        self.dispatch.touch(gi, ent, other)?;
        Ok(true)
    }

    pub fn entity_think(&mut self, gi: &dyn GameImport, ent: EntityId) -> GameResult<bool> {
        self.dispatch.think(gi, ent)?;
        Ok(true)
    }

    pub fn entity_blocked(&mut self, gi: &dyn GameImport, ent: EntityId, other: EntityId) -> GameResult<bool> {
        self.dispatch.blocked(gi, ent, other)?;
        Ok(true)
    }

    /// Engine notification that an entity went away. Evicts the behavior
    /// synchronously; the handle may be recycled right after this returns.
    pub fn entity_despawn(&mut self, ent: EntityId) -> GameResult<bool> {
        self.dispatch.despawn(ent)?;
        Ok(true)
    }

    pub fn start_frame(&mut self) -> GameResult<bool> {
        Ok(true)
    }

    pub fn player_pre_think(&mut self, _ent: EntityId) -> GameResult<bool> {
        Ok(true)
    }

    pub fn player_post_think(&mut self, _ent: EntityId) -> GameResult<bool> {
        Ok(true)
    }

    pub fn client_connect(&mut self, gi: &dyn GameImport, ent: EntityId) -> GameResult<bool> {
        p_client::client_connect(gi, ent);
        Ok(true)
    }

    pub fn client_kill(&mut self, _ent: EntityId) -> GameResult<bool> {
        Ok(true)
    }

    /// A connected client is entering the game. The entity the engine hands
    /// over becomes a player regardless of what its classname said before.
    pub fn put_client_in_server(&mut self, gi: &dyn GameImport, ent: EntityId) -> GameResult<bool> {
        gi.set_classname(ent, "player");
        self.dispatch.spawn(gi, ent)?;
        Ok(true)
    }

    // Level-transition parameter hooks. Parameter persistence is engine
    // owned; this layer acknowledges the events and keeps nothing.

    pub fn set_new_parms(&mut self) -> GameResult<bool> {
        Ok(true)
    }

    pub fn set_change_parms(&mut self, _ent: EntityId) -> GameResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Behavior;
    use crate::game_import::StubGameImport;

    fn world_and_game() -> (StubGameImport, Game, EntityId) {
        let gi = StubGameImport::new();
        let mut game = Game::new();
        let world = gi.alloc("worldspawn");
        game.handle(&gi, Event::EntitySpawn(world)).unwrap();
        (gi, game, world)
    }

    #[test]
    fn test_event_names_match_engine_identifiers() {
        let e = EntityId::new(1, 0);
        let cases = [
            (Event::EntitySpawn(e), "entityspawn"),
            (Event::EntityTouch(e, e), "entitytouch"),
            (Event::EntityThink(e), "entitythink"),
            (Event::EntityBlocked(e, e), "entityblocked"),
            (Event::EntityDespawn(e), "entitydespawn"),
            (Event::StartFrame, "startframe"),
            (Event::PlayerPreThink(e), "playerprethink"),
            (Event::PlayerPostThink(e), "playerpostthink"),
            (Event::ClientConnect(e), "clientconnect"),
            (Event::ClientKill(e), "clientkill"),
            (Event::PutClientInServer(e), "putclientinserver"),
            (Event::SetNewParms, "setnewparms"),
            (Event::SetChangeParms(e), "setchangeparms"),
        ];
        for (event, name) in cases {
            assert_eq!(event.name(), name);
        }
    }

    #[test]
    fn test_spawn_routes_to_dispatcher() {
        let (gi, game, world) = world_and_game();
        assert_eq!(game.dispatcher().behavior(world), Some(Behavior::World));
        assert_eq!(gi.precached_sounds().len(), 63);
    }

    #[test]
    fn test_hook_events_report_handled() {
        let (gi, mut game, world) = world_and_game();
        for event in [
            Event::StartFrame,
            Event::PlayerPreThink(world),
            Event::PlayerPostThink(world),
            Event::ClientKill(world),
            Event::SetNewParms,
            Event::SetChangeParms(world),
        ] {
            assert_eq!(game.handle(&gi, event), Ok(true));
        }
    }

    #[test]
    fn test_client_connect_prints() {
        let (gi, mut game, _world) = world_and_game();
        let client = gi.alloc("player");
        assert_eq!(game.handle(&gi, Event::ClientConnect(client)), Ok(true));
        assert_eq!(gi.console().len(), 1);
    }

    #[test]
    fn test_put_client_in_server_rewrites_classname() {
        let (gi, mut game, _world) = world_and_game();

        // the engine hands over a blank client edict
        let client = gi.alloc("noclass");
        assert_eq!(game.handle(&gi, Event::PutClientInServer(client)), Ok(true));

        assert_eq!(gi.classname(client), "player");
        assert_eq!(game.dispatcher().behavior(client), Some(Behavior::Player));
        assert_eq!(gi.edict(client).unwrap().health, 160);
    }

    #[test]
    fn test_error_propagates_through_handle() {
        let (gi, mut game, world) = world_and_game();
        let stranger = gi.alloc("monster_dog");

        assert_eq!(
            game.handle(&gi, Event::EntityTouch(stranger, world)),
            Err(GameError::UnregisteredHandle(stranger))
        );
    }

    // ============================================================
    // one session, end to end
    // ============================================================

    #[test]
    fn test_session_lifecycle() {
        let gi = StubGameImport::new();
        let mut game = Game::new();

        // level load: world, a spawn marker, some scenery
        let world = gi.alloc("worldspawn");
        let start = gi.alloc("info_player_start");
        gi.setorigin(start, [0.0, 0.0, 64.0]);
        let door = gi.alloc("func_door");
        for ent in [world, start, door] {
            assert_eq!(game.handle(&gi, Event::EntitySpawn(ent)), Ok(true));
        }
        assert_eq!(game.dispatcher().live_count(), 3);

        // a client joins
        let client = gi.alloc("noclass");
        game.handle(&gi, Event::ClientConnect(client)).unwrap();
        game.handle(&gi, Event::PutClientInServer(client)).unwrap();
        assert_eq!(gi.edict(client).unwrap().origin, [0.0, 0.0, 65.0]);

        // a few ticks
        for _ in 0..3 {
            game.handle(&gi, Event::StartFrame).unwrap();
            game.handle(&gi, Event::PlayerPreThink(client)).unwrap();
            game.handle(&gi, Event::EntityThink(door)).unwrap();
            game.handle(&gi, Event::EntityTouch(client, door)).unwrap();
            game.handle(&gi, Event::PlayerPostThink(client)).unwrap();
        }

        // the door is removed; its handle stops resolving
        game.handle(&gi, Event::EntityDespawn(door)).unwrap();
        gi.free(door);
        assert_eq!(
            game.handle(&gi, Event::EntityThink(door)),
            Err(GameError::UnregisteredHandle(door))
        );
        assert_eq!(game.dispatcher().live_count(), 3);
    }
}
