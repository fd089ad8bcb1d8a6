pub mod game_trait;
pub mod messages;
pub mod runner;
pub mod time;

#[doc(hidden)]
pub use rmp_serde;
#[doc(hidden)]
pub use tracing;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::ArcadeGame;

    /// Run N game ticks with no inputs, returning all accumulated events.
    pub fn run_game_ticks<G: ArcadeGame>(game: &mut G, n: usize, dt: f32) -> Vec<G::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt));
        }
        all_events
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed<G: ArcadeGame>(game: &G, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Generic checks every ArcadeGame implementation must pass. Game
    // crates call them from their own #[cfg(test)] modules.

    /// A freshly constructed game must serialize to non-empty bytes.
    pub fn contract_state_not_empty<G: ArcadeGame>(game: &G) {
        assert!(
            !game.serialize_state().is_empty(),
            "serialize_state() must return non-empty bytes"
        );
    }

    /// apply_input() with a valid action followed by update() must change state.
    pub fn contract_apply_input_changes_state<G: ArcadeGame>(game: &mut G, valid_input: &G::Input) {
        let before = game.serialize_state();
        game.apply_input(valid_input);
        let dt = 1.0 / game.tick_rate();
        game.update(dt);
        assert_game_state_changed(game, &before);
    }

    /// serialize_state → apply_state → serialize_state must be stable.
    pub fn contract_state_roundtrip_preserves<G: ArcadeGame>(game: &mut G) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// Garbage bytes passed to apply_state must leave the state untouched.
    pub fn contract_malformed_state_ignored<G: ArcadeGame>(game: &mut G) {
        let before = game.serialize_state();
        game.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(
            before,
            game.serialize_state(),
            "Malformed snapshot must not alter state"
        );
    }

    /// pause() must freeze state, resume() must unfreeze it.
    pub fn contract_pause_stops_updates<G: ArcadeGame>(game: &mut G) {
        let dt = 1.0 / game.tick_rate();
        game.pause();
        let before = game.serialize_state();
        game.update(dt);
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(dt);
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }
}
