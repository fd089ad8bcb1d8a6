use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Core trait that every hoopshot game implements.
///
/// The runner owns the tick cadence and the input queue; the game only
/// handles its own simulation and exposes a serialized snapshot for the
/// presentation layer to read between ticks.
pub trait ArcadeGame {
    /// Discrete player action applied synchronously before a tick.
    type Input;
    /// Outcome emitted by `update` for the presentation layer.
    type Event;

    /// Game metadata for title screens and logs.
    fn metadata(&self) -> GameMetadata;

    /// Simulation tick rate in Hz. The runner derives its fixed `dt` from this.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Apply one player action. Actions that are invalid in the current
    /// state are ignored.
    fn apply_input(&mut self, input: &Self::Input);

    /// Advance the simulation by exactly one fixed step.
    fn update(&mut self, dt: f32) -> Vec<Self::Event>;

    /// Serialize the full simulation state for snapshots and replays.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the simulation state with a previously serialized snapshot.
    fn apply_state(&mut self, state: &[u8]);

    /// Whether the game honours `pause`/`resume`.
    fn supports_pause(&self) -> bool {
        true
    }

    /// Freeze the simulation; `update` becomes a no-op.
    fn pause(&mut self);

    /// Unfreeze the simulation.
    fn resume(&mut self);
}

/// Game metadata for title screens and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub controls: Vec<String>,
    pub estimated_session_duration: Duration,
}

/// Generates the `serialize_state`, `apply_state`, `pause` and `resume`
/// methods shared by every game.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields. Snapshot encoding and logging go through the
/// re-exports in this crate, so callers need no extra dependencies.
#[macro_export]
macro_rules! arcade_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            $crate::rmp_serde::to_vec(&self.state).unwrap_or_default()
        }

        fn apply_state(&mut self, state: &[u8]) {
            match $crate::rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => $crate::tracing::debug!(error = %e, "Dropped malformed state snapshot"),
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }
    };
}
