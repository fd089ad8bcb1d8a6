pub mod collision;
pub mod config;
pub mod court;
pub mod events;
pub mod input;
pub mod launcher;
pub mod physics;
pub mod scoring;
pub mod session;

use std::time::Duration;

use hoopshot_core::arcade_game_boilerplate;
use hoopshot_core::game_trait::{ArcadeGame, GameMetadata};

use config::BasketballConfig;
use events::ShotEvent;
use input::ShotAction;
use session::{HudSnapshot, Session};

/// Single-ball arcade shooting game, implementing `ArcadeGame`.
pub struct Basketball {
    config: BasketballConfig,
    state: Session,
    paused: bool,
}

impl Basketball {
    /// Build a game from `BasketballConfig::load()`.
    pub fn new() -> Self {
        Self::with_config(BasketballConfig::load())
    }

    pub fn with_config(config: BasketballConfig) -> Self {
        Self {
            state: Session::new(&config),
            config,
            paused: false,
        }
    }

    pub fn config(&self) -> &BasketballConfig {
        &self.config
    }

    /// Accessor for the current session state.
    pub fn state(&self) -> &Session {
        &self.state
    }

    pub fn hud(&self) -> HudSnapshot {
        self.state.hud()
    }

    pub fn is_airborne(&self) -> bool {
        self.state.is_airborne()
    }
}

impl Default for Basketball {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeGame for Basketball {
    type Input = ShotAction;
    type Event = ShotEvent;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Hoopshot".to_string(),
            description: "Aim, set your power, and shoot. Consecutive makes build a combo bonus."
                .to_string(),
            controls: vec![
                "Arrows: move ball".to_string(),
                "W/S: power up/down".to_string(),
                "Space: shoot".to_string(),
                "R: reset".to_string(),
                "O: toggle orbit camera".to_string(),
                "1/2/3: camera presets".to_string(),
            ],
            estimated_session_duration: Duration::from_secs(300),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    fn apply_input(&mut self, input: &ShotAction) {
        self.state.apply_action(input, &self.config);
    }

    fn update(&mut self, dt: f32) -> Vec<ShotEvent> {
        if self.paused {
            return Vec::new();
        }
        self.state.step(dt, &self.config)
    }

    arcade_game_boilerplate!(state_type: Session);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopshot_core::test_helpers::{
        contract_apply_input_changes_state, contract_malformed_state_ignored,
        contract_pause_stops_updates, contract_state_not_empty, contract_state_roundtrip_preserves,
        run_game_ticks,
    };
    use crate::input::AimDirection;

    fn game() -> Basketball {
        Basketball::with_config(BasketballConfig::default())
    }

    #[test]
    fn contract_state_serializes() {
        contract_state_not_empty(&game());
    }

    #[test]
    fn contract_shoot_changes_state() {
        let mut g = game();
        contract_apply_input_changes_state(&mut g, &ShotAction::Shoot);
        assert!(g.is_airborne());
    }

    #[test]
    fn contract_roundtrip_mid_flight() {
        let mut g = game();
        g.apply_input(&ShotAction::Shoot);
        run_game_ticks(&mut g, 5, 1.0 / 60.0);
        contract_state_roundtrip_preserves(&mut g);
    }

    #[test]
    fn contract_malformed_snapshot() {
        contract_malformed_state_ignored(&mut game());
    }

    #[test]
    fn contract_pause() {
        contract_pause_stops_updates(&mut game());
    }

    #[test]
    fn snapshot_restores_flight() {
        let mut g = game();
        g.apply_input(&ShotAction::MoveAim(AimDirection::Back));
        g.apply_input(&ShotAction::Shoot);
        run_game_ticks(&mut g, 10, 1.0 / 60.0);
        let snapshot = g.serialize_state();

        let mut restored = game();
        restored.apply_state(&snapshot);

        assert_eq!(restored.state(), g.state());
        assert!(restored.is_airborne());
    }

    #[test]
    fn tick_rate_from_config() {
        let g = Basketball::with_config(BasketballConfig {
            tick_rate_hz: 120.0,
            ..BasketballConfig::default()
        });
        assert_eq!(g.tick_rate(), 120.0);
    }

    #[test]
    fn shot_runs_to_completion_under_runner() {
        use hoopshot_core::runner::FixedStepRunner;

        let mut runner = FixedStepRunner::new(game());
        runner.push_input(ShotAction::PowerUp);
        runner.push_input(ShotAction::Shoot);

        let mut events = Vec::new();
        for _ in 0..1000 {
            events.extend(runner.step().events);
            if !runner.game().is_airborne() {
                break;
            }
        }

        assert!(!runner.game().is_airborne());
        assert_eq!(runner.game().hud().attempts, 1);
        assert!((runner.game().hud().power_pct - 55.0).abs() < 1e-3);
        assert_eq!(events.iter().filter(|e| e.is_outcome()).count(), 1);
    }
}
