use serde::{Deserialize, Serialize};

use hoopshot_basketball::Basketball;
use hoopshot_basketball::config::BasketballConfig;
use hoopshot_basketball::court::HoopSide;
use hoopshot_basketball::events::ShotEvent;
use hoopshot_basketball::input::{AimDirection, ShotAction};
use hoopshot_basketball::session::HudSnapshot;
use hoopshot_core::game_trait::ArcadeGame;
use hoopshot_core::runner::FixedStepRunner;
use hoopshot_core::time::Tick;

use crate::error::SimError;

/// Ticks allowed per shot on top of the flight watchdog.
const SHOT_TICK_MARGIN: Tick = 60;
/// Upper bound per shot when the watchdog is disabled.
const UNBOUNDED_SHOT_TICKS: Tick = 60 * 60;

/// One scripted shot: where to stand and how hard to shoot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillShot {
    pub x: f32,
    pub z: f32,
    pub power: f32,
}

/// A list of shots, loadable from TOML as `[[shot]]` tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drill {
    #[serde(rename = "shot", default)]
    pub shots: Vec<DrillShot>,
}

impl Drill {
    pub fn load(path: &str) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SimError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Free throws from both ends plus a pair of wing jumpers.
    pub fn free_throws() -> Self {
        let shot = |x, z, power| DrillShot { x, z, power };
        Self {
            shots: vec![
                shot(0.0, 8.5, 0.6),
                shot(0.0, 8.5, 0.6),
                shot(0.0, -8.5, 0.6),
                shot(3.0, 10.0, 0.5),
                shot(-3.0, -10.0, 0.5),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ShotOutcome {
    Made { points: i32 },
    Missed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub index: usize,
    pub hoop: Option<HoopSide>,
    pub outcome: ShotOutcome,
    pub ticks: Tick,
    pub bounces: u32,
    pub rim_hits: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillSummary {
    pub shots: Vec<ShotResult>,
    pub total_ticks: Tick,
    pub hud: HudSnapshot,
}

impl DrillSummary {
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Play every shot of `drill` through a fixed-step runner.
pub fn run_drill(drill: &Drill, config: BasketballConfig) -> DrillSummary {
    let max_ticks = config
        .max_flight_ticks()
        .map_or(UNBOUNDED_SHOT_TICKS, |t| t + SHOT_TICK_MARGIN);
    let mut runner = FixedStepRunner::new(Basketball::with_config(config));
    tracing::info!(
        shots = drill.shots.len(),
        dt = runner.dt(),
        game = %runner.game().metadata().name,
        "Starting drill"
    );

    let mut results = Vec::with_capacity(drill.shots.len());
    for (index, shot) in drill.shots.iter().enumerate() {
        queue_shot(&mut runner, shot);
        let result = play_shot(&mut runner, index, max_ticks);
        tracing::info!(index, outcome = ?result.outcome, ticks = result.ticks, "Shot finished");
        results.push(result);
    }

    DrillSummary {
        shots: results,
        total_ticks: runner.tick(),
        hud: runner.game().hud(),
    }
}

/// Queue the actions that walk a freshly reset ball to `shot` and fire it.
fn queue_shot(runner: &mut FixedStepRunner<Basketball>, shot: &DrillShot) {
    let cfg = runner.game().config().shot.clone();
    runner.push_input(ShotAction::Reset);

    let steps = |offset: f32, step: f32| (offset / step).round() as i32;
    push_repeated(
        runner,
        steps(shot.x, cfg.aim_step),
        ShotAction::MoveAim(AimDirection::Right),
        ShotAction::MoveAim(AimDirection::Left),
    );
    push_repeated(
        runner,
        steps(shot.z, cfg.aim_step),
        ShotAction::MoveAim(AimDirection::Back),
        ShotAction::MoveAim(AimDirection::Forward),
    );
    push_repeated(
        runner,
        steps(shot.power - cfg.default_power, cfg.power_step),
        ShotAction::PowerUp,
        ShotAction::PowerDown,
    );
    runner.push_input(ShotAction::Shoot);
}

fn push_repeated(
    runner: &mut FixedStepRunner<Basketball>,
    count: i32,
    positive: ShotAction,
    negative: ShotAction,
) {
    let action = if count >= 0 { positive } else { negative };
    for _ in 0..count.unsigned_abs() {
        runner.push_input(action);
    }
}

fn play_shot(runner: &mut FixedStepRunner<Basketball>, index: usize, max_ticks: Tick) -> ShotResult {
    let mut result = ShotResult {
        index,
        hoop: None,
        outcome: ShotOutcome::Missed,
        ticks: 0,
        bounces: 0,
        rim_hits: 0,
    };

    while result.ticks < max_ticks {
        let report = runner.step();
        result.ticks += 1;
        if result.hoop.is_none() {
            result.hoop = runner.game().state().target;
        }
        for event in report.events {
            match event {
                ShotEvent::Bounce => result.bounces += 1,
                ShotEvent::RimHit => result.rim_hits += 1,
                ShotEvent::Score { points } => result.outcome = ShotOutcome::Made { points },
                ShotEvent::ComboScore { bonus, .. } => {
                    let base = runner.game().config().scoring.base_points;
                    result.outcome = ShotOutcome::Made {
                        points: base + bonus,
                    };
                },
                ShotEvent::Missed | ShotEvent::Backboard => {},
            }
        }
        if !runner.game().is_airborne() {
            break;
        }
    }
    result
}
