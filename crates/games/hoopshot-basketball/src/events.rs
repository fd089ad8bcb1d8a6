use serde::{Deserialize, Serialize};

/// Outcome emitted by the simulation for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShotEvent {
    Bounce,
    Backboard,
    RimHit,
    Missed,
    Score { points: i32 },
    ComboScore { streak: u32, bonus: i32 },
}

/// Sound the presentation layer plays for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Bounce,
    Backboard,
    Rim,
    Swish,
    Combo,
    Miss,
}

impl ShotEvent {
    pub fn sound_cue(&self) -> SoundCue {
        match self {
            ShotEvent::Bounce => SoundCue::Bounce,
            ShotEvent::Backboard => SoundCue::Backboard,
            ShotEvent::RimHit => SoundCue::Rim,
            ShotEvent::Missed => SoundCue::Miss,
            ShotEvent::Score { .. } => SoundCue::Swish,
            ShotEvent::ComboScore { .. } => SoundCue::Combo,
        }
    }

    /// Text for the transient HUD message, if this event shows one.
    pub fn hud_message(&self) -> Option<String> {
        match self {
            ShotEvent::Score { .. } => Some("SHOT MADE!".to_string()),
            ShotEvent::ComboScore { streak, bonus } => {
                Some(format!("COMBO x{streak}! +{bonus} BONUS"))
            },
            ShotEvent::Missed => Some("MISSED SHOT".to_string()),
            ShotEvent::Bounce | ShotEvent::Backboard | ShotEvent::RimHit => None,
        }
    }

    /// Whether this event closes out a flight's result.
    pub fn is_outcome(&self) -> bool {
        matches!(
            self,
            ShotEvent::Missed | ShotEvent::Score { .. } | ShotEvent::ComboScore { .. }
        )
    }
}
