use std::collections::VecDeque;

use crate::game_trait::ArcadeGame;
use crate::time::{Tick, fixed_dt};

/// Events produced by a single runner step.
#[derive(Debug, Clone)]
pub struct TickReport<E> {
    pub tick: Tick,
    pub inputs_applied: usize,
    pub events: Vec<E>,
}

/// Drives an [`ArcadeGame`] at a fixed step.
///
/// Inputs queued between ticks are applied in arrival order immediately
/// before the next `update`. Each `step` advances exactly one tick of
/// `1 / tick_rate` seconds; there is no wall-clock accumulation or catch-up.
pub struct FixedStepRunner<G: ArcadeGame> {
    game: G,
    pending: VecDeque<G::Input>,
    tick: Tick,
    dt: f32,
}

impl<G: ArcadeGame> FixedStepRunner<G> {
    pub fn new(game: G) -> Self {
        let dt = fixed_dt(game.tick_rate());
        tracing::debug!(game = %game.metadata().name, dt, "Fixed-step runner created");
        Self {
            game,
            pending: VecDeque::new(),
            tick: 0,
            dt,
        }
    }

    /// Queue an input for the next tick.
    pub fn push_input(&mut self, input: G::Input) {
        self.pending.push_back(input);
    }

    /// Apply queued inputs then advance the game by one fixed step.
    pub fn step(&mut self) -> TickReport<G::Event> {
        let inputs_applied = self.pending.len();
        for input in self.pending.drain(..) {
            self.game.apply_input(&input);
        }

        let events = self.game.update(self.dt);
        self.tick += 1;
        tracing::trace!(tick = self.tick, inputs_applied, events = events.len(), "Tick");

        TickReport {
            tick: self.tick,
            inputs_applied,
            events,
        }
    }

    /// Step `n` times, returning every event in order.
    pub fn run(&mut self, n: usize) -> Vec<G::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(self.step().events);
        }
        all_events
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Number of inputs waiting for the next tick.
    pub fn pending_inputs(&self) -> usize {
        self.pending.len()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }
}
