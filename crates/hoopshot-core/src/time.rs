/// Monotonic simulation tick counter.
pub type Tick = u64;

/// Number of whole ticks covering `secs` at `tick_rate` Hz (at least one).
pub fn secs_to_ticks(secs: f32, tick_rate: f32) -> Tick {
    ((secs * tick_rate).round() as Tick).max(1)
}

/// Fixed step length for a given tick rate.
pub fn fixed_dt(tick_rate: f32) -> f32 {
    1.0 / tick_rate
}
