use emberfall_lib::rules::{GameStateSnapshot, PlayerRef};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// Largest disagreement with the authoritative value that is absorbed
    /// silently instead of snapping the display.
    pub resync_tolerance_secs: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            resync_tolerance_secs: 2,
        }
    }
}

/// Locally advancing turn countdown, periodically corrected against the
/// snapshot's authoritative remaining time.
///
/// Trusting every snapshot verbatim makes the timer stutter and rewind
/// under jitter; never resyncing lets it drift or freeze when packets are
/// delayed. So: a turn-owner change hard-resets, and otherwise the local
/// value only snaps to the server's when they disagree beyond a tolerance.
pub struct TurnClock {
    config: ClockConfig,
    local_remaining: u32,
    last_tick: Option<Instant>,
    last_known_owner: Option<PlayerRef>,
}

impl TurnClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            local_remaining: 0,
            last_tick: None,
            last_known_owner: None,
        }
    }

    pub fn on_snapshot(&mut self, snapshot: &GameStateSnapshot, now: Instant) {
        let owner = snapshot.current_turn;
        let authoritative = snapshot.remaining_turn_seconds;

        if self.last_known_owner != Some(owner) {
            // A new turn: the previous countdown is meaningless, reset
            // unconditionally with no smoothing.
            self.local_remaining = authoritative;
            self.last_tick = Some(now);
            self.last_known_owner = Some(owner);
            return;
        }

        let disagreement = self.local_remaining.abs_diff(authoritative);
        if disagreement > self.config.resync_tolerance_secs {
            debug!(
                local = self.local_remaining,
                authoritative, "turn clock resynced"
            );
            self.local_remaining = authoritative;
            self.last_tick = Some(now);
        }
    }

    /// Advances the countdown by the whole seconds elapsed since the last
    /// tick, floored at zero. Never increments; only `on_snapshot` can
    /// raise the value.
    pub fn tick(&mut self, now: Instant) {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return;
        };

        let whole_secs = now.saturating_duration_since(last).as_secs();
        if whole_secs > 0 {
            self.local_remaining = self.local_remaining.saturating_sub(whole_secs as u32);
            // Keep the sub-second remainder for the next tick.
            self.last_tick = Some(last + Duration::from_secs(whole_secs));
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.local_remaining
    }
}
