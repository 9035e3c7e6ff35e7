use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// The fixed set of auto-run speed presets, in steps per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    Slow,
    Normal,
    Fast,
}

impl SpeedTier {
    pub fn steps_per_second(self) -> u32 {
        match self {
            SpeedTier::Slow => 10,
            SpeedTier::Normal => 100,
            SpeedTier::Fast => 1000,
        }
    }

    pub fn interval(self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.steps_per_second() as u64)
    }
}

impl Default for SpeedTier {
    fn default() -> Self {
        SpeedTier::Normal
    }
}

/// Wall-clock rate limiter with no catch-up semantics.
///
/// `ready` fires at most once per call and resets the timestamp to `now`, so
/// if several intervals elapse between polls the skipped firings are lost,
/// not queued. Instants are supplied by the caller; the pacer never reads
/// the clock itself.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True if at least one interval elapsed since the last firing (or this
    /// is the first call). Firing resets the timestamp to `now`.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Restarts the interval from `now` without firing.
    pub fn restart(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

/// Decides when a simulation step fires: auto-run pacing at a preset speed
/// tier, with manual single-steps rate-limited by the same interval.
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    auto: bool,
    tier: SpeedTier,
    pacer: Pacer,
}

impl SimulationDriver {
    pub fn new(tier: SpeedTier) -> Self {
        Self {
            auto: false,
            tier,
            pacer: Pacer::new(tier.interval()),
        }
    }

    pub fn auto(&self) -> bool {
        self.auto
    }

    pub fn tier(&self) -> SpeedTier {
        self.tier
    }

    pub fn set_tier(&mut self, tier: SpeedTier) {
        self.tier = tier;
        self.pacer.set_interval(tier.interval());
    }

    /// Toggles auto-run and returns the new state. Enabling restarts the
    /// interval so the first auto step fires a full interval later.
    pub fn toggle_auto(&mut self, now: Instant) -> bool {
        self.auto = !self.auto;
        if self.auto {
            self.pacer.restart(now);
        }
        self.auto
    }

    pub fn stop(&mut self) {
        self.auto = false;
    }

    /// Whether a step may fire now, auto or manual. Firing consumes the
    /// interval.
    pub fn try_step(&mut self, now: Instant) -> bool {
        self.pacer.ready(now)
    }
}
