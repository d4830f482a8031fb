//! Simulation configuration.

use crate::{CoreError, CoreResult};

/// Default bot cruising speed in km/h.
pub const DEFAULT_BOT_SPEED_KMPH: f64 = 40.0;

/// Default fixed handling time per delivery, in hours (two minutes).
pub const DEFAULT_DELIVERY_TIME_HOURS: f64 = 2.0 / 60.0;

/// Default iteration cap for [`SimConfig::max_ticks`].
pub const DEFAULT_MAX_TICKS: u64 = 1_000_000;

/// Top-level simulation configuration.
///
/// Typically built from [`Default`] and optionally overridden by the
/// `"config"` object of a fleet JSON file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Bot cruising speed (km/h).  Way cost = haversine length / speed.
    pub bot_speed_kmph: f64,

    /// Hours added to a bot's accumulated cost for every delivery.
    pub delivery_time_hours: f64,

    /// Upper bound on ticks before the loop gives up.  Guards against
    /// scenarios that never complete.
    pub max_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bot_speed_kmph:      DEFAULT_BOT_SPEED_KMPH,
            delivery_time_hours: DEFAULT_DELIVERY_TIME_HOURS,
            max_ticks:           DEFAULT_MAX_TICKS,
        }
    }
}

impl SimConfig {
    /// Reject speeds and handling times that would poison cost arithmetic.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.bot_speed_kmph.is_finite() && self.bot_speed_kmph > 0.0) {
            return Err(CoreError::Config(format!(
                "bot_speed_kmph must be a positive number, got {}",
                self.bot_speed_kmph
            )));
        }
        if !(self.delivery_time_hours.is_finite() && self.delivery_time_hours >= 0.0) {
            return Err(CoreError::Config(format!(
                "delivery_time_hours must be non-negative, got {}",
                self.delivery_time_hours
            )));
        }
        if self.max_ticks == 0 {
            return Err(CoreError::Config("max_ticks must be at least 1".into()));
        }
        Ok(())
    }

    /// Distance travelled (km) by a bot, derived from its accumulated cost:
    /// `(accumulated_cost − delivery_time × deliveries) × speed`.
    #[inline]
    pub fn travelled_km(&self, accumulated_cost_hours: f64, deliveries: u32) -> f64 {
        (accumulated_cost_hours - self.delivery_time_hours * deliveries as f64) * self.bot_speed_kmph
    }
}
