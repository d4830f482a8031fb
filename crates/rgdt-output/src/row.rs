//! Plain data row types written by output backends.

use rgdt_fleet::{BotStats, StepEvent};

/// One way traversal by one bot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRow {
    pub tick:       u64,
    pub bot_id:     u32,
    pub from_node:  u64,
    pub to_node:    u64,
    pub way_id:     u64,
    pub cost_hours: f64,
}

impl StepRow {
    pub fn from_event(tick: u64, ev: &StepEvent) -> Self {
        Self {
            tick,
            bot_id:     ev.bot.0,
            from_node:  ev.from.0,
            to_node:    ev.to.0,
            way_id:     ev.way.0,
            cost_hours: ev.cost,
        }
    }
}

/// Counts for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    /// Bots that crossed a way this tick.
    pub moves:     u64,
    /// Packages still undelivered at the end of the tick.
    pub remaining: u64,
}

/// Final statistics for one bot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotSummaryRow {
    pub bot_id:                 u32,
    pub final_node:             u64,
    pub accumulated_cost_hours: f64,
    pub deliveries:             u32,
    pub distance_km:            f64,
}

impl From<&BotStats> for BotSummaryRow {
    fn from(s: &BotStats) -> Self {
        Self {
            bot_id:                 s.bot.0,
            final_node:             s.location.0,
            accumulated_cost_hours: s.accumulated_cost,
            deliveries:             s.deliveries,
            distance_km:            s.distance_km,
        }
    }
}
