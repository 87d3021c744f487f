//! Host configuration objects mutated by plugins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::TraderId;

/// Restock interval bounds in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshInterval {
    pub min: u32,
    pub max: u32,
}

impl RefreshInterval {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Trader-level host configuration.
///
/// The host reads a trader's restock interval from here when scheduling
/// assort refreshes; a trader without an entry falls back to host defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TraderConfig {
    update_intervals: HashMap<TraderId, RefreshInterval>,
}

impl TraderConfig {
    /// Sets the restock interval for a trader, replacing any existing entry.
    pub fn set_update_interval(&mut self, trader: TraderId, interval: RefreshInterval) {
        self.update_intervals.insert(trader, interval);
    }

    pub fn update_interval(&self, trader: &TraderId) -> Option<RefreshInterval> {
        self.update_intervals.get(trader).copied()
    }
}

/// Flea-market (ragfair) host configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RagfairConfig {
    traders: HashMap<TraderId, bool>,
}

impl RagfairConfig {
    /// Marks whether a trader's offers may be listed on the flea market.
    pub fn set_trader_eligible(&mut self, trader: TraderId, eligible: bool) {
        self.traders.insert(trader, eligible);
    }

    pub fn is_trader_eligible(&self, trader: &TraderId) -> bool {
        self.traders.get(trader).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_trader_is_not_flea_eligible() {
        let config = RagfairConfig::default();
        assert!(!config.is_trader_eligible(&TraderId::new("nobody")));
    }

    #[test]
    fn update_interval_round_trips() {
        let mut config = TraderConfig::default();
        let trader = TraderId::new("trader");
        config.set_update_interval(trader.clone(), RefreshInterval::new(1800, 3600));
        assert_eq!(
            config.update_interval(&trader),
            Some(RefreshInterval::new(1800, 3600))
        );
    }
}
