use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, SimError};

/// Tunables for seeding and mutating the simulated book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookConfig {
    /// Seed price in cents.
    pub base_price: Decimal,
    /// Levels kept on each side after every update.
    pub fixed_order_count: usize,
    pub tick_interval_ms: u64,
    /// Minimum distance between a level and the opposite best price.
    pub min_spread: Decimal,
    /// Price distance between seeded and replenished levels.
    pub step_size: Decimal,
    pub min_quantity: u32,
    pub quantity_range: u32,
    /// Perturbed quantities never drop below this.
    pub quantity_floor: Decimal,
    pub perturb_probability: f64,
    pub quantity_jitter_pct: u32,
    pub price_jitter: Decimal,
    pub price_move_probability: f64,
    /// Share of a level's quantity taken by one click.
    pub click_fill_ratio: Decimal,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            base_price: dec!(50),
            fixed_order_count: 10,
            tick_interval_ms: 500,
            min_spread: dec!(1),
            step_size: dec!(1),
            min_quantity: 1000,
            quantity_range: 10000,
            quantity_floor: dec!(100),
            perturb_probability: 0.7,
            quantity_jitter_pct: 30,
            price_jitter: dec!(0.30),
            price_move_probability: 0.5,
            click_fill_ratio: dec!(0.3),
        }
    }
}

impl BookConfig {
    /// Reads overrides from `ORDERBOOK_*` variables, keeping defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env_parse::<Decimal>("ORDERBOOK_BASE_PRICE")? {
            config.base_price = v;
        }
        if let Some(v) = env_parse::<usize>("ORDERBOOK_LEVELS")? {
            config.fixed_order_count = v;
        }
        if let Some(v) = env_parse::<u64>("ORDERBOOK_TICK_MS")? {
            config.tick_interval_ms = v;
        }
        if let Some(v) = env_parse::<Decimal>("ORDERBOOK_MIN_SPREAD")? {
            config.min_spread = v;
        }
        if let Some(v) = env_parse::<Decimal>("ORDERBOOK_STEP")? {
            config.step_size = v;
        }

        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fixed_order_count == 0 {
            return Err(SimError::config("fixed_order_count", "must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(SimError::config("tick_interval_ms", "must be positive"));
        }
        if self.min_spread <= Decimal::ZERO {
            return Err(SimError::config("min_spread", "must be positive"));
        }
        if self.step_size <= Decimal::ZERO {
            return Err(SimError::config("step_size", "must be positive"));
        }
        if self.base_price <= Decimal::ZERO {
            return Err(SimError::config("base_price", "must be positive"));
        }
        for (field, value) in [
            ("base_price", self.base_price),
            ("min_spread", self.min_spread),
            ("step_size", self.step_size),
            ("price_jitter", self.price_jitter),
        ] {
            if value.normalize().scale() > 2 {
                return Err(SimError::config(field, "must have at most 2 decimal places"));
            }
        }

        let deepest_bid =
            self.base_price - self.step_size * Decimal::from(self.fixed_order_count - 1);
        if deepest_bid <= Decimal::ZERO {
            return Err(SimError::config(
                "base_price",
                format!(
                    "too low for {} levels of {} (deepest bid would be {})",
                    self.fixed_order_count, self.step_size, deepest_bid
                ),
            ));
        }

        for (field, p) in [
            ("perturb_probability", self.perturb_probability),
            ("price_move_probability", self.price_move_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::config(field, format!("{} is outside [0, 1]", p)));
            }
        }

        if self.quantity_range == 0 {
            return Err(SimError::config("quantity_range", "must be positive"));
        }
        if self.quantity_jitter_pct > 100 {
            return Err(SimError::config("quantity_jitter_pct", "must be at most 100"));
        }
        if self.price_jitter < Decimal::ZERO {
            return Err(SimError::config("price_jitter", "must not be negative"));
        }
        if self.click_fill_ratio <= Decimal::ZERO || self.click_fill_ratio > Decimal::ONE {
            return Err(SimError::config("click_fill_ratio", "must be in (0, 1]"));
        }

        Ok(())
    }
}

fn env_parse<T: FromStr>(var: &'static str) -> Result<Option<T>> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SimError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "ORDERBOOK_BASE_PRICE",
            "ORDERBOOK_LEVELS",
            "ORDERBOOK_TICK_MS",
            "ORDERBOOK_MIN_SPREAD",
            "ORDERBOOK_STEP",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(BookConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_levels() {
        let config = BookConfig {
            fixed_order_count: 0,
            ..BookConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig { field: "fixed_order_count", .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_deepest_bid() {
        let config = BookConfig {
            base_price: dec!(5),
            fixed_order_count: 10,
            ..BookConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig { field: "base_price", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = BookConfig {
            price_move_probability: 1.5,
            ..BookConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig { field: "price_move_probability", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_fill_ratio() {
        let config = BookConfig {
            click_fill_ratio: Decimal::ZERO,
            ..BookConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("ORDERBOOK_BASE_PRICE", "29");
        std::env::set_var("ORDERBOOK_LEVELS", "6");
        std::env::set_var("ORDERBOOK_MIN_SPREAD", "0.01");

        let config = BookConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_price, dec!(29));
        assert_eq!(config.fixed_order_count, 6);
        assert_eq!(config.min_spread, dec!(0.01));
        assert_eq!(config.tick_interval_ms, 500);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_garbage() {
        clear_env();
        std::env::set_var("ORDERBOOK_TICK_MS", "soon");

        let result = BookConfig::from_env();
        clear_env();

        assert_eq!(
            result,
            Err(SimError::InvalidEnv {
                var: "ORDERBOOK_TICK_MS",
                value: "soon".to_string(),
            })
        );
    }
}
