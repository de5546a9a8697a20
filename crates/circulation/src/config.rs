//! Ledger configuration (loan policy + simulated latency).

use core::str::FromStr;
use std::time::Duration as StdDuration;

use chrono::Duration;
use thiserror::Error;

pub const ENV_LOAN_PERIOD_DAYS: &str = "LEDGER_LOAN_PERIOD_DAYS";
pub const ENV_LATE_FEE_CENTS_PER_DAY: &str = "LEDGER_LATE_FEE_CENTS_PER_DAY";
pub const ENV_SIMULATED_LATENCY_MS: &str = "LEDGER_SIMULATED_LATENCY_MS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Longest loan period accepted, in days (about a century).
pub const MAX_LOAN_PERIOD_DAYS: i64 = 36_500;

/// Ledger configuration.
///
/// Fields are only reachable through validated constructors, so the loan
/// period always lies in `1..=MAX_LOAN_PERIOD_DAYS` days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    loan_period: Duration,
    late_fee_cents_per_day: u64,
    simulated_latency: StdDuration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            loan_period: Duration::days(14),
            late_fee_cents_per_day: 50,
            simulated_latency: StdDuration::from_millis(1000),
        }
    }
}

impl LedgerConfig {
    /// Build a config from `LEDGER_*` environment variables, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`LedgerConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(days) = parse_var::<u32, _>(&lookup, ENV_LOAN_PERIOD_DAYS)? {
            config.loan_period = checked_loan_period(
                ENV_LOAN_PERIOD_DAYS,
                days.to_string(),
                i64::from(days),
            )?;
        }
        if let Some(cents) = parse_var::<u64, _>(&lookup, ENV_LATE_FEE_CENTS_PER_DAY)? {
            config.late_fee_cents_per_day = cents;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_SIMULATED_LATENCY_MS)? {
            config.simulated_latency = StdDuration::from_millis(ms);
        }

        Ok(config)
    }

    /// How long a checkout lasts before it is overdue.
    pub fn loan_period(&self) -> Duration {
        self.loan_period
    }

    /// Fee per whole day overdue, in cents.
    pub fn late_fee_cents_per_day(&self) -> u64 {
        self.late_fee_cents_per_day
    }

    /// Artificial delay applied by [`crate::AsyncLedger`] before every operation.
    pub fn simulated_latency(&self) -> StdDuration {
        self.simulated_latency
    }

    /// # Errors
    ///
    /// [`ConfigError::Invalid`] unless `period` is a whole number of days in
    /// `1..=MAX_LOAN_PERIOD_DAYS`.
    pub fn with_loan_period(mut self, period: Duration) -> Result<Self, ConfigError> {
        if period != Duration::days(period.num_days()) {
            return Err(ConfigError::Invalid {
                var: "loan_period",
                value: period.to_string(),
                reason: "loan period must be a whole number of days".to_string(),
            });
        }
        self.loan_period =
            checked_loan_period("loan_period", period.to_string(), period.num_days())?;
        Ok(self)
    }

    pub fn with_late_fee_cents_per_day(mut self, cents: u64) -> Self {
        self.late_fee_cents_per_day = cents;
        self
    }

    pub fn with_simulated_latency(mut self, latency: StdDuration) -> Self {
        self.simulated_latency = latency;
        self
    }
}

fn checked_loan_period(
    var: &'static str,
    value: String,
    days: i64,
) -> Result<Duration, ConfigError> {
    if !(1..=MAX_LOAN_PERIOD_DAYS).contains(&days) {
        return Err(ConfigError::Invalid {
            var,
            value,
            reason: format!("loan period must be between 1 and {MAX_LOAN_PERIOD_DAYS} days"),
        });
    }
    Ok(Duration::days(days))
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_loan_policy() {
        let config = LedgerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.loan_period, Duration::days(14));
        assert_eq!(config.late_fee_cents_per_day, 50);
        assert_eq!(config.simulated_latency, StdDuration::from_secs(1));
    }

    #[test]
    fn env_values_override_defaults() {
        let config = LedgerConfig::from_lookup(lookup(&[
            (ENV_LOAN_PERIOD_DAYS, "21"),
            (ENV_LATE_FEE_CENTS_PER_DAY, " 25 "),
            (ENV_SIMULATED_LATENCY_MS, "0"),
        ]))
        .unwrap();
        assert_eq!(config.loan_period, Duration::days(21));
        assert_eq!(config.late_fee_cents_per_day, 25);
        assert!(config.simulated_latency.is_zero());
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = LedgerConfig::from_lookup(lookup(&[(ENV_LATE_FEE_CENTS_PER_DAY, "fifty")]))
            .unwrap_err();
        match err {
            ConfigError::Invalid { var, value, .. } => {
                assert_eq!(var, ENV_LATE_FEE_CENTS_PER_DAY);
                assert_eq!(value, "fifty");
            }
        }

        let err = LedgerConfig::from_lookup(lookup(&[(ENV_LOAN_PERIOD_DAYS, "0")])).unwrap_err();
        assert!(err.to_string().contains("between 1 and 36500 days"));
    }

    #[test]
    fn oversized_loan_period_is_rejected() {
        let err = LedgerConfig::from_lookup(lookup(&[(ENV_LOAN_PERIOD_DAYS, "4000000000")]))
            .unwrap_err();
        match err {
            ConfigError::Invalid { var, value, .. } => {
                assert_eq!(var, ENV_LOAN_PERIOD_DAYS);
                assert_eq!(value, "4000000000");
            }
        }

        assert!(LedgerConfig::from_lookup(lookup(&[(ENV_LOAN_PERIOD_DAYS, "36501")])).is_err());
        let config =
            LedgerConfig::from_lookup(lookup(&[(ENV_LOAN_PERIOD_DAYS, "36500")])).unwrap();
        assert_eq!(config.loan_period(), Duration::days(MAX_LOAN_PERIOD_DAYS));
    }

    #[test]
    fn with_loan_period_enforces_the_same_bounds() {
        let config = LedgerConfig::default().with_loan_period(Duration::days(7)).unwrap();
        assert_eq!(config.loan_period(), Duration::days(7));

        assert!(LedgerConfig::default().with_loan_period(Duration::zero()).is_err());
        assert!(LedgerConfig::default().with_loan_period(Duration::days(-3)).is_err());
        assert!(LedgerConfig::default().with_loan_period(Duration::days(36_501)).is_err());
        assert!(LedgerConfig::default().with_loan_period(Duration::hours(36)).is_err());
    }
}
