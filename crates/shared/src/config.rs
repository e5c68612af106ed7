//! Household and runtime configuration management.
//!
//! The household document (people, rent schedule, utilities, sender
//! addresses, payment links) is a YAML file given on the command line. It is
//! deserialized into typed structs and validated fully at load time, so every
//! lookup failure becomes a typed error at the load boundary rather than at
//! first use.
//!
//! Runtime SMTP settings never live in the household file; they come from the
//! environment (`RENTSPLIT__SMTP__*`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Configuration load and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Cannot read config file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid YAML for the expected schema.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// The rent schedule has no entries.
    #[error("Rent schedule is empty")]
    EmptySchedule,

    /// Rent schedule entries are not in ascending effective-date order.
    #[error("Rent schedule is not sorted by effective date: {prev} is followed by {next}")]
    UnsortedSchedule {
        /// Effective date of the earlier entry.
        prev: NaiveDate,
        /// Effective date of the out-of-order entry.
        next: NaiveDate,
    },

    /// A rent period does not name every configured person.
    #[error("Rent period starting {since} has no split for {person}")]
    MissingSplit {
        /// Person missing from the split map.
        person: String,
        /// Effective date of the offending period.
        since: NaiveDate,
    },

    /// A utility table key is not a calendar month.
    #[error("Utility month {month} in year {year} is out of range (expected 1-12)")]
    InvalidMonth {
        /// Year key the month was found under.
        year: i32,
        /// Offending month key.
        month: u32,
    },

    /// A person opted into a payment link with no account handle configured.
    #[error("{person} opted into {provider} links but no {provider} handle is configured")]
    MissingPaymentHandle {
        /// Person with the dangling flag.
        person: String,
        /// Payment provider name.
        provider: &'static str,
    },

    /// Environment-sourced runtime settings failed to load.
    #[error("Environment configuration error: {0}")]
    Environment(#[from] config::ConfigError),
}

/// One household member.
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    /// Delivery address for this person's statement.
    pub email: String,
    /// Optional carbon-copy address (e.g. a partner).
    #[serde(default)]
    pub cc: Option<String>,
    /// Include a PayPal payment link in this person's statement.
    #[serde(default)]
    pub paypal: bool,
    /// Include a Square (Cash App) payment link in this person's statement.
    #[serde(default)]
    pub square: bool,
}

/// One entry in the rent schedule: the per-person split in effect from
/// `since` onward, until superseded by a later entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RentPeriod {
    /// First date this split applies to.
    pub since: NaiveDate,
    /// Rent owed per person while this entry is in effect.
    pub splits: BTreeMap<String, Decimal>,
}

/// Sender addresses for outgoing statements.
#[derive(Debug, Clone, Deserialize)]
pub struct SenderSettings {
    /// From address on every statement.
    pub from: String,
    /// Blind-copy address appended to every recipient list.
    pub bcc: String,
}

/// Payment provider account handles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentLinks {
    /// PayPal.me handle, e.g. `alice` for `paypal.me/alice`.
    #[serde(default)]
    pub paypal: Option<String>,
    /// Cash App cashtag, without the leading `$`.
    #[serde(default)]
    pub square: Option<String>,
}

/// The household configuration document. Loaded once per run, read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct HouseholdConfig {
    /// Household members, keyed by name.
    pub people: BTreeMap<String, Person>,
    /// Rent schedule, ascending by effective date.
    pub rent: Vec<RentPeriod>,
    /// Utility amounts: year -> month -> category -> amount.
    pub utilities: BTreeMap<i32, BTreeMap<u32, BTreeMap<String, Decimal>>>,
    /// Sender addresses.
    pub email: SenderSettings,
    /// Payment provider handles.
    #[serde(default)]
    pub payment_links: PaymentLinks,
}

impl HouseholdConfig {
    /// Loads and validates the household document at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, is not valid YAML
    /// for the expected schema, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Number of entities sharing utility costs: every configured person plus
    /// one implicit unlisted payer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn num_payers(&self) -> u32 {
        self.people.len() as u32 + 1
    }

    /// Validates the document as a whole.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: empty or unsorted rent schedule, a
    /// person missing from a rent split, an out-of-range utility month, or a
    /// payment-link flag without a configured handle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rent.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }

        for pair in self.rent.windows(2) {
            if pair[0].since > pair[1].since {
                return Err(ConfigError::UnsortedSchedule {
                    prev: pair[0].since,
                    next: pair[1].since,
                });
            }
        }

        for period in &self.rent {
            for person in self.people.keys() {
                if !period.splits.contains_key(person) {
                    return Err(ConfigError::MissingSplit {
                        person: person.clone(),
                        since: period.since,
                    });
                }
            }
        }

        for (year, months) in &self.utilities {
            for month in months.keys() {
                if !(1..=12).contains(month) {
                    return Err(ConfigError::InvalidMonth {
                        year: *year,
                        month: *month,
                    });
                }
            }
        }

        for (name, person) in &self.people {
            if person.paypal && self.payment_links.paypal.is_none() {
                return Err(ConfigError::MissingPaymentHandle {
                    person: name.clone(),
                    provider: "paypal",
                });
            }
            if person.square && self.payment_links.square.is_none() {
                return Err(ConfigError::MissingPaymentHandle {
                    person: name.clone(),
                    provider: "square",
                });
            }
        }

        Ok(())
    }
}

/// SMTP transport settings, sourced from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Optional SMTP username. TLS is only negotiated when credentials are set.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional SMTP password.
    #[serde(default)]
    pub password: Option<String>,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
        }
    }
}

/// Environment-sourced runtime settings wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
struct RuntimeConfig {
    #[serde(default)]
    smtp: SmtpConfig,
}

impl SmtpConfig {
    /// Loads SMTP settings from `RENTSPLIT__SMTP__*` environment variables,
    /// falling back to a local relay on port 1025.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment values cannot be deserialized.
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("RENTSPLIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let runtime: RuntimeConfig = config.try_deserialize()?;
        Ok(runtime.smtp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    const FIXTURE: &str = r"
people:
  Alice:
    email: alice@example.com
    cc: partner@example.com
    paypal: true
  Bob:
    email: bob@example.com
rent:
  - since: 2023-01-01
    splits:
      Alice: 1000
      Bob: 1200
  - since: 2023-06-01
    splits:
      Alice: 1050
      Bob: 1250
utilities:
  2023:
    7:
      Electric: 90
      Water: 30
email:
  from: house@example.com
  bcc: archive@example.com
payment_links:
  paypal: alice-house
";

    fn fixture() -> HouseholdConfig {
        serde_yaml::from_str(FIXTURE).unwrap()
    }

    #[test]
    fn test_fixture_parses_and_validates() {
        let config = fixture();
        config.validate().unwrap();

        assert_eq!(config.people.len(), 2);
        assert_eq!(config.people["Alice"].email, "alice@example.com");
        assert_eq!(
            config.people["Alice"].cc.as_deref(),
            Some("partner@example.com")
        );
        assert!(config.people["Alice"].paypal);
        assert!(!config.people["Bob"].paypal);
        assert_eq!(config.rent[1].splits["Bob"], dec!(1250));
        assert_eq!(config.utilities[&2023][&7]["Electric"], dec!(90));
        assert_eq!(config.payment_links.paypal.as_deref(), Some("alice-house"));
    }

    #[test]
    fn test_num_payers_counts_implicit_payer() {
        assert_eq!(fixture().num_payers(), 3);
    }

    #[test]
    fn test_rejects_empty_schedule() {
        let mut config = fixture();
        config.rent.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySchedule)
        ));
    }

    #[test]
    fn test_rejects_unsorted_schedule() {
        let mut config = fixture();
        config.rent.reverse();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnsortedSchedule { .. }));
    }

    #[test]
    fn test_rejects_missing_split() {
        let mut config = fixture();
        config.rent[0].splits.remove("Bob");
        match config.validate().unwrap_err() {
            ConfigError::MissingSplit { person, since } => {
                assert_eq!(person, "Bob");
                assert_eq!(since, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case::zero(0)]
    #[case::thirteen(13)]
    fn test_rejects_out_of_range_month(#[case] month: u32) {
        let mut config = fixture();
        let categories = config.utilities[&2023][&7].clone();
        config
            .utilities
            .get_mut(&2023)
            .unwrap()
            .insert(month, categories);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMonth { year: 2023, .. }));
    }

    #[rstest]
    #[case::paypal("paypal")]
    #[case::square("square")]
    fn test_rejects_flag_without_handle(#[case] provider: &str) {
        let mut config = fixture();
        if provider == "paypal" {
            config.people.get_mut("Alice").unwrap().paypal = false;
            config.people.get_mut("Bob").unwrap().paypal = true;
            config.payment_links.paypal = None;
        } else {
            config.people.get_mut("Bob").unwrap().square = true;
            config.payment_links.square = None;
        }
        let err = config.validate().unwrap_err();
        match err {
            ConfigError::MissingPaymentHandle { person, provider: p } => {
                assert_eq!(person, "Bob");
                assert_eq!(p, provider);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_smtp_defaults() {
        let config = SmtpConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 1025);
        assert!(config.username.is_none());
        assert!(config.password.is_none());
    }
}
