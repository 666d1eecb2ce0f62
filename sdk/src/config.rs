//! SDK configuration.
//!
//! Every option has a named default. `SdkConfig::from_env` overlays
//! environment variables on top of those defaults:
//!
//!   PUMP_PROGRAM_ID        launch program id
//!   PUMP_AMM_PROGRAM_ID    companion AMM program id
//!   PUMP_GLOBAL_CACHE_MS   global config cache lifetime (0 = never expires)
//!   PUMP_CURVE_CACHE_MS    bonding curve cache lifetime (0 = never expires)
//!   PUMP_MISSING_ACCOUNTS  `error` (default) or `none`

use std::time::Duration;

use solana_program::pubkey::Pubkey;

use crate::constants::*;
use crate::error::{Result, SdkError};
use crate::pda::parse_address;

/// What account lookups do when the account does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAccount {
    /// Fail with `SdkError::NotFound`.
    #[default]
    Error,
    /// Return `None`.
    ReturnNone,
}

impl std::str::FromStr for MissingAccount {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(MissingAccount::Error),
            "none" | "null" => Ok(MissingAccount::ReturnNone),
            other => Err(SdkError::Config(format!(
                "unknown missing-account mode: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    pub program_id: Pubkey,
    pub amm_program_id: Pubkey,
    pub global_cache_ttl: Duration,
    pub bonding_curve_cache_ttl: Duration,
    pub missing_accounts: MissingAccount,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            program_id: PUMP_PROGRAM_ID,
            amm_program_id: PUMP_AMM_PROGRAM_ID,
            global_cache_ttl: Duration::from_millis(DEFAULT_GLOBAL_CACHE_TTL_MS),
            bonding_curve_cache_ttl: Duration::from_millis(DEFAULT_BONDING_CURVE_CACHE_TTL_MS),
            missing_accounts: MissingAccount::Error,
        }
    }
}

impl SdkConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("PUMP_PROGRAM_ID") {
            config.program_id = parse_address(&v)?;
        }
        if let Some(v) = lookup("PUMP_AMM_PROGRAM_ID") {
            config.amm_program_id = parse_address(&v)?;
        }
        if let Some(v) = lookup("PUMP_GLOBAL_CACHE_MS") {
            config.global_cache_ttl = parse_millis("PUMP_GLOBAL_CACHE_MS", &v)?;
        }
        if let Some(v) = lookup("PUMP_CURVE_CACHE_MS") {
            config.bonding_curve_cache_ttl = parse_millis("PUMP_CURVE_CACHE_MS", &v)?;
        }
        if let Some(v) = lookup("PUMP_MISSING_ACCOUNTS") {
            config.missing_accounts = v.parse()?;
        }

        Ok(config)
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_amm_program_id(mut self, amm_program_id: Pubkey) -> Self {
        self.amm_program_id = amm_program_id;
        self
    }

    pub fn with_cache_ttls(mut self, global: Duration, bonding_curve: Duration) -> Self {
        self.global_cache_ttl = global;
        self.bonding_curve_cache_ttl = bonding_curve;
        self
    }

    pub fn with_missing_accounts(mut self, mode: MissingAccount) -> Self {
        self.missing_accounts = mode;
        self
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| SdkError::Config(format!("Invalid {}: {}", key, e)))
}
