//! Pump SDK: PDA derivation, account decoding, cached state reads, and
//! instruction builders for the bonding curve launch program and its AMM.
//!
//! Nothing here signs or submits transactions.

pub mod amm;
pub mod cache;
pub mod config;
pub mod constants;
pub mod curve;
pub mod error;
pub mod fee_recipient;
pub mod instructions;
pub mod pda;
pub mod repair;
pub mod rpc;
pub mod sdk;
pub mod state;

pub use config::{MissingAccount, SdkConfig};
pub use error::{Result, SdkError};
pub use rpc::AccountSource;
pub use sdk::{BuyParams, BuyState, CreateParams, PumpSdk, SellParams, SellState};
pub use state::{decode, AccountKind, BondingCurve, Global, Record};
