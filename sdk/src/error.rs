//! Error taxonomy for the SDK.

use solana_client::client_error::ClientError;
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

pub type Result<T> = std::result::Result<T, SdkError>;

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to decode {kind} account: {reason}")]
    Decode { kind: &'static str, reason: String },

    #[error("Account not found: {0}")]
    NotFound(Pubkey),

    #[error("RPC transport error: {0}")]
    Transport(Box<ClientError>),

    #[error("Slippage must be a finite, non-negative percentage (got {0})")]
    InvalidSlippage(f64),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to serialize instruction data: {0}")]
    Serialization(#[from] std::io::Error),

    #[error("Instruction builder rejected input: {0}")]
    Program(#[from] ProgramError),
}

impl From<ClientError> for SdkError {
    fn from(e: ClientError) -> Self {
        SdkError::Transport(Box::new(e))
    }
}

impl SdkError {
    pub(crate) fn decode(kind: &'static str, reason: impl Into<String>) -> Self {
        SdkError::Decode {
            kind,
            reason: reason.into(),
        }
    }
}
