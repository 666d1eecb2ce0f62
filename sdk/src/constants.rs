//! Program IDs, well-known accounts, PDA seeds, and account sizes.

use solana_program::pubkey::Pubkey;

// ── Program IDs ─────────────────────────────────────────────────────────────

/// Bonding curve launch program.
pub const PUMP_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");

/// Companion AMM program that curves migrate into.
pub const PUMP_AMM_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA");

/// Metaplex token metadata program.
pub const MPL_TOKEN_METADATA_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// SPL Token-2022 program, owner of pool LP mints.
pub const TOKEN_2022_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

// ── PDA Seeds ───────────────────────────────────────────────────────────────

// Launch program
pub const GLOBAL_SEED: &[u8] = b"global";
pub const BONDING_CURVE_SEED: &[u8] = b"bonding-curve";
pub const CREATOR_VAULT_SEED: &[u8] = b"creator-vault";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint-authority";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool-authority";
pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

// Metaplex
pub const METADATA_SEED: &[u8] = b"metadata";

// AMM
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_LP_MINT_SEED: &[u8] = b"pool_lp_mint";
pub const AMM_GLOBAL_CONFIG_SEED: &[u8] = b"global_config";
pub const AMM_CREATOR_VAULT_SEED: &[u8] = b"creator_vault";

/// Index of the pool created by migration. Migrated pools are always index 0.
pub const CANONICAL_POOL_INDEX: u16 = 0;

// ── Account Sizes ───────────────────────────────────────────────────────────

/// Current allocated size of a bonding curve account. Accounts smaller than
/// this predate the `creator` field and must be extended before use.
pub const BONDING_CURVE_NEW_SIZE: usize = 150;

/// Anchor account / instruction discriminator length.
pub const DISCRIMINATOR_LEN: usize = 8;

// ── Fee Math ────────────────────────────────────────────────────────────────

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Slippage percentages are scaled to tenths of a percent, so the bound is
/// computed over a denominator of 1000.
pub const SLIPPAGE_DENOMINATOR: u64 = 1_000;

// ── Default Config Values ───────────────────────────────────────────────────

/// Default lifetime of the cached global config: 60 seconds.
pub const DEFAULT_GLOBAL_CACHE_TTL_MS: u64 = 60_000;

/// Default lifetime of cached bonding curves: 5 seconds.
pub const DEFAULT_BONDING_CURVE_CACHE_TTL_MS: u64 = 5_000;
