//! Program-derived address helpers.
//!
//! Every helper is a pure function of its inputs. Seed order and tag bytes
//! must match the on-chain programs exactly; a mismatch derives a different,
//! valid-looking address and nothing here can detect it.

use std::str::FromStr;

use solana_program::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address_with_program_id;

use crate::constants::*;
use crate::error::{Result, SdkError};

// ── Address Parsing ─────────────────────────────────────────────────────────

/// Parse a base58 address.
pub fn parse_address(s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).map_err(|e| SdkError::InvalidAddress(format!("{}: {}", s, e)))
}

/// Build an address from raw bytes. Anything other than 32 bytes is rejected.
pub fn address_from_bytes(bytes: &[u8]) -> Result<Pubkey> {
    let arr: [u8; 32] = bytes.try_into().map_err(|_| {
        SdkError::InvalidAddress(format!("expected 32 bytes, got {}", bytes.len()))
    })?;
    Ok(Pubkey::new_from_array(arr))
}

// ── Launch Program PDAs ─────────────────────────────────────────────────────

pub fn find_global(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GLOBAL_SEED], program_id)
}

pub fn find_bonding_curve(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[BONDING_CURVE_SEED, mint.as_ref()], program_id)
}

pub fn find_creator_vault(program_id: &Pubkey, creator: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CREATOR_VAULT_SEED, creator.as_ref()], program_id)
}

pub fn find_mint_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MINT_AUTHORITY_SEED], program_id)
}

/// Authority that owns the migrated pool on behalf of the launch program.
pub fn find_pool_authority(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_AUTHORITY_SEED, mint.as_ref()], program_id)
}

/// Anchor event-CPI authority. Same seed for both programs.
pub fn find_event_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[EVENT_AUTHORITY_SEED], program_id)
}

/// Token account holding the curve's unsold supply.
pub fn associated_bonding_curve(program_id: &Pubkey, mint: &Pubkey) -> Pubkey {
    let (bonding_curve, _) = find_bonding_curve(program_id, mint);
    get_associated_token_address_with_program_id(&bonding_curve, mint, &spl_token::id())
}

/// Metaplex metadata account for a mint.
pub fn find_metadata(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            MPL_TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &MPL_TOKEN_METADATA_PROGRAM_ID,
    )
}

// ── AMM PDAs ────────────────────────────────────────────────────────────────

pub fn find_pool(
    amm_program_id: &Pubkey,
    index: u16,
    owner: &Pubkey,
    base_mint: &Pubkey,
    quote_mint: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            POOL_SEED,
            &index.to_le_bytes(),
            owner.as_ref(),
            base_mint.as_ref(),
            quote_mint.as_ref(),
        ],
        amm_program_id,
    )
}

/// The pool a curve migrates into: index 0, owned by the mint's pool
/// authority, quoted in wrapped SOL.
pub fn find_canonical_pool(
    program_id: &Pubkey,
    amm_program_id: &Pubkey,
    mint: &Pubkey,
) -> (Pubkey, u8) {
    let (pool_authority, _) = find_pool_authority(program_id, mint);
    find_pool(
        amm_program_id,
        CANONICAL_POOL_INDEX,
        &pool_authority,
        mint,
        &spl_token::native_mint::id(),
    )
}

pub fn find_pool_lp_mint(amm_program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_LP_MINT_SEED, pool.as_ref()], amm_program_id)
}

pub fn find_amm_global_config(amm_program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AMM_GLOBAL_CONFIG_SEED], amm_program_id)
}

/// Pool-side creator fee vault authority. Note the underscore: the AMM does
/// not share the launch program's `creator-vault` seed.
pub fn find_amm_creator_vault_authority(amm_program_id: &Pubkey, creator: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AMM_CREATOR_VAULT_SEED, creator.as_ref()], amm_program_id)
}
