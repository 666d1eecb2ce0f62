//! On-chain account records and their decoders.
//!
//! Accounts are Anchor-framed: an 8-byte discriminator
//! (`sha256("account:<Name>")[..8]`) followed by the borsh-encoded record.
//! Encoding is owned by the program; only decoding lives here.

use borsh::BorshDeserialize;
use serde::Serialize;
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;

use crate::constants::DISCRIMINATOR_LEN;
use crate::error::{Result, SdkError};

// ── Discriminators ──────────────────────────────────────────────────────────

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{}:{}", namespace, name).as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Discriminator prefixing an account of type `name`.
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("account", name)
}

/// Discriminator prefixing the data of instruction `name` (snake_case).
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("global", name)
}

/// The kinds of account this crate knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Global,
    BondingCurve,
}

impl AccountKind {
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Global => "Global",
            AccountKind::BondingCurve => "BondingCurve",
        }
    }

    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        account_discriminator(self.name())
    }
}

/// A decoded account of any known kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Record {
    Global(Global),
    BondingCurve(BondingCurve),
}

/// Decode `data` as an account of `kind`.
pub fn decode(kind: AccountKind, data: &[u8]) -> Result<Record> {
    match kind {
        AccountKind::Global => Global::decode(data).map(Record::Global),
        AccountKind::BondingCurve => BondingCurve::decode(data).map(Record::BondingCurve),
    }
}

fn strip_discriminator(kind: AccountKind, data: &[u8]) -> Result<&[u8]> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(SdkError::decode(
            kind.name(),
            format!("{} bytes is shorter than the discriminator", data.len()),
        ));
    }
    let (disc, body) = data.split_at(DISCRIMINATOR_LEN);
    if disc != kind.discriminator() {
        return Err(SdkError::decode(kind.name(), "discriminator mismatch"));
    }
    Ok(body)
}

// ── State: Global ───────────────────────────────────────────────────────────

/// Number of alternate fee recipients stored in the global config.
pub const ALT_FEE_RECIPIENTS: usize = 7;

#[derive(BorshDeserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Global {
    pub initialized: bool,                              // 1
    pub authority: Pubkey,                              // 32
    pub fee_recipient: Pubkey,                          // 32
    pub initial_virtual_token_reserves: u64,            // 8
    pub initial_virtual_sol_reserves: u64,              // 8
    pub initial_real_token_reserves: u64,               // 8
    pub token_total_supply: u64,                        // 8
    pub fee_basis_points: u64,                          // 8
    pub withdraw_authority: Pubkey,                     // 32
    pub enable_migrate: bool,                           // 1
    pub pool_migration_fee: u64,                        // 8
    pub creator_fee_basis_points: u64,                  // 8
    pub fee_recipients: [Pubkey; ALT_FEE_RECIPIENTS],   // 224
    pub set_creator_authority: Pubkey,                  // 32
}

impl Global {
    // 1+32+32+8+8+8+8+8+32+1+8+8+224+32 = 418
    pub const SIZE: usize = 418;

    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut body = strip_discriminator(AccountKind::Global, data)?;
        Self::deserialize(&mut body).map_err(|e| SdkError::decode("Global", e.to_string()))
    }

    /// Primary recipient followed by the alternates, in stored order.
    pub fn fee_recipient_candidates(&self) -> Vec<Pubkey> {
        let mut out = Vec::with_capacity(1 + ALT_FEE_RECIPIENTS);
        out.push(self.fee_recipient);
        out.extend_from_slice(&self.fee_recipients);
        out
    }
}

// ── State: BondingCurve ─────────────────────────────────────────────────────

#[derive(BorshDeserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BondingCurve {
    pub virtual_token_reserves: u64, // 8
    pub virtual_sol_reserves: u64,   // 8
    pub real_token_reserves: u64,    // 8
    pub real_sol_reserves: u64,      // 8
    pub token_total_supply: u64,     // 8
    pub complete: bool,              // 1
    pub creator: Pubkey,             // 32
}

/// Layout written before the `creator` field existed.
#[derive(BorshDeserialize)]
struct LegacyBondingCurve {
    virtual_token_reserves: u64,
    virtual_sol_reserves: u64,
    real_token_reserves: u64,
    real_sol_reserves: u64,
    token_total_supply: u64,
    complete: bool,
}

impl BondingCurve {
    // 8+8+8+8+8+1+32 = 73
    pub const SIZE: usize = 73;
    pub const LEGACY_SIZE: usize = 41;

    /// Decode a bonding curve. Legacy accounts that end before `creator`
    /// decode with `creator` set to the default address.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut body = strip_discriminator(AccountKind::BondingCurve, data)?;
        if body.len() >= Self::SIZE {
            return Self::deserialize(&mut body)
                .map_err(|e| SdkError::decode("BondingCurve", e.to_string()));
        }

        let legacy = LegacyBondingCurve::deserialize(&mut body)
            .map_err(|e| SdkError::decode("BondingCurve", e.to_string()))?;
        Ok(Self {
            virtual_token_reserves: legacy.virtual_token_reserves,
            virtual_sol_reserves: legacy.virtual_sol_reserves,
            real_token_reserves: legacy.real_token_reserves,
            real_sol_reserves: legacy.real_sol_reserves,
            token_total_supply: legacy.token_total_supply,
            complete: legacy.complete,
            creator: Pubkey::default(),
        })
    }

    pub fn has_creator(&self) -> bool {
        self.creator != Pubkey::default()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Encode a record the way the program lays it out. Test-only; the SDK
    /// never writes accounts.
    pub(crate) fn encode_bonding_curve(curve: &BondingCurve, padded_len: usize) -> Vec<u8> {
        let mut data = AccountKind::BondingCurve.discriminator().to_vec();
        data.extend_from_slice(&curve.virtual_token_reserves.to_le_bytes());
        data.extend_from_slice(&curve.virtual_sol_reserves.to_le_bytes());
        data.extend_from_slice(&curve.real_token_reserves.to_le_bytes());
        data.extend_from_slice(&curve.real_sol_reserves.to_le_bytes());
        data.extend_from_slice(&curve.token_total_supply.to_le_bytes());
        data.push(curve.complete as u8);
        data.extend_from_slice(curve.creator.as_ref());
        data.resize(padded_len.max(data.len()), 0);
        data
    }

    pub(crate) fn sample_curve() -> BondingCurve {
        BondingCurve {
            virtual_token_reserves: 1_073_000_000_000_000,
            virtual_sol_reserves: 30_000_000_000,
            real_token_reserves: 793_100_000_000_000,
            real_sol_reserves: 0,
            token_total_supply: 1_000_000_000_000_000,
            complete: false,
            creator: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_known_discriminators() {
        assert_eq!(
            instruction_discriminator("create"),
            [24, 30, 200, 40, 5, 28, 7, 119]
        );
        assert_eq!(
            instruction_discriminator("sell"),
            [51, 230, 133, 164, 1, 127, 131, 173]
        );
    }

    #[test]
    fn test_decode_bonding_curve() {
        let curve = sample_curve();
        let data = encode_bonding_curve(&curve, 8 + 150);
        assert_eq!(BondingCurve::decode(&data).unwrap(), curve);
        assert_eq!(
            decode(AccountKind::BondingCurve, &data).unwrap(),
            Record::BondingCurve(curve)
        );
    }

    #[test]
    fn test_decode_legacy_bonding_curve() {
        let curve = sample_curve();
        let mut data = encode_bonding_curve(&curve, 0);
        data.truncate(8 + BondingCurve::LEGACY_SIZE);

        let decoded = BondingCurve::decode(&data).unwrap();
        assert_eq!(decoded.virtual_sol_reserves, curve.virtual_sol_reserves);
        assert_eq!(decoded.creator, Pubkey::default());
        assert!(!decoded.has_creator());
    }

    #[test]
    fn test_decode_rejects_wrong_discriminator() {
        let curve = sample_curve();
        let mut data = encode_bonding_curve(&curve, 0);
        data[..8].copy_from_slice(&AccountKind::Global.discriminator());
        assert!(matches!(
            BondingCurve::decode(&data),
            Err(SdkError::Decode { kind: "BondingCurve", .. })
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_data() {
        assert!(Global::decode(&[1, 2, 3]).is_err());

        let mut data = AccountKind::Global.discriminator().to_vec();
        data.extend_from_slice(&[1u8; 40]);
        assert!(matches!(
            Global::decode(&data),
            Err(SdkError::Decode { kind: "Global", .. })
        ));
    }

    #[test]
    fn test_fee_recipient_candidates_order() {
        let mut data = AccountKind::Global.discriminator().to_vec();
        data.resize(8 + Global::SIZE, 0);
        let global = Global::decode(&data).unwrap();
        let candidates = global.fee_recipient_candidates();
        assert_eq!(candidates.len(), 1 + ALT_FEE_RECIPIENTS);
        assert_eq!(candidates[0], global.fee_recipient);
    }
}
