//! Companion AMM collaborator.
//!
//! After migration a coin's creator fees accrue in the AMM as well, so fee
//! collection spans both programs. The AMM side sits behind a trait so
//! callers can supply their own pool SDK.

use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use spl_associated_token_account::{
    get_associated_token_address_with_program_id,
    instruction::create_associated_token_account_idempotent,
};

use crate::constants::PUMP_AMM_PROGRAM_ID;
use crate::error::Result;
use crate::pda::{find_amm_creator_vault_authority, find_event_authority};
use crate::state::instruction_discriminator;

pub trait PoolFeeCollector: Send + Sync {
    /// Instructions that move the creator's pool-side fees to `creator`.
    fn collect_coin_creator_fee_instructions(&self, creator: &Pubkey) -> Result<Vec<Instruction>>;
}

/// Builds fee collection against the canonical AMM program. Fees are quoted
/// in wrapped SOL, so the creator's WSOL account is opened, credited, and
/// closed back to lamports in one sequence.
#[derive(Debug, Clone, Copy)]
pub struct PumpAmm {
    pub program_id: Pubkey,
}

impl Default for PumpAmm {
    fn default() -> Self {
        Self {
            program_id: PUMP_AMM_PROGRAM_ID,
        }
    }
}

impl PumpAmm {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Withdraw pool-side creator fees.
    ///
    /// Accounts:
    ///   0. `[]` quote_mint
    ///   1. `[]` quote_token_program
    ///   2. `[signer]` coin_creator
    ///   3. `[]` coin_creator_vault_authority PDA
    ///   4. `[writable]` coin_creator_vault_ata
    ///   5. `[writable]` coin_creator_token_account
    ///   6. `[]` event_authority PDA
    ///   7. `[]` program
    pub fn collect_coin_creator_fee(&self, creator: &Pubkey) -> Instruction {
        let quote_mint = spl_token::native_mint::id();
        let token_program = spl_token::id();
        let (vault_authority, _) = find_amm_creator_vault_authority(&self.program_id, creator);
        let vault_ata = get_associated_token_address_with_program_id(
            &vault_authority,
            &quote_mint,
            &token_program,
        );
        let creator_ata =
            get_associated_token_address_with_program_id(creator, &quote_mint, &token_program);
        let (event_authority, _) = find_event_authority(&self.program_id);

        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new_readonly(quote_mint, false),
                AccountMeta::new_readonly(token_program, false),
                AccountMeta::new_readonly(*creator, true),
                AccountMeta::new_readonly(vault_authority, false),
                AccountMeta::new(vault_ata, false),
                AccountMeta::new(creator_ata, false),
                AccountMeta::new_readonly(event_authority, false),
                AccountMeta::new_readonly(self.program_id, false),
            ],
            data: instruction_discriminator("collect_coin_creator_fee").to_vec(),
        }
    }
}

impl PoolFeeCollector for PumpAmm {
    fn collect_coin_creator_fee_instructions(&self, creator: &Pubkey) -> Result<Vec<Instruction>> {
        let quote_mint = spl_token::native_mint::id();
        let token_program = spl_token::id();
        let creator_ata =
            get_associated_token_address_with_program_id(creator, &quote_mint, &token_program);

        Ok(vec![
            create_associated_token_account_idempotent(
                creator,
                creator,
                &quote_mint,
                &token_program,
            ),
            self.collect_coin_creator_fee(creator),
            spl_token::instruction::close_account(
                &token_program,
                &creator_ata,
                creator,
                creator,
                &[],
            )?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_collection_wraps_in_wsol_account() {
        let creator = Pubkey::new_unique();
        let ixs = PumpAmm::default()
            .collect_coin_creator_fee_instructions(&creator)
            .unwrap();

        assert_eq!(ixs.len(), 3);
        assert_eq!(ixs[0].program_id, spl_associated_token_account::id());
        assert_eq!(ixs[1].program_id, PUMP_AMM_PROGRAM_ID);
        assert_eq!(ixs[2].program_id, spl_token::id());
        assert_eq!(
            ixs[1].data,
            instruction_discriminator("collect_coin_creator_fee").to_vec()
        );
    }

    #[test]
    fn test_custom_program_id_is_used() {
        let program_id = Pubkey::new_unique();
        let ix = PumpAmm::new(program_id)
            .collect_coin_creator_fee(&Pubkey::new_unique());
        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.accounts[7].pubkey, program_id);
    }
}
