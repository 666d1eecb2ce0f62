//! Launch program instruction encoders.
//!
//! One function per program instruction. Each derives the PDAs it needs and
//! lays out accounts in the exact order the program expects. Data is the
//! 8-byte instruction discriminator followed by borsh-encoded args.
//!
//! Instructions:
//!   create, buy, sell, extend_account, migrate, collect_creator_fee

use borsh::BorshSerialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};
use spl_associated_token_account::get_associated_token_address_with_program_id;

use crate::constants::*;
use crate::error::Result;
use crate::pda::*;
use crate::state::instruction_discriminator;

// ── Args (exact Borsh match to program) ─────────────────────────────────────

#[derive(BorshSerialize)]
pub struct CreateArgs {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub creator: Pubkey,
}

#[derive(BorshSerialize)]
pub struct BuyArgs {
    pub amount: u64,
    pub max_sol_cost: u64,
}

#[derive(BorshSerialize)]
pub struct SellArgs {
    pub amount: u64,
    pub min_sol_output: u64,
}

fn encode<T: BorshSerialize>(name: &str, args: Option<&T>) -> Result<Vec<u8>> {
    let mut data = instruction_discriminator(name).to_vec();
    if let Some(args) = args {
        args.serialize(&mut data)?;
    }
    Ok(data)
}

fn user_token_account(user: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(user, mint, &spl_token::id())
}

// ── Instruction Builders ────────────────────────────────────────────────────

/// Create a mint, its bonding curve, and metadata.
///
/// Accounts:
///   0. `[signer, writable]` mint
///   1. `[]` mint_authority PDA
///   2. `[writable]` bonding_curve PDA
///   3. `[writable]` associated_bonding_curve
///   4. `[]` global PDA
///   5. `[]` mpl_token_metadata program
///   6. `[writable]` metadata PDA
///   7. `[signer, writable]` user (payer)
///   8. `[]` system_program
///   9. `[]` token_program
///  10. `[]` associated_token_program
///  11. `[]` rent sysvar
///  12. `[]` event_authority PDA
///  13. `[]` program
pub fn create(
    program_id: &Pubkey,
    mint: &Pubkey,
    user: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
    creator: &Pubkey,
) -> Result<Instruction> {
    let (mint_authority, _) = find_mint_authority(program_id);
    let (bonding_curve, _) = find_bonding_curve(program_id, mint);
    let (global, _) = find_global(program_id);
    let (metadata, _) = find_metadata(mint);
    let (event_authority, _) = find_event_authority(program_id);

    let args = CreateArgs {
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri: uri.to_string(),
        creator: *creator,
    };

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*mint, true),
            AccountMeta::new_readonly(mint_authority, false),
            AccountMeta::new(bonding_curve, false),
            AccountMeta::new(associated_bonding_curve(program_id, mint), false),
            AccountMeta::new_readonly(global, false),
            AccountMeta::new_readonly(MPL_TOKEN_METADATA_PROGRAM_ID, false),
            AccountMeta::new(metadata, false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
            AccountMeta::new_readonly(event_authority, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: encode("create", Some(&args))?,
    })
}

/// Buy `amount` tokens, spending at most `max_sol_cost` lamports.
///
/// Accounts:
///   0. `[]` global PDA
///   1. `[writable]` fee_recipient
///   2. `[]` mint
///   3. `[writable]` bonding_curve PDA
///   4. `[writable]` associated_bonding_curve
///   5. `[writable]` associated_user
///   6. `[signer, writable]` user
///   7. `[]` system_program
///   8. `[]` token_program
///   9. `[writable]` creator_vault PDA
///  10. `[]` event_authority PDA
///  11. `[]` program
pub fn buy(
    program_id: &Pubkey,
    fee_recipient: &Pubkey,
    mint: &Pubkey,
    user: &Pubkey,
    creator: &Pubkey,
    amount: u64,
    max_sol_cost: u64,
) -> Result<Instruction> {
    let (global, _) = find_global(program_id);
    let (bonding_curve, _) = find_bonding_curve(program_id, mint);
    let (creator_vault, _) = find_creator_vault(program_id, creator);
    let (event_authority, _) = find_event_authority(program_id);

    let args = BuyArgs {
        amount,
        max_sol_cost,
    };

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(global, false),
            AccountMeta::new(*fee_recipient, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(bonding_curve, false),
            AccountMeta::new(associated_bonding_curve(program_id, mint), false),
            AccountMeta::new(user_token_account(user, mint), false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new(creator_vault, false),
            AccountMeta::new_readonly(event_authority, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: encode("buy", Some(&args))?,
    })
}

/// Sell `amount` tokens for at least `min_sol_output` lamports.
///
/// Accounts:
///   0. `[]` global PDA
///   1. `[writable]` fee_recipient
///   2. `[]` mint
///   3. `[writable]` bonding_curve PDA
///   4. `[writable]` associated_bonding_curve
///   5. `[writable]` associated_user
///   6. `[signer, writable]` user
///   7. `[]` system_program
///   8. `[writable]` creator_vault PDA
///   9. `[]` token_program
///  10. `[]` event_authority PDA
///  11. `[]` program
pub fn sell(
    program_id: &Pubkey,
    fee_recipient: &Pubkey,
    mint: &Pubkey,
    user: &Pubkey,
    creator: &Pubkey,
    amount: u64,
    min_sol_output: u64,
) -> Result<Instruction> {
    let (global, _) = find_global(program_id);
    let (bonding_curve, _) = find_bonding_curve(program_id, mint);
    let (creator_vault, _) = find_creator_vault(program_id, creator);
    let (event_authority, _) = find_event_authority(program_id);

    let args = SellArgs {
        amount,
        min_sol_output,
    };

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(global, false),
            AccountMeta::new(*fee_recipient, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(bonding_curve, false),
            AccountMeta::new(associated_bonding_curve(program_id, mint), false),
            AccountMeta::new(user_token_account(user, mint), false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new(creator_vault, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(event_authority, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: encode("sell", Some(&args))?,
    })
}

/// Grow a program-owned account to its current layout size.
///
/// Accounts:
///   0. `[writable]` account
///   1. `[signer]` user (pays the extra rent)
///   2. `[]` system_program
///   3. `[]` event_authority PDA
///   4. `[]` program
pub fn extend_account(program_id: &Pubkey, account: &Pubkey, user: &Pubkey) -> Result<Instruction> {
    let (event_authority, _) = find_event_authority(program_id);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*account, false),
            AccountMeta::new_readonly(*user, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(event_authority, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: encode::<()>("extend_account", None)?,
    })
}

/// Move a completed curve's liquidity into its canonical AMM pool.
///
/// Accounts:
///   0. `[]` global PDA
///   1. `[writable]` withdraw_authority
///   2. `[]` mint
///   3. `[writable]` bonding_curve PDA
///   4. `[writable]` associated_bonding_curve
///   5. `[signer]` user
///   6. `[]` system_program
///   7. `[]` token_program
///   8. `[]` amm program
///   9. `[writable]` pool PDA
///  10. `[writable]` pool_authority PDA
///  11. `[writable]` pool_authority_mint_account
///  12. `[writable]` pool_authority_wsol_account
///  13. `[]` amm global_config PDA
///  14. `[]` wsol mint
///  15. `[writable]` lp_mint PDA
///  16. `[writable]` user_pool_token_account
///  17. `[writable]` pool_base_token_account
///  18. `[writable]` pool_quote_token_account
///  19. `[]` token_2022_program
///  20. `[]` associated_token_program
///  21. `[]` amm event_authority PDA
///  22. `[]` event_authority PDA
///  23. `[]` program
pub fn migrate(
    program_id: &Pubkey,
    amm_program_id: &Pubkey,
    withdraw_authority: &Pubkey,
    mint: &Pubkey,
    user: &Pubkey,
) -> Result<Instruction> {
    let wsol = spl_token::native_mint::id();
    let token_program = spl_token::id();

    let (global, _) = find_global(program_id);
    let (bonding_curve, _) = find_bonding_curve(program_id, mint);
    let (pool_authority, _) = find_pool_authority(program_id, mint);
    let (pool, _) = find_canonical_pool(program_id, amm_program_id, mint);
    let (amm_global_config, _) = find_amm_global_config(amm_program_id);
    let (lp_mint, _) = find_pool_lp_mint(amm_program_id, &pool);
    let (amm_event_authority, _) = find_event_authority(amm_program_id);
    let (event_authority, _) = find_event_authority(program_id);

    let pool_authority_mint_account =
        get_associated_token_address_with_program_id(&pool_authority, mint, &token_program);
    let pool_authority_wsol_account =
        get_associated_token_address_with_program_id(&pool_authority, &wsol, &token_program);
    let user_pool_token_account = get_associated_token_address_with_program_id(
        &pool_authority,
        &lp_mint,
        &TOKEN_2022_PROGRAM_ID,
    );
    let pool_base_token_account =
        get_associated_token_address_with_program_id(&pool, mint, &token_program);
    let pool_quote_token_account =
        get_associated_token_address_with_program_id(&pool, &wsol, &token_program);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(global, false),
            AccountMeta::new(*withdraw_authority, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(bonding_curve, false),
            AccountMeta::new(associated_bonding_curve(program_id, mint), false),
            AccountMeta::new_readonly(*user, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(token_program, false),
            AccountMeta::new_readonly(*amm_program_id, false),
            AccountMeta::new(pool, false),
            AccountMeta::new(pool_authority, false),
            AccountMeta::new(pool_authority_mint_account, false),
            AccountMeta::new(pool_authority_wsol_account, false),
            AccountMeta::new_readonly(amm_global_config, false),
            AccountMeta::new_readonly(wsol, false),
            AccountMeta::new(lp_mint, false),
            AccountMeta::new(user_pool_token_account, false),
            AccountMeta::new(pool_base_token_account, false),
            AccountMeta::new(pool_quote_token_account, false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
            AccountMeta::new_readonly(amm_event_authority, false),
            AccountMeta::new_readonly(event_authority, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: encode::<()>("migrate", None)?,
    })
}

/// Sweep the creator vault to the creator.
///
/// Accounts:
///   0. `[writable]` creator
///   1. `[writable]` creator_vault PDA
///   2. `[]` system_program
///   3. `[]` event_authority PDA
///   4. `[]` program
pub fn collect_creator_fee(program_id: &Pubkey, creator: &Pubkey) -> Result<Instruction> {
    let (creator_vault, _) = find_creator_vault(program_id, creator);
    let (event_authority, _) = find_event_authority(program_id);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*creator, false),
            AccountMeta::new(creator_vault, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(event_authority, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: encode::<()>("collect_creator_fee", None)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_data_layout() {
        let ix = buy(
            &PUMP_PROGRAM_ID,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            1_000,
            1_010,
        )
        .unwrap();

        assert_eq!(ix.data.len(), 8 + 8 + 8);
        assert_eq!(&ix.data[..8], &instruction_discriminator("buy"));
        assert_eq!(u64::from_le_bytes(ix.data[8..16].try_into().unwrap()), 1_000);
        assert_eq!(u64::from_le_bytes(ix.data[16..24].try_into().unwrap()), 1_010);
        assert_eq!(ix.accounts.len(), 12);
    }

    #[test]
    fn test_buy_and_sell_swap_token_program_and_creator_vault() {
        let fee = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let (vault, _) = find_creator_vault(&PUMP_PROGRAM_ID, &creator);

        let b = buy(&PUMP_PROGRAM_ID, &fee, &mint, &user, &creator, 1, 1).unwrap();
        let s = sell(&PUMP_PROGRAM_ID, &fee, &mint, &user, &creator, 1, 1).unwrap();

        assert_eq!(b.accounts[8].pubkey, spl_token::id());
        assert_eq!(b.accounts[9].pubkey, vault);
        assert_eq!(s.accounts[8].pubkey, vault);
        assert_eq!(s.accounts[9].pubkey, spl_token::id());
    }

    #[test]
    fn test_user_is_only_signer_on_trades() {
        let user = Pubkey::new_unique();
        let ix = sell(
            &PUMP_PROGRAM_ID,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &user,
            &Pubkey::new_unique(),
            5,
            0,
        )
        .unwrap();
        let signers: Vec<_> = ix.accounts.iter().filter(|m| m.is_signer).collect();
        assert_eq!(signers.len(), 1);
        assert_eq!(signers[0].pubkey, user);
    }

    #[test]
    fn test_create_encodes_strings_and_creator() {
        let mint = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let ix = create(
            &PUMP_PROGRAM_ID,
            &mint,
            &Pubkey::new_unique(),
            "Name",
            "SYM",
            "https://x",
            &creator,
        )
        .unwrap();

        let mut expected = instruction_discriminator("create").to_vec();
        for s in ["Name", "SYM", "https://x"] {
            expected.extend_from_slice(&(s.len() as u32).to_le_bytes());
            expected.extend_from_slice(s.as_bytes());
        }
        expected.extend_from_slice(creator.as_ref());
        assert_eq!(ix.data, expected);
        assert_eq!(ix.accounts.len(), 14);
        assert!(ix.accounts[0].is_signer);
    }

    #[test]
    fn test_argless_instructions_are_discriminator_only() {
        let pk = Pubkey::new_unique();
        let ext = extend_account(&PUMP_PROGRAM_ID, &pk, &pk).unwrap();
        let fee = collect_creator_fee(&PUMP_PROGRAM_ID, &pk).unwrap();
        let mig = migrate(&PUMP_PROGRAM_ID, &PUMP_AMM_PROGRAM_ID, &pk, &pk, &pk).unwrap();

        assert_eq!(ext.data, instruction_discriminator("extend_account").to_vec());
        assert_eq!(fee.data, instruction_discriminator("collect_creator_fee").to_vec());
        assert_eq!(mig.data, instruction_discriminator("migrate").to_vec());
        assert_eq!(mig.accounts.len(), 24);
    }

    #[test]
    fn test_migrate_targets_canonical_pool() {
        let mint = Pubkey::new_unique();
        let ix = migrate(
            &PUMP_PROGRAM_ID,
            &PUMP_AMM_PROGRAM_ID,
            &Pubkey::new_unique(),
            &mint,
            &Pubkey::new_unique(),
        )
        .unwrap();
        let (pool, _) = find_canonical_pool(&PUMP_PROGRAM_ID, &PUMP_AMM_PROGRAM_ID, &mint);
        assert_eq!(ix.accounts[9].pubkey, pool);
        assert_eq!(ix.accounts[8].pubkey, PUMP_AMM_PROGRAM_ID);
    }
}
