//! `PumpSdk`: the public entry point.
//!
//! Reads chain state through an [`AccountSource`], caches the global config
//! and bonding curves, and assembles ordered instruction lists for the caller
//! to sign and submit. Either the full list is returned or the call fails;
//! there is no partial result.

use solana_program::{instruction::Instruction, pubkey::Pubkey};
use solana_sdk::account::Account;
use spl_associated_token_account::{
    get_associated_token_address_with_program_id,
    instruction::{create_associated_token_account, create_associated_token_account_idempotent},
};

use crate::amm::{PoolFeeCollector, PumpAmm};
use crate::cache::TimedCache;
use crate::config::{MissingAccount, SdkConfig};
use crate::curve;
use crate::error::{Result, SdkError};
use crate::fee_recipient::{FeeRecipientStrategy, UniformRandom};
use crate::instructions;
use crate::pda;
use crate::repair::CurveRepairPolicy;
use crate::rpc::AccountSource;
use crate::state::{BondingCurve, Global};

// ── Params ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreateParams {
    /// New mint keypair's address; the mint must also sign.
    pub mint: Pubkey,
    /// Payer.
    pub user: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct BuyParams<'a> {
    pub mint: Pubkey,
    pub user: Pubkey,
    /// Curve creator. Looked up through the bonding curve cache when `None`.
    pub creator: Option<Pubkey>,
    /// Tokens to buy.
    pub amount: u64,
    /// Expected cost in lamports before slippage.
    pub sol_amount: u64,
    /// Tolerated slippage in percent (1.0 = 1%).
    pub slippage_pct: f64,
    /// Always prepend an idempotent ATA create instead of probing for the
    /// user's token account first.
    pub auto_create_ata: bool,
    /// Prefetched user token account, e.g. from `fetch_buy_state`.
    /// `Some(None)` means it is known to be absent; `None` means probe.
    pub associated_user_account: Option<Option<&'a Account>>,
}

#[derive(Debug, Clone)]
pub struct SellParams<'a> {
    pub mint: Pubkey,
    pub user: Pubkey,
    /// Curve creator. Looked up through the bonding curve cache when `None`.
    pub creator: Option<Pubkey>,
    /// Tokens to sell.
    pub amount: u64,
    /// Expected proceeds in lamports before slippage.
    pub sol_amount: u64,
    pub slippage_pct: f64,
    /// Raw bonding curve account, fetched no earlier than the current slot.
    /// `None` means the account does not exist.
    pub bonding_curve_account: Option<&'a Account>,
}

/// Fresh state needed to price and build a buy.
#[derive(Debug, Clone)]
pub struct BuyState {
    pub bonding_curve_account: Account,
    pub bonding_curve: BondingCurve,
    pub associated_user_account: Option<Account>,
}

/// Fresh state needed to price and build a sell.
#[derive(Debug, Clone)]
pub struct SellState {
    pub bonding_curve_account: Account,
    pub bonding_curve: BondingCurve,
}

// ── SDK ─────────────────────────────────────────────────────────────────────

pub struct PumpSdk<S> {
    source: S,
    config: SdkConfig,
    repair: CurveRepairPolicy,
    fee_recipients: Box<dyn FeeRecipientStrategy>,
    amm: Box<dyn PoolFeeCollector>,
    global_cache: TimedCache<(), (), Global>,
    curve_cache: TimedCache<Pubkey, Pubkey, BondingCurve>,
}

impl<S: AccountSource> PumpSdk<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, SdkConfig::default())
    }

    pub fn with_config(source: S, config: SdkConfig) -> Self {
        let amm = PumpAmm::new(config.amm_program_id);
        Self {
            source,
            global_cache: TimedCache::new("global", config.global_cache_ttl, |_: &()| ()),
            curve_cache: TimedCache::new(
                "bonding_curve",
                config.bonding_curve_cache_ttl,
                |mint: &Pubkey| *mint,
            ),
            config,
            repair: CurveRepairPolicy::default(),
            fee_recipients: Box::new(UniformRandom),
            amm: Box::new(amm),
        }
    }

    pub fn with_fee_recipient_strategy(
        mut self,
        strategy: impl FeeRecipientStrategy + 'static,
    ) -> Self {
        self.fee_recipients = Box::new(strategy);
        self
    }

    pub fn with_pool_fee_collector(mut self, collector: impl PoolFeeCollector + 'static) -> Self {
        self.amm = Box::new(collector);
        self
    }

    pub fn with_repair_policy(mut self, policy: CurveRepairPolicy) -> Self {
        self.repair = policy;
        self
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ── Addresses ───────────────────────────────────────────────────────────

    pub fn global_pda(&self) -> Pubkey {
        pda::find_global(&self.config.program_id).0
    }

    pub fn bonding_curve_pda(&self, mint: &Pubkey) -> Pubkey {
        pda::find_bonding_curve(&self.config.program_id, mint).0
    }

    pub fn creator_vault_pda(&self, creator: &Pubkey) -> Pubkey {
        pda::find_creator_vault(&self.config.program_id, creator).0
    }

    pub fn pool_authority_pda(&self, mint: &Pubkey) -> Pubkey {
        pda::find_pool_authority(&self.config.program_id, mint).0
    }

    pub fn canonical_pool_pda(&self, mint: &Pubkey) -> Pubkey {
        pda::find_canonical_pool(&self.config.program_id, &self.config.amm_program_id, mint).0
    }

    // ── State ───────────────────────────────────────────────────────────────

    /// Raw account lookup using the configured missing-account mode.
    pub async fn get_account_info(&self, address: &Pubkey) -> Result<Option<Account>> {
        self.get_account_info_with(address, self.config.missing_accounts)
            .await
    }

    pub async fn get_account_info_with(
        &self,
        address: &Pubkey,
        mode: MissingAccount,
    ) -> Result<Option<Account>> {
        match (self.source.get_account(address).await?, mode) {
            (Some(account), _) => Ok(Some(account)),
            (None, MissingAccount::ReturnNone) => Ok(None),
            (None, MissingAccount::Error) => Err(SdkError::NotFound(*address)),
        }
    }

    async fn required_account(&self, address: &Pubkey) -> Result<Account> {
        self.source
            .get_account(address)
            .await?
            .ok_or(SdkError::NotFound(*address))
    }

    /// Uncached read of the global config.
    pub async fn fetch_global(&self) -> Result<Global> {
        let account = self.required_account(&self.global_pda()).await?;
        Global::decode(&account.data)
    }

    /// Global config through the cache.
    pub async fn global(&self) -> Result<Global> {
        self.global_cache.get(&(), || self.fetch_global()).await
    }

    /// Uncached read of a mint's bonding curve.
    pub async fn fetch_bonding_curve(&self, mint: &Pubkey) -> Result<BondingCurve> {
        let account = self.required_account(&self.bonding_curve_pda(mint)).await?;
        BondingCurve::decode(&account.data)
    }

    /// Bonding curve through the cache.
    pub async fn bonding_curve(&self, mint: &Pubkey) -> Result<BondingCurve> {
        self.curve_cache
            .get(mint, || self.fetch_bonding_curve(mint))
            .await
    }

    pub async fn fetch_buy_state(&self, mint: &Pubkey, user: &Pubkey) -> Result<BuyState> {
        let bonding_curve_account = self.required_account(&self.bonding_curve_pda(mint)).await?;
        let bonding_curve = BondingCurve::decode(&bonding_curve_account.data)?;
        let ata = get_associated_token_address_with_program_id(user, mint, &spl_token::id());
        let associated_user_account = self.source.get_token_account(&ata).await?;
        Ok(BuyState {
            bonding_curve_account,
            bonding_curve,
            associated_user_account,
        })
    }

    pub async fn fetch_sell_state(&self, mint: &Pubkey) -> Result<SellState> {
        let bonding_curve_account = self.required_account(&self.bonding_curve_pda(mint)).await?;
        let bonding_curve = BondingCurve::decode(&bonding_curve_account.data)?;
        Ok(SellState {
            bonding_curve_account,
            bonding_curve,
        })
    }

    async fn resolve_creator(&self, mint: &Pubkey, creator: Option<Pubkey>) -> Result<Pubkey> {
        match creator {
            Some(creator) => Ok(creator),
            None => Ok(self.bonding_curve(mint).await?.creator),
        }
    }

    pub fn select_fee_recipient(&self, global: &Global) -> Pubkey {
        self.fee_recipients.select(global)
    }

    // ── Instruction Builders ────────────────────────────────────────────────

    pub fn create_instructions(&self, params: &CreateParams) -> Result<Vec<Instruction>> {
        Ok(vec![instructions::create(
            &self.config.program_id,
            &params.mint,
            &params.user,
            &params.name,
            &params.symbol,
            &params.uri,
            &params.creator,
        )?])
    }

    /// Create a mint and buy from its fresh curve in one sequence.
    pub async fn create_and_buy_instructions(
        &self,
        params: &CreateParams,
        amount: u64,
        sol_amount: u64,
        slippage_pct: f64,
    ) -> Result<Vec<Instruction>> {
        let max_sol_cost = curve::max_sol_cost(sol_amount, slippage_pct)?;
        let global = self.global().await?;

        let mut ixs = self.create_instructions(params)?;
        ixs.push(create_associated_token_account_idempotent(
            &params.user,
            &params.user,
            &params.mint,
            &spl_token::id(),
        ));
        ixs.push(instructions::buy(
            &self.config.program_id,
            &self.select_fee_recipient(&global),
            &params.mint,
            &params.user,
            &params.creator,
            amount,
            max_sol_cost,
        )?);
        Ok(ixs)
    }

    pub async fn buy_instructions(&self, params: &BuyParams<'_>) -> Result<Vec<Instruction>> {
        let max_sol_cost = curve::max_sol_cost(params.sol_amount, params.slippage_pct)?;
        let global = self.global().await?;
        let creator = self.resolve_creator(&params.mint, params.creator).await?;

        let mut ixs = Vec::with_capacity(2);
        let token_program = spl_token::id();
        if params.auto_create_ata {
            ixs.push(create_associated_token_account_idempotent(
                &params.user,
                &params.user,
                &params.mint,
                &token_program,
            ));
        } else {
            let exists = match params.associated_user_account {
                Some(prefetched) => prefetched.is_some(),
                None => {
                    let ata = get_associated_token_address_with_program_id(
                        &params.user,
                        &params.mint,
                        &token_program,
                    );
                    self.source.get_token_account(&ata).await?.is_some()
                }
            };
            if !exists {
                ixs.push(create_associated_token_account(
                    &params.user,
                    &params.user,
                    &params.mint,
                    &token_program,
                ));
            }
        }

        ixs.push(instructions::buy(
            &self.config.program_id,
            &self.select_fee_recipient(&global),
            &params.mint,
            &params.user,
            &creator,
            params.amount,
            max_sol_cost,
        )?);

        tracing::debug!(mint = %params.mint, max_sol_cost, count = ixs.len(), "built buy");
        Ok(ixs)
    }

    /// Sell, preceded by an `extend_account` when the supplied curve
    /// snapshot is undersized or absent.
    pub async fn sell_instructions(&self, params: &SellParams<'_>) -> Result<Vec<Instruction>> {
        let min_sol_output = curve::min_sol_output(params.sol_amount, params.slippage_pct)?;
        let global = self.global().await?;
        let creator = self.resolve_creator(&params.mint, params.creator).await?;

        let mut ixs = self.fix_existing_bonding_curve(
            &params.mint,
            &params.user,
            params.bonding_curve_account,
        )?;
        ixs.push(instructions::sell(
            &self.config.program_id,
            &self.select_fee_recipient(&global),
            &params.mint,
            &params.user,
            &creator,
            params.amount,
            min_sol_output,
        )?);

        tracing::debug!(mint = %params.mint, min_sol_output, count = ixs.len(), "built sell");
        Ok(ixs)
    }

    /// Only the repair prefix: an `extend_account` for the mint's curve when
    /// `snapshot` is undersized or absent, otherwise nothing.
    pub fn fix_existing_bonding_curve(
        &self,
        mint: &Pubkey,
        user: &Pubkey,
        snapshot: Option<&Account>,
    ) -> Result<Vec<Instruction>> {
        self.repair.repair_instructions(
            &self.config.program_id,
            &self.bonding_curve_pda(mint),
            user,
            snapshot,
        )
    }

    pub fn extend_account_instruction(
        &self,
        account: &Pubkey,
        user: &Pubkey,
    ) -> Result<Instruction> {
        instructions::extend_account(&self.config.program_id, account, user)
    }

    pub async fn migrate_instructions(
        &self,
        mint: &Pubkey,
        user: &Pubkey,
    ) -> Result<Vec<Instruction>> {
        let global = self.global().await?;
        Ok(vec![instructions::migrate(
            &self.config.program_id,
            &self.config.amm_program_id,
            &global.withdraw_authority,
            mint,
            user,
        )?])
    }

    /// Curve-side fee collection followed by the AMM's pool-side collection.
    pub fn collect_creator_fee_instructions(&self, creator: &Pubkey) -> Result<Vec<Instruction>> {
        let mut ixs = vec![instructions::collect_creator_fee(
            &self.config.program_id,
            creator,
        )?];
        ixs.extend(self.amm.collect_coin_creator_fee_instructions(creator)?);
        Ok(ixs)
    }

    /// Lamports in the creator vault above its rent-exempt minimum. Zero if
    /// the vault does not exist.
    pub async fn creator_vault_balance(&self, creator: &Pubkey) -> Result<u64> {
        let Some(vault) = self.source.get_account(&self.creator_vault_pda(creator)).await? else {
            return Ok(0);
        };
        let rent_floor = self
            .source
            .get_minimum_balance_for_rent_exemption(vault.data.len())
            .await?;
        Ok(vault.lamports.saturating_sub(rent_floor))
    }
}
