//! Account transport.
//!
//! The SDK reads chain state through [`AccountSource`] and never submits
//! anything. The nonblocking `RpcClient` implements it directly; tests plug
//! in an in-memory source.

use std::sync::Arc;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::pubkey::Pubkey;
use solana_sdk::account::Account;

use crate::error::Result;

#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Raw account at `address`, `None` if it does not exist.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>>;

    /// Token account at `address`, `None` if it does not exist.
    async fn get_token_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        self.get_account(address).await
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;
}

#[async_trait]
impl AccountSource for RpcClient {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(RpcClient::get_minimum_balance_for_rent_exemption(self, data_len).await?)
    }
}

#[async_trait]
impl<T: AccountSource + ?Sized> AccountSource for Arc<T> {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        (**self).get_account(address).await
    }

    async fn get_token_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        (**self).get_token_account(address).await
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        (**self).get_minimum_balance_for_rent_exemption(data_len).await
    }
}
