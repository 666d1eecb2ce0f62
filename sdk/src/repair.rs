//! Detection of bonding curve accounts that need an `extend_account` first.
//!
//! The only signal is the allocated data length. Bytes are never parsed here.

use solana_program::{instruction::Instruction, pubkey::Pubkey};
use solana_sdk::account::Account;

use crate::constants::BONDING_CURVE_NEW_SIZE;
use crate::error::Result;
use crate::instructions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveRepairPolicy {
    /// Accounts with fewer data bytes than this are extended.
    pub min_size: usize,
}

impl Default for CurveRepairPolicy {
    fn default() -> Self {
        Self {
            min_size: BONDING_CURVE_NEW_SIZE,
        }
    }
}

impl CurveRepairPolicy {
    /// An absent account counts as undersized.
    pub fn needs_repair(&self, snapshot: Option<&Account>) -> bool {
        match snapshot {
            None => true,
            Some(account) => account.data.len() < self.min_size,
        }
    }

    /// The repair prefix for `bonding_curve`: one `extend_account` when the
    /// snapshot is undersized, otherwise nothing.
    pub fn repair_instructions(
        &self,
        program_id: &Pubkey,
        bonding_curve: &Pubkey,
        user: &Pubkey,
        snapshot: Option<&Account>,
    ) -> Result<Vec<Instruction>> {
        if !self.needs_repair(snapshot) {
            return Ok(Vec::new());
        }
        tracing::debug!(
            %bonding_curve,
            len = snapshot.map(|a| a.data.len()),
            "bonding curve undersized, prepending extend_account"
        );
        Ok(vec![instructions::extend_account(
            program_id,
            bonding_curve,
            user,
        )?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PUMP_PROGRAM_ID;

    fn account_with_len(len: usize) -> Account {
        Account {
            lamports: 1_000_000,
            data: vec![0u8; len],
            owner: PUMP_PROGRAM_ID,
            executable: false,
            rent_epoch: 0,
        }
    }

    #[test]
    fn test_absent_account_needs_repair() {
        assert!(CurveRepairPolicy::default().needs_repair(None));
    }

    #[test]
    fn test_threshold_boundary() {
        let policy = CurveRepairPolicy::default();
        assert!(policy.needs_repair(Some(&account_with_len(49))));
        assert!(policy.needs_repair(Some(&account_with_len(BONDING_CURVE_NEW_SIZE - 1))));
        assert!(!policy.needs_repair(Some(&account_with_len(BONDING_CURVE_NEW_SIZE))));
        assert!(!policy.needs_repair(Some(&account_with_len(BONDING_CURVE_NEW_SIZE + 8))));
    }

    #[test]
    fn test_repair_instructions_only_when_undersized() {
        let policy = CurveRepairPolicy::default();
        let curve = Pubkey::new_unique();
        let user = Pubkey::new_unique();

        let small = account_with_len(81);
        let ixs = policy
            .repair_instructions(&PUMP_PROGRAM_ID, &curve, &user, Some(&small))
            .unwrap();
        assert_eq!(ixs.len(), 1);
        assert_eq!(ixs[0].accounts[0].pubkey, curve);

        let full = account_with_len(BONDING_CURVE_NEW_SIZE);
        let ixs = policy
            .repair_instructions(&PUMP_PROGRAM_ID, &curve, &user, Some(&full))
            .unwrap();
        assert!(ixs.is_empty());
    }
}
