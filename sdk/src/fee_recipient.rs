//! Fee recipient selection strategies.
//!
//! Candidates are always the global config's primary recipient followed by
//! its alternates. Strategies only decide which one to pick.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::seq::SliceRandom;
use solana_program::pubkey::Pubkey;

use crate::state::Global;

pub trait FeeRecipientStrategy: Send + Sync {
    fn select(&self, global: &Global) -> Pubkey;
}

/// Uniform random choice across all candidates. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformRandom;

impl FeeRecipientStrategy for UniformRandom {
    fn select(&self, global: &Global) -> Pubkey {
        global
            .fee_recipient_candidates()
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(global.fee_recipient)
    }
}

/// Cycle through candidates in stored order.
#[derive(Debug, Default)]
pub struct RoundRobin {
    next: AtomicUsize,
}

impl FeeRecipientStrategy for RoundRobin {
    fn select(&self, global: &Global) -> Pubkey {
        let candidates = global.fee_recipient_candidates();
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        candidates[i % candidates.len()]
    }
}

/// Always the primary recipient.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimaryOnly;

impl FeeRecipientStrategy for PrimaryOnly {
    fn select(&self, global: &Global) -> Pubkey {
        global.fee_recipient
    }
}
