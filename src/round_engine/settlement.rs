//! Settlement consolidation.
//!
//! Reduces any multiset of directed debts (one game or many) to the smallest
//! practical set of one-way payments. Balances are kept in integer cents, so
//! a player's net position is identical before and after consolidation.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::round_engine::{
    error::SettlementError,
    helpers::{from_cents, to_cents},
    models::{GameOutcome, PlayerId, SettlementEdge},
};

/// Net position of one player after all debts are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBalance {
    pub player_id: PlayerId,
    /// Positive = is owed money.
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSettlement {
    pub payments: Vec<SettlementEdge>,
    pub balances: Vec<PlayerBalance>,
}

/// Debt accumulator.
///
/// Players are tracked in first-seen order, which keeps output deterministic
/// for identical input.
#[derive(Debug, Default)]
pub struct SettlementBook {
    index: HashMap<PlayerId, usize>,
    balances: Vec<(PlayerId, i64)>,
    debt_count: usize,
}

impl SettlementBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one debt: `to` gains, `from` loses.
    pub fn add(&mut self, debt: &SettlementEdge) -> Result<(), SettlementError> {
        if !debt.amount.is_finite() || debt.amount <= 0.0 {
            return Err(SettlementError::InvalidAmount {
                from: debt.from_user_id.clone(),
                to: debt.to_user_id.clone(),
                amount: debt.amount,
            });
        }
        if debt.from_user_id == debt.to_user_id {
            return Err(SettlementError::SelfPayment(debt.from_user_id.clone()));
        }
        let cents = to_cents(debt.amount);
        let from = self.slot(&debt.from_user_id);
        let to = self.slot(&debt.to_user_id);
        self.balances[from].1 -= cents;
        self.balances[to].1 += cents;
        self.debt_count += 1;
        Ok(())
    }

    pub fn add_all(&mut self, debts: &[SettlementEdge]) -> Result<(), SettlementError> {
        debts.iter().try_for_each(|d| self.add(d))
    }

    /// Accumulate every raw debt a game produced.
    pub fn add_outcome(&mut self, outcome: &GameOutcome) -> Result<(), SettlementError> {
        self.add_all(outcome.settlements())
    }

    pub fn balances(&self) -> Vec<PlayerBalance> {
        self.balances
            .iter()
            .map(|(player_id, cents)| PlayerBalance { player_id: player_id.clone(), net: from_cents(*cents) })
            .collect()
    }

    /// Minimal payment list for the accumulated debts.
    pub fn consolidate(&self) -> Result<Vec<SettlementEdge>, SettlementError> {
        let residual_cents: i64 = self.balances.iter().map(|(_, c)| c).sum();
        if residual_cents != 0 {
            return Err(SettlementError::Unbalanced { residual_cents });
        }
        let payments = match_balances(&self.balances);
        log::debug!(
            "consolidated {} debts across {} players into {} payments",
            self.debt_count,
            self.balances.len(),
            payments.len()
        );
        Ok(payments)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.balances.clear();
        self.debt_count = 0;
    }

    fn slot(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.balances.len();
        self.index.insert(id.to_string(), i);
        self.balances.push((id.to_string(), 0));
        i
    }
}

/// Consolidate a raw debt list.
pub fn consolidate(debts: &[SettlementEdge]) -> Result<Vec<SettlementEdge>, SettlementError> {
    let mut book = SettlementBook::new();
    book.add_all(debts)?;
    book.consolidate()
}

/// Merge the raw debts of several games in one round and consolidate them.
pub fn settle_round(outcomes: &[GameOutcome]) -> Result<RoundSettlement, SettlementError> {
    let mut book = SettlementBook::new();
    for outcome in outcomes {
        book.add_outcome(outcome)?;
    }
    let payments = book.consolidate()?;
    log::info!("round settled: {} games, {} payments", outcomes.len(), payments.len());
    Ok(RoundSettlement { payments, balances: book.balances() })
}

/// Greedy creditor/debtor matching over zero-sum balances (cents).
///
/// Largest creditor is paired with largest debtor; each pairing emits one
/// payment and retires at least one side, so output has fewer entries than
/// players and no pair appears twice.
pub fn match_balances(balances: &[(PlayerId, i64)]) -> Vec<SettlementEdge> {
    let mut creditors: Vec<(usize, i64)> = balances
        .iter()
        .enumerate()
        .filter(|(_, (_, c))| *c > 0)
        .map(|(i, (_, c))| (i, *c))
        .collect();
    let mut debtors: Vec<(usize, i64)> = balances
        .iter()
        .enumerate()
        .filter(|(_, (_, c))| *c < 0)
        .map(|(i, (_, c))| (i, -*c))
        .collect();
    // Stable sort: equal amounts keep first-seen order.
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut payments = Vec::with_capacity(balances.len().saturating_sub(1));
    let (mut ci, mut di) = (0, 0);
    while ci < creditors.len() && di < debtors.len() {
        let amount = creditors[ci].1.min(debtors[di].1);
        payments.push(SettlementEdge {
            from_user_id: balances[debtors[di].0].0.clone(),
            to_user_id: balances[creditors[ci].0].0.clone(),
            amount: from_cents(amount),
        });
        creditors[ci].1 -= amount;
        debtors[di].1 -= amount;
        if creditors[ci].1 == 0 {
            ci += 1;
        }
        if debtors[di].1 == 0 {
            di += 1;
        }
    }
    payments
}
