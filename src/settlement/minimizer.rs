//! Greedy largest-creditor / largest-debtor transfer matching

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::SettlementConfig;
use crate::types::*;

/// Transfers produced for a set of balances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Transfers in emission order
    pub transfers: Vec<Transfer>,
    /// Balances still above tolerance when matching stopped
    pub residual: Balances,
}

impl Settlement {
    /// Whether every balance was brought within tolerance
    pub fn is_complete(&self) -> bool {
        self.residual.is_empty()
    }
}

/// Pairs the largest creditor with the largest debtor until balances clear
#[derive(Debug, Clone, Default)]
pub struct TransferMinimizer {
    config: SettlementConfig,
}

impl TransferMinimizer {
    /// Create a minimizer with the given configuration
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// Derive transfers that bring every balance within tolerance
    ///
    /// Each round moves `min(creditor, -debtor)` from the most negative
    /// balance to the most positive one, so at least one of the two is
    /// cleared per transfer. Ties resolve to the first member in map order.
    pub fn settle(&self, balances: &Balances) -> Settlement {
        let epsilon = &self.config.epsilon;
        let neg_epsilon = -epsilon.clone();

        let mut open: Balances = balances
            .iter()
            .filter(|(_, balance)| balance.abs() > *epsilon)
            .map(|(member, balance)| (member.clone(), balance.clone()))
            .collect();
        let mut transfers = Vec::new();

        while !open.is_empty() {
            let creditor =
                first_extreme(open.iter().filter(|(_, b)| **b > *epsilon), |a, b| a > b);
            let debtor =
                first_extreme(open.iter().filter(|(_, b)| **b < neg_epsilon), |a, b| a < b);

            let (Some((creditor, credit)), Some((debtor, debt))) = (creditor, debtor) else {
                break;
            };

            let owed = debt.abs();
            let amount = self.config.round(if *credit < owed { credit } else { &owed });
            if amount <= *epsilon {
                break;
            }

            let creditor = creditor.clone();
            let debtor = debtor.clone();

            if let Some(balance) = open.get_mut(&creditor) {
                *balance -= &amount;
            }
            if let Some(balance) = open.get_mut(&debtor) {
                *balance += &amount;
            }
            open.retain(|_, balance| balance.abs() > *epsilon);

            tracing::debug!(from = %debtor, to = %creditor, %amount, "Emitting transfer");
            transfers.push(Transfer {
                from: debtor,
                to: creditor,
                amount,
            });
        }

        if !open.is_empty() {
            tracing::debug!(
                open = open.len(),
                transfers = transfers.len(),
                "Matching stopped with open balances"
            );
        }

        Settlement {
            transfers,
            residual: open,
        }
    }
}

/// Pick the extreme entry, keeping the earliest one on ties
fn first_extreme<'a, I, F>(entries: I, better: F) -> Option<(&'a Member, &'a BigDecimal)>
where
    I: Iterator<Item = (&'a Member, &'a BigDecimal)>,
    F: Fn(&BigDecimal, &BigDecimal) -> bool,
{
    entries.fold(None, |best, candidate| match best {
        Some(current) if !better(candidate.1, current.1) => Some(current),
        _ => Some(candidate),
    })
}

/// Settle with the default configuration, returning only the transfers
///
/// Balances left unmatched are logged at `warn`. Use
/// [`TransferMinimizer::settle`] to get them back as data.
pub fn settle(balances: &Balances) -> Vec<Transfer> {
    let settlement = TransferMinimizer::default().settle(balances);
    if !settlement.is_complete() {
        tracing::warn!(
            residual = %describe_balances(&settlement.residual),
            "Settlement stopped with unmatched balances"
        );
    }
    settlement.transfers
}

/// Render balances as `member: amount` pairs in map order
pub(crate) fn describe_balances(balances: &Balances) -> String {
    balances
        .iter()
        .map(|(member, balance)| format!("{member}: {balance}"))
        .collect::<Vec<_>>()
        .join(", ")
}
