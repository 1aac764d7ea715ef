//! Folding expense records into per-member balances

use bigdecimal::BigDecimal;
use std::collections::BTreeSet;

use crate::config::SettlementConfig;
use crate::types::*;

/// Resolve who shares a record's cost
///
/// Names outside `members` are dropped and duplicates collapse to their first
/// occurrence. When nothing valid remains the whole member set is used.
pub fn effective_participants(members: &[Member], participants: &[Member]) -> Vec<Member> {
    let mut seen = BTreeSet::new();
    let valid: Vec<Member> = participants
        .iter()
        .filter(|p| members.contains(p))
        .filter(|p| seen.insert(p.as_str()))
        .cloned()
        .collect();

    if valid.is_empty() {
        members.to_vec()
    } else {
        valid
    }
}

/// Computes net balances from an ordered list of expense records
#[derive(Debug, Clone, Default)]
pub struct BalanceAggregator {
    config: SettlementConfig,
}

impl BalanceAggregator {
    /// Create an aggregator with the given configuration
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// Compute every member's rounded net balance
    ///
    /// The payer is credited the full amount and every participant, the payer
    /// included when present, is debited an equal share. Records are applied
    /// in the order given.
    pub fn aggregate(&self, members: &[Member], records: &[ExpenseRecord]) -> Balances {
        let mut balances: Balances = members
            .iter()
            .map(|m| (m.clone(), BigDecimal::from(0)))
            .collect();

        for record in records {
            let participants = effective_participants(members, &record.participants);
            if participants.is_empty() {
                tracing::warn!(
                    expense_id = %record.id,
                    "Skipping expense with nobody to share it"
                );
                continue;
            }

            *balances
                .entry(record.payer.clone())
                .or_insert_with(|| BigDecimal::from(0)) += &record.amount;

            let share = &record.amount / BigDecimal::from(participants.len() as u64);
            for participant in participants {
                *balances
                    .entry(participant)
                    .or_insert_with(|| BigDecimal::from(0)) -= &share;
            }
        }

        let balances: Balances = balances
            .into_iter()
            .map(|(member, balance)| {
                let rounded = self.config.round(&balance);
                (member, rounded)
            })
            .collect();

        tracing::debug!(
            members = members.len(),
            records = records.len(),
            "Aggregated balances"
        );

        balances
    }
}

/// Aggregate with the default configuration
pub fn aggregate(members: &[Member], records: &[ExpenseRecord]) -> Balances {
    BalanceAggregator::default().aggregate(members, records)
}
