//! Settlement engine tying aggregation and transfer matching together

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::SettlementConfig;
use crate::settlement::minimizer::describe_balances;
use crate::settlement::{effective_participants, BalanceAggregator, Settlement, TransferMinimizer};
use crate::types::*;

/// Full settlement of one snapshot of expense records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Rounded net balance per member
    pub balances: Balances,
    /// Transfers in emission order
    pub transfers: Vec<Transfer>,
    /// Balances left within rounding slack after matching
    pub residual: Balances,
    /// Sum of all expense amounts
    pub total_spent: BigDecimal,
    /// Total divided by member count, for display only
    pub average_per_person: BigDecimal,
}

/// Computes balances, transfers and summary figures for a room snapshot
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: SettlementConfig,
    aggregator: BalanceAggregator,
    minimizer: TransferMinimizer,
}

impl SettlementEngine {
    /// Create an engine with the given configuration
    pub fn new(config: SettlementConfig) -> Self {
        Self {
            aggregator: BalanceAggregator::new(config.clone()),
            minimizer: TransferMinimizer::new(config.clone()),
            config,
        }
    }

    /// Get the configuration in use
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Settle a snapshot of records for the given members
    pub fn settle(
        &self,
        members: &[Member],
        records: &[ExpenseRecord],
    ) -> SplitResult<SettlementReport> {
        validate_records(members, records)?;

        let balances = self.aggregator.aggregate(members, records);
        let settlement = self.settle_balances(&balances)?;

        let total: BigDecimal = records.iter().map(|r| &r.amount).sum();
        let average_per_person = if members.is_empty() {
            BigDecimal::from(0)
        } else {
            self.config
                .round(&(&total / BigDecimal::from(members.len() as u64)))
        };

        Ok(SettlementReport {
            balances,
            transfers: settlement.transfers,
            residual: settlement.residual,
            total_spent: self.config.round(&total),
            average_per_person,
        })
    }

    /// Match transfers for precomputed balances and check what is left over
    ///
    /// Leftovers up to one tolerance plus half a rounding unit per member are
    /// accepted as rounding slack; anything beyond that means the balances
    /// did not sum to zero.
    pub fn settle_balances(&self, balances: &Balances) -> SplitResult<Settlement> {
        let settlement = self.minimizer.settle(balances);
        if settlement.is_complete() {
            return Ok(settlement);
        }

        let leftover: BigDecimal = settlement.residual.values().map(|b| b.abs()).sum();
        let allowance = (&self.config.epsilon + self.config.half_unit())
            * BigDecimal::from(balances.len() as u64);

        if leftover > allowance {
            let residual = describe_balances(&settlement.residual);
            tracing::warn!(
                %leftover,
                %allowance,
                residual = %residual,
                "Settlement stopped with unresolved balances"
            );
            return Err(SplitError::ResidualImbalance { residual });
        }

        tracing::debug!(%leftover, "Settlement left rounding slack");
        Ok(settlement)
    }
}

/// Reject records the aggregator cannot split
pub fn validate_records(members: &[Member], records: &[ExpenseRecord]) -> SplitResult<()> {
    for record in records {
        if record.amount <= BigDecimal::from(0) {
            return Err(SplitError::MalformedInput(format!(
                "Expense '{}' has non-positive amount {}",
                record.id, record.amount
            )));
        }

        if effective_participants(members, &record.participants).is_empty() {
            return Err(SplitError::MalformedInput(format!(
                "Expense '{}' has nobody to share it",
                record.id
            )));
        }
    }

    Ok(())
}
