//! Expense record processing and management

use crate::config::SettlementConfig;
use crate::settlement::effective_participants;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_amount_scale;

/// Expense manager for logging, editing and removing payment records
pub struct ExpenseManager<S: RoomStorage> {
    storage: S,
    validator: Box<dyn ExpenseValidator>,
    amount_scale: i64,
}

impl<S: RoomStorage> ExpenseManager<S> {
    /// Create a new expense manager
    pub fn new(storage: S) -> Self {
        Self::with_validator(storage, Box::new(DefaultExpenseValidator))
    }

    /// Create a new expense manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn ExpenseValidator>) -> Self {
        Self {
            storage,
            validator,
            amount_scale: SettlementConfig::default().scale,
        }
    }

    /// Accept amounts with up to `scale` decimal places
    pub fn with_amount_scale(mut self, scale: i64) -> Self {
        self.amount_scale = scale;
        self
    }

    fn check(&self, room: &Room, expense: &SubmitExpense) -> SplitResult<()> {
        self.validator.validate_expense(room, expense)?;
        validate_amount_scale(&expense.amount, self.amount_scale)
    }

    /// Log a new expense at the end of the room's record list
    pub async fn submit_expense(
        &mut self,
        room_id: &str,
        expense: SubmitExpense,
    ) -> SplitResult<ExpenseRecord> {
        let room = self.room_required(room_id).await?;
        self.check(&room, &expense)?;

        let participants = resolve_participants(&room, &expense);
        let mut record = ExpenseRecord::new(expense.payer, expense.amount, participants);
        if let Some(description) = expense.description {
            record = record.with_description(description);
        }

        self.storage.save_expense(room_id, &record).await?;

        tracing::info!(
            room_id,
            expense_id = %record.id,
            payer = %record.payer,
            amount = %record.amount,
            "Recorded expense"
        );
        Ok(record)
    }

    /// Replace the contents of an existing expense, keeping its position
    pub async fn edit_expense(
        &mut self,
        room_id: &str,
        expense_id: &str,
        revision: SubmitExpense,
    ) -> SplitResult<ExpenseRecord> {
        let room = self.room_required(room_id).await?;
        let mut record = room
            .expense(expense_id)
            .cloned()
            .ok_or_else(|| SplitError::ExpenseNotFound(expense_id.to_string()))?;

        self.check(&room, &revision)?;

        let participants = resolve_participants(&room, &revision);
        record.revise(&revision, participants);
        self.storage.update_expense(room_id, &record).await?;

        tracing::info!(room_id, expense_id, "Edited expense");
        Ok(record)
    }

    /// Remove an expense
    pub async fn delete_expense(&mut self, room_id: &str, expense_id: &str) -> SplitResult<()> {
        self.room_required(room_id).await?;
        self.storage.delete_expense(room_id, expense_id).await?;

        tracing::info!(room_id, expense_id, "Deleted expense");
        Ok(())
    }

    /// List a room's expenses in insertion order
    pub async fn list_expenses(&self, room_id: &str) -> SplitResult<Vec<ExpenseRecord>> {
        self.storage.get_expenses(room_id).await
    }

    async fn room_required(&self, room_id: &str) -> SplitResult<Room> {
        self.storage
            .get_room(room_id)
            .await?
            .ok_or_else(|| SplitError::RoomNotFound(room_id.to_string()))
    }
}

/// Stored participant list: known names only, defaulting to the whole room
fn resolve_participants(room: &Room, expense: &SubmitExpense) -> Vec<Member> {
    match &expense.participants {
        Some(participants) => effective_participants(&room.members, participants),
        None => room.members.clone(),
    }
}
