//! Room service facade coordinating rooms, expenses and settlement

use crate::config::SettlementConfig;
use crate::rooms::{ExpenseManager, RoomManager};
use crate::settlement::SettlementEngine;
use crate::traits::*;
use crate::types::*;

/// Shared-expense service over a room storage backend
///
/// Balances and transfers are never stored; `room_result` recomputes them
/// from the room's current records on every call.
pub struct Splitter<S: RoomStorage> {
    room_manager: RoomManager<S>,
    expense_manager: ExpenseManager<S>,
    engine: SettlementEngine,
}

impl<S: RoomStorage + Clone> Splitter<S> {
    /// Create a new splitter with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            room_manager: RoomManager::new(storage.clone()),
            expense_manager: ExpenseManager::new(storage),
            engine: SettlementEngine::default(),
        }
    }

    /// Create a new splitter with a custom settlement configuration
    pub fn with_config(storage: S, config: SettlementConfig) -> SplitResult<Self> {
        config.validate()?;
        Ok(Self {
            room_manager: RoomManager::new(storage.clone()),
            expense_manager: ExpenseManager::new(storage).with_amount_scale(config.scale),
            engine: SettlementEngine::new(config),
        })
    }

    /// Create a new splitter with custom validators
    pub fn with_validators(
        storage: S,
        room_validator: Box<dyn RoomValidator>,
        expense_validator: Box<dyn ExpenseValidator>,
    ) -> Self {
        Self {
            room_manager: RoomManager::with_validator(storage.clone(), room_validator),
            expense_manager: ExpenseManager::with_validator(storage, expense_validator),
            engine: SettlementEngine::default(),
        }
    }

    /// Get the settlement engine in use
    pub fn engine(&self) -> &SettlementEngine {
        &self.engine
    }

    // Room operations
    /// Create a new room
    pub async fn create_room(&mut self, title: String, members: Vec<Member>) -> SplitResult<Room> {
        self.room_manager.create_room(title, members).await
    }

    /// Get a room by ID
    pub async fn get_room(&self, room_id: &str) -> SplitResult<Option<Room>> {
        self.room_manager.get_room(room_id).await
    }

    /// List all rooms
    pub async fn list_rooms(&self) -> SplitResult<Vec<Room>> {
        self.room_manager.list_rooms().await
    }

    /// Delete a room
    pub async fn delete_room(&mut self, room_id: &str) -> SplitResult<()> {
        self.room_manager.delete_room(room_id).await
    }

    // Expense operations
    /// Log a new expense
    pub async fn submit_expense(
        &mut self,
        room_id: &str,
        expense: SubmitExpense,
    ) -> SplitResult<ExpenseRecord> {
        self.expense_manager.submit_expense(room_id, expense).await
    }

    /// Edit an existing expense
    pub async fn edit_expense(
        &mut self,
        room_id: &str,
        expense_id: &str,
        revision: SubmitExpense,
    ) -> SplitResult<ExpenseRecord> {
        self.expense_manager
            .edit_expense(room_id, expense_id, revision)
            .await
    }

    /// Delete an expense
    pub async fn delete_expense(&mut self, room_id: &str, expense_id: &str) -> SplitResult<()> {
        self.expense_manager
            .delete_expense(room_id, expense_id)
            .await
    }

    /// List a room's expenses in insertion order
    pub async fn list_expenses(&self, room_id: &str) -> SplitResult<Vec<ExpenseRecord>> {
        self.expense_manager.list_expenses(room_id).await
    }

    // Settlement
    /// Compute balances, transfers and totals for a room
    pub async fn room_result(&self, room_id: &str) -> SplitResult<RoomResult> {
        let room = self.room_manager.get_room_required(room_id).await?;
        let report = self.engine.settle(&room.members, &room.expenses)?;

        tracing::debug!(
            room_id,
            transfers = report.transfers.len(),
            "Computed room result"
        );

        Ok(RoomResult {
            title: room.title,
            members: room.members,
            balances: report.balances,
            transactions: report.transfers,
            total_spent: report.total_spent,
            average_per_person: report.average_per_person,
            payment_records: room.expenses,
        })
    }
}
