//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;
use crate::utils::validation::*;

/// Storage abstraction for rooms and their expense records
///
/// This trait keeps the room service independent of where rooms live
/// (in-memory table, SQL database, key-value store, etc.).
#[async_trait]
pub trait RoomStorage: Send + Sync {
    /// Save a new room
    async fn save_room(&mut self, room: &Room) -> SplitResult<()>;

    /// Get a room by ID
    async fn get_room(&self, room_id: &str) -> SplitResult<Option<Room>>;

    /// List all rooms
    async fn list_rooms(&self) -> SplitResult<Vec<Room>>;

    /// Delete a room together with its records
    async fn delete_room(&mut self, room_id: &str) -> SplitResult<()>;

    /// Check whether a room ID is taken
    async fn room_exists(&self, room_id: &str) -> SplitResult<bool> {
        Ok(self.get_room(room_id).await?.is_some())
    }

    /// Append an expense record to a room
    async fn save_expense(&mut self, room_id: &str, expense: &ExpenseRecord) -> SplitResult<()>;

    /// Replace an expense record in place
    async fn update_expense(&mut self, room_id: &str, expense: &ExpenseRecord)
        -> SplitResult<()>;

    /// Remove an expense record
    async fn delete_expense(&mut self, room_id: &str, expense_id: &str) -> SplitResult<()>;

    /// Get a room's expense records in insertion order
    async fn get_expenses(&self, room_id: &str) -> SplitResult<Vec<ExpenseRecord>>;
}

/// Trait for implementing custom room validation rules
pub trait RoomValidator: Send + Sync {
    /// Validate a room before it is created
    fn validate_room(&self, room: &Room) -> SplitResult<()>;
}

/// Trait for implementing custom expense validation rules
pub trait ExpenseValidator: Send + Sync {
    /// Validate an expense command against the room it targets
    fn validate_expense(&self, room: &Room, expense: &SubmitExpense) -> SplitResult<()>;
}

/// Default room validator: title and member list checks
pub struct DefaultRoomValidator;

impl RoomValidator for DefaultRoomValidator {
    fn validate_room(&self, room: &Room) -> SplitResult<()> {
        validate_room_title(&room.title)?;
        validate_members(&room.members)
    }
}

/// Default expense validator
///
/// Unknown participant names are allowed here; they are dropped from the
/// split when the record is stored.
pub struct DefaultExpenseValidator;

impl ExpenseValidator for DefaultExpenseValidator {
    fn validate_expense(&self, room: &Room, expense: &SubmitExpense) -> SplitResult<()> {
        validate_amount(&expense.amount)?;

        if !room.has_member(&expense.payer) {
            return Err(SplitError::Validation(format!(
                "Payer '{}' is not a member of room {}",
                expense.payer, room.id
            )));
        }

        if let Some(description) = &expense.description {
            validate_description(description)?;
        }

        Ok(())
    }
}
