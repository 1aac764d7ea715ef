//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

type RoomTable = HashMap<String, Room>;

/// In-memory storage implementation for testing and development
///
/// Clones share the same table, so a `Splitter` and its managers all see
/// the same rooms.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    rooms: Arc<RwLock<RoomTable>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> SplitResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> SplitResult<RwLockReadGuard<'_, RoomTable>> {
        self.rooms
            .read()
            .map_err(|_| SplitError::Storage("room table lock poisoned".to_string()))
    }

    fn write(&self) -> SplitResult<RwLockWriteGuard<'_, RoomTable>> {
        self.rooms
            .write()
            .map_err(|_| SplitError::Storage("room table lock poisoned".to_string()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomStorage for MemoryStorage {
    async fn save_room(&mut self, room: &Room) -> SplitResult<()> {
        let mut rooms = self.write()?;
        if rooms.contains_key(&room.id) {
            return Err(SplitError::Storage(format!(
                "Room '{}' already exists",
                room.id
            )));
        }
        rooms.insert(room.id.clone(), room.clone());
        Ok(())
    }

    async fn get_room(&self, room_id: &str) -> SplitResult<Option<Room>> {
        Ok(self.read()?.get(room_id).cloned())
    }

    async fn list_rooms(&self) -> SplitResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.read()?.values().cloned().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rooms)
    }

    async fn delete_room(&mut self, room_id: &str) -> SplitResult<()> {
        if self.write()?.remove(room_id).is_some() {
            Ok(())
        } else {
            Err(SplitError::RoomNotFound(room_id.to_string()))
        }
    }

    async fn save_expense(&mut self, room_id: &str, expense: &ExpenseRecord) -> SplitResult<()> {
        let mut rooms = self.write()?;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| SplitError::RoomNotFound(room_id.to_string()))?;
        room.expenses.push(expense.clone());
        Ok(())
    }

    async fn update_expense(
        &mut self,
        room_id: &str,
        expense: &ExpenseRecord,
    ) -> SplitResult<()> {
        let mut rooms = self.write()?;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| SplitError::RoomNotFound(room_id.to_string()))?;
        let slot = room
            .expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| SplitError::ExpenseNotFound(expense.id.clone()))?;
        *slot = expense.clone();
        Ok(())
    }

    async fn delete_expense(&mut self, room_id: &str, expense_id: &str) -> SplitResult<()> {
        let mut rooms = self.write()?;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| SplitError::RoomNotFound(room_id.to_string()))?;
        let position = room
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| SplitError::ExpenseNotFound(expense_id.to_string()))?;
        room.expenses.remove(position);
        Ok(())
    }

    async fn get_expenses(&self, room_id: &str) -> SplitResult<Vec<ExpenseRecord>> {
        self.read()?
            .get(room_id)
            .map(|room| room.expenses.clone())
            .ok_or_else(|| SplitError::RoomNotFound(room_id.to_string()))
    }
}
