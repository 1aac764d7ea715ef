//! Room management functionality

use crate::traits::*;
use crate::types::*;

/// Room codes are drawn from this range
pub const ROOM_ID_RANGE: std::ops::RangeInclusive<u32> = 1000..=9999;

const MAX_ROOM_ID_ATTEMPTS: usize = 100;

/// Room manager for creating, listing and removing rooms
pub struct RoomManager<S: RoomStorage> {
    pub(crate) storage: S,
    validator: Box<dyn RoomValidator>,
}

impl<S: RoomStorage> RoomManager<S> {
    /// Create a new room manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultRoomValidator),
        }
    }

    /// Create a new room manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn RoomValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a room under a fresh four digit code
    pub async fn create_room(&mut self, title: String, members: Vec<Member>) -> SplitResult<Room> {
        let room_id = self.allocate_room_id().await?;
        let room = Room::new(room_id, title, members);

        self.validator.validate_room(&room)?;
        self.storage.save_room(&room).await?;

        tracing::info!(
            room_id = %room.id,
            members = room.members.len(),
            "Created room"
        );
        Ok(room)
    }

    /// Get a room by ID
    pub async fn get_room(&self, room_id: &str) -> SplitResult<Option<Room>> {
        self.storage.get_room(room_id).await
    }

    /// Get a room by ID, returning an error if not found
    pub async fn get_room_required(&self, room_id: &str) -> SplitResult<Room> {
        self.storage
            .get_room(room_id)
            .await?
            .ok_or_else(|| SplitError::RoomNotFound(room_id.to_string()))
    }

    /// List all rooms
    pub async fn list_rooms(&self) -> SplitResult<Vec<Room>> {
        self.storage.list_rooms().await
    }

    /// Delete a room
    pub async fn delete_room(&mut self, room_id: &str) -> SplitResult<()> {
        self.storage.delete_room(room_id).await?;
        tracing::info!(room_id, "Deleted room");
        Ok(())
    }

    async fn allocate_room_id(&self) -> SplitResult<String> {
        for _ in 0..MAX_ROOM_ID_ATTEMPTS {
            let candidate = random_room_id();
            if !self.storage.room_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(SplitError::Storage(format!(
            "No free room code after {} attempts",
            MAX_ROOM_ID_ATTEMPTS
        )))
    }
}

fn random_room_id() -> String {
    // The first six bytes of a v4 UUID are fully random; the version and
    // variant bits sit further in.
    let bytes = uuid::Uuid::new_v4().into_bytes();
    let random = bytes[..6]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

    let span = u64::from(ROOM_ID_RANGE.end() - ROOM_ID_RANGE.start() + 1);
    (u64::from(*ROOM_ID_RANGE.start()) + random % span).to_string()
}
