//! Request payloads accepted at the service boundary
//!
//! Field names follow the room service wire format: `name` is the payer and
//! `involved_members` the participant subset. Payloads reject unknown fields
//! and are checked once when converted into domain commands.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::validation::*;

/// Body of a create-room request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateRoomRequest {
    pub title: String,
    pub members: Vec<Member>,
}

impl CreateRoomRequest {
    /// Check the payload and split it into title and members
    pub fn into_parts(self) -> SplitResult<(String, Vec<Member>)> {
        validate_room_title(&self.title)?;
        validate_members(&self.members)?;
        Ok((self.title, self.members))
    }
}

/// Response to a create-room request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
}

impl From<&Room> for CreateRoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.clone(),
        }
    }
}

/// Body of a submit-payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitExpenseRequest {
    pub name: Member,
    pub amount: BigDecimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub involved_members: Option<Vec<Member>>,
}

impl TryFrom<SubmitExpenseRequest> for SubmitExpense {
    type Error = SplitError;

    fn try_from(request: SubmitExpenseRequest) -> SplitResult<Self> {
        validate_member_name(&request.name)?;
        validate_amount(&request.amount)?;
        if let Some(description) = &request.description {
            validate_description(description)?;
        }

        Ok(SubmitExpense {
            payer: request.name,
            amount: request.amount,
            description: request.description,
            participants: request.involved_members,
        })
    }
}

/// Body of an edit-payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditExpenseRequest {
    pub id: String,
    pub name: Member,
    pub amount: BigDecimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub involved_members: Option<Vec<Member>>,
}

impl EditExpenseRequest {
    /// Split into the target record ID and the revision to apply
    pub fn into_parts(self) -> SplitResult<(String, SubmitExpense)> {
        let revision = SubmitExpense::try_from(SubmitExpenseRequest {
            name: self.name,
            amount: self.amount,
            description: self.description,
            involved_members: self.involved_members,
        })?;
        Ok((self.id, revision))
    }
}

/// Body of a delete-payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteExpenseRequest {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_defaults() {
        let request: SubmitExpenseRequest =
            serde_json::from_str(r#"{"name": "Alice", "amount": "12.50"}"#).unwrap();
        let command = SubmitExpense::try_from(request).unwrap();

        assert_eq!(command.payer, "Alice");
        assert_eq!(command.amount, BigDecimal::new(1250.into(), 2));
        assert!(command.description.is_none());
        assert!(command.participants.is_none());
    }

    #[test]
    fn test_submit_request_rejects_unknown_fields() {
        let parsed = serde_json::from_str::<SubmitExpenseRequest>(
            r#"{"name": "Alice", "amount": 5, "tip": 1}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_submit_request_rejects_bad_amount() {
        let request: SubmitExpenseRequest =
            serde_json::from_str(r#"{"name": "Alice", "amount": -3}"#).unwrap();
        assert!(matches!(
            SubmitExpense::try_from(request),
            Err(SplitError::Validation(_))
        ));
    }

    #[test]
    fn test_submit_request_rejects_oversized_amount() {
        let request: SubmitExpenseRequest =
            serde_json::from_str(r#"{"name": "Alice", "amount": "1e200"}"#).unwrap();
        assert!(matches!(
            SubmitExpense::try_from(request),
            Err(SplitError::Validation(_))
        ));
    }

    #[test]
    fn test_edit_request_parts() {
        let request: EditExpenseRequest = serde_json::from_str(
            r#"{"id": "abc", "name": "Bob", "amount": 8, "involved_members": ["Bob"]}"#,
        )
        .unwrap();
        let (id, revision) = request.into_parts().unwrap();

        assert_eq!(id, "abc");
        assert_eq!(revision.participants, Some(vec!["Bob".to_string()]));
    }

    #[test]
    fn test_create_room_request() {
        let request: CreateRoomRequest =
            serde_json::from_str(r#"{"title": "Trip", "members": ["Alice", "Bob"]}"#).unwrap();
        let (title, members) = request.into_parts().unwrap();
        assert_eq!(title, "Trip");
        assert_eq!(members.len(), 2);

        let room = Room::new("4821".to_string(), title, members);
        let response = serde_json::to_value(CreateRoomResponse::from(&room)).unwrap();
        assert_eq!(response, serde_json::json!({"room_id": "4821"}));

        let duplicate: CreateRoomRequest =
            serde_json::from_str(r#"{"title": "Trip", "members": ["Bob", "Bob"]}"#).unwrap();
        assert!(duplicate.into_parts().is_err());
    }
}
