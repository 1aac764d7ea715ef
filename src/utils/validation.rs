//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;
use std::collections::HashSet;

/// Whole-number digits an amount may carry (up to 999 999 999 999 999)
pub const MAX_AMOUNT_DIGITS: i64 = 15;

/// Validate that an amount is positive and below `10^MAX_AMOUNT_DIGITS`
pub fn validate_amount(amount: &BigDecimal) -> SplitResult<()> {
    // digits - exponent = digits left of the decimal point
    let (_, exponent) = amount.as_bigint_and_exponent();
    if amount.digits() as i64 - exponent > MAX_AMOUNT_DIGITS {
        return Err(SplitError::Validation(format!(
            "Amount cannot exceed {} whole digits",
            MAX_AMOUNT_DIGITS
        )));
    }

    if *amount <= BigDecimal::from(0) {
        return Err(SplitError::Validation(
            "Amount must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Validate that an amount has no more than `scale` decimal places
///
/// Trailing zeros do not count, so `12.500` passes at scale 2.
pub fn validate_amount_scale(amount: &BigDecimal, scale: i64) -> SplitResult<()> {
    let (_, exponent) = amount.normalized().as_bigint_and_exponent();
    if exponent > scale {
        return Err(SplitError::Validation(format!(
            "Amount {} has more than {} decimal places",
            amount, scale
        )));
    }

    Ok(())
}

/// Validate that a member name is valid
pub fn validate_member_name(name: &str) -> SplitResult<()> {
    if name.trim().is_empty() {
        return Err(SplitError::Validation(
            "Member name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > 50 {
        return Err(SplitError::Validation(
            "Member name cannot exceed 50 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a room's member list: non-empty, valid names, no duplicates
pub fn validate_members(members: &[Member]) -> SplitResult<()> {
    if members.is_empty() {
        return Err(SplitError::Validation(
            "A room needs at least one member".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for member in members {
        validate_member_name(member)?;
        if !seen.insert(member.as_str()) {
            return Err(SplitError::Validation(format!(
                "Member '{}' appears more than once",
                member
            )));
        }
    }

    Ok(())
}

/// Validate that a room title is valid
pub fn validate_room_title(title: &str) -> SplitResult<()> {
    if title.trim().is_empty() {
        return Err(SplitError::Validation(
            "Room title cannot be empty".to_string(),
        ));
    }

    if title.chars().count() > 100 {
        return Err(SplitError::Validation(
            "Room title cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that an expense description is valid
pub fn validate_description(description: &str) -> SplitResult<()> {
    if description.chars().count() > 500 {
        return Err(SplitError::Validation(
            "Description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Strict expense validator: unknown or repeated participants are rejected
/// instead of being dropped from the split
pub struct StrictExpenseValidator;

impl ExpenseValidator for StrictExpenseValidator {
    fn validate_expense(&self, room: &Room, expense: &SubmitExpense) -> SplitResult<()> {
        DefaultExpenseValidator.validate_expense(room, expense)?;

        let Some(participants) = &expense.participants else {
            return Ok(());
        };

        if participants.is_empty() {
            return Err(SplitError::Validation(
                "Participant list cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for participant in participants {
            if !room.has_member(participant) {
                return Err(SplitError::Validation(format!(
                    "Participant '{}' is not a member of room {}",
                    participant, room.id
                )));
            }
            if !seen.insert(participant.as_str()) {
                return Err(SplitError::Validation(format!(
                    "Participant '{}' appears more than once",
                    participant
                )));
            }
        }

        Ok(())
    }
}

/// Enhanced room validator: caps room size and rejects padded names
pub struct EnhancedRoomValidator;

impl EnhancedRoomValidator {
    pub const MAX_MEMBERS: usize = 50;
}

impl RoomValidator for EnhancedRoomValidator {
    fn validate_room(&self, room: &Room) -> SplitResult<()> {
        DefaultRoomValidator.validate_room(room)?;

        if room.members.len() > Self::MAX_MEMBERS {
            return Err(SplitError::Validation(format!(
                "A room cannot have more than {} members",
                Self::MAX_MEMBERS
            )));
        }

        if let Some(member) = room.members.iter().find(|m| m.trim() != m.as_str()) {
            return Err(SplitError::Validation(format!(
                "Member name '{}' has leading or trailing whitespace",
                member
            )));
        }

        Ok(())
    }
}
