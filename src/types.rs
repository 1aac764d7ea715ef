//! Core types and data structures for shared-expense rooms

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A member of a room, identified by display name
pub type Member = String;

/// Net position of every member, ordered by member name
///
/// Positive values mean the member is owed money, negative values mean the
/// member owes money. The ordering of the map is the tie-break order used
/// when settling.
pub type Balances = BTreeMap<Member, BigDecimal>;

/// Description used when an expense is logged without one
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// One logged payment inside a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier for the record
    pub id: String,
    /// Member who fronted the money
    pub payer: Member,
    /// Amount paid, strictly positive
    pub amount: BigDecimal,
    /// Free-form description, not used by settlement
    pub description: String,
    /// Members sharing the cost; empty means the whole room
    pub participants: Vec<Member>,
    /// When the record was created
    pub created_at: NaiveDateTime,
    /// When the record was last updated
    pub updated_at: NaiveDateTime,
    /// Whether the record has been edited since creation
    pub edited: bool,
}

impl ExpenseRecord {
    /// Create a new expense record with a fresh identifier
    pub fn new(payer: Member, amount: BigDecimal, participants: Vec<Member>) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payer,
            amount,
            description: DEFAULT_DESCRIPTION.to_string(),
            participants,
            created_at: now,
            updated_at: now,
            edited: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the contents of this record, keeping its identity
    pub fn revise(&mut self, revision: &SubmitExpense, participants: Vec<Member>) {
        self.payer = revision.payer.clone();
        self.amount = revision.amount.clone();
        self.description = revision
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
        self.participants = participants;
        self.updated_at = chrono::Utc::now().naive_utc();
        self.edited = true;
    }
}

/// Command for logging or editing an expense
///
/// `participants: None` means every member of the room shares the cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitExpense {
    pub payer: Member,
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub participants: Option<Vec<Member>>,
}

impl SubmitExpense {
    /// Create a command split across the whole room
    pub fn new(payer: impl Into<Member>, amount: BigDecimal) -> Self {
        Self {
            payer: payer.into(),
            amount,
            description: None,
            participants: None,
        }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the split to the given members
    pub fn participants<I, M>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Member>,
    {
        self.participants = Some(participants.into_iter().map(Into::into).collect());
        self
    }
}

/// Instruction to move money from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Member,
    pub to: Member,
    pub amount: BigDecimal,
}

/// A named group of members sharing expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Four digit room code
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Members in the order they were given at creation
    pub members: Vec<Member>,
    /// Expense records in insertion order
    pub expenses: Vec<ExpenseRecord>,
    /// When the room was created
    pub created_at: NaiveDateTime,
}

impl Room {
    /// Create an empty room
    pub fn new(id: String, title: String, members: Vec<Member>) -> Self {
        Self {
            id,
            title,
            members,
            expenses: Vec::new(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Check whether a name belongs to this room
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Find an expense record by ID
    pub fn expense(&self, expense_id: &str) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|e| e.id == expense_id)
    }
}

/// Settlement view of a room, recomputed on every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResult {
    pub title: String,
    pub members: Vec<Member>,
    pub balances: Balances,
    pub transactions: Vec<Transfer>,
    pub total_spent: BigDecimal,
    pub average_per_person: BigDecimal,
    pub payment_records: Vec<ExpenseRecord>,
}

/// Errors that can occur while splitting expenses
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Room not found: {0}")]
    RoomNotFound(String),
    #[error("Payment record not found: {0}")]
    ExpenseNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Malformed expense input: {0}")]
    MalformedInput(String),
    #[error("Settlement left unresolved balances: {residual}")]
    ResidualImbalance { residual: String },
}

/// Result type for split operations
pub type SplitResult<T> = Result<T, SplitError>;
