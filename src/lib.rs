//! # LightSplit Core
//!
//! Shared-expense rooms: members log who paid for what, and the library works
//! out each member's net balance and a short list of transfers that settles
//! everyone up.
//!
//! ## Features
//!
//! - **Balance aggregation**: payer credited in full, cost split evenly across participants
//! - **Transfer settlement**: greedy largest-creditor / largest-debtor matching
//! - **Fixed-point amounts**: `BigDecimal` with configurable scale and rounding
//! - **Room service**: create rooms, submit, edit and delete payment records
//! - **Storage abstraction**: trait-based room storage with an in-memory backend
//!
//! ## Quick Start
//!
//! ```rust
//! use lightsplit_core::{aggregate, settle, ExpenseRecord};
//! use bigdecimal::BigDecimal;
//!
//! let members = vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()];
//! let records = vec![ExpenseRecord::new("Alice".to_string(), BigDecimal::from(90), vec![])];
//!
//! let balances = aggregate(&members, &records);
//! let transfers = settle(&balances);
//!
//! assert_eq!(balances["Alice"], BigDecimal::from(60));
//! assert_eq!(transfers.len(), 2);
//! ```

pub mod config;
pub mod requests;
pub mod rooms;
pub mod settlement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use requests::*;
pub use rooms::*;
pub use settlement::*;
pub use traits::*;
pub use types::*;
