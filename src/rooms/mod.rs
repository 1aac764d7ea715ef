//! Rooms module containing room management and expense processing

pub mod expense;
pub mod room;
pub mod service;

pub use expense::*;
pub use room::*;
pub use service::*;
