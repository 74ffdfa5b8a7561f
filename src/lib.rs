//! Splits a group bill and proposes the transfers that settle it.
//!
//! [`balance::compute_summary`] works out what everybody paid and owes,
//! [`exchange::compute_settlements`] turns that into a short payment plan
//! where couples pay and receive as one.

pub mod api;
pub mod balance;
pub mod config;
pub mod couples;
pub mod drafts;
pub mod error;
pub mod exchange;
pub mod schemas;
pub mod settled;
pub mod share;

pub use balance::compute_summary;
pub use couples::{CoupleRegistry, Roster};
pub use error::{Error, Result};
pub use exchange::compute_settlements;
pub use schemas::{BillSummary, Expense, Person, PersonBreakdown, SettlementStep};
