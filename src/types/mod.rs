//! Type definitions for the fraud screening service

pub mod transaction;
pub mod verdict;

pub use transaction::{Transaction, TransactionForm};
pub use verdict::{Prediction, ScreeningReport, Verdict};
