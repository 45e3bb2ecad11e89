//! Session facade and filesystem helpers shared by storage and configuration.

pub mod session;
pub mod utils;

pub use session::{ExpenseSession, LoadMetadata, TotalsObserver};
