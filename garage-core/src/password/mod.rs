//! Password persistence and enrollment/verification
//!
//! Runs on the actuation node, which is the only holder of the stored
//! password. The interface node never sees it; it only learns the verdict.

mod manager;
mod store;

pub use manager::PasswordManager;
pub use store::PasswordStore;
