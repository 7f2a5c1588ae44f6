pub mod auth;
pub mod catalog;
pub mod filter;
pub mod follows;
pub mod format;
pub mod history;
pub mod pipeline;
pub mod reader;
pub mod session;
pub mod sort;
pub mod stats;
pub mod translation;

#[cfg(test)]
pub mod fixtures;
