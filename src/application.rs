//! Application layer module
//!
//! Site adapters that combine a page fetcher with the page parsers.

pub mod lh_adapter;

pub use lh_adapter::LhAdapter;
