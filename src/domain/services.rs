//! Service interfaces of the domain layer

pub mod site_adapter;

pub use site_adapter::{FilteredItem, ItemFailure, ListingScrape, PageFetcher, SiteAdapter};
