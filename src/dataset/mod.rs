//! Page records produced by the crawl and the store they are read from

pub mod schema;
pub mod store;

pub use schema::PageRecord;
pub use store::DatasetStore;
