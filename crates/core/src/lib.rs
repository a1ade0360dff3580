//! Movie catalog domain: records, poster storage, paging and the
//! [`catalog::CatalogService`] that keeps records and poster files in step.

pub mod catalog;
pub mod error;
pub mod memory;
pub mod movie;
pub mod paging;
pub mod poster;
pub mod store;
pub mod types;
