//! Catalog client adapters.

mod http;
mod mock;

pub use http::HttpCatalogClient;
pub use mock::MockCatalogClient;
