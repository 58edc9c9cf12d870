pub mod catalog;
pub mod providers;
pub mod recommendations;
pub mod seed;
pub mod sync;

pub use providers::{CatalogProvider, HttpCatalogProvider};
