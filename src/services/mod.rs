// Service exports
pub mod catalog;

pub use catalog::{CatalogError, ProgramCatalog};
