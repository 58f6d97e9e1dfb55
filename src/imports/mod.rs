// Module declarations
pub(crate) mod csv_parser;
pub(crate) mod imports_constants;
pub(crate) mod imports_errors;
pub(crate) mod imports_model;
pub(crate) mod imports_repository;
pub(crate) mod imports_service;
pub(crate) mod imports_traits;
pub(crate) mod mapping_resolver;
pub(crate) mod schema_catalog;

// Re-export the public interface
pub use csv_parser::{parse, preview, ParsedRows};
pub use imports_constants::*;
pub use imports_errors::ImportError;
pub use imports_model::{
    ColumnDescriptor, ColumnMap, ColumnMapping, ImportPreview, ImportResult, ImportTarget,
    ParsedRow, RowError, RowOutcome,
};
pub use imports_repository::ImportRepository;
pub use imports_service::ImportService;
pub use imports_traits::{ImportRepositoryTrait, ImportServiceTrait};
pub use mapping_resolver::{propose_mapping, validate};
pub use schema_catalog::get_schema;
