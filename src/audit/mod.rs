// Module declarations
pub(crate) mod audit_model;
pub(crate) mod audit_repository;

// Re-export the public interface
pub use audit_model::{AssetHistoryEvent, NewAssetHistoryEvent, ASSET_TYPE_PHONE, ASSET_TYPE_SIM, ASSET_TYPE_WORKER};
pub use audit_repository::{AuditRepository, AuditRepositoryTrait};
