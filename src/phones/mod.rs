// Module declarations
pub(crate) mod phones_errors;
pub(crate) mod phones_model;
pub(crate) mod phones_repository;
pub(crate) mod phones_service;
pub(crate) mod phones_traits;

// Re-export the public interface
pub use phones_errors::PhoneError;
pub use phones_model::{NewPhone, Phone, PhoneUpsert};
pub use phones_repository::PhoneRepository;
pub use phones_service::PhoneService;
pub use phones_traits::PhoneRepositoryTrait;
