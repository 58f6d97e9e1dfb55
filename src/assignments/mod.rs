// Module declarations
pub(crate) mod assignments_errors;
pub(crate) mod assignments_model;
pub(crate) mod assignments_repository;
pub(crate) mod assignments_service;
pub(crate) mod assignments_traits;

// Re-export the public interface
pub use assignments_errors::AssignmentError;
pub use assignments_model::{Assignment, NewAssignment};
pub use assignments_repository::AssignmentRepository;
pub use assignments_service::AssignmentService;
pub use assignments_traits::AssignmentRepositoryTrait;
