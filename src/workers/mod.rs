// Module declarations
pub(crate) mod workers_errors;
pub(crate) mod workers_model;
pub(crate) mod workers_repository;
pub(crate) mod workers_service;
pub(crate) mod workers_traits;

// Re-export the public interface
pub use workers_errors::WorkerError;
pub use workers_model::{worker_code_from_name, NewSecteur, NewWorker, Secteur, Worker};
pub use workers_repository::WorkerRepository;
pub use workers_service::WorkerService;
pub use workers_traits::WorkerRepositoryTrait;
