// Module declarations
pub(crate) mod sim_cards_errors;
pub(crate) mod sim_cards_model;
pub(crate) mod sim_cards_repository;
pub(crate) mod sim_cards_service;
pub(crate) mod sim_cards_traits;

// Re-export the public interface
pub use sim_cards_errors::SimCardError;
pub use sim_cards_model::{NewPhoneNumber, NewSimCard, PhoneNumber, SimCard, SimCardUpsert};
pub use sim_cards_repository::SimCardRepository;
pub use sim_cards_service::SimCardService;
pub use sim_cards_traits::SimCardRepositoryTrait;
