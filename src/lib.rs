pub mod db;

pub mod assignments;
pub mod audit;
pub mod imports;
pub mod phones;
pub mod sim_cards;
pub mod workers;

pub mod constants;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
pub use imports::*;
