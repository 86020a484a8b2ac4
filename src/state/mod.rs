mod manager;
mod persistence;

pub use manager::HouseholdStore;
pub use persistence::{HouseholdState, load_state, save_state};
