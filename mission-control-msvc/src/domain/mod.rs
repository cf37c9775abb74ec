pub mod astronaut_commander;
pub mod astronaut_model;
pub mod astronaut_querier;
pub mod auth_commander;
pub mod mission_commander;
pub mod mission_model;
pub mod mission_querier;
pub mod token_model;
pub mod user_model;
