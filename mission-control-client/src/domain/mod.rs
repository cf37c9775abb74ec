pub mod astronaut_controller;
pub mod astronaut_model;
pub mod auth_controller;
pub mod mission_controller;
pub mod mission_model;
pub mod session_guard;
pub mod user_model;
