pub mod hash;
pub mod state;
pub mod token;
