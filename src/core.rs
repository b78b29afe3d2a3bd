pub mod algorithms;
pub mod board;
pub mod definitions;
pub mod game;
pub mod notation;
pub mod state;
pub mod utils;
pub mod validator;
