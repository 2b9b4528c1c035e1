pub mod config;
pub mod object;
pub mod player;
