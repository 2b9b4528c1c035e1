pub mod mental;
pub mod progression;
