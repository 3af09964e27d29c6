pub mod mode;
pub mod temperature;
