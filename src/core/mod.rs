pub mod clock;
pub mod color;
pub mod context;
pub mod interval;
pub mod models;
pub mod repository;
pub mod types;
