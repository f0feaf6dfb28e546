pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod render;
pub mod schedule;
pub mod state;
pub mod term;
pub mod view;
