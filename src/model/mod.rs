pub mod game;
pub mod schedule;
pub mod team;
