// src/models/mod.rs
pub mod file;
pub mod points;
pub mod schedule;
pub mod task;
pub mod user;
