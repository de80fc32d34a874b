// src/services/mod.rs
pub mod auth_service;
pub mod file_service;
pub mod points_service;
pub mod schedule_service;
pub mod task_service;
pub mod user_service;
