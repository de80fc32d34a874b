// src/web/mod.rs
pub mod auth_handlers;
pub mod feedback;
pub mod file_handlers;
pub mod home_handlers;
pub mod mw_auth;
pub mod points_handlers;
pub mod routes;
pub mod schedule_handlers;
pub mod task_handlers;
