//! MindHaven support API — library crate for the student support server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `mh-e2e-tests`) can access internal types like `AppState`,
//! `build_router`, and the classifier traits.

pub mod auth;
pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
