//! Task Board library
//!
//! A SQLite-backed task store, the HTTP service exposing it, and the client
//! view state that drives the terminal front end.

pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod types;
