//! Word-bingo: score words against 27 rules, reveal rules as bingo lines
//! complete, and run the small coin economy around spoilers and samples.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
