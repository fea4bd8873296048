//! lifedash: personal life dashboard
//!
//! Collects a signed-in user's expenses, todos, projects and entertainment
//! from a scoped data store and derives the overview statistics and
//! chart-ready series.

pub mod cli;
pub mod config;
pub mod logging;
pub mod services;
pub mod store;
pub mod types;
