//! Shared test helpers.

pub mod graph_fixtures;
