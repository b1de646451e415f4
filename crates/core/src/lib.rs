//! Homeroom Core — configuration, roster schema, roster client, and sync state.

pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod state;
