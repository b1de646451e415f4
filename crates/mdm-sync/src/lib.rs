//! Homeroom MDM Sync — reconciles roster classes into MDM class groups.

pub mod client;
pub mod diff;
pub mod filter;
pub mod index;
pub mod record;
pub mod resolve;
pub mod sync;
