//! Shared library modules for the bidwatch item page client.
//!
//! Re-exports the modules needed by the binaries (`bidwatch`,
//! `auction_server`) and the integration tests without duplicating code
//! from the main binary.

pub mod api;
pub mod config;
pub mod live;
pub mod model;
pub mod money;
pub mod page;
pub mod server;
pub mod view;
