//! Inventory, sales, and accounting client for a REST backend.
//!
//! DESIGN
//! ======
//! - `net`: HTTP transport, response envelope, typed endpoints
//! - `model`: records as the backend sends them
//! - `state`: screen state (lists, forms, stock adjustment, sale cart)
//! - `services`: multi-endpoint loaders and report aggregates
//! - `commands`: the CLI screens driving all of the above

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod net;
pub mod services;
pub mod state;
pub mod util;
