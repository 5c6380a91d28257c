//! REST client for the inventory backend.
//!
//! DESIGN
//! ======
//! Three layers, each testable on its own:
//!
//! - `transport`: moves a request over HTTP (or a test double)
//! - `envelope`: the one documented response shape, decoded at the boundary
//! - `api`: typed endpoint methods built on the two
//!
//! ERROR HANDLING
//! ==============
//! Every failure surfaces as `ApiError`; screens only ever see typed records
//! or an error message to display.

pub mod api;
pub mod envelope;
pub mod error;
pub mod transport;

pub use api::ApiClient;
pub use error::ApiError;
pub use transport::{ApiRequest, Method, RawResponse, Transport};

#[cfg(test)]
#[path = "mock_test.rs"]
pub mod mock;
