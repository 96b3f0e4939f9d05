//! Wire vocabulary shared between the browser client and the dataset service.
//!
//! - `model`: column types and the response payloads returned by each endpoint.
//! - `requests`: form payloads for the mutating endpoints.
//! - `reply`: the decoding rule applied to every service response.
//! - `error`: the error taxonomy surfaced to the user.

pub mod error;
pub mod model;
pub mod reply;
pub mod requests;
