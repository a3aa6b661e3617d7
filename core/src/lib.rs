//! Client core for the books service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the page state in
//! an immutable `Snapshot` changed only through `Snapshot::apply`.
//!
//! # Design
//! - `BookClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit.
//! - `Session` pairs store effects with client requests and folds every
//!   response back into an event. The host decides how requests run.
//! - Stale list responses are dropped by ticket; duplicate submits and deletes
//!   are ignored while in flight.
//! - `view` maps state to text, including the fixed error messages.
//! - With the default `ureq` feature, `UreqTransport` executes requests for
//!   blocking hosts; without it the crate does no I/O at all.

pub mod client;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;
pub mod view;

pub use client::BookClient;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{Outgoing, RequestToken, Session, Transport};
pub use store::{Effect, ErrorKind, Event, Snapshot, Ticket, Transition};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{BookRecord, DraftField, DraftRecord, FilterCriteria};
