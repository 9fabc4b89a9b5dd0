//! Typed CRUD client for RESTful collections, with `/api/users` built in.
//!
//! # Overview
//! `ResourceClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A `Transport`
//! performs the round-trip, and `ResourceApi` glues the two into the
//! `list` / `search` / `create` / `update` / `remove` calls.
//!
//! # Design
//! - `ResourceClient` and `ResourceApi` are stateless between calls.
//! - Every failure is a single `Failure` value; nothing is retried.
//! - `state` holds the caller-side pieces a front end needs (list snapshot,
//!   pending edits, new-entity draft), each owned separately.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;
pub mod state;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::{ResourceApi, UsersApi};
pub use client::ResourceClient;
pub use config::ClientConfig;
pub use error::{ConfigError, Failure};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{Resource, Users};
pub use state::{Draft, EditBuffer, Snapshot};
pub use transport::{Transport, UreqTransport};
pub use types::{NewUser, User, UserId, UserPatch};
