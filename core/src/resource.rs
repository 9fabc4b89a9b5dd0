//! Description of a REST collection the client can operate on.
//!
//! # Design
//! `Resource` is a type-level bundle: it never holds data, it only tells
//! `ResourceClient` where the collection lives and which Rust types travel
//! over the wire. Adding another collection means adding another marker type.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{NewUser, User, UserId, UserPatch};

/// A RESTful collection exposing list, search, create, update and delete.
pub trait Resource {
    /// Collection path relative to the base URL, starting with `/`.
    const COLLECTION: &'static str;

    /// Server-assigned identifier, rendered into `{COLLECTION}/{id}`.
    type Id: fmt::Display + fmt::Debug + Clone + Ord;

    /// Entity as returned by the server.
    type Entity: DeserializeOwned;

    /// Payload submitted on create. Its default is an empty form.
    type Draft: Serialize + Default;

    /// Payload submitted on update. Its default changes nothing.
    type Patch: Serialize + Default;

    fn id(entity: &Self::Entity) -> &Self::Id;
}

/// The `/api/users` collection.
#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Resource for Users {
    const COLLECTION: &'static str = "/api/users";

    type Id = UserId;
    type Entity = User;
    type Draft = NewUser;
    type Patch = UserPatch;

    fn id(entity: &User) -> &UserId {
        &entity.id
    }
}
