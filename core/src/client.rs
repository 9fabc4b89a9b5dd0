//! Stateless HTTP request builder and response parser for a REST collection.
//!
//! # Design
//! `ResourceClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Executing the round-trip is left to a `Transport`, keeping
//! this half deterministic and free of I/O.

use std::fmt;
use std::marker::PhantomData;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::error::Failure;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::Resource;

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Everything except RFC 3986 unreserved characters is escaped, so an id is
/// always exactly one path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Synchronous, stateless client for one collection `R`.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
pub struct ResourceClient<R: Resource> {
    base_url: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            _resource: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, R::COLLECTION)
    }

    fn entity_url(&self, id: &R::Id) -> String {
        let segment = utf8_percent_encode(&id.to_string(), PATH_SEGMENT).to_string();
        format!("{}{}/{segment}", self.base_url, R::COLLECTION)
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The `search` pair is sent even for an empty query; what the server
    /// returns for it is the server's business.
    pub fn build_search(&self, query: &str) -> HttpRequest {
        HttpRequest {
            query: vec![("search".to_string(), query.to_string())],
            ..self.build_list()
        }
    }

    pub fn build_create(&self, draft: &R::Draft) -> Result<HttpRequest, Failure> {
        let body = serde_json::to_string(draft).map_err(Failure::Encode)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.collection_url(),
            query: Vec::new(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update(&self, id: &R::Id, patch: &R::Patch) -> Result<HttpRequest, Failure> {
        let body = serde_json::to_string(patch).map_err(Failure::Encode)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.entity_url(id),
            query: Vec::new(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_remove(&self, id: &R::Id) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.entity_url(id),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<R::Entity>, Failure> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<R::Entity>, Failure> {
        self.parse_list(response)
    }

    /// The returned entity is whatever the server sent back, which need not
    /// match the submitted draft.
    pub fn parse_create(&self, response: HttpResponse) -> Result<R::Entity, Failure> {
        check_status(&response)?;
        decode(&response)
    }

    /// Any body the server attaches to an update is ignored.
    pub fn parse_update(&self, response: HttpResponse) -> Result<(), Failure> {
        check_status(&response)
    }

    pub fn parse_remove(&self, response: HttpResponse) -> Result<(), Failure> {
        check_status(&response)
    }
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base_url", &self.base_url)
            .field("collection", &R::COLLECTION)
            .finish()
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())]
}

/// Map non-2xx status codes to the appropriate `Failure` variant.
fn check_status(response: &HttpResponse) -> Result<(), Failure> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(Failure::NotFound);
    }
    Err(Failure::Server {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, Failure> {
    serde_json::from_str(&response.body).map_err(Failure::Decode)
}
