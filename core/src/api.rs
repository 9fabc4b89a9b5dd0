//! Executing client: one `ResourceClient` request, one `Transport` exchange.
//!
//! Calls are independent of each other. Nothing is retried, cached or
//! coalesced; overlapping callers must reconcile results themselves.

use tracing::debug;

use crate::client::ResourceClient;
use crate::config::ClientConfig;
use crate::error::Failure;
use crate::resource::{Resource, Users};
use crate::transport::{Transport, UreqTransport};

/// Typed CRUD operations on collection `R` over transport `T`.
#[derive(Debug, Clone)]
pub struct ResourceApi<R: Resource, T = UreqTransport> {
    client: ResourceClient<R>,
    transport: T,
}

/// The users collection over the default blocking transport.
pub type UsersApi<T = UreqTransport> = ResourceApi<Users, T>;

impl<R: Resource> ResourceApi<R, UreqTransport> {
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(ResourceClient::new(&config.base_url()), UreqTransport::new())
    }
}

impl<R: Resource, T: Transport> ResourceApi<R, T> {
    pub fn new(client: ResourceClient<R>, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ResourceClient<R> {
        &self.client
    }

    pub fn list(&self) -> Result<Vec<R::Entity>, Failure> {
        debug!(collection = R::COLLECTION, "list");
        let response = self.transport.execute(self.client.build_list())?;
        self.client.parse_list(response)
    }

    pub fn search(&self, query: &str) -> Result<Vec<R::Entity>, Failure> {
        debug!(collection = R::COLLECTION, query, "search");
        let response = self.transport.execute(self.client.build_search(query))?;
        self.client.parse_search(response)
    }

    pub fn create(&self, draft: &R::Draft) -> Result<R::Entity, Failure> {
        debug!(collection = R::COLLECTION, "create");
        let response = self.transport.execute(self.client.build_create(draft)?)?;
        self.client.parse_create(response)
    }

    pub fn update(&self, id: &R::Id, patch: &R::Patch) -> Result<(), Failure> {
        debug!(collection = R::COLLECTION, %id, "update");
        let response = self.transport.execute(self.client.build_update(id, patch)?)?;
        self.client.parse_update(response)
    }

    pub fn remove(&self, id: &R::Id) -> Result<(), Failure> {
        debug!(collection = R::COLLECTION, %id, "remove");
        let response = self.transport.execute(self.client.build_remove(id))?;
        self.client.parse_remove(response)
    }
}
