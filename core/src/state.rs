//! Caller-owned state for a list-and-edit front end.
//!
//! # Design
//! Each concern gets its own holder instead of one shared bag: the fetched
//! list (`Snapshot`), the per-row pending edits (`EditBuffer`) and the
//! new-entity form (`Draft`). Every holder changes only after the server has
//! acknowledged a call; a `Failure` leaves it exactly as it was.
//!
//! None of the holders refresh each other. After a successful mutation the
//! caller marks its snapshot stale and refreshes when it chooses to.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::api::ResourceApi;
use crate::error::Failure;
use crate::resource::Resource;
use crate::transport::Transport;

/// Last list fetched from the server.
///
/// Starts out stale and empty. Only the server holds authoritative data, so
/// the entries are a point-in-time copy.
pub struct Snapshot<R: Resource> {
    entries: Vec<R::Entity>,
    stale: bool,
}

impl<R: Resource> Snapshot<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            stale: true,
        }
    }

    pub fn entries(&self) -> &[R::Entity] {
        &self.entries
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn get(&self, id: &R::Id) -> Option<&R::Entity> {
        self.entries.iter().find(|entity| R::id(entity) == id)
    }

    pub fn contains(&self, id: &R::Id) -> bool {
        self.get(id).is_some()
    }

    /// Replace the entries with the full collection.
    pub fn refresh<T: Transport>(&mut self, api: &ResourceApi<R, T>) -> Result<(), Failure> {
        let entries = api.list()?;
        self.replace(entries);
        Ok(())
    }

    /// Replace the entries with the server's answer to `query`.
    pub fn refresh_search<T: Transport>(
        &mut self,
        api: &ResourceApi<R, T>,
        query: &str,
    ) -> Result<(), Failure> {
        let entries = api.search(query)?;
        self.replace(entries);
        Ok(())
    }

    fn replace(&mut self, entries: Vec<R::Entity>) {
        debug!(collection = R::COLLECTION, count = entries.len(), "snapshot refreshed");
        self.entries = entries;
        self.stale = false;
    }
}

impl<R: Resource> Default for Snapshot<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> fmt::Debug for Snapshot<R>
where
    R::Entity: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("entries", &self.entries)
            .field("stale", &self.stale)
            .finish()
    }
}

/// Pending patches keyed by entity id.
///
/// An entry is removed by `commit` only once the server has accepted the
/// update, never before.
pub struct EditBuffer<R: Resource> {
    pending: BTreeMap<R::Id, R::Patch>,
}

impl<R: Resource> EditBuffer<R> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }

    /// Patch for `id`, created empty on first use.
    pub fn edit(&mut self, id: &R::Id) -> &mut R::Patch {
        self.pending.entry(id.clone()).or_default()
    }

    /// Replace whatever is pending for `id`.
    pub fn stage(&mut self, id: R::Id, patch: R::Patch) {
        self.pending.insert(id, patch);
    }

    pub fn pending(&self, id: &R::Id) -> Option<&R::Patch> {
        self.pending.get(id)
    }

    pub fn discard(&mut self, id: &R::Id) -> Option<R::Patch> {
        self.pending.remove(id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Send the pending patch for `id`.
    ///
    /// Returns `Ok(false)` without touching the network when nothing is
    /// staged for `id`. On failure the patch stays staged.
    pub fn commit<T: Transport>(
        &mut self,
        api: &ResourceApi<R, T>,
        id: &R::Id,
    ) -> Result<bool, Failure> {
        let Some(patch) = self.pending.get(id) else {
            return Ok(false);
        };
        api.update(id, patch)?;
        self.pending.remove(id);
        debug!(collection = R::COLLECTION, %id, "pending edit committed");
        Ok(true)
    }
}

impl<R: Resource> Default for EditBuffer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> fmt::Debug for EditBuffer<R>
where
    R::Patch: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditBuffer")
            .field("pending", &self.pending)
            .finish()
    }
}

/// The form for an entity that does not exist yet.
pub struct Draft<R: Resource> {
    fields: R::Draft,
}

impl<R: Resource> Draft<R> {
    pub fn new() -> Self {
        Self {
            fields: R::Draft::default(),
        }
    }

    pub fn fields(&self) -> &R::Draft {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut R::Draft {
        &mut self.fields
    }

    /// Create the entity and clear the form. The form is kept on failure.
    pub fn submit<T: Transport>(&mut self, api: &ResourceApi<R, T>) -> Result<R::Entity, Failure> {
        let created = api.create(&self.fields)?;
        self.fields = R::Draft::default();
        debug!(collection = R::COLLECTION, id = %R::id(&created), "draft submitted");
        Ok(created)
    }
}

impl<R: Resource> Default for Draft<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> fmt::Debug for Draft<R>
where
    R::Draft: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft").field("fields", &self.fields).finish()
    }
}
