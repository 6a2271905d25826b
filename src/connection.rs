//! Port traits for the consumed connection capability.
//!
//! The adapter never opens sockets or speaks the wire protocol; it drives a
//! [`Connection`] the caller supplies. Every method here is one blocking
//! remote round-trip (or a local state query) returning the raw [`Status`]
//! word of the reply. Translation into the crate's error surface happens in
//! the [`Collection`](crate::Collection) handle, never below it.

use crate::status::Status;
use crate::types::{IndexSpec, QueryRequest};
use bson::Document;

/// Reconnect generation token.
///
/// Each successful [`Connection::connect`] advances the epoch. Session-scoped
/// collection refs do not survive a reconnect, so a handle re-resolves its
/// ref whenever the cached epoch differs from the connection's current one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Epoch(pub u64);

/// A logical session with the remote database.
///
/// One connection may be shared by several collection handles. Reconnecting
/// mutates session state for all of them; the epoch is what makes that
/// observable to the handles that did not trigger it.
pub trait Connection {
    type Scope: DatabaseScope;

    /// Resolve a database scope by name.
    fn database_scope(&self, name: &str) -> Result<Self::Scope, Status>;

    /// (Re-)establish the session. Idempotent; success advances the epoch.
    fn connect(&self) -> Result<Epoch, Status>;

    /// Current reconnect generation.
    fn epoch(&self) -> Epoch;

    /// Whether a transaction is open on this session right now.
    ///
    /// Read live at every retry decision. Reconnecting would silently drop
    /// transactional context, so the answer must never be cached.
    fn is_transaction_active(&self) -> bool;

    /// Identifier of the thread this session belongs to. Diagnostic only;
    /// nothing synchronizes on it.
    fn owner_thread_id(&self) -> u64;
}

/// A named namespace grouping collections.
pub trait DatabaseScope {
    type Collection: RemoteCollection;

    /// Resolve a collection within this scope.
    fn collection(&self, name: &str) -> Result<Self::Collection, Status>;
}

/// Session-scoped handle to one remote collection.
///
/// Valid only for the epoch it was resolved in.
pub trait RemoteCollection {
    type Cursor: RemoteCursor;

    /// Run a query and open a cursor over its result set.
    fn query(&mut self, request: &QueryRequest) -> Result<Self::Cursor, Status>;

    /// Insert one document.
    fn insert(&mut self, doc: &Document) -> Result<(), Status>;

    /// Apply `update` to the documents matching `condition`, inserting a
    /// document seeded from `set_on_insert` when nothing matches.
    fn upsert(
        &mut self,
        update: &Document,
        condition: &Document,
        hint: &Document,
        set_on_insert: &Document,
    ) -> Result<(), Status>;

    /// Apply `update` to the documents matching `condition`.
    fn update(
        &mut self,
        update: &Document,
        condition: &Document,
        hint: &Document,
    ) -> Result<(), Status>;

    /// Delete the documents matching `condition`.
    fn delete(&mut self, condition: &Document, hint: &Document) -> Result<(), Status>;

    fn create_index(&mut self, spec: &IndexSpec) -> Result<(), Status>;

    fn drop_index(&mut self, name: &str) -> Result<(), Status>;

    /// Delete every document, keeping the collection and its indexes.
    fn truncate(&mut self) -> Result<(), Status>;

    /// Drop the collection itself.
    fn drop(&mut self) -> Result<(), Status>;

    /// Number of documents in the collection.
    fn count(&mut self) -> Result<i64, Status>;
}

/// Server-side iteration state over a query's result set.
///
/// Exhaustion is reported as [`Status::END_OF_CURSOR`], which the handle
/// turns into `Ok(None)` rather than an error.
pub trait RemoteCursor {
    /// Fetch the document under the cursor without advancing.
    fn current(&mut self) -> Result<Document, Status>;

    /// Advance the cursor and fetch the next document.
    fn next(&mut self) -> Result<Document, Status>;
}

/// Remote collection type a connection resolves through its scope.
pub type RemoteCollectionOf<C> = <<C as Connection>::Scope as DatabaseScope>::Collection;

/// Cursor type produced by a connection's remote collection.
pub type CursorOf<C> = <RemoteCollectionOf<C> as RemoteCollection>::Cursor;
