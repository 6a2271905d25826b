//! Seawall is a resilient collection handle for session-oriented document
//! databases.
//!
//! A [`Collection`] binds one (database scope, collection) pair over a
//! caller-supplied [`Connection`] and shields every operation from transient
//! network faults: when a call fails because the connection itself became
//! unusable, the handle reconnects and retries within a fixed budget, unless
//! a transaction is open on the session. Reconnecting would silently drop
//! transactional context, so in that case the fault surfaces immediately.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bson::doc;
//! use seawall::{Collection, IndexSpec, QueryRequest};
//!
//! // `conn` is any implementation of `seawall::Connection`.
//! let mut orders = Collection::init(&conn, "sales", "orders")?;
//!
//! orders.create_index(&IndexSpec::new("ix_sku", doc! { "sku": 1 }).unique())?;
//! orders.insert(&doc! { "sku": "A-113", "qty": 2 })?;
//!
//! orders.query(&QueryRequest::with_condition(doc! { "qty": { "$gt": 1 } }))?;
//! while let Some(order) = orders.next()? {
//!     println!("{order}");
//! }
//! ```
//!
//! See [`guides`] module to learn more!

#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc
)]

use bson::Document;

pub mod connection;
pub mod guides;
pub mod meta;
pub mod status;
pub mod types;

pub use connection::{
    Connection, CursorOf, DatabaseScope, Epoch, RemoteCollection, RemoteCollectionOf, RemoteCursor,
};
pub use status::{classify, Class, Error, ErrorCode, Status};
pub use types::{IndexSpec, QueryRequest};

/// Reconnect-and-retry attempts allowed per operation after its first call.
pub const RETRY_BUDGET: u32 = 2;

/// Longest accepted database scope name, in bytes.
pub const MAX_SCOPE_NAME_LEN: usize = 127;

/// Longest accepted collection name, in bytes.
pub const MAX_COLLECTION_NAME_LEN: usize = 127;

/// A stateful handle bound to one (database scope, collection) pair over one
/// connection.
///
/// The handle borrows the connection and owns its resolved remote ref plus
/// at most one open cursor. It is meant for one execution context at a time;
/// nothing in it locks. Dropping the handle releases any open cursor.
pub struct Collection<'a, C: Connection> {
    conn: &'a C,
    scope_name: String,
    collection_name: String,
    remote: Option<RemoteCollectionOf<C>>,
    cursor: Option<CursorOf<C>>,
    epoch: Option<Epoch>,
    owner_thread: u64,
}

impl<'a, C: Connection> Collection<'a, C> {
    /// Bind a handle to `scope_name`.`collection_name` and resolve it.
    ///
    /// Names are truncated to [`MAX_SCOPE_NAME_LEN`] /
    /// [`MAX_COLLECTION_NAME_LEN`] bytes. Fails with
    /// [`Error::InvalidArgument`], before any remote call, if either name is
    /// empty.
    pub fn init(conn: &'a C, scope_name: &str, collection_name: &str) -> Result<Self, Error> {
        if scope_name.is_empty() {
            return Err(Error::InvalidArgument("scope name is empty"));
        }
        if collection_name.is_empty() {
            return Err(Error::InvalidArgument("collection name is empty"));
        }

        let mut handle = Self {
            conn,
            scope_name: truncate_name(scope_name, MAX_SCOPE_NAME_LEN),
            collection_name: truncate_name(collection_name, MAX_COLLECTION_NAME_LEN),
            remote: None,
            cursor: None,
            epoch: None,
            owner_thread: conn.owner_thread_id(),
        };
        handle.reinit()?;
        Ok(handle)
    }

    /// Drop the cached remote ref and resolve it again.
    ///
    /// Runs under the same reconnect-and-retry policy as every remote
    /// operation.
    pub fn reinit(&mut self) -> Result<(), Error> {
        self.remote = None;
        self.epoch = None;
        self.execute(|_| Ok(()))
    }

    /// Release the open cursor. Safe to call with none open.
    pub fn close(&mut self) {
        self.cursor = None;
    }

    /// Run `request` and park its cursor as the handle's open cursor,
    /// releasing any previous one.
    pub fn query(&mut self, request: &QueryRequest) -> Result<(), Error> {
        self.cursor = None;
        let cursor = self.execute(|remote| remote.query(request))?;
        self.cursor = Some(cursor);
        Ok(())
    }

    /// Fetch a single document matching `request` (a query with limit 1).
    ///
    /// `Ok(None)` means the result set is empty. The handle's open cursor is
    /// left untouched.
    pub fn query_one(&mut self, request: &QueryRequest) -> Result<Option<Document>, Error> {
        let request = request.clone().limited(1);
        self.execute_absorbing(
            |remote| {
                let mut cursor = remote.query(&request)?;
                cursor.next().map(Some)
            },
            |status| {
                if status == Status::END_OF_CURSOR {
                    Some(None)
                } else {
                    None
                }
            },
        )
    }

    /// Document under the open cursor, without advancing it.
    ///
    /// `Ok(None)` signals clean exhaustion. Cursor fetches are never retried:
    /// the cursor is server-side iteration state and would not survive a
    /// reconnect.
    pub fn current(&mut self) -> Result<Option<Document>, Error> {
        match self.open_cursor()?.current() {
            Ok(doc) => Ok(Some(doc)),
            Err(status) => end_or_error(status),
        }
    }

    /// Advance the open cursor and fetch the next document.
    ///
    /// Same contract as [`current`](Self::current): `Ok(None)` on
    /// exhaustion, immediate translation of any fault.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Document>, Error> {
        match self.open_cursor()?.next() {
            Ok(doc) => Ok(Some(doc)),
            Err(status) => end_or_error(status),
        }
    }

    /// Insert one document.
    pub fn insert(&mut self, doc: &Document) -> Result<(), Error> {
        self.execute(|remote| remote.insert(doc))
    }

    /// Apply `update` to every document matching `condition`, inserting one
    /// seeded from `set_on_insert` when nothing matches.
    pub fn upsert(
        &mut self,
        update: &Document,
        condition: &Document,
        hint: &Document,
        set_on_insert: &Document,
    ) -> Result<(), Error> {
        self.execute(|remote| remote.upsert(update, condition, hint, set_on_insert))
    }

    /// Apply `update` to every document matching `condition`.
    pub fn update(
        &mut self,
        update: &Document,
        condition: &Document,
        hint: &Document,
    ) -> Result<(), Error> {
        self.execute(|remote| remote.update(update, condition, hint))
    }

    /// Delete every document matching `condition`.
    pub fn delete(&mut self, condition: &Document, hint: &Document) -> Result<(), Error> {
        self.execute(|remote| remote.delete(condition, hint))
    }

    /// Create an index. An identical existing definition counts as success.
    pub fn create_index(&mut self, spec: &IndexSpec) -> Result<(), Error> {
        self.execute_absorbing(
            |remote| remote.create_index(spec),
            |status| (status == Status::INDEX_REDEFINED).then_some(()),
        )
    }

    /// Drop an index. A missing index counts as success.
    pub fn drop_index(&mut self, name: &str) -> Result<(), Error> {
        self.execute_absorbing(
            |remote| remote.drop_index(name),
            |status| (status == Status::INDEX_MISSING).then_some(()),
        )
    }

    /// Delete every document, keeping the collection and its indexes.
    pub fn truncate(&mut self) -> Result<(), Error> {
        self.execute(|remote| remote.truncate())
    }

    /// Drop the collection. A missing collection counts as success.
    #[allow(clippy::should_implement_trait)]
    pub fn drop(&mut self) -> Result<(), Error> {
        self.execute_absorbing(
            |remote| remote.drop(),
            |status| (status == Status::COLLECTION_MISSING).then_some(()),
        )
    }

    /// Number of documents in the collection.
    pub fn get_count(&mut self) -> Result<i64, Error> {
        self.execute(|remote| remote.count())
    }

    /// Whether the collection currently holds at least one document.
    pub fn exists(&mut self) -> Result<bool, Error> {
        let count = self.get_count()?;
        Ok(count > 0)
    }

    /// Bound database scope name.
    pub fn scope_name(&self) -> &str {
        &self.scope_name
    }

    /// Bound collection name.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Thread the connection belonged to at bind time. Diagnostic only.
    pub fn owner_thread_id(&self) -> u64 {
        self.owner_thread
    }

    /// Whether a transaction is open on the underlying connection.
    pub fn is_transaction_active(&self) -> bool {
        self.conn.is_transaction_active()
    }

    /// Run one remote call under the uniform recovery policy.
    fn execute<T>(
        &mut self,
        op: impl Fn(&mut RemoteCollectionOf<C>) -> Result<T, Status>,
    ) -> Result<T, Error> {
        self.execute_absorbing(op, |_| None)
    }

    /// Run one remote call under the uniform recovery policy, with an
    /// absorption step for goal-already-met statuses.
    ///
    /// Per attempt: re-resolve the remote ref if the connection epoch moved,
    /// issue the call, and on failure let `absorb` turn the status into
    /// success before anything else is considered. A network-classified
    /// failure is retried after a successful reconnect, at most
    /// [`RETRY_BUDGET`] times and never while a transaction is open; every
    /// other failure translates immediately.
    fn execute_absorbing<T>(
        &mut self,
        op: impl Fn(&mut RemoteCollectionOf<C>) -> Result<T, Status>,
        absorb: impl Fn(Status) -> Option<T>,
    ) -> Result<T, Error> {
        let mut budget = RETRY_BUDGET;
        loop {
            let status = match self.bound() {
                Ok(remote) => match op(remote) {
                    Ok(value) => return Ok(value),
                    Err(status) => status,
                },
                Err(status) => status,
            };

            if let Some(value) = absorb(status) {
                return Ok(value);
            }

            if classify(status) != Class::Network
                || self.conn.is_transaction_active()
                || budget == 0
            {
                return Err(Error::from_status(status));
            }

            match self.conn.connect() {
                Ok(epoch) => {
                    budget -= 1;
                    tracing::warn!(
                        status = status.code(),
                        epoch = epoch.0,
                        remaining = budget,
                        scope = %self.scope_name,
                        collection = %self.collection_name,
                        "transient network fault, reconnected",
                    );
                }
                Err(connect_status) => {
                    tracing::warn!(
                        status = status.code(),
                        connect_status = connect_status.code(),
                        "reconnect failed",
                    );
                    return Err(Error::from_status(status));
                }
            }
        }
    }

    /// Remote ref for the connection's current epoch, re-resolving it when
    /// the cached one predates a reconnect.
    fn bound(&mut self) -> Result<&mut RemoteCollectionOf<C>, Status> {
        let current = self.conn.epoch();
        if self.epoch != Some(current) || self.remote.is_none() {
            let scope = self.conn.database_scope(&self.scope_name)?;
            let remote = scope.collection(&self.collection_name)?;
            tracing::debug!(
                scope = %self.scope_name,
                collection = %self.collection_name,
                epoch = current.0,
                "resolved remote collection ref",
            );
            self.epoch = Some(current);
            self.remote = Some(remote);
        }
        self.remote.as_mut().ok_or(Status::NOT_CONNECTED)
    }

    fn open_cursor(&mut self) -> Result<&mut CursorOf<C>, Error> {
        self.cursor
            .as_mut()
            .ok_or(Error::InvalidArgument("no open cursor, run query first"))
    }
}

fn end_or_error(status: Status) -> Result<Option<Document>, Error> {
    match classify(status) {
        Class::EndOfData => Ok(None),
        _ => Err(Error::from_status(status)),
    }
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_owned();
    }
    let mut end = max;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_owned()
}
