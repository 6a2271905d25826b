/// ## Getting started
///
/// A [`Collection`](crate::Collection) is a handle bound to exactly one
/// collection inside one database scope, over a connection you supply. The
/// crate never opens sockets itself: you implement (or reuse an
/// implementation of) the [`Connection`](crate::Connection) trait family,
/// and the handle drives it.
///
/// Binding performs the first resolution immediately:
///
/// ```rust,ignore
/// use seawall::Collection;
///
/// let mut orders = Collection::init(&conn, "sales", "orders")?;
/// assert_eq!(orders.scope_name(), "sales");
/// ```
///
/// From there the handle exposes the usual collection surface:
/// [`insert`](crate::Collection::insert), [`update`](crate::Collection::update),
/// [`upsert`](crate::Collection::upsert), [`delete`](crate::Collection::delete),
/// [`query`](crate::Collection::query) /
/// [`next`](crate::Collection::next) /
/// [`current`](crate::Collection::current),
/// [`create_index`](crate::Collection::create_index) /
/// [`drop_index`](crate::Collection::drop_index),
/// [`truncate`](crate::Collection::truncate), [`drop`](crate::Collection::drop)
/// and [`get_count`](crate::Collection::get_count). Everything is
/// synchronous and returns its outcome by value; nothing panics across the
/// crate boundary.
///
/// Documents are plain [`bson::Document`]s and pass through the adapter
/// unexamined; build them with [`bson::doc!`].
pub mod getting_started {}

/// ## How failures are handled
///
/// Every remote reply carries a raw [`Status`](crate::Status) word, and
/// every non-success status is classified exactly once
/// ([`classify`](crate::classify)):
///
/// - **Network** statuses (connection reset, timeout, not connected) mean
///   the session itself is unusable. The handle reconnects and retries the
///   call, up to [`RETRY_BUDGET`](crate::RETRY_BUDGET) times. If a
///   transaction is open the fault surfaces at once instead (see the
///   [transactions](super::transactions) guide).
/// - **End of data** terminates cursor iteration. It is not an error: the
///   fetching operations return `Ok(None)`.
/// - Everything else is a **domain error**, translated into the stable
///   [`ErrorCode`](crate::ErrorCode) space and surfaced as
///   [`Error::Domain`](crate::Error::Domain) with the raw status attached.
///
/// Three outcomes are absorbed because the goal state already holds:
/// creating an index that already exists with the same definition, dropping
/// an index that does not exist, and dropping a collection that does not
/// exist all return `Ok(())`.
///
/// Reconnection invalidates every collection ref resolved through the
/// session, including those held by *other* handles sharing the connection.
/// Each successful reconnect advances the connection's
/// [`Epoch`](crate::Epoch); a handle re-resolves its ref whenever its cached
/// epoch falls behind, so sibling handles self-heal on their next use.
pub mod failure_recovery {}

/// ## Transactions
///
/// The handle never starts or ends transactions; that is the connection
/// owner's business. It only *observes* the transaction flag, live, at every
/// retry decision ([`Connection::is_transaction_active`](crate::Connection::is_transaction_active)).
///
/// While a transaction is open, network faults are never retried:
/// reconnecting would silently discard the server-side transactional
/// context and the operations already applied in it. The fault surfaces as
/// [`ErrorCode::NetworkUnavailable`](crate::ErrorCode::NetworkUnavailable)
/// and the caller decides whether to abort or restart the transaction at
/// its own level.
pub mod transactions {}

/// ## Cursors
///
/// A handle holds at most one open cursor.
/// [`query`](crate::Collection::query) opens it (closing any previous one),
/// [`next`](crate::Collection::next) and
/// [`current`](crate::Collection::current) consume it, and
/// [`close`](crate::Collection::close) releases it, as does dropping the
/// handle.
///
/// Cursor fetches are the one place the retry policy does not apply: the
/// cursor is server-side iteration state, and a reconnect would invalidate
/// its position. A network fault mid-iteration therefore surfaces
/// immediately; re-run the query to continue.
///
/// For point lookups prefer [`query_one`](crate::Collection::query_one): it
/// runs a limit-1 query and first fetch as one retried unit and leaves the
/// handle's open cursor alone.
pub mod cursors {}

/// This library is named "Seawall" because it stands between your queries
/// and the weather.
pub mod naming {}
