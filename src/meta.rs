//! Declarative index provisioning.

use crate::connection::Connection;
use crate::status::Error;
use crate::types::IndexSpec;
use crate::Collection;

/// Bring every index in `specs` into existence on `collection`.
///
/// Indexes already present with the same definition are absorbed by
/// [`Collection::create_index`], so running this against an already
/// provisioned collection is a clean no-op. Stops at the first real failure.
pub fn ensure_indexes<C: Connection>(
    collection: &mut Collection<'_, C>,
    specs: &[IndexSpec],
) -> Result<(), Error> {
    for spec in specs {
        collection.create_index(spec)?;
    }
    Ok(())
}
