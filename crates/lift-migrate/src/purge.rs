//! Bulk removal of every entry in the environment.

use lift_cms::EntryQuery;

use crate::error::MigrateError;
use crate::retry::with_backoff;
use crate::session::Session;

const PURGE_PAGE_SIZE: u32 = 1000;

/// Unpublish and delete entries page by page until none remain.
///
/// Returns the number of entries deleted.
///
/// # Errors
///
/// Returns [`MigrateError::NotConfirmed`] unless `confirmed`, and stops at the
/// first remote failure.
pub async fn purge_entries(session: &Session, confirmed: bool) -> Result<usize, MigrateError> {
    if !confirmed {
        return Err(MigrateError::NotConfirmed {
            action: "delete every entry".into(),
        });
    }

    let store = session.store();
    let query = EntryQuery {
        limit: PURGE_PAGE_SIZE,
        ..EntryQuery::default()
    };
    let mut deleted = 0;

    loop {
        let page = with_backoff(&session.lookup, "list entries", || store.list_entries(&query)).await?;
        if page.items.is_empty() {
            tracing::info!(deleted, "all entries have been deleted");
            return Ok(deleted);
        }
        tracing::info!(batch = page.items.len(), "deleting batch of entries");

        for entry in page.items {
            let entry = if entry.is_published() {
                with_backoff(&session.write, "unpublish entry", || store.unpublish_entry(&entry)).await?
            } else {
                entry
            };
            with_backoff(&session.write, "delete entry", || store.delete_entry(&entry)).await?;
            tracing::info!(entry_id = %entry.sys.id, "deleted entry");
            deleted += 1;
        }
    }
}
