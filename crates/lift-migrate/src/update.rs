//! Fetch-modify-update-publish against a versioned entry.

use lift_cms::{CmsError, Entry};

use crate::retry::{with_backoff, with_version_retry};
use crate::session::Session;

/// Fetch the latest `entry_id`, apply `modify`, write it back, and publish.
///
/// The whole sequence reruns from the fetch on a version conflict, up to the
/// session's `version_conflict_attempts`. Each call is individually retried on
/// rate limits.
pub(crate) async fn update_and_publish<M>(
    session: &Session,
    entry_id: &str,
    modify: M,
) -> Result<Entry, CmsError>
where
    M: Fn(&mut Entry),
{
    let store = session.store();
    let modify = &modify;
    with_version_retry(session.version_conflict_attempts, entry_id, || async move {
        let mut entry =
            with_backoff(&session.lookup, "get entry", || store.get_entry(entry_id)).await?;
        modify(&mut entry);
        let updated =
            with_backoff(&session.write, "update entry", || store.update_entry(&entry)).await?;
        with_backoff(&session.write, "publish entry", || store.publish_entry(&updated)).await
    })
    .await
}
