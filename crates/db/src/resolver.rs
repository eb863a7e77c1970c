//! Content resolution.
//!
//! Turns a validated request (optional category, optional service, sample size) into a random
//! sample of stored items. A filter that matches nothing is reported as
//! [`ContentError::NotFound`] so callers can tell it apart from a failing database.

use melody_core::types::{ContentFilter, ContentItem, SampleSize};
use tracing::debug;

use crate::{error::ContentError, store::ContentStore};

pub async fn resolve<S>(
    store: &S,
    filter: &ContentFilter,
    size: SampleSize,
) -> Result<Vec<ContentItem>, ContentError>
where
    S: ContentStore + ?Sized,
{
    let items = store.sample(filter, size).await?;

    if items.is_empty() {
        debug!(%filter, "no content matched filter");
        return Err(ContentError::NotFound(filter.clone()));
    }

    debug!(
        %filter,
        shape = ?filter.shape(),
        requested = size.get(),
        returned = items.len(),
        "resolved content sample"
    );
    Ok(items)
}
