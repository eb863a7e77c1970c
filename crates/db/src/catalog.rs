//! Service catalog: which services have content in which category.

use std::collections::{BTreeMap, BTreeSet};

use futures_util::future::try_join_all;
use melody_core::types::{Category, ServiceCatalog};
use tracing::debug;

use crate::{error::ContentError, store::ContentStore};

/// Collect distinct services for every category and their union.
///
/// Categories are queried concurrently. The `any` list is the union of the per-category lists
/// rather than a separate query, so it can never disagree with them.
pub async fn list_services<S>(store: &S) -> Result<ServiceCatalog, ContentError>
where
    S: ContentStore + ?Sized,
{
    let lists = try_join_all(Category::ALL.into_iter().map(|category| async move {
        store
            .distinct_services(category)
            .await
            .map(|services| (category, services))
    }))
    .await?;

    let catalog = aggregate(lists);
    debug!(services = catalog.any.len(), "built service catalog");
    Ok(catalog)
}

/// Dedup and sort each list, fill in missing categories, and compute `any`.
pub fn aggregate<I>(lists: I) -> ServiceCatalog
where
    I: IntoIterator<Item = (Category, Vec<String>)>,
{
    let mut categories: BTreeMap<Category, BTreeSet<String>> = Category::ALL
        .into_iter()
        .map(|category| (category, BTreeSet::new()))
        .collect();

    for (category, services) in lists {
        categories.entry(category).or_default().extend(services);
    }

    let any = categories
        .values()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    ServiceCatalog {
        categories: categories
            .into_iter()
            .map(|(category, services)| (category, services.into_iter().collect()))
            .collect(),
        any,
    }
}
