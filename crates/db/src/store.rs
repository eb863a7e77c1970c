use async_trait::async_trait;
use melody_core::config::SchemaLayout;
use melody_core::types::{Category, ContentFilter, ContentItem, SampleSize};
use sqlx::PgPool;

use crate::queries;

/// Read access to stored content.
///
/// Implementations check out whatever connection they need per call and hand it back before
/// returning, so a store can be shared freely between requests.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Up to `size` random items matching `filter`. An empty result is not an error here.
    async fn sample(
        &self,
        filter: &ContentFilter,
        size: SampleSize,
    ) -> Result<Vec<ContentItem>, sqlx::Error>;

    /// Service names seen under `category`. May contain duplicates.
    async fn distinct_services(&self, category: Category) -> Result<Vec<String>, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
    layout: SchemaLayout,
}

impl PgContentStore {
    pub fn new(pool: PgPool, layout: SchemaLayout) -> Self {
        Self { pool, layout }
    }

    pub fn layout(&self) -> &SchemaLayout {
        &self.layout
    }

    /// Waits for checked-out connections to come back, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn sample(
        &self,
        filter: &ContentFilter,
        size: SampleSize,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        queries::content::sample(&self.pool, &self.layout, filter, size).await
    }

    async fn distinct_services(&self, category: Category) -> Result<Vec<String>, sqlx::Error> {
        queries::services::distinct_for_category(&self.pool, &self.layout, category).await
    }
}
