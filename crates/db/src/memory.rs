use async_trait::async_trait;
use melody_core::types::{Category, ContentFilter, ContentItem, SampleSize};
use rand::seq::SliceRandom;

use crate::store::ContentStore;

/// A [`ContentStore`] over a fixed list of items.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    items: Vec<ContentItem>,
    failing: bool,
}

impl MemoryContentStore {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self {
            items,
            failing: false,
        }
    }

    /// A store whose every call fails as if the pool had run dry.
    pub fn failing() -> Self {
        Self {
            items: Vec::new(),
            failing: true,
        }
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn sample(
        &self,
        filter: &ContentFilter,
        size: SampleSize,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        self.check()?;

        let mut matching: Vec<ContentItem> = self
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        matching.shuffle(&mut rand::rng());
        matching.truncate(size.get() as usize);
        Ok(matching)
    }

    async fn distinct_services(&self, category: Category) -> Result<Vec<String>, sqlx::Error> {
        self.check()?;

        Ok(self
            .items
            .iter()
            .filter(|item| item.category == category)
            .map(|item| item.service.clone())
            .collect())
    }
}
