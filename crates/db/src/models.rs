use melody_core::types::{Category, ContentItem, UnknownCategory};
use sqlx::FromRow;

/// One sampled row, as projected by the sample queries.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub user_id: i64,
    pub url: String,
    pub service: String,
    pub category: String,
}

impl TryFrom<ContentRow> for ContentItem {
    type Error = UnknownCategory;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        Ok(ContentItem {
            user_id: row.user_id,
            url: row.url,
            service: row.service,
            category: row.category.parse::<Category>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str) -> ContentRow {
        ContentRow {
            user_id: 42,
            url: "https://open.spotify.com/track/1".to_string(),
            service: "spotify".to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_row_into_item() {
        let item = ContentItem::try_from(row("music")).unwrap();
        assert_eq!(item.user_id, 42);
        assert_eq!(item.service, "spotify");
        assert_eq!(item.category, Category::Music);
    }

    #[test]
    fn test_row_with_unknown_category() {
        let err = ContentItem::try_from(row("podcasts")).unwrap_err();
        assert_eq!(err.0, "podcasts");
    }
}
