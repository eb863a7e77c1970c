use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Smallest number of items a caller may request.
pub const MIN_SAMPLE_SIZE: i64 = 1;
/// Largest number of items a caller may request.
pub const MAX_SAMPLE_SIZE: i64 = 500;
/// Sample size used when the caller does not ask for one.
pub const DEFAULT_SAMPLE_SIZE: i64 = 10;

/// Path segment and catalog key meaning "every category".
pub const ANY_CATEGORY: &str = "any";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Music,
    Tech,
    Anime,
    Misc,
    Watch,
    Watched,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Music,
        Category::Tech,
        Category::Anime,
        Category::Misc,
        Category::Watch,
        Category::Watched,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Music => "music",
            Category::Tech => "tech",
            Category::Anime => "anime",
            Category::Misc => "misc",
            Category::Watch => "watch",
            Category::Watched => "watched",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A stored link as the API sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub user_id: i64,
    pub url: String,
    pub service: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "number must be between {min} and {max}, got {0}",
        min = MIN_SAMPLE_SIZE,
        max = MAX_SAMPLE_SIZE
    )]
    SampleSizeOutOfRange(i64),
}

/// Requested number of items, already checked against the allowed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSize(i64);

impl SampleSize {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::SampleSizeOutOfRange(value))
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Default for SampleSize {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_SIZE)
    }
}

/// Which rows a sample is drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    pub category: Option<Category>,
    pub service: Option<String>,
}

/// The four query forms a filter can produce, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    CategoryAndService,
    ServiceOnly,
    CategoryOnly,
    Unfiltered,
}

impl ContentFilter {
    /// Builds a filter, treating a blank service as no service. Anything else is matched
    /// exactly as given, since service labels come straight from stored rows.
    pub fn new(category: Option<Category>, service: Option<&str>) -> Self {
        let service = service
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);
        Self { category, service }
    }

    pub fn shape(&self) -> QueryShape {
        match (self.category, self.service.as_deref()) {
            (Some(_), Some(_)) => QueryShape::CategoryAndService,
            (None, Some(_)) => QueryShape::ServiceOnly,
            (Some(_), None) => QueryShape::CategoryOnly,
            (None, None) => QueryShape::Unfiltered,
        }
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        self.category.map_or(true, |c| c == item.category)
            && self.service.as_deref().map_or(true, |s| s == item.service)
    }
}

impl fmt::Display for ContentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category.map_or(ANY_CATEGORY, Category::as_str);
        match self.service.as_deref() {
            Some(service) => write!(f, "category={category} service={service}"),
            None => write!(f, "category={category}"),
        }
    }
}

/// Distinct services per category plus their union under `any`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceCatalog {
    #[serde(flatten)]
    pub categories: BTreeMap<Category, Vec<String>>,
    pub any: Vec<String>,
}
