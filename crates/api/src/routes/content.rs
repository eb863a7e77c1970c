use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use melody_core::types::{Category, ContentFilter, ContentItem, SampleSize, ANY_CATEGORY};
use melody_db::resolver;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiResult, AppError},
    state::{AppState, RequestId},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{category}", get(sample_content))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SampleParams {
    number: Option<i64>,
    service: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContentResponse {
    data: Vec<ContentItemBody>,
}

#[derive(Debug, Serialize)]
struct ContentItemBody {
    user_id: i64,
    url: String,
    service: String,
}

impl From<ContentItem> for ContentItemBody {
    fn from(item: ContentItem) -> Self {
        Self {
            user_id: item.user_id,
            url: item.url,
            service: item.service,
        }
    }
}

async fn sample_content(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(category): Path<String>,
    params: Result<Query<SampleParams>, QueryRejection>,
) -> ApiResult<Json<ContentResponse>> {
    let category = parse_category(&category).ok_or_else(|| {
        AppError::NotFound(format!("unknown category `{category}`"))
            .with_request_id(&request_id.0)
    })?;

    let Query(params) = params.map_err(|rejection| {
        AppError::BadRequest(rejection.body_text()).with_request_id(&request_id.0)
    })?;

    let size = match params.number {
        Some(number) => SampleSize::new(number).map_err(|err| {
            AppError::BadRequest(err.to_string()).with_request_id(&request_id.0)
        })?,
        None => SampleSize::default(),
    };

    let filter = ContentFilter::new(category, params.service.as_deref());
    let items = resolver::resolve(state.store.as_ref(), &filter, size)
        .await
        .map_err(|err| AppError::from(err).with_request_id(&request_id.0))?;

    Ok(Json(ContentResponse {
        data: items.into_iter().map(ContentItemBody::from).collect(),
    }))
}

/// `Some(None)` for the catch-all segment, `None` for anything unrecognised.
fn parse_category(segment: &str) -> Option<Option<Category>> {
    if segment == ANY_CATEGORY {
        Some(None)
    } else {
        segment.parse().ok().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use melody_db::memory::MemoryContentStore;

    use crate::routes::test_support::{app_with, get, item};

    fn store() -> MemoryContentStore {
        let mut items = vec![
            item(1, Category::Music, "youtube"),
            item(2, Category::Music, "youtube"),
            item(3, Category::Music, "youtube"),
            item(4, Category::Music, "spotify"),
            item(5, Category::Anime, "crunchyroll"),
            item(6, Category::Watch, "netflix"),
        ];
        items.extend((100..120).map(|id| item(id, Category::Tech, "github")));
        MemoryContentStore::new(items)
    }

    fn data(json: &serde_json::Value) -> &Vec<serde_json::Value> {
        json["data"].as_array().unwrap()
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("music"), Some(Some(Category::Music)));
        assert_eq!(parse_category("watched"), Some(Some(Category::Watched)));
        assert_eq!(parse_category("any"), Some(None));
        assert_eq!(parse_category("podcasts"), None);
    }

    #[tokio::test]
    async fn test_category_and_service_filter() {
        let (status, json) = get(app_with(store()), "/music?service=youtube&number=5").await;

        assert_eq!(status, StatusCode::OK);
        let items = data(&json);
        assert_eq!(items.len(), 3);
        for item in items {
            assert_eq!(item["service"], "youtube");
            assert!(item["user_id"].as_i64().unwrap() <= 3);
            assert!(item["url"].as_str().unwrap().starts_with("https://youtube"));
        }
    }

    #[tokio::test]
    async fn test_default_number_is_ten() {
        let (status, json) = get(app_with(store()), "/tech").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(data(&json).len(), 10);
    }

    #[tokio::test]
    async fn test_number_caps_results() {
        let (status, json) = get(app_with(store()), "/tech?number=3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(data(&json).len(), 3);
    }

    #[tokio::test]
    async fn test_any_samples_across_categories() {
        let (status, json) = get(app_with(store()), "/any?number=500").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(data(&json).len(), 26);
    }

    #[tokio::test]
    async fn test_any_with_service() {
        let (status, json) = get(app_with(store()), "/any?service=netflix").await;

        assert_eq!(status, StatusCode::OK);
        let items = data(&json);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["user_id"], 6);
    }

    #[tokio::test]
    async fn test_blank_service_is_ignored() {
        let (status, json) = get(app_with(store()), "/anime?service=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(data(&json).len(), 1);
    }

    #[tokio::test]
    async fn test_service_is_matched_exactly() {
        let store = MemoryContentStore::new(vec![
            item(1, Category::Music, " youtube"),
            item(2, Category::Music, "youtube"),
        ]);
        let app = app_with(store);

        let (status, json) = get(app.clone(), "/music?service=%20youtube").await;
        assert_eq!(status, StatusCode::OK);
        let items = data(&json);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["user_id"], 1);
        assert_eq!(items[0]["service"], " youtube");

        let (status, _) = get(app, "/music?service=%20youtube%20").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_service_is_not_found() {
        let (status, json) = get(app_with(store()), "/anime?service=nonexistent-service").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(
            json["error"]["message"],
            "no content found for category=anime service=nonexistent-service"
        );
        assert!(json["error"]["request_id"]
            .as_str()
            .unwrap()
            .starts_with("req_"));
    }

    #[tokio::test]
    async fn test_empty_category_is_not_found() {
        let (status, _) = get(app_with(store()), "/watched").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let (status, json) = get(app_with(store()), "/podcasts").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["message"], "unknown category `podcasts`");
    }

    #[tokio::test]
    async fn test_number_out_of_range_is_rejected_for_every_category() {
        for category in Category::ALL.iter().map(|c| c.as_str()).chain([ANY_CATEGORY]) {
            for number in ["0", "501", "-1"] {
                let uri = format!("/{category}?number={number}");
                let (status, json) = get(app_with(store()), &uri).await;

                assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
                assert_eq!(json["error"]["code"], "invalid_request");
            }
        }
    }

    #[tokio::test]
    async fn test_number_bounds_are_inclusive() {
        let (status, _) = get(app_with(store()), "/music?number=1").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get(app_with(store()), "/music?number=500").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_numeric_number_is_rejected() {
        let (status, json) = get(app_with(store()), "/music?number=ten").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_database_failure_is_internal_error() {
        let (status, json) = get(app_with(MemoryContentStore::failing()), "/music").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "internal_error");
    }
}
