//! v2 space quota definition endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{v2_error, SharedState};
use crate::{PaginatedResponse, DEFAULT_RESULTS_PER_PAGE};

/// v2 pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    #[serde(rename = "results-per-page")]
    pub results_per_page: Option<u32>,
}

/// Slice `items` into the page `query` asks for, in v2 listing shape.
pub(crate) fn paginate<T: Clone + Serialize>(
    path: &str,
    items: &[&T],
    query: &ListQuery,
) -> PaginatedResponse<T> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .results_per_page
        .unwrap_or(DEFAULT_RESULTS_PER_PAGE)
        .clamp(1, 100);

    let total_results = items.len() as u64;
    let total_pages = items.len().div_ceil(per_page as usize) as u32;

    let start = (u64::from(page) - 1)
        .checked_mul(u64::from(per_page))
        .and_then(|start| usize::try_from(start).ok())
        .unwrap_or(usize::MAX);
    let resources: Vec<T> = items
        .iter()
        .skip(start)
        .take(per_page as usize)
        .map(|item| (*item).clone())
        .collect();

    let link = |p: u32| format!("{path}?page={p}&results-per-page={per_page}");

    PaginatedResponse {
        total_results,
        total_pages,
        prev_url: (page > 1).then(|| link(page - 1)),
        next_url: (page < total_pages).then(|| link(page + 1)),
        resources,
    }
}

/// GET /v2/organizations/{id}/space_quota_definitions
pub async fn list_organization_space_quota_definitions(
    State(state): State<SharedState>,
    Path(organization_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    let definitions = state.list_space_quota_definitions(&organization_id);
    let path = format!("/v2/organizations/{organization_id}/space_quota_definitions");

    (StatusCode::OK, Json(paginate(&path, &definitions, &query))).into_response()
}

/// GET /v2/space_quota_definitions/{id}
pub async fn get_space_quota_definition(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.get_space_quota_definition(&id) {
        Some(definition) => (StatusCode::OK, Json(definition.clone())).into_response(),
        None => v2_error(
            StatusCode::NOT_FOUND,
            310007,
            "CF-SpaceQuotaDefinitionNotFound",
            &format!("Space Quota Definition could not be found: {id}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: u32, per_page: u32) -> ListQuery {
        ListQuery {
            page: Some(page),
            results_per_page: Some(per_page),
        }
    }

    #[test]
    fn test_paginate_middle_page() {
        let items = [1, 2, 3, 4, 5];
        let refs: Vec<&i32> = items.iter().collect();

        let response = paginate("/v2/things", &refs, &query(2, 2));
        assert_eq!(response.resources, vec![3, 4]);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.total_results, 5);
        assert_eq!(
            response.prev_url.as_deref(),
            Some("/v2/things?page=1&results-per-page=2")
        );
        assert_eq!(
            response.next_url.as_deref(),
            Some("/v2/things?page=3&results-per-page=2")
        );
    }

    #[test]
    fn test_paginate_page_past_the_end() {
        let items = [1, 2, 3];
        let refs: Vec<&i32> = items.iter().collect();

        let response = paginate("/v2/things", &refs, &query(50_000_000, 100));
        assert!(response.resources.is_empty());
        assert_eq!(response.total_pages, 1);
        assert!(response.next_url.is_none());

        let response = paginate("/v2/things", &refs, &query(u32::MAX, 100));
        assert!(response.resources.is_empty());
    }

    #[test]
    fn test_paginate_empty() {
        let refs: Vec<&i32> = Vec::new();
        let response = paginate("/v2/things", &refs, &ListQuery::default());

        assert!(response.resources.is_empty());
        assert_eq!(response.total_pages, 0);
        assert!(response.next_url.is_none());
        assert!(response.prev_url.is_none());
    }
}
