// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{SessionData, StoreDataRequest},
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: String,
}

#[utoipa::path(
    post,
    path = "/sdk/store-data",
    request_body = StoreDataRequest,
    tag = "Sessions",
    responses(
        (status = 200, description = "Stored", body = SessionData),
        (status = 400, description = "Missing sessionId or malformed body"),
        (status = 409, description = "Data already stored for this session")
    )
)]
pub async fn store_data(
    State(state): State<AppState>,
    payload: Result<Json<StoreDataRequest>, JsonRejection>,
) -> Result<Json<SessionData>, ApiError> {
    let Json(request) = payload?;
    let mut store = state.store.write().await;
    let record = store.create(request)?;
    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/sdk/get-data",
    params(SessionQuery),
    tag = "Sessions",
    responses(
        (status = 200, body = SessionData),
        (status = 400, description = "Missing sessionId"),
        (status = 404, description = "Signature not found")
    )
)]
pub async fn get_data(
    State(state): State<AppState>,
    query: Result<Query<SessionQuery>, QueryRejection>,
) -> Result<Json<SessionData>, ApiError> {
    let Query(query) = query?;
    let store = state.store.read().await;
    store.get(&query.session_id).map(Json)
}
