// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory session data store.
//!
//! Holds opaque per-session payloads (e.g. signatures handed between a dApp
//! and the wallet) keyed by session id. Records are create-once and are not
//! persisted across restarts.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, INVALID_REQUEST_CODE};
use crate::models::{SessionData, StoreDataRequest};

#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionData>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, request: StoreDataRequest) -> Result<SessionData, ApiError> {
        if request.session_id.trim().is_empty() {
            return Err(ApiError::bad_request("sessionId is required").with_code(INVALID_REQUEST_CODE));
        }

        if self.sessions.contains_key(&request.session_id) {
            return Err(ApiError::conflict("Session data already stored"));
        }

        let record = SessionData {
            id: Uuid::new_v4().to_string(),
            session_id: request.session_id,
            data: request.data,
            created_at: Utc::now(),
        };
        self.sessions
            .insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    pub fn get(&self, session_id: &str) -> Result<SessionData, ApiError> {
        self.sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Signature not found"))
    }
}
