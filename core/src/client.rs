//! Stateless HTTP request builder and response parser for the books API.
//!
//! # Design
//! `BookClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; the caller executes the round-trip in between.
//! Any 2xx status counts as success since services differ on 200 vs 201/204.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{BookRecord, DraftRecord, FilterCriteria};

/// Synchronous, stateless client for the books API.
#[derive(Debug, Clone)]
pub struct BookClient {
    base_url: String,
}

impl BookClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /books/book`, carrying only the present filter fields.
    pub fn build_list_books(&self, filter: &FilterCriteria) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/books/book", self.base_url),
            query: filter.query_pairs(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_book(&self, draft: &DraftRecord) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/books", self.base_url),
            query: Vec::new(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_book(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/books/{id}", self.base_url),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<BookRecord>, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_create_book(&self, response: HttpResponse) -> Result<BookRecord, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
