//! Blocking HTTP client for the DummyJSON users collection.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Request};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    EmployeeDetailRecord, EmployeeRecord, EmployeeSource, FetchError, FetchResult,
};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Envelope of `GET /users`.
#[derive(Debug, Deserialize)]
struct UserPage {
    users: Vec<EmployeeRecord>,
}

pub struct DummyJsonClient {
    client: Client,
    base_url: String,
}

impl DummyJsonClient {
    /// `timeout` of `None` lets requests run until the server answers.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn listing_request(&self, limit: usize) -> reqwest::Result<Request> {
        self.client
            .get(self.url("/users"))
            .query(&[("limit", limit)])
            .build()
    }

    fn detail_request(&self, id: u32) -> reqwest::Result<Request> {
        self.client.get(self.url(&format!("/users/{id}"))).build()
    }

    fn execute(&self, request: Request) -> FetchResult<(StatusCode, String)> {
        debug!(url = %request.url(), "GET");
        let response = self
            .client
            .execute(request)
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok((status, body))
    }
}

impl EmployeeSource for DummyJsonClient {
    fn list_employees(&self, limit: usize) -> FetchResult<Vec<EmployeeRecord>> {
        let request = self
            .listing_request(limit)
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let (status, body) = self.execute(request)?;
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }
        decode_listing(&body)
    }

    fn employee_detail(&self, id: u32) -> FetchResult<EmployeeDetailRecord> {
        let request = self
            .detail_request(id)
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let (status, body) = self.execute(request)?;
        if !status.is_success() {
            debug!(id, status = status.as_u16(), "detail lookup failed");
            return Err(FetchError::NotFound { id });
        }
        decode_detail(&body)
    }
}

pub fn decode_listing(body: &str) -> FetchResult<Vec<EmployeeRecord>> {
    serde_json::from_str::<UserPage>(body)
        .map(|page| page.users)
        .map_err(|e| FetchError::Decode(e.to_string()))
}

pub fn decode_detail(body: &str) -> FetchResult<EmployeeDetailRecord> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}
