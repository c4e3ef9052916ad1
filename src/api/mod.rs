//! Backend API Wrappers
//!
//! HTTP calls to the hospital/donor backend, organized by domain. Every call
//! races a timer and comes back as a `FetchError` the pages can render.

mod account;
mod dashboard;
mod donor;
mod hospital;

use std::future::Future;

use futures::future::{select, Either};
use futures::pin_mut;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

use got_blood_core::endpoints::Endpoints;
use got_blood_core::fetch::{parse_object, parse_sequence, submit_outcome, RawResponse};
use got_blood_core::{ClientConfig, FetchError};

#[derive(Debug, Clone)]
pub struct Api {
    pub endpoints: Endpoints,
    timeout_ms: u32,
    geocode_key: Option<String>,
}

impl Api {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoints: Endpoints::new(config),
            timeout_ms: config.fetch_timeout_ms,
            geocode_key: config.geocode_key.clone(),
        }
    }

    async fn bounded<F>(&self, what: &str, request: F) -> Result<RawResponse, FetchError>
    where
        F: Future<Output = Result<RawResponse, reqwest::Error>>,
    {
        let timer = TimeoutFuture::new(self.timeout_ms);
        pin_mut!(request);
        match select(request, timer).await {
            Either::Left((Ok(response), _)) => Ok(response),
            Either::Left((Err(e), _)) => {
                log::error!("[API] {} request failed: {}", what, e);
                Err(FetchError::Network { what: what.to_string(), detail: e.to_string() })
            }
            Either::Right(_) => {
                log::error!("[API] {} timed out after {} ms", what, self.timeout_ms);
                Err(FetchError::Timeout { after_ms: self.timeout_ms })
            }
        }
    }

    pub async fn get(&self, url: &str, what: &str) -> Result<RawResponse, FetchError> {
        log::debug!("[API] GET {}", url);
        let url = url.to_string();
        self.bounded(what, async move {
            let response = reqwest::Client::new().get(&url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(RawResponse { status, body })
        })
        .await
    }

    pub async fn post<B: Serialize>(&self, url: &str, body: &B, what: &str) -> Result<RawResponse, FetchError> {
        log::debug!("[API] POST {}", url);
        let request = reqwest::Client::new().post(url).json(body);
        self.bounded(what, async move {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(RawResponse { status, body })
        })
        .await
    }

    pub async fn get_sequence<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<Vec<T>, FetchError> {
        let raw = self.get(url, what).await?;
        parse_sequence(raw.status, &raw.body)
    }

    pub async fn get_object<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, FetchError> {
        let raw = self.get(url, what).await?;
        parse_object(raw.status, &raw.body)
    }

    /// POST a form payload and resolve the reply to the text to show
    pub async fn submit<B: Serialize>(&self, url: &str, body: &B, failure: &str) -> Result<String, String> {
        submit_outcome(self.post(url, body, "form").await, failure)
    }
}
