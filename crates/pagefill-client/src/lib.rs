// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod records;

pub use records::{Record, display_value};

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct Client {
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            bail!("client timeout must be positive");
        }
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self { timeout, http })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fetch_records(&self, url: &str, query: Option<&str>) -> Result<Vec<Record>> {
        let url = with_query(url, query)?;
        let records: Vec<Record> = self.fetch_json(&url, "record list")?;
        debug!("fetched {} records from {url}", records.len());
        Ok(records)
    }

    pub fn fetch_values(&self, url: &str) -> Result<Vec<String>> {
        let url = with_query(url, None)?;
        let values: Vec<serde_json::Value> = self.fetch_json(&url, "option list")?;
        debug!("fetched {} option values from {url}", values.len());
        Ok(values.iter().map(display_value).collect())
    }

    pub fn fetch_fragment(&self, url: &str) -> Result<String> {
        let url = with_query(url, None)?;
        let response = self.get(&url)?;
        response
            .text()
            .with_context(|| format!("read fragment body from {url}"))
    }

    fn fetch_json<T: DeserializeOwned>(&self, url: &Url, what: &str) -> Result<T> {
        let response = self.get(url)?;
        response
            .json()
            .with_context(|| format!("decode {what} from {url}"))
    }

    fn get(&self, url: &Url) -> Result<Response> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|error| connection_error(url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(url, status, &body));
        }
        Ok(response)
    }
}

fn with_query(url: &str, query: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(url).with_context(|| format!("invalid endpoint url {url:?}"))?;
    if let Some(query) = query {
        url.query_pairs_mut().append_pair("query", query);
    }
    Ok(url)
}

fn connection_error(url: &Url, error: reqwest::Error) -> anyhow::Error {
    anyhow!("cannot reach {url} ({error})")
}

fn status_error(url: &Url, status: StatusCode, body: &str) -> anyhow::Error {
    let reason = status.canonical_reason().unwrap_or("unknown status");
    // short plain-text bodies are worth surfacing; HTML error pages are not
    if body.len() < 200 && !body.contains('<') && !body.trim().is_empty() {
        return anyhow!(
            "server returned {} {reason} for {url}: {}",
            status.as_u16(),
            body.trim()
        );
    }
    anyhow!("server returned {} {reason} for {url}", status.as_u16())
}
