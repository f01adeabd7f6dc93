//! PostgREST-backed product store.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures_util::future::BoxFuture;
use vitrine_types::Product;

use super::{ProductStore, StoreFactory};

/// Table exposed by the store for this widget.
const PRODUCTS_TABLE: &str = "products";

/// Configuration for a [`PostgrestStore`].
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Base URL of the store, without the /rest/v1 suffix.
    pub base_url: String,
    /// Public API key, sent on every request.
    pub anon_key: String,
    /// Bearer credential received from the parent.
    pub access_token: String,
}

/// PostgREST client bound to one bearer credential.
pub struct PostgrestStore {
    config: PostgrestConfig,
    http: reqwest::Client,
}

impl PostgrestStore {
    /// Creates a new store client with the given configuration.
    pub fn new(config: PostgrestConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            PRODUCTS_TABLE
        )
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.access_token)
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let response = self
            .authorize(
                self.http
                    .get(self.table_url())
                    .query(&[("select", "*"), ("order", "created_at.desc")]),
            )
            .send()
            .await
            .context("request to product store failed")?;

        if !response.status().is_success() {
            anyhow::bail!(error_message(response).await);
        }

        response
            .json::<Vec<Product>>()
            .await
            .context("invalid product list from store")
    }

    async fn insert(&self, name: &str) -> Result<()> {
        let response = self
            .authorize(
                self.http
                    .post(self.table_url())
                    .header("Prefer", "return=minimal")
                    .json(&serde_json::json!({ "name": name })),
            )
            .send()
            .await
            .context("request to product store failed")?;

        if !response.status().is_success() {
            anyhow::bail!(error_message(response).await);
        }

        Ok(())
    }
}

impl ProductStore for PostgrestStore {
    fn list_products(&self) -> BoxFuture<'_, Result<Vec<Product>>> {
        Box::pin(self.list())
    }

    fn insert_product(&self, name: &str) -> BoxFuture<'_, Result<()>> {
        let name = name.to_string();
        Box::pin(async move { self.insert(&name).await })
    }
}

/// Extracts the failure text from an error response.
///
/// PostgREST reports errors as `{"message": "..."}`; that text is surfaced
/// verbatim to the user. Anything else degrades to the HTTP status.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(|message| message.as_str())
            .map_or_else(|| format!("HTTP {status}"), str::to_string),
        Err(_) => format!("HTTP {status}"),
    }
}

/// Default [`StoreFactory`]: binds each credential to a fresh PostgREST
/// client against one configured store.
#[derive(Debug, Clone)]
pub struct PostgrestFactory {
    pub base_url: String,
    pub anon_key: String,
}

impl StoreFactory for PostgrestFactory {
    fn connect(&self, token: &str) -> Arc<dyn ProductStore> {
        Arc::new(PostgrestStore::new(PostgrestConfig {
            base_url: self.base_url.clone(),
            anon_key: self.anon_key.clone(),
            access_token: token.to_string(),
        }))
    }
}
