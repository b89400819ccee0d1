//! [`HttpVectorStore`] — REST client for a Qdrant-style vector database.
//!
//! Endpoints used: `PUT /collections/{name}`, `GET /collections`,
//! `GET /collections/{name_or_alias}` (the server resolves aliases and
//! reports the physical name), and `POST /collections/aliases` for alias
//! actions. No retries: alias and collection writes are
//! correctness-sensitive, and an ambiguous failure must surface as-is.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use lockstep_core::{
  collection::{CollectionInfo, VectorParams},
  store::VectorStore,
};

use crate::{Error, Result};

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the vector store.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
/// Timeouts are the only cancellation mechanism; there is no retry loop.
#[derive(Clone)]
pub struct HttpVectorStore {
  client:   Client,
  base_url: String,
  api_key:  Option<String>,
}

impl HttpVectorStore {
  pub fn new(
    base_url: impl Into<String>,
    api_key: Option<String>,
  ) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, base_url: base_url.into(), api_key })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.api_key {
      Some(key) => req.header("api-key", key),
      None => req,
    }
  }

  async fn alias_action(&self, action: AliasAction) -> Result<reqwest::Response> {
    self
      .auth(self.client.post(self.url("/collections/aliases")))
      .json(&AliasActions { actions: vec![action] })
      .send()
      .await
      .map_err(Error::Connectivity)
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CreateCollectionBody<'a> {
  vectors: &'a VectorParams,
}

#[derive(Deserialize)]
struct CollectionsResponse {
  result: CollectionsResult,
}

#[derive(Deserialize)]
struct CollectionsResult {
  collections: Vec<CollectionDescription>,
}

#[derive(Deserialize)]
struct CollectionDescription {
  name: String,
}

#[derive(Deserialize)]
struct CollectionResponse {
  result: CollectionInfo,
}

#[derive(Serialize)]
struct AliasActions {
  actions: Vec<AliasAction>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum AliasAction {
  CreateAlias {
    collection_name: String,
    alias_name:      String,
  },
  DeleteAlias {
    alias_name: String,
  },
}

// ─── VectorStore impl ────────────────────────────────────────────────────────

impl VectorStore for HttpVectorStore {
  type Error = Error;

  async fn create_collection(
    &self,
    name: &str,
    params: &VectorParams,
  ) -> Result<()> {
    let resp = self
      .auth(self.client.put(self.url(&format!("/collections/{name}"))))
      .json(&CreateCollectionBody { vectors: params })
      .send()
      .await
      .map_err(Error::Connectivity)?;
    require_success(resp).await?;
    Ok(())
  }

  async fn list_collections(&self) -> Result<Vec<String>> {
    let resp = self
      .auth(self.client.get(self.url("/collections")))
      .send()
      .await
      .map_err(Error::Connectivity)?;
    let resp = require_success(resp).await?;

    let parsed: CollectionsResponse =
      resp.json().await.map_err(Error::Json)?;
    Ok(
      parsed
        .result
        .collections
        .into_iter()
        .map(|c| c.name)
        .collect(),
    )
  }

  async fn get_collection(
    &self,
    name_or_alias: &str,
  ) -> Result<Option<CollectionInfo>> {
    let resp = self
      .auth(
        self
          .client
          .get(self.url(&format!("/collections/{name_or_alias}"))),
      )
      .send()
      .await
      .map_err(Error::Connectivity)?;

    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    let resp = require_success(resp).await?;

    let parsed: CollectionResponse = resp.json().await.map_err(Error::Json)?;
    Ok(Some(parsed.result))
  }

  async fn create_alias(&self, collection: &str, alias: &str) -> Result<()> {
    let resp = self
      .alias_action(AliasAction::CreateAlias {
        collection_name: collection.to_owned(),
        alias_name:      alias.to_owned(),
      })
      .await?;
    require_success(resp).await?;
    Ok(())
  }

  async fn delete_alias(&self, alias: &str) -> Result<()> {
    let resp = self
      .alias_action(AliasAction::DeleteAlias { alias_name: alias.to_owned() })
      .await?;

    // A missing alias is fine — delete is idempotent by contract.
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(());
    }
    require_success(resp).await?;
    Ok(())
  }
}

/// Map non-2xx responses to [`Error::Api`], preserving the body.
async fn require_success(resp: reqwest::Response) -> Result<reqwest::Response> {
  if resp.status().is_success() {
    return Ok(resp);
  }
  let status = resp.status().as_u16();
  let body = resp.text().await.unwrap_or_default();
  Err(Error::Api { status, body })
}
