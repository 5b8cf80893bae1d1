//! Catalog sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use tvbox_commerce::catalog::Product;
use tvbox_commerce::ProductId;

use crate::error::{FetchError, DEFAULT_CATALOG_ERROR, DEFAULT_DELETE_ERROR, DEFAULT_SAVE_ERROR};
use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;

/// Somewhere products can be read from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every product, in catalog order.
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;

    /// One product, or `None` when the catalog does not know the id.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, FetchError>;
}

/// Catalog that accepts edits.
#[async_trait]
pub trait CatalogEditor: Send + Sync {
    /// Create a product. The catalog assigns an id when the product has none.
    async fn create_product(&self, product: &Product) -> Result<Option<Product>, FetchError>;

    /// Replace the product stored under `id`.
    async fn update_product(
        &self,
        id: &ProductId,
        product: &Product,
    ) -> Result<Option<Product>, FetchError>;

    /// Remove the product stored under `id`.
    async fn delete_product(&self, id: &ProductId) -> Result<(), FetchError>;
}

/// `GET /api/products` response body.
#[derive(Debug, Deserialize)]
struct ProductListEnvelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    items: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<String>,
}

/// `GET /api/products/{id}` response body.
#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    product: Option<Value>,
}

/// Response body of a create, update or delete call.
#[derive(Debug, Deserialize)]
struct WriteEnvelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    product: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<Value>),
    Envelope(ProductListEnvelope),
}

/// Decode a product list body, either the API envelope or a bare array.
///
/// Items that fail to decode are skipped with a warning.
pub fn decode_product_list(body: &[u8]) -> Result<Vec<Product>, FetchError> {
    let items = match serde_json::from_slice::<ListBody>(body)? {
        ListBody::Bare(items) => items,
        ListBody::Envelope(envelope) if envelope.ok => envelope.items.unwrap_or_default(),
        ListBody::Envelope(envelope) => {
            let message = envelope
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_CATALOG_ERROR.to_string());
            return Err(FetchError::Api(message));
        }
    };
    Ok(decode_items(items))
}

/// Decode a single product body. `ok: false` or a missing product is `None`.
pub fn decode_product(body: &[u8]) -> Result<Option<Product>, FetchError> {
    let envelope: ProductEnvelope = serde_json::from_slice(body)?;
    if !envelope.ok {
        return Ok(None);
    }
    match envelope.product {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

fn decode_write(body: &[u8], fallback: &str) -> Result<WriteEnvelope, FetchError> {
    let envelope: WriteEnvelope = serde_json::from_slice(body)?;
    if envelope.ok {
        return Ok(envelope);
    }
    let message = envelope
        .error
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Err(FetchError::Api(message))
}

/// Decode the response to a create or update call: the saved product as
/// the catalog stored it, if the response carries one.
pub fn decode_saved_product(body: &[u8]) -> Result<Option<Product>, FetchError> {
    match decode_write(body, DEFAULT_SAVE_ERROR)?.product {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Decode the response to a delete call.
pub fn decode_deleted(body: &[u8]) -> Result<(), FetchError> {
    decode_write(body, DEFAULT_DELETE_ERROR).map(|_| ())
}

/// An undecodable body on a failed status is reported as the status.
fn or_status<T>(
    result: Result<T, FetchError>,
    status: StatusCode,
    url: &Url,
) -> Result<T, FetchError> {
    match result {
        Err(FetchError::Deserialization(_)) if !status.is_success() => Err(FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        }),
        other => other,
    }
}

fn decode_items(items: Vec<Value>) -> Vec<Product> {
    let total = items.len();
    let products: Vec<Product> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Product>(item) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed catalog item");
                None
            }
        })
        .collect();
    debug!(total, decoded = products.len(), "decoded catalog items");
    products
}

/// Remote catalog API client.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
    timeout: TimeoutConfig,
    retry: RetryPolicy,
}

impl HttpCatalog {
    /// Create a client for the API at `base_url` (scheme and host, optional path prefix).
    pub fn new(
        base_url: &str,
        timeout: TimeoutConfig,
        retry: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::Request(format!("invalid base url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Request(format!("invalid base url {base_url}")));
        }
        let client = timeout
            .apply(Client::builder())
            .user_agent(concat!("tvbox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            timeout,
            retry,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET with retry. Server errors are returned as `Err`; any other
    /// status comes back with its body for the caller to interpret.
    async fn get(&self, url: Url) -> Result<(StatusCode, Vec<u8>), FetchError> {
        self.retry
            .run(move || {
                let url = url.clone();
                async move {
                    let response = self
                        .client
                        .get(url.clone())
                        .send()
                        .await
                        .map_err(|e| FetchError::from_reqwest(e, self.timeout.total))?;
                    let status = response.status();
                    if status.is_server_error() {
                        return Err(FetchError::Http {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                    let body = response
                        .bytes()
                        .await
                        .map_err(|e| FetchError::from_reqwest(e, self.timeout.total))?;
                    Ok((status, body.to_vec()))
                }
            })
            .await
    }

    /// Send a write request once; writes are not retried.
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), FetchError> {
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout.total))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout.total))?;
        Ok((status, body.to_vec()))
    }

    async fn fetch_list(&self, url: Url) -> Result<Vec<Product>, FetchError> {
        let (status, body) = self.get(url.clone()).await?;
        let products = or_status(decode_product_list(&body), status, &url)?;
        info!(count = products.len(), url = %url, "fetched catalog");
        Ok(products)
    }

    /// Products matching a free-text query, as the catalog API ranks them.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, FetchError> {
        let mut url = self.endpoint(&["api", "products"]);
        if !query.trim().is_empty() {
            url.query_pairs_mut().append_pair("q", query.trim());
        }
        self.fetch_list(url).await
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.fetch_list(self.endpoint(&["api", "products"])).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
        let url = self.endpoint(&["api", "products", id.as_str()]);
        let (status, body) = self.get(url.clone()).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        or_status(decode_product(&body), status, &url)
    }
}

#[async_trait]
impl CatalogEditor for HttpCatalog {
    async fn create_product(&self, product: &Product) -> Result<Option<Product>, FetchError> {
        let url = self.endpoint(&["api", "products"]);
        let (status, body) = self.send(self.client.post(url.clone()).json(product)).await?;
        let saved = or_status(decode_saved_product(&body), status, &url)?;
        info!(
            id = saved.as_ref().map(|p| p.id.as_str()).unwrap_or_default(),
            name = %product.name,
            "created product"
        );
        Ok(saved)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        product: &Product,
    ) -> Result<Option<Product>, FetchError> {
        let url = self.endpoint(&["api", "products", id.as_str()]);
        let (status, body) = self.send(self.client.put(url.clone()).json(product)).await?;
        let saved = or_status(decode_saved_product(&body), status, &url)?;
        info!(id = %id, "updated product");
        Ok(saved)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), FetchError> {
        let url = self.endpoint(&["api", "products", id.as_str()]);
        let (status, body) = self.send(self.client.delete(url.clone())).await?;
        or_status(decode_deleted(&body), status, &url)?;
        info!(id = %id, "deleted product");
        Ok(())
    }
}

/// Catalog snapshot stored as JSON on disk.
///
/// Accepts the same envelope the API returns, or a bare array of products.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let body = tokio::fs::read(&self.path).await?;
        let products = decode_product_list(&body)?;
        info!(count = products.len(), path = %self.path.display(), "loaded catalog file");
        Ok(products)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
        Ok(self
            .list_products()
            .await?
            .into_iter()
            .find(|p| &p.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ENVELOPE: &str = r#"{
        "ok": true,
        "items": [
            {"id": "1", "name": "VONTAR W2 ATV 4/32", "price": 4000, "type": "promotional"},
            {"id": "2", "name": {"en": "ZTE B866"}, "price": 2800},
            {"id": "3", "name": "P7", "price": 5000, "specs": ["Оперативная память: 4 ГБ"]}
        ]
    }"#;

    #[test]
    fn test_decode_list_skips_bad_items() {
        let products = decode_product_list(ENVELOPE.as_bytes()).unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_decode_list_bare_array() {
        let products = decode_product_list(br#"[{"id": 7, "name": "Tanix", "price": 9000}]"#).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "7");
    }

    #[test]
    fn test_decode_list_missing_items_is_empty() {
        let products = decode_product_list(br#"{"ok": true}"#).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_decode_list_api_error() {
        let err = decode_product_list(br#"{"ok": false, "error": "db down"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Api(ref m) if m == "db down"));

        let err = decode_product_list(br#"{"ok": false}"#).unwrap_err();
        assert!(matches!(err, FetchError::Api(ref m) if m == DEFAULT_CATALOG_ERROR));
    }

    #[test]
    fn test_decode_list_not_json() {
        let err = decode_product_list(b"<html>").unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }

    #[test]
    fn test_decode_product() {
        let product = decode_product(br#"{"ok": true, "product": {"id": "1", "name": "VONTAR", "price": 4000}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(product.name, "VONTAR");

        assert!(decode_product(br#"{"ok": false}"#).unwrap().is_none());
        assert!(decode_product(br#"{"ok": true, "product": null}"#).unwrap().is_none());
    }

    #[test]
    fn test_decode_saved_product() {
        let saved = decode_saved_product(br#"{"ok": true, "product": {"id": 15, "name": "Tanix", "price": 9000}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(saved.id.as_str(), "15");

        assert!(decode_saved_product(br#"{"ok": true}"#).unwrap().is_none());

        let err = decode_saved_product(br#"{"ok": false, "error": "name taken"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Api(ref m) if m == "name taken"));

        let err = decode_saved_product(br#"{"ok": false}"#).unwrap_err();
        assert!(matches!(err, FetchError::Api(ref m) if m == DEFAULT_SAVE_ERROR));
    }

    #[test]
    fn test_decode_deleted() {
        assert!(decode_deleted(br#"{"ok": true}"#).is_ok());
        let err = decode_deleted(br#"{"ok": false, "error": ""}"#).unwrap_err();
        assert!(matches!(err, FetchError::Api(ref m) if m == DEFAULT_DELETE_ERROR));
    }

    #[test]
    fn test_endpoint_keeps_prefix_and_escapes_id() {
        let catalog = HttpCatalog::new(
            "https://shop.example/v1/",
            TimeoutConfig::default(),
            RetryPolicy::none(),
        )
        .unwrap();
        assert_eq!(
            catalog.endpoint(&["api", "products"]).as_str(),
            "https://shop.example/v1/api/products"
        );
        assert_eq!(
            catalog.endpoint(&["api", "products", "a/b"]).as_str(),
            "https://shop.example/v1/api/products/a%2Fb"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpCatalog::new("not a url", TimeoutConfig::default(), RetryPolicy::none())
            .unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }

    #[tokio::test]
    async fn test_file_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ENVELOPE.as_bytes()).unwrap();

        let catalog = FileCatalog::new(file.path());
        assert_eq!(catalog.list_products().await.unwrap().len(), 2);

        let product = catalog.get_product(&ProductId::new("3")).await.unwrap();
        assert_eq!(product.unwrap().name, "P7");
        assert!(catalog
            .get_product(&ProductId::new("2"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_file_catalog_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FileCatalog::new(dir.path().join("missing.json"));
        let err = catalog.list_products().await.unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }
}
