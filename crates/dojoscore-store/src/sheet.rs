//! Remote spreadsheet-backed table.
//!
//! The deployment variant that keeps progress in a hosted sheet behind a
//! small HTTP API: `GET {base}/table` returns the user mapping as JSON,
//! `PUT {base}/table` replaces it wholesale. Same whole-collection contract
//! as the file backend; no generation support, so writes are always
//! last-writer-wins.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use dojoscore_core::error::StoreError;
use dojoscore_core::model::UserTable;
use dojoscore_core::traits::{Generation, ProgressStore, Snapshot};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote tabular progress store.
pub struct SheetStore {
    base_url: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl SheetStore {
    pub fn new(base_url: &str, api_token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/table", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ProgressStore for SheetStore {
    fn name(&self) -> &str {
        "sheet"
    }

    #[instrument(skip(self))]
    async fn load_all(&self) -> Result<Snapshot, StoreError> {
        let response = self
            .authorize(self.client.get(self.table_url()))
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let table: UserTable = response
            .json()
            .await
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        Ok(Snapshot {
            table,
            generation: None,
        })
    }

    #[instrument(skip(self, table), fields(users = table.len()))]
    async fn store_all(
        &self,
        table: &UserTable,
        expected: Option<&Generation>,
    ) -> Result<(), StoreError> {
        if expected.is_some() {
            return Err(StoreError::Unavailable(
                "the sheet backend does not support checked writes".into(),
            ));
        }

        let response = self
            .authorize(self.client.put(self.table_url()))
            .json(table)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojoscore_core::model::UserRecord;
    use dojoscore_core::traits::ProgressTracker;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(score: u64, sessions: u64) -> UserRecord {
        UserRecord {
            score,
            active_sessions: sessions,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn loads_the_remote_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/table"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ana": {"score": 120, "active_sessions": 4}
            })))
            .mount(&server)
            .await;

        let store = SheetStore::new(&server.uri(), None);
        let snapshot = store.load_all().await.unwrap();

        assert_eq!(snapshot.table["ana"].score, 120);
        assert!(snapshot.generation.is_none());
    }

    #[tokio::test]
    async fn sends_the_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/table"))
            .and(header("authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let store = SheetStore::new(&server.uri(), Some("sekrit".into()));
        store.load_all().await.unwrap();
    }

    #[tokio::test]
    async fn put_replaces_the_whole_table() {
        let server = MockServer::start().await;
        let mut table = UserTable::new();
        table.insert("ana".into(), record(50, 2));

        Mock::given(method("PUT"))
            .and(path("/table"))
            .and(body_json(&table))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = SheetStore::new(&server.uri(), None);
        store.store_all(&table, None).await.unwrap();
    }

    #[tokio::test]
    async fn server_error_is_a_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/table"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let store = SheetStore::new(&server.uri(), None);
        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Remote { status: 503, .. }));
    }

    #[tokio::test]
    async fn garbage_payload_is_corrupt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/table"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let store = SheetStore::new(&server.uri(), None);
        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn unreachable_host_degrades_to_zeros_at_the_tracker() {
        // Port 1 refuses connections; the get contract still returns zeros.
        let store = SheetStore::new("http://127.0.0.1:1", None);
        let tracker = ProgressTracker::new(Box::new(store));
        assert_eq!(tracker.get("ana").await.score, 0);
    }

    #[tokio::test]
    async fn checked_write_is_refused() {
        let server = MockServer::start().await;
        let store = SheetStore::new(&server.uri(), None);
        let err = store
            .store_all(&UserTable::new(), Some(&Generation("g1".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
