// Remote data source: reads snapshots from a draft board server's
// retrieval endpoint.

use std::time::Duration;

use async_trait::async_trait;
use draftboard_core::{DraftSnapshot, DraftSource, StoreError};
use reqwest::header::CACHE_CONTROL;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Either document the retrieval endpoint can answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoreResponse {
    Data(DraftSnapshot),
    Failure {
        error: String,
        #[serde(default)]
        hint: Option<String>,
    },
}

/// [`DraftSource`] backed by `GET <url>` returning `{ players, state }`.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    url: String,
}

impl RemoteStore {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(RemoteStore {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DraftSource for RemoteStore {
    async fn load(&self) -> Result<DraftSnapshot, StoreError> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| StoreError::unavailable(self.url.as_str(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::unavailable(self.url.as_str(), e))?;
        debug!("GET {} -> {} ({} bytes)", self.url, status, body.len());

        decode_response(&self.url, status, &body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Turn a retrieval endpoint response into a snapshot or an error.
///
/// The server's `{ error, hint }` document is reported as unavailable data,
/// whatever the status code. A body that is neither document is malformed
/// when the status was a success, unavailable otherwise.
pub fn decode_response(url: &str, status: StatusCode, body: &str) -> Result<DraftSnapshot, StoreError> {
    match serde_json::from_str::<StoreResponse>(body) {
        Ok(StoreResponse::Data(snapshot)) if status.is_success() => Ok(snapshot),
        Ok(StoreResponse::Data(_)) => Err(StoreError::unavailable(url, format!("HTTP {status}"))),
        Ok(StoreResponse::Failure { error, hint }) => {
            let message = match hint {
                Some(hint) => format!("{error} ({hint})"),
                None => error,
            };
            Err(StoreError::unavailable(url, message))
        }
        Err(_) if !status.is_success() => {
            Err(StoreError::unavailable(url, format!("HTTP {status}")))
        }
        Err(e) => Err(StoreError::malformed(url, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const URL: &str = "http://127.0.0.1:3000/api/store";
    const DOCUMENT: &str = r#"{
        "players": [{"id": "p1", "displayName": "Alice"}, {"id": 7, "displayName": "Bob"}],
        "state": {"id": "d1", "status": "in progress", "round": 1,
                  "teams": [{"id": "t1", "name": "Chomp"}],
                  "picks": [{"pickNo": 1, "teamId": "t1", "playerId": "p1"}]}
    }"#;

    #[test]
    fn decodes_data_document() {
        let snapshot = decode_response(URL, StatusCode::OK, DOCUMENT).unwrap();
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[1].id, "7");
        assert_eq!(snapshot.state.picks[0].player_ref, "p1");
    }

    #[test]
    fn error_document_is_unavailable_with_hint() {
        let body = r#"{"error": "draft data unavailable at data/draft-state.json", "hint": "Check the data directory."}"#;
        let err = decode_response(URL, StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        assert!(matches!(err, StoreError::DataUnavailable { .. }));
        let message = err.to_string();
        assert!(message.contains("draft-state.json"));
        assert!(message.contains("Check the data directory."));
    }

    #[test]
    fn error_document_without_hint() {
        let err = decode_response(URL, StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "boom"}"#)
            .unwrap_err();
        assert!(err.to_string().ends_with("boom"));
    }

    #[test]
    fn non_json_failure_reports_status() {
        let err = decode_response(URL, StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
            .unwrap_err();
        assert!(matches!(err, StoreError::DataUnavailable { .. }));
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn garbage_with_success_status_is_malformed() {
        let err = decode_response(URL, StatusCode::OK, r#"{"players": 3}"#).unwrap_err();
        assert!(matches!(err, StoreError::DataMalformed { .. }));
        assert_eq!(err.location(), URL);
    }

    /// Serve one canned HTTP response on an ephemeral port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/api/store")
    }

    #[tokio::test]
    async fn loads_over_http() {
        let url = serve_once("200 OK", DOCUMENT).await;
        let store = RemoteStore::new(url.clone()).unwrap();
        let snapshot = store.load().await.unwrap();
        assert_eq!(snapshot.state.id, "d1");
        assert_eq!(store.describe(), url);
    }

    #[tokio::test]
    async fn server_error_document_over_http() {
        let url = serve_once(
            "500 Internal Server Error",
            r#"{"error": "draft data malformed at data/players.public.json", "hint": "Fix it."}"#,
        )
        .await;
        let err = RemoteStore::new(url).unwrap().load().await.unwrap_err();
        assert!(err.to_string().contains("players.public.json"));
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = RemoteStore::new(format!("http://{addr}/api/store")).unwrap();
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::DataUnavailable { .. }));
    }
}
