use std::fmt::Display;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::app::{Portfolio, ProjectRef, RiskSource, RiskSourceError, RiskTask, SectionRef};

use super::asana_api_response::{AsanaEnvelope, AsanaNamedResource, AsanaPortfolio, AsanaTask};

/// Fields requested on every call, enough to flatten risk tasks.
const OPT_FIELDS: &str =
    "name,gid,custom_fields.name,custom_fields.display_value,created_at,modified_at";
const PAGE_SIZE: &str = "100";

#[derive(Clone, Deserialize)]
pub struct AsanaAccessToken(pub String);

impl std::fmt::Debug for AsanaAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[redacted]")
    }
}

impl Display for AsanaAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[redacted]")
    }
}

#[derive(Error, Debug)]
pub enum AsanaClientError {
    #[error("error performing http request: {0}")]
    HTTPError(#[from] reqwest::Error),

    #[error("asana answered {status} for {path}: {body}")]
    UnexpectedStatus {
        status: u16,
        path: String,
        body: String,
    },

    #[error("error deserializing the response: {0}")]
    ResponseDeserialization(#[from] serde_json::Error),
}

impl From<AsanaClientError> for RiskSourceError {
    fn from(value: AsanaClientError) -> Self {
        RiskSourceError::SourceError(Box::new(value))
    }
}

/// Read-only client of the Asana REST API.
#[derive(Clone, Debug)]
pub struct AsanaClient {
    url: String,
    access_token: AsanaAccessToken,
    http: reqwest::Client,
}

impl AsanaClient {
    pub fn new(url: String, access_token: AsanaAccessToken) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            access_token,
            http,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<AsanaEnvelope<T>, AsanaClientError> {
        debug!("GET {path} {query:?}");

        let response = self
            .http
            .get(format!("{}{}", self.url, path))
            .bearer_auth(&self.access_token.0)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("opt_fields", OPT_FIELDS)])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(AsanaClientError::UnexpectedStatus {
                status: status.as_u16(),
                path: path.to_string(),
                body: String::from_utf8_lossy(&body).to_string(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Follows `next_page` until the collection is exhausted.
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AsanaClientError> {
        let mut items = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut query = vec![("limit", PAGE_SIZE)];
            if let Some(offset) = offset.as_deref() {
                query.push(("offset", offset));
            }

            let page: AsanaEnvelope<Vec<T>> = self.get(path, &query).await?;
            items.extend(page.data);

            match page.next_page {
                Some(next) => offset = Some(next.offset),
                None => return Ok(items),
            }
        }
    }
}

#[async_trait::async_trait]
impl RiskSource for AsanaClient {
    async fn portfolio(&self, portfolio_gid: &str) -> Result<Portfolio, RiskSourceError> {
        let envelope: AsanaEnvelope<AsanaPortfolio> = self
            .get(&format!("/portfolios/{portfolio_gid}"), &[])
            .await?;
        Ok(envelope.data.into())
    }

    async fn portfolio_projects(
        &self,
        portfolio_gid: &str,
    ) -> Result<Vec<ProjectRef>, RiskSourceError> {
        let items: Vec<AsanaNamedResource> = self
            .get_all(&format!("/portfolios/{portfolio_gid}/items"))
            .await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn project_sections(
        &self,
        project_gid: &str,
    ) -> Result<Vec<SectionRef>, RiskSourceError> {
        let sections: Vec<AsanaNamedResource> = self
            .get_all(&format!("/projects/{project_gid}/sections"))
            .await?;
        Ok(sections.into_iter().map(Into::into).collect())
    }

    async fn section_tasks(&self, section_gid: &str) -> Result<Vec<RiskTask>, RiskSourceError> {
        let tasks: Vec<AsanaTask> = self
            .get_all(&format!("/sections/{section_gid}/tasks"))
            .await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::{Value, json};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    use super::*;

    /// Minimal HTTP server answering canned JSON per request target.
    struct FakeAsana {
        url: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl FakeAsana {
        async fn serve(routes: HashMap<String, (u16, Value)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let url = format!("http://{}", listener.local_addr().unwrap());
            let requests = Arc::new(Mutex::new(Vec::new()));

            let recorded = requests.clone();
            tokio::spawn(async move {
                loop {
                    let Ok((mut socket, _)) = listener.accept().await else {
                        return;
                    };
                    let mut buffer = vec![0u8; 16 * 1024];
                    let mut read = 0;
                    while !buffer[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buffer[read..]).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => read += n,
                        }
                    }
                    let request = String::from_utf8_lossy(&buffer[..read]).to_string();
                    let target = request.split_whitespace().nth(1).unwrap_or_default().to_string();
                    recorded.lock().await.push(request);

                    let (status, body) = routes
                        .iter()
                        .find(|(route, _)| matches_route(&target, route))
                        .map(|(_, response)| response.clone())
                        .unwrap_or((404, json!({"errors": [{"message": "not found"}]})));
                    let body = body.to_string();
                    let response = format!(
                        "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
            });

            Self { url, requests }
        }

        fn client(&self) -> AsanaClient {
            AsanaClient::new(self.url.clone(), AsanaAccessToken("secret".to_string())).unwrap()
        }
    }

    /// Routes are `path?` or `path?offset=<offset>`. The latter only match that page, the
    /// former only first pages.
    fn matches_route(target: &str, route: &str) -> bool {
        let (route_path, route_query) = route.split_once('?').unwrap_or((route, ""));
        let target_path = target.split('?').next().unwrap_or_default();
        if target_path != route_path {
            return false;
        }
        match route_query.strip_prefix("offset=") {
            Some(offset) => target.contains(&format!("offset={offset}")),
            None => !target.contains("offset="),
        }
    }

    #[tokio::test]
    async fn it_reads_the_portfolio_with_bearer_auth() {
        let server = FakeAsana::serve(HashMap::from([(
            "/portfolios/42?".to_string(),
            (200, json!({"data": {"gid": "42", "name": "Risk Portfolio"}})),
        )]))
        .await;

        let portfolio = server.client().portfolio("42").await.unwrap();

        assert_eq!(portfolio.name, "Risk Portfolio");
        let requests = server.requests.lock().await;
        let request = requests[0].to_lowercase();
        assert!(request.contains("authorization: bearer secret"));
        assert!(request.contains("opt_fields=name%2cgid%2ccustom_fields.name"));
    }

    #[tokio::test]
    async fn it_follows_pagination() {
        let server = FakeAsana::serve(HashMap::from([
            (
                "/sections/7/tasks?".to_string(),
                (
                    200,
                    json!({"data": [{"gid": "1", "name": "first"}], "next_page": {"offset": "page2"}}),
                ),
            ),
            (
                "/sections/7/tasks?offset=page2".to_string(),
                (200, json!({"data": [{"gid": "2", "name": "second"}], "next_page": null})),
            ),
        ]))
        .await;

        let tasks = server.client().section_tasks("7").await.unwrap();

        let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(server.requests.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn it_reports_unexpected_statuses() {
        let server = FakeAsana::serve(HashMap::from([(
            "/projects/9/sections?".to_string(),
            (401, json!({"errors": [{"message": "Not Authorized"}]})),
        )]))
        .await;

        let error = server.client().project_sections("9").await.unwrap_err();

        let message = error.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Not Authorized"));
    }

    #[test]
    fn the_token_is_redacted() {
        let token = AsanaAccessToken("secret".to_string());

        assert_eq!(format!("{token}"), "[redacted]");
        assert_eq!(format!("{token:?}"), "[redacted]");
    }
}
