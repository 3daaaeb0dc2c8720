// Hand-crafted async HTTP client for the SmartThings cloud API.
//
// Base path: https://api.smartthings.com/v1/
// Auth: Authorization: Bearer <token>

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;

// ── Error response shape from the platform API ───────────────────────

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the SmartThings API.
///
/// Uses bearer-token authentication and communicates via JSON REST
/// endpoints under `/v1/`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    ///
    /// Injects `Authorization: Bearer …` as a default header on every request.
    pub fn from_token(
        base_url: &str,
        token: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL, ensuring it ends with `/v1/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/v1") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/v1/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"devices"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/v1/`, so joining relative paths works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    /// Resolve an absolute or relative href from a `_links` entry.
    ///
    /// Pagination hrefs come back absolute; anything else is joined
    /// against the base URL.
    pub(crate) fn href_url(&self, href: &str) -> Result<Url, Error> {
        match Url::parse(href) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(self.url(href)),
            Err(e) => Err(e.into()),
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_with_params<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url} params={params:?}");

        let resp = self.http.post(url).query(params).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put_with_params<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url} params={params:?}");

        let resp = self.http.put(url).query(params).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn delete_with_params(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url} params={params:?}");

        let resp = self.http.delete(url).query(params).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Deserialize a successful JSON body or map an error response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Discard a successful body, mapping non-2xx responses to errors.
    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::error_from_body(status, &body));
        }

        Ok(())
    }

    /// Parse the platform's `{error: {code, message}}` envelope, degrading
    /// to the HTTP status text when the body isn't structured.
    fn error_from_body(status: reqwest::StatusCode, body: &str) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication {
                message: "token rejected by the platform".into(),
            };
        }

        let parsed: Option<ErrorEnvelope> = serde_json::from_str(body).ok();
        let (message, code) = match parsed.and_then(|e| e.error) {
            Some(err) => (
                err.message
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_owned()),
                err.code,
            ),
            None => (
                status.canonical_reason().unwrap_or("error").to_owned(),
                None,
            ),
        };

        Error::Api {
            message,
            code,
            status: status.as_u16(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_v1() {
        let url = ApiClient::normalize_base_url("https://api.smartthings.com").unwrap();
        assert_eq!(url.as_str(), "https://api.smartthings.com/v1/");
    }

    #[test]
    fn normalize_keeps_existing_v1() {
        let url = ApiClient::normalize_base_url("https://api.smartthings.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.smartthings.com/v1/");

        let url = ApiClient::normalize_base_url("https://api.smartthings.com/v1/").unwrap();
        assert_eq!(url.as_str(), "https://api.smartthings.com/v1/");
    }

    #[test]
    fn error_from_body_parses_envelope() {
        let body = r#"{"requestId":"1","error":{"code":"ConstraintViolationError","message":"bad request"}}"#;
        let err = ApiClient::error_from_body(reqwest::StatusCode::UNPROCESSABLE_ENTITY, body);
        match err {
            Error::Api {
                message,
                code,
                status,
            } => {
                assert_eq!(message, "bad request");
                assert_eq!(code.as_deref(), Some("ConstraintViolationError"));
                assert_eq!(status, 422);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_from_body_degrades_to_status_text() {
        let err = ApiClient::error_from_body(reqwest::StatusCode::FORBIDDEN, "not json");
        match err {
            Error::Api {
                message, status, ..
            } => {
                assert_eq!(message, "Forbidden");
                assert_eq!(status, 403);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
