//! HTTP client for backend requests.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use studymate_core::error::{ApiError, Error, TransportError};
use studymate_core::{AccessToken, BaseUrl};

use crate::endpoints::ErrorBody;

/// HTTP client for backend requests.
///
/// Every method takes the bearer credential as an `Option`: `None` sends
/// the request unauthenticated (the authorizer's passthrough case), `Some`
/// attaches exactly one `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base: BaseUrl,
}

impl HttpClient {
    /// Create a new client for the given backend base URL.
    pub fn new(base: BaseUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("studymate/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// Make a GET request with query parameters.
    #[instrument(skip(self, bearer), fields(base = %self.base))]
    pub async fn get<Q, R>(
        &self,
        path: &str,
        query: &Q,
        bearer: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "GET");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(query)
            .headers(self.headers(bearer))
            .send()
            .await
            .map_err(into_transport)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    #[instrument(skip(self, body, bearer), fields(base = %self.base))]
    pub async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(self.headers(bearer))
            .send()
            .await
            .map_err(into_transport)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a multipart form (file upload).
    #[instrument(skip(self, form, bearer), fields(base = %self.base))]
    pub async fn post_multipart<R>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        bearer: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "POST (multipart)");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .headers(self.headers(bearer))
            .send()
            .await
            .map_err(into_transport)?;

        self.handle_response(response).await
    }

    /// Make a DELETE request that returns no content.
    #[instrument(skip(self, bearer), fields(base = %self.base))]
    pub async fn delete(&self, path: &str, bearer: Option<&AccessToken>) -> Result<(), Error> {
        let url = self.base.endpoint(path);
        debug!(path, "DELETE");

        let response = self
            .client
            .delete(&url)
            .headers(self.headers(bearer))
            .send()
            .await
            .map_err(into_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Api(error))
        }
    }

    /// Create request headers, attaching the bearer credential if present.
    fn headers(&self, bearer: Option<&AccessToken>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = bearer {
            let auth_value = format!("Bearer {}", token.as_str());
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value).expect("invalid token characters"),
            );
        }
        headers
    }

    /// Handle a backend response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(into_transport)?;
            Ok(body)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Api(error))
        }
    }

    /// Parse an error response body.
    ///
    /// The backend reports errors as `{"error": ...}` from the app views
    /// and `{"detail": ..., "code": ...}` from the auth layer; both
    /// collapse into [`ApiError`].
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::new(status, body.code, body.error.or(body.detail)),
            Err(_) => ApiError::new(status, None, None),
        }
    }
}

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn into_transport(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
