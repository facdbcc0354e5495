//! HTTP client for a remote movie catalog

use crate::error::{NetworkError, NetworkResult};
use log::debug;
use movielibrary_core::Movie;
use reqwest::{Client as ReqwestClient, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("MovieLibrary/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Error payload sent by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Catalog operations against a `movielibrary-server`
#[derive(Debug, Clone)]
pub struct RemoteLibraryAccess {
    inner: ReqwestClient,
    base_url: Url,
}

impl RemoteLibraryAccess {
    /// Creates a client for the server at `base_url` with default configuration
    pub fn new(base_url: &str) -> NetworkResult<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Creates a client with custom configuration
    pub fn with_config(base_url: &str, config: ClientConfig) -> NetworkResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| NetworkError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(base_url.to_string()));
        }

        let inner = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self { inner, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the server answers its health check
    pub async fn is_reachable(&self) -> bool {
        match self.endpoint(&["health"]) {
            Ok(url) => matches!(self.inner.get(url).send().await, Ok(r) if r.status().is_success()),
            Err(_) => false,
        }
    }

    /// All movies in the catalog
    pub async fn movies(&self) -> NetworkResult<Vec<Movie>> {
        let url = self.endpoint(&["movielibrary", "movies"])?;
        let response = check(self.inner.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn movie(&self, title: &str) -> NetworkResult<Movie> {
        let url = self.endpoint(&["movielibrary", "movies", title])?;
        let response = check(self.inner.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn lent_status(&self, title: &str) -> NetworkResult<bool> {
        let url = self.endpoint(&["movielibrary", "movies", title, "lentstatus"])?;
        let response = check(self.inner.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn lend(&self, title: &str) -> NetworkResult<()> {
        let url = self.endpoint(&["movielibrary", "movies", title, "lend"])?;
        check(self.inner.post(url).send().await?).await?;
        Ok(())
    }

    pub async fn return_movie(&self, title: &str) -> NetworkResult<()> {
        let url = self.endpoint(&["movielibrary", "movies", title, "return"])?;
        check(self.inner.post(url).send().await?).await?;
        Ok(())
    }

    /// Adds `movie` and returns the record as stored by the server
    pub async fn add_movie(&self, movie: &Movie) -> NetworkResult<Movie> {
        let url = self.endpoint(&["movielibrary", "movies"])?;
        let response = check(self.inner.put(url).json(movie).send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_movie(&self, title: &str) -> NetworkResult<()> {
        let url = self.endpoint(&["movielibrary", "movies", title])?;
        check(self.inner.delete(url).send().await?).await?;
        Ok(())
    }

    /// Appends percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> NetworkResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NetworkError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        debug!("Request URL: {}", url);
        Ok(url)
    }
}

/// Turns a non-2xx response into the matching error
async fn check(response: Response) -> NetworkResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status.canonical_reason().unwrap_or("Unknown").to_string();
    let (code, message) = match response.json::<ErrorBody>().await {
        Ok(body) => (body.code, body.message),
        Err(_) => (String::new(), fallback),
    };

    Err(match status {
        StatusCode::NOT_FOUND => NetworkError::NotFound(message),
        StatusCode::CONFLICT => NetworkError::DuplicateTitle(message),
        s if s.is_client_error() => NetworkError::Rejected {
            status: s.as_u16(),
            code,
            message,
        },
        s => NetworkError::Server {
            status: s.as_u16(),
            message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("MovieLibrary/"));
    }

    #[test]
    fn test_endpoint_encodes_titles() {
        let client = RemoteLibraryAccess::new("http://127.0.0.1:8080").expect("Valid URL");

        let url = client
            .endpoint(&["movielibrary", "movies", "The Trollgirl", "lend"])
            .expect("Should build URL");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/movielibrary/movies/The%20Trollgirl/lend"
        );

        let url = client
            .endpoint(&["movielibrary", "movies", "AC/DC: Live"])
            .expect("Should build URL");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/movielibrary/movies/AC%2FDC:%20Live"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = RemoteLibraryAccess::new("http://example.com/api/").expect("Valid URL");
        let url = client
            .endpoint(&["movielibrary", "movies"])
            .expect("Should build URL");
        assert_eq!(url.as_str(), "http://example.com/api/movielibrary/movies");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            RemoteLibraryAccess::new("not a url"),
            Err(NetworkError::InvalidUrl(_))
        ));
        assert!(matches!(
            RemoteLibraryAccess::new("mailto:movies@example.com"),
            Err(NetworkError::InvalidUrl(_))
        ));
    }
}
