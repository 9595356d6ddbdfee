//! HTTP session for the Cartwheel API.
//!
//! An explicit session object rather than a process-wide singleton: the
//! bearer token lives on the session, and anything that needs the API gets
//! a session handed to it.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use cartwheel_core::{Order, OrderId, OrderRequest, Product, UserId};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error status. `message` is the server's
    /// own text, surfaced verbatim.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Account payload returned by register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
    pub token: String,
}

/// Current account, as returned by the profile endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedSummary {
    pub message: String,
    pub count: u64,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(serde::Serialize)]
struct Credentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
    password: &'a str,
}

/// Authenticated (or not yet authenticated) connection to one API server.
#[derive(Debug, Clone)]
pub struct ApiSession {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiSession {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            http: reqwest::Client::new(),
            token: None,
        })
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Forget the bearer token, returning the session to anonymous state.
    pub fn logout(&mut self) {
        self.token = None;
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map_or_else(|_| "API request failed".to_owned(), |body| body.message);
            Err(ApiError::Api { status, message })
        }
    }

    /// Create an account and adopt its token.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, ApiError> {
        let url = self.endpoint("/api/auth/register")?;
        let user: AuthUser = self
            .send(self.http.post(url).json(&Credentials {
                name: Some(name),
                email,
                password,
            }))
            .await?;
        self.token = Some(user.token.clone());
        Ok(user)
    }

    /// Exchange credentials for a token and adopt it.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
        let url = self.endpoint("/api/auth/login")?;
        let user: AuthUser = self
            .send(self.http.post(url).json(&Credentials {
                name: None,
                email,
                password,
            }))
            .await?;
        self.token = Some(user.token.clone());
        Ok(user)
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        let url = self.endpoint("/api/auth/profile")?;
        self.send(self.http.get(url)).await
    }

    /// Catalog listing with optional exact-category and name-substring
    /// filters.
    pub async fn products(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint("/api/products")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(category) = category {
                pairs.append_pair("category", category);
            }
            if let Some(search) = search {
                pairs.append_pair("search", search);
            }
        }
        self.send(self.http.get(url)).await
    }

    pub async fn seed_products(&self) -> Result<SeedSummary, ApiError> {
        let url = self.endpoint("/api/products/seed")?;
        self.send(self.http.post(url)).await
    }

    pub async fn place_order(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        let url = self.endpoint("/api/orders")?;
        self.send(self.http.post(url).json(request)).await
    }

    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint("/api/orders")?;
        self.send(self.http.get(url)).await
    }

    pub async fn order(&self, id: OrderId) -> Result<Order, ApiError> {
        let url = self.endpoint(&format!("/api/orders/{id}"))?;
        self.send(self.http.get(url)).await
    }
}
