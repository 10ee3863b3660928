use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::types::{DeleteStyle, Endpoint, User, UserId};

/// The CRUD contract a directory service exposes.
///
/// Every call names the endpoint it targets; implementations hold no notion
/// of a "current" endpoint.
#[async_trait]
pub trait Directory {
    async fn list(&self, endpoint: &Endpoint) -> Result<Vec<User>, FetchError>;

    async fn create(&self, endpoint: &Endpoint, name: &str) -> Result<(), FetchError>;

    async fn update(&self, endpoint: &Endpoint, id: &UserId, name: &str)
        -> Result<(), FetchError>;

    async fn delete(&self, endpoint: &Endpoint, id: &UserId) -> Result<(), FetchError>;
}

/// Directory backed by a plain HTTP service speaking JSON and form bodies.
pub struct DirectoryClient {
    http: Client,
}

impl DirectoryClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    async fn send(request: RequestBuilder) -> Result<Response, FetchError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Server {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response)
    }
}

impl Default for DirectoryClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the user sequence out of a list response body.
///
/// Only a `data` array counts: any JSON body without one, including bare
/// arrays and `null`, is an empty directory. A body that is not JSON at all,
/// or whose `data` holds things that are not users, is malformed.
fn parse_users(body: &str) -> Result<Vec<User>, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("body is not JSON: {e}")))?;

    match value.get("data") {
        Some(data @ Value::Array(_)) => Vec::<User>::deserialize(data)
            .map_err(|e| FetchError::MalformedResponse(format!("invalid user record: {e}"))),
        _ => Ok(Vec::new()),
    }
}

#[async_trait]
impl Directory for DirectoryClient {
    async fn list(&self, endpoint: &Endpoint) -> Result<Vec<User>, FetchError> {
        tracing::debug!(url = %endpoint.url, "listing users");
        let request = self
            .http
            .get(&endpoint.url)
            .header("Accept", "application/json");
        let body = Self::send(request).await?.text().await?;
        parse_users(&body)
    }

    async fn create(&self, endpoint: &Endpoint, name: &str) -> Result<(), FetchError> {
        tracing::debug!(url = %endpoint.url, name = %name, "creating user");
        let request = self.http.post(&endpoint.url).form(&[("name", name)]);
        Self::send(request).await?;
        Ok(())
    }

    async fn update(
        &self,
        endpoint: &Endpoint,
        id: &UserId,
        name: &str,
    ) -> Result<(), FetchError> {
        tracing::debug!(url = %endpoint.url, %id, name = %name, "updating user");
        let id = id.to_string();
        let request = self
            .http
            .put(&endpoint.url)
            .form(&[("id", id.as_str()), ("name", name)]);
        Self::send(request).await?;
        Ok(())
    }

    async fn delete(&self, endpoint: &Endpoint, id: &UserId) -> Result<(), FetchError> {
        tracing::debug!(url = %endpoint.url, %id, style = %endpoint.delete_style, "deleting user");
        let id = id.to_string();
        let request = self.http.delete(&endpoint.url);
        let request = match endpoint.delete_style {
            DeleteStyle::Query => request.query(&[("id", id.as_str())]),
            DeleteStyle::Form => request.form(&[("id", id.as_str())]),
        };
        Self::send(request).await?;
        Ok(())
    }
}
