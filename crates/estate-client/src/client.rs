// File: src/client.rs
// Purpose: HTTP client for the CRM REST API

use estate_forms::{Endpoint, FormPayload, MultipartBody, PayloadBody, SubmitError, Submitter};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{ApiResponse, AuthData, Property, User};

/// Thin, fire-once wrapper over the REST API. No retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.api.timeout()).build()?;
        Ok(Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder, required: bool) -> Result<RequestBuilder, ApiError> {
        match &self.token {
            Some(token) => Ok(req.bearer_auth(token)),
            None if required => Err(ApiError::MissingToken),
            None => Ok(req),
        }
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData, ApiError> {
        let body = json!({ "email": email, "password": password });
        let payload = FormPayload::new(Endpoint::Login, PayloadBody::Json(body));
        let data = self.send(&payload).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// `POST /auth/register`
    pub async fn register(&self, body: &Value) -> Result<User, ApiError> {
        let payload = FormPayload::new(Endpoint::Register, PayloadBody::Json(body.clone()));
        let data = self.send(&payload).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// `GET /properties/`
    pub async fn list_properties(&self) -> Result<Vec<Property>, ApiError> {
        let path = Endpoint::Properties.path();
        info!(method = "GET", path, "API request");
        let req = self.authorize(self.client.get(self.url(path)), false)?;
        read_envelope(req.send().await?).await
    }

    /// `POST /properties/`, JSON or multipart depending on the body.
    pub async fn create_property(&self, body: PayloadBody) -> Result<Value, ApiError> {
        self.send(&FormPayload::new(Endpoint::Properties, body)).await
    }

    /// `POST /leads/`
    pub async fn create_lead(&self, body: &Value) -> Result<Value, ApiError> {
        self.send(&FormPayload::new(Endpoint::Leads, PayloadBody::Json(body.clone())))
            .await
    }

    /// Posts a form payload and returns the `data` member of the response.
    pub async fn send(&self, payload: &FormPayload) -> Result<Value, ApiError> {
        let path = payload.endpoint.path();
        let req = self.client.post(self.url(path));
        let req = self.authorize(req, payload.endpoint.requires_auth())?;

        let req = match &payload.body {
            PayloadBody::Json(body) => {
                info!(method = "POST", path, kind = "json", "API request");
                req.json(body)
            }
            PayloadBody::Multipart(body) => {
                info!(method = "POST", path, kind = "multipart", images = body.images.len(), "API request");
                req.multipart(multipart_form(body)?)
            }
        };

        read_envelope(req.send().await?).await
    }
}

fn multipart_form(body: &MultipartBody) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }
    for image in &body.images {
        let part = Part::bytes(image.data.clone())
            .file_name(image.name.clone())
            .mime_str(&image.mime_type)?;
        form = form.part(MultipartBody::IMAGE_PART, part);
    }
    Ok(form)
}

/// Unwraps `{status, data, message, error}`.
///
/// Error statuses and `"status": "error"` envelopes become
/// [`ApiError::Rejected`] carrying the server's message.
async fn read_envelope<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;

    let envelope: ApiResponse<T> = match serde_json::from_slice(&bytes) {
        Ok(envelope) => envelope,
        Err(err) if status.is_success() => return Err(err.into()),
        Err(_) => {
            let reason = status.canonical_reason().unwrap_or_default();
            warn!(status = status.as_u16(), "API error without a JSON body");
            return Err(ApiError::rejected(status.as_u16(), reason));
        }
    };

    if !status.is_success() || envelope.status.as_deref() == Some("error") {
        let message = envelope.failure_message().unwrap_or_default().to_string();
        warn!(status = status.as_u16(), reason = %message, "API rejected request");
        return Err(ApiError::rejected(status.as_u16(), message));
    }

    debug!(status = status.as_u16(), "API request succeeded");
    match envelope.data {
        Some(data) => Ok(data),
        None => Ok(serde_json::from_value(Value::Null)?),
    }
}

impl Submitter for ApiClient {
    async fn submit(&self, payload: &FormPayload) -> Result<Value, SubmitError> {
        self.send(payload).await.map_err(SubmitError::from)
    }
}
