use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;
use serde::Serialize;

use crate::config;
use crate::controllers::contact::{
    ApiError, ContactApi, ContactReply, ContactResponse, ContactSubmission, CsrfTokenResponse,
};

/// Thin request builder that prefixes the backend URL.
pub struct Api;

pub struct RequestWrapper {
    request: Request,
    path: String,
}

impl RequestWrapper {
    fn new(path: &str, method: &str) -> Self {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        let request = match method {
            "POST" => Request::post(&full_url),
            _ => Request::get(&full_url),
        };
        Self {
            request,
            path: path.to_string(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Set the request body as JSON
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(data)?;
        self.request = self
            .request
            .header("Content-Type", "application/json")
            .body(body);
        Ok(self)
    }

    pub async fn send(self) -> Result<Response, GlooError> {
        let response = self.request.send().await;
        if let Err(e) = &response {
            gloo_console::error!(format!("Request to {} failed: {}", self.path, e));
        }
        response
    }
}

impl Api {
    pub fn get(path: &str) -> RequestWrapper {
        RequestWrapper::new(path, "GET")
    }

    pub fn post(path: &str) -> RequestWrapper {
        RequestWrapper::new(path, "POST")
    }
}

/// `ContactApi` over the browser fetch API.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooContactApi;

impl ContactApi for GlooContactApi {
    async fn fetch_token(&self) -> Result<String, ApiError> {
        let response = Api::get("/api/csrf-token")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !response.ok() {
            gloo_console::warn!(format!("CSRF token request returned {}", response.status()));
            return Err(ApiError::Status(response.status()));
        }
        let body: CsrfTokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.csrf_token)
    }

    async fn submit(&self, submission: &ContactSubmission) -> Result<ContactReply, ApiError> {
        let response = Api::post("/api/contact")
            .header("Accept", "application/json")
            .json(submission)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response.json::<ContactResponse>().await.ok();
        Ok(ContactReply { status, body })
    }
}
