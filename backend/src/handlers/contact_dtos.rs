use serde::{Deserialize, Serialize};

// All fields are optional on the wire so a missing field becomes a
// validation error with a proper message instead of a parse failure.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    /// Honeypot, hidden from people.
    pub website: Option<String>,
    pub csrf_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactResponse {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

#[derive(Debug, Serialize)]
pub struct DebugConfigResponse {
    #[serde(rename = "RESEND_API_KEY_present")]
    pub resend_api_key_present: bool,
    #[serde(rename = "RESEND_API_KEY_length")]
    pub resend_api_key_length: usize,
    #[serde(rename = "DEV_MODE")]
    pub dev_mode: bool,
    #[serde(rename = "SENDER_EMAIL")]
    pub sender_email: String,
    #[serde(rename = "SENDER_NAME")]
    pub sender_name: String,
    #[serde(rename = "TEST_EMAIL")]
    pub test_email: String,
    #[serde(rename = "RECIPIENT_EMAILS")]
    pub recipient_emails: Vec<String>,
    pub will_send_to: Vec<String>,
}
