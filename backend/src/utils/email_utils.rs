use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::resend::OutboundEmail;
use crate::config::EmailConfig;
use crate::error::ContactError;
use crate::handlers::contact_dtos::ContactRequest;

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_EMAIL_CHARS: usize = 255;
pub const MAX_SERVICE_CHARS: usize = 50;
pub const MAX_MESSAGE_CHARS: usize = 2000;

pub const DISPOSABLE_DOMAINS: [&str; 3] = ["tempmail.com", "guerrillamail.com", "10minutemail.com"];
const SPAM_KEYWORDS: [&str; 3] = ["http://", "https://", "www."];

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9](?:[a-zA-Z0-9._-]*[a-zA-Z0-9])?@[a-zA-Z0-9](?:[a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$",
    )
    .unwrap_or_else(|e| panic!("email regex is invalid: {}", e))
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email) && email.matches('@').count() == 1
}

pub fn is_disposable_domain(email: &str) -> bool {
    email
        .rsplit_once('@')
        .map(|(_, domain)| DISPOSABLE_DOMAINS.contains(&domain.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Short messages that are mostly a link. They are still delivered, only flagged.
pub fn looks_like_spam(message: &str) -> bool {
    let lowered = message.to_lowercase();
    SPAM_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) && message.chars().count() < 20
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn trimmed_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// A submission that passed validation, trimmed and length-limited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

impl Inquiry {
    pub fn from_request(request: &ContactRequest) -> Result<Self, ContactError> {
        let name = request.name.as_deref().map(str::trim).unwrap_or_default();
        let email = request.email.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() || email.is_empty() {
            return Err(ContactError::MissingFields);
        }

        let inquiry = Inquiry {
            name: truncate_chars(name, MAX_NAME_CHARS),
            email: truncate_chars(&email.to_lowercase(), MAX_EMAIL_CHARS),
            service: truncate_chars(
                &trimmed_or(request.service.as_deref(), "Not specified"),
                MAX_SERVICE_CHARS,
            ),
            message: truncate_chars(
                &trimmed_or(request.message.as_deref(), "No message provided"),
                MAX_MESSAGE_CHARS,
            ),
        };

        if !is_valid_email(&inquiry.email) {
            return Err(ContactError::InvalidEmail);
        }
        if is_disposable_domain(&inquiry.email) {
            let domain = inquiry.email.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
            return Err(ContactError::DisposableEmail(domain.to_string()));
        }
        if looks_like_spam(&inquiry.message) {
            tracing::warn!("Potential spam detected from {}", inquiry.email);
        }
        Ok(inquiry)
    }

    pub fn subject(&self) -> String {
        format!("New Inquiry from {} - Estada Contact Form", self.name)
    }

    pub fn text_body(&self) -> String {
        format!(
            "New Contact Form Submission\n\n\
             Name: {}\n\
             Email: {}\n\
             Service: {}\n\n\
             Message:\n{}\n\n\
             ---\n\
             This email was sent from the Estada contact form.\n\
             To reply directly to the sender, use the Reply button.\n",
            self.name, self.email, self.service, self.message
        )
    }

    pub fn html_body(&self) -> String {
        let name = escape_html(&self.name);
        let email = escape_html(&self.email);
        let service = escape_html(&self.service);
        let message = escape_html(&self.message).replace('\n', "<br>");
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; line-height: 1.6; color: #333333; max-width: 600px; margin: 0 auto; padding: 20px; background-color: #ffffff;">
    <div style="background-color: #006cc4; color: #ffffff; padding: 20px; border-radius: 8px 8px 0 0; text-align: center;">
        <h1 style="margin: 0; font-size: 24px; font-weight: 600;">New Contact Form Submission</h1>
    </div>
    <div style="background-color: #f8f9fa; padding: 30px; border-radius: 0 0 8px 8px; border: 1px solid #e9ecef; border-top: none;">
        <div style="margin-bottom: 20px;">
            <strong style="color: #006cc4; display: inline-block; min-width: 100px;">Name:</strong>
            <span>{name}</span>
        </div>
        <div style="margin-bottom: 20px;">
            <strong style="color: #006cc4; display: inline-block; min-width: 100px;">Email:</strong>
            <a href="mailto:{email}" style="color: #006cc4; text-decoration: none;">{email}</a>
        </div>
        <div style="margin-bottom: 20px;">
            <strong style="color: #006cc4; display: inline-block; min-width: 100px;">Service:</strong>
            <span>{service}</span>
        </div>
        <hr style="border: none; border-top: 2px solid #e9ecef; margin: 30px 0;">
        <div style="margin-bottom: 20px;">
            <strong style="color: #006cc4; display: block; margin-bottom: 10px;">Message:</strong>
            <div style="background-color: #ffffff; padding: 15px; border-radius: 4px; border-left: 4px solid #006cc4; white-space: pre-wrap;">{message}</div>
        </div>
        <hr style="border: none; border-top: 1px solid #e9ecef; margin: 30px 0;">
        <p style="font-size: 12px; color: #6c757d; margin: 0; text-align: center;">
            This email was sent from the Estada contact form.<br>
            To reply directly to the sender, use the Reply button.
        </p>
    </div>
</body>
</html>
"#
        )
    }

    /// Builds the provider payload. Replies go straight to the visitor.
    pub fn to_email(&self, config: &EmailConfig, timestamp: i64) -> OutboundEmail {
        let mut headers = BTreeMap::new();
        headers.insert("X-Entity-Ref-ID".to_string(), format!("estada-contact-{}", timestamp));
        headers.insert("X-Priority".to_string(), "1".to_string());
        headers.insert("X-Mailer".to_string(), "Estada Contact Form".to_string());

        OutboundEmail {
            from: config.from_header(),
            to: config.recipients(),
            subject: self.subject(),
            text: self.text_body(),
            html: Some(self.html_body()),
            reply_to: Some(self.email.clone()),
            headers,
        }
    }
}
