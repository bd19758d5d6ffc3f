use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::EmailConfig;

pub const CONFIRMATION_SUBJECT: &str = "We Received Your Application!";

/// Outbound hook fired once an application has been stored.
///
/// `send` is one-shot and best effort: implementations log their own
/// failures and report them as `false` rather than returning an error.
#[async_trait]
pub trait ApplicantNotifier: Send + Sync {
    async fn send(&self, to: &str, recipient_name: &str) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("missing RESEND_API_KEY")]
    MissingCredential,
    #[error("invalid api key header: {0}")]
    InvalidCredential(#[from] reqwest::header::InvalidHeaderValue),
    #[error("email transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

#[derive(Debug, Deserialize)]
struct SentEmail {
    #[serde(default)]
    id: Option<String>,
}

/// Confirmation email delivered through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendNotifier {
    api_key: Option<String>,
    from_address: String,
    api_base: String,
    http_client: reqwest::Client,
}

impl ResendNotifier {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.api_base)
    }

    async fn dispatch(&self, to: &str, recipient_name: &str) -> Result<String, NotifierError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(NotifierError::MissingCredential)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))?,
        );

        let message = OutboundEmail {
            from: &self.from_address,
            to: [to],
            subject: CONFIRMATION_SUBJECT,
            html: render_confirmation_html(recipient_name),
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .headers(headers)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SentEmail = response.json().await?;
        Ok(sent.id.unwrap_or_default())
    }
}

#[async_trait]
impl ApplicantNotifier for ResendNotifier {
    async fn send(&self, to: &str, recipient_name: &str) -> bool {
        match self.dispatch(to, recipient_name).await {
            Ok(message_id) => {
                info!(%message_id, "confirmation email sent");
                true
            }
            Err(err) => {
                error!(error = %err, "confirmation email failed");
                false
            }
        }
    }
}

/// Fixed confirmation template; the recipient name is HTML-escaped.
pub fn render_confirmation_html(recipient_name: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: auto; padding: 20px;">
  <h2 style="color: #1a73e8;">Hi {name},</h2>
  <p>Thank you for applying to <strong>Uptick Talent</strong>!</p>
  <p>We've received your application and our team is reviewing it.</p>
  <p>You'll hear back from us within <strong>3–5 business days</strong>.</p>
  <hr>
  <p><em>The Uptick Team</em></p>
</div>"#,
        name = escape_html(recipient_name.trim())
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
