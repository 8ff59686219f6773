use super::{Pin, PinSink};
use crate::trello::FetchError;
use log::*;

/// Sends pins to a timeline REST endpoint (`PUT {base}/v1/user/pins/{id}`).
///
pub struct HttpPinSink {
    base_url: String,
    user_token: String,
    http_client: reqwest::Client,
}

impl HttpPinSink {
    pub fn new(base_url: &str, user_token: &str) -> Self {
        HttpPinSink {
            base_url: base_url.trim_end_matches('/').to_owned(),
            user_token: user_token.to_owned(),
            http_client: reqwest::Client::new(),
        }
    }
}

impl PinSink for HttpPinSink {
    async fn insert_pin(&self, pin: &Pin) -> Result<(), FetchError> {
        let url = format!("{}/v1/user/pins/{}", self.base_url, pin.id);
        let response = self
            .http_client
            .put(&url)
            .header("X-User-Token", &self.user_token)
            .json(pin)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::status(status.as_u16(), &body));
        }
        info!("Pin inserted: {}", pin.id);
        Ok(())
    }
}

/// Logs pins instead of delivering them; used when no timeline is configured.
///
#[derive(Default)]
pub struct LogPinSink;

impl PinSink for LogPinSink {
    async fn insert_pin(&self, pin: &Pin) -> Result<(), FetchError> {
        let body = serde_json::to_string(pin)?;
        info!("Timeline not configured, pin not delivered: {}", body);
        Ok(())
    }
}

/// Either kind of pin sink, picked from the timeline settings.
///
pub enum TimelineSink {
    Http(HttpPinSink),
    Log(LogPinSink),
}

impl PinSink for TimelineSink {
    async fn insert_pin(&self, pin: &Pin) -> Result<(), FetchError> {
        match self {
            TimelineSink::Http(sink) => sink.insert_pin(pin).await,
            TimelineSink::Log(sink) => sink.insert_pin(pin).await,
        }
    }
}
