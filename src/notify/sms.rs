use serde_json::json;
use tracing::{info, instrument};

use crate::config::sms::SmsConfig;
use crate::notify::DeliveryInfo;
use crate::utils::errors::AppError;

/// Thin client over a JSON-over-HTTP SMS provider. Which vendor sits
/// behind the endpoint is configuration, not code.
pub struct SmsService {
    config: SmsConfig,
    client: reqwest::Client,
}

impl SmsService {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    #[instrument(skip(self))]
    pub async fn send_sms(&self, to_phone: &str, message: &str) -> Result<(), AppError> {
        if !self.config.is_configured() {
            info!(to = %to_phone, "SMS not configured, skipping message");
            return Ok(());
        }
        let endpoint = self.config.endpoint.as_deref().unwrap_or_default();

        let response = self
            .client
            .post(endpoint)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&json!({
                "from": self.config.from_number,
                "to": to_phone,
                "body": message,
            }))
            .send()
            .await
            .map_err(|e| AppError::internal_error(format!("Failed to send SMS: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::internal_error(format!(
                "SMS provider returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    pub async fn send_delivery_notification(
        &self,
        to_phone: &str,
        info: &DeliveryInfo,
    ) -> Result<(), AppError> {
        let message = format!(
            "Delivery Update: {} - Status: {} - Tracking: {}",
            info.item_name, info.status, info.tracking_number
        );
        self.send_sms(to_phone, &message).await
    }
}
