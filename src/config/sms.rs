use std::env;

#[derive(Clone, Debug)]
pub struct SmsConfig {
    /// Provider HTTP endpoint; SMS sending is skipped when unset.
    pub endpoint: Option<String>,
    pub api_key: String,
    pub api_secret: String,
    pub from_number: String,
}

impl SmsConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("SMS_ENDPOINT").ok(),
            api_key: env::var("SMS_API_KEY").unwrap_or_else(|_| "".to_string()),
            api_secret: env::var("SMS_API_SECRET").unwrap_or_else(|_| "".to_string()),
            from_number: env::var("SMS_FROM_NUMBER").unwrap_or_else(|_| "".to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && !self.api_key.is_empty()
    }
}
