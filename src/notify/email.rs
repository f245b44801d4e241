use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

use crate::config::email::EmailConfig;
use crate::notify::DeliveryInfo;
use crate::utils::errors::AppError;

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self))]
    pub async fn send_verification_email(
        &self,
        to_email: &str,
        verification_token: &str,
    ) -> Result<(), AppError> {
        let verification_link = format!(
            "{}/api/auth/verify-email?token={}",
            self.config.public_url, verification_token
        );

        let text_body = format!(
            "Please click the following link to verify your email: {}\n\n\
             This link will expire in 24 hours.",
            verification_link
        );
        let html_body = format!(
            r#"<html>
  <body>
    <h2>Verify Your Email Address</h2>
    <p>Please click the following link to verify your email address:</p>
    <a href="{link}">Verify Email</a>
    <p>Or copy and paste this URL into your browser: {link}</p>
    <p>This link will expire in 24 hours.</p>
  </body>
</html>"#,
            link = verification_link
        );

        self.send_email(to_email, "Verify Your Email Address", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self))]
    pub async fn send_password_reset_email(
        &self,
        to_email: &str,
        reset_token: &str,
    ) -> Result<(), AppError> {
        let reset_link = format!(
            "{}/api/auth/reset-password?token={}",
            self.config.public_url, reset_token
        );

        let text_body = format!(
            "Please click the following link to reset your password: {}\n\n\
             This link will expire in 1 hour.\n\n\
             If you didn't request this, please ignore this email.",
            reset_link
        );
        let html_body = format!(
            r#"<html>
  <body>
    <h2>Reset Your Password</h2>
    <p>Please click the following link to reset your password:</p>
    <a href="{link}">Reset Password</a>
    <p>Or copy and paste this URL into your browser: {link}</p>
    <p>This link will expire in 1 hour.</p>
    <p>If you didn't request this, please ignore this email.</p>
  </body>
</html>"#,
            link = reset_link
        );

        self.send_email(to_email, "Reset Your Password", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, info))]
    pub async fn send_delivery_notification(
        &self,
        to_email: &str,
        info: &DeliveryInfo,
    ) -> Result<(), AppError> {
        let subject = format!("Delivery Update: {}", info.item_name);
        let text_body = format!(
            "Your delivery has been updated:\n\n\
             Item: {}\n\
             Destination: {}\n\
             Status: {}\n\
             Tracking Number: {}",
            info.item_name, info.destination, info.status, info.tracking_number
        );
        let html_body = format!(
            r#"<html>
  <body>
    <h2>Delivery Update</h2>
    <p>Your delivery has been updated:</p>
    <ul>
      <li><strong>Item:</strong> {}</li>
      <li><strong>Destination:</strong> {}</li>
      <li><strong>Status:</strong> {}</li>
      <li><strong>Tracking Number:</strong> {}</li>
    </ul>
  </body>
</html>"#,
            info.item_name, info.destination, info.status, info.tracking_number
        );

        self.send_email(to_email, &subject, &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, text_body, html_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(to = %to_email, subject = %subject, "SMTP not configured, skipping email");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
