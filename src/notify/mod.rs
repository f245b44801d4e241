//! Deferred notification dispatch.
//!
//! Services publish [`Notification`] messages through a cloneable
//! [`Notifier`] handle; a single worker task consumes the channel and
//! calls the email/SMS transports. Dispatch is at-most-once with no
//! ordering guarantee, and transport failures are logged, never
//! surfaced to the request that queued the message.

pub mod email;
pub mod sms;

use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::config::email::EmailConfig;
use crate::config::sms::SmsConfig;
use crate::notify::email::EmailService;
use crate::notify::sms::SmsService;

#[derive(Debug, Clone)]
pub struct DeliveryInfo {
    pub item_name: String,
    pub destination: String,
    pub status: String,
    pub tracking_number: String,
}

#[derive(Debug)]
pub enum Notification {
    VerificationLink {
        email: String,
        token: String,
    },
    PasswordResetLink {
        email: String,
        token: String,
    },
    DeliveryUpdateEmail {
        email: String,
        info: DeliveryInfo,
    },
    DeliveryUpdateSms {
        phone: String,
        info: DeliveryInfo,
    },
}

#[derive(Clone, Debug)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Spawns the worker task and returns the publishing handle.
    pub fn start(email_config: EmailConfig, sms_config: SmsConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(rx, email_config, sms_config));
        Self { tx }
    }

    /// Queues a notification. Never blocks and never fails the caller;
    /// a closed channel (worker gone during shutdown) is logged and the
    /// message dropped.
    pub fn dispatch(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            warn!("Notification worker is gone, dropping message");
        }
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<Notification>,
    email_config: EmailConfig,
    sms_config: SmsConfig,
) {
    let email_service = EmailService::new(email_config);
    let sms_service = SmsService::new(sms_config);

    while let Some(notification) = rx.recv().await {
        let result = match &notification {
            Notification::VerificationLink { email, token } => {
                email_service.send_verification_email(email, token).await
            }
            Notification::PasswordResetLink { email, token } => {
                email_service.send_password_reset_email(email, token).await
            }
            Notification::DeliveryUpdateEmail { email, info } => {
                email_service.send_delivery_notification(email, info).await
            }
            Notification::DeliveryUpdateSms { phone, info } => {
                sms_service.send_delivery_notification(phone, info).await
            }
        };

        if let Err(e) = result {
            error!(error = %e.error, "Failed to dispatch notification");
        }
    }
}
