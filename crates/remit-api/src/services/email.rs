//! Confirmation email delivery via SMTP.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use remit_core::{AppError, Config};
use tracing::info;

/// One receipt attached to the confirmation email.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A fully-assembled outgoing message.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Mail-relay seam. The submission pipeline only needs one send operation;
/// tests substitute an in-memory implementation.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError>;
}

/// SMTP mailer backed by lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Create the mailer from config. SMTP settings are required at startup,
    /// so missing ones surface as configuration errors here.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| AppError::Configuration("SMTP_HOST not configured".to_string()))?;
        let from = config
            .smtp_from
            .clone()
            .ok_or_else(|| AppError::Configuration("SMTP_FROM not configured".to_string()))?;
        let port = config.smtp_port;

        let mailer = if config.smtp_tls {
            let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| AppError::Configuration(format!("Invalid SMTP_HOST: {}", e)))?
                .port(port);
            let builder = if let (Some(user), Some(password)) =
                (config.smtp_user.clone(), config.smtp_password.clone())
            {
                builder.credentials(Credentials::new(user, password))
            } else {
                builder
            };
            info!(host = %host, port = port, "Mailer initialized (SMTP with STARTTLS)");
            builder.build()
        } else {
            let builder =
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let builder = if let (Some(user), Some(password)) =
                (config.smtp_user.clone(), config.smtp_password.clone())
            {
                builder.credentials(Credentials::new(user, password))
            } else {
                builder
            };
            info!(host = %host, port = port, "Mailer initialized (SMTP)");
            builder.build()
        };

        Ok(SmtpMailer { mailer, from })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, AppError> {
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| AppError::Configuration(format!("Invalid SMTP_FROM: {}", e)))?;
        let to_addr: Mailbox = email
            .to
            .parse()
            .map_err(|e| AppError::Email(format!("Invalid recipient '{}': {}", email.to, e)))?;

        let mut builder = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(email.subject.clone());
        for cc in &email.cc {
            let cc_addr: Mailbox = cc
                .parse()
                .map_err(|e| AppError::Configuration(format!("Invalid CC address '{}': {}", cc, e)))?;
            builder = builder.cc(cc_addr);
        }

        let mut multipart = MultiPart::mixed().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(email.body.clone()),
        );
        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
                AppError::Email(format!(
                    "Invalid attachment content type '{}': {}",
                    attachment.content_type, e
                ))
            })?;
            multipart = multipart.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.data.clone(), content_type),
            );
        }

        builder
            .multipart(multipart)
            .map_err(|e| AppError::Email(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        let to = email.to.clone();
        let attachment_count = email.attachments.len();
        let message = self.build_message(&email)?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| AppError::Email(e.to_string()))?;

        info!(to = %to, attachments = attachment_count, "Confirmation email sent");
        Ok(())
    }
}
