//! Email Service
//!
//! SMTP delivery of password-reset mail through lettre, with embedded
//! tera templates for the HTML and plain-text bodies.

use anyhow::Result;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tera::{Context, Tera};

use crate::utils::error::{AppError, AppResult};

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: String,
    /// From email address
    pub from_email: String,
    /// From display name
    pub from_name: String,
    /// Base URL embedded in the reset link
    pub app_base_url: String,
}

impl EmailConfig {
    /// Create email configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME")
                .map_err(|_| anyhow::anyhow!("SMTP_USERNAME environment variable is required"))?,
            smtp_password: std::env::var("SMTP_PASSWORD")
                .map_err(|_| anyhow::anyhow!("SMTP_PASSWORD environment variable is required"))?,
            from_email: std::env::var("FROM_EMAIL")
                .map_err(|_| anyhow::anyhow!("FROM_EMAIL environment variable is required"))?,
            from_name: std::env::var("FROM_NAME")
                .unwrap_or_else(|_| "Marketplace".to_string()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        })
    }
}

/// Email service for password-reset delivery
pub struct EmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    templates: Tera,
    config: EmailConfig,
}

impl EmailService {
    /// Create a new email service
    pub fn new(config: EmailConfig) -> AppResult<Self> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::Internal(format!("failed to configure SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        let mut templates = Tera::default();
        Self::add_embedded_templates(&mut templates)?;

        Ok(Self {
            transport,
            templates,
            config,
        })
    }

    /// Register the embedded password-reset templates
    fn add_embedded_templates(tera: &mut Tera) -> AppResult<()> {
        let reset_html = r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Password Reset</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1>Password Reset</h1>
    <p>You requested a password reset. Please click on the following link to reset your password:</p>
    <p><a href="{{ reset_url }}">{{ reset_url }}</a></p>
    <p>The link is valid for one hour and can be used once. If you did not request a reset, you can ignore this email.</p>
</body>
</html>
"#;

        let reset_text = r#"You requested a password reset. Please open the following link to reset your password:

{{ reset_url }}

The link is valid for one hour and can be used once. If you did not request a reset, you can ignore this email.
"#;

        tera.add_raw_template("password_reset.html", reset_html)
            .map_err(|e| AppError::Internal(format!("failed to register email template: {}", e)))?;
        tera.add_raw_template("password_reset.txt", reset_text)
            .map_err(|e| AppError::Internal(format!("failed to register email template: {}", e)))?;

        Ok(())
    }

    /// Send the password-reset email with a link embedding the token
    pub async fn send_password_reset_email(&self, to: &str, reset_token: &str) -> AppResult<()> {
        let reset_url = format!(
            "{}/reset-password?token={}",
            self.config.app_base_url, reset_token
        );
        let (text_body, html_body) = self.render_reset_bodies(&reset_url)?;

        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| AppError::Internal(format!("invalid from address: {}", e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| AppError::Internal(format!("invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject("Password Reset")
            .multipart(MultiPart::alternative_plain_html(text_body, html_body))
            .map_err(|e| AppError::Internal(format!("building reset email failed: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Internal(format!("sending reset email failed: {}", e)))?;

        log::info!("password reset email dispatched");
        Ok(())
    }

    fn render_reset_bodies(&self, reset_url: &str) -> AppResult<(String, String)> {
        let mut context = Context::new();
        context.insert("reset_url", reset_url);

        let text = self
            .templates
            .render("password_reset.txt", &context)
            .map_err(|e| AppError::Internal(format!("rendering reset email failed: {}", e)))?;
        let html = self
            .templates
            .render("password_reset.html", &context)
            .map_err(|e| AppError::Internal(format!("rendering reset email failed: {}", e)))?;

        Ok((text, html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "mailer".to_string(),
            smtp_password: "secret".to_string(),
            from_email: "noreply@example.com".to_string(),
            from_name: "Marketplace".to_string(),
            app_base_url: "http://localhost:5173".to_string(),
        }
    }

    #[tokio::test]
    async fn test_reset_bodies_embed_the_link() {
        // Building the service performs no network I/O.
        let service = EmailService::new(test_config()).unwrap();

        let url = "http://localhost:5173/reset-password?token=abc123";
        let (text, html) = service.render_reset_bodies(url).unwrap();

        assert!(text.contains(url));
        assert!(html.contains(url));
        assert!(html.contains("<a href="));
    }
}
