//! Outgoing email for password resets.
//!
//! When SMTP is not configured the mailer degrades to a logged no-op so the
//! reset endpoint keeps its fixed response in every environment.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
}

/// SMTP mailer for transactional email.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    /// Base URL the reset token is appended to in the email body.
    reset_url_base: String,
}

impl Mailer {
    /// Load mailer configuration from environment variables.
    ///
    /// | Env Var          | Default                                  |
    /// |------------------|------------------------------------------|
    /// | `SMTP_HOST`      | unset -- mailer disabled                 |
    /// | `SMTP_USERNAME`  | unset                                    |
    /// | `SMTP_PASSWORD`  | unset                                    |
    /// | `SMTP_FROM`      | `Fiszki <no-reply@fiszki.local>`         |
    /// | `RESET_URL_BASE` | `http://localhost:4321/reset-password`   |
    pub fn from_env() -> Self {
        let from = std::env::var("SMTP_FROM")
            .unwrap_or_else(|_| "Fiszki <no-reply@fiszki.local>".into());
        let reset_url_base = std::env::var("RESET_URL_BASE")
            .unwrap_or_else(|_| "http://localhost:4321/reset-password".into());

        let transport = match std::env::var("SMTP_HOST") {
            Ok(host) => {
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::relay(&host).unwrap_or_else(|e| {
                        panic!("Invalid SMTP_HOST '{host}': {e}");
                    });
                if let (Ok(username), Ok(password)) =
                    (std::env::var("SMTP_USERNAME"), std::env::var("SMTP_PASSWORD"))
                {
                    builder = builder.credentials(Credentials::new(username, password));
                }
                Some(builder.build())
            }
            Err(_) => None,
        };

        Self {
            transport,
            from,
            reset_url_base,
        }
    }

    /// Build a disabled mailer (used by tests).
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: "Fiszki <no-reply@fiszki.local>".into(),
            reset_url_base: "http://localhost:4321/reset-password".into(),
        }
    }

    /// Whether a real SMTP transport is configured.
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Send a password reset link to `to`.
    ///
    /// With no transport configured this logs and succeeds, so callers keep
    /// identical behavior whether or not email delivery exists.
    pub async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), MailerError> {
        let Some(transport) = &self.transport else {
            tracing::info!(to, "SMTP not configured; skipping password reset email");
            return Ok(());
        };

        let from: Mailbox = self.from.parse()?;
        let reset_url = format!("{}?token={}", self.reset_url_base, token);

        let message = Message::builder()
            .from(from)
            .to(to.parse()?)
            .subject("Fiszki — reset hasła")
            .body(format!(
                "Cześć!\n\nAby zresetować hasło, otwórz poniższy link:\n{reset_url}\n\n\
                 Link wygaśnie za godzinę. Jeśli to nie Ty prosiłeś o reset, \
                 zignoruj tę wiadomość.\n"
            ))?;

        transport.send(message).await?;
        tracing::info!(to, "Password reset email sent");
        Ok(())
    }
}
