use anyhow::Result;

/// Outbound email notifications.
///
/// Delivery is simulated: messages are written to the log instead of a real
/// provider. The `Result` signature is kept so callers handle delivery
/// failure (forgot-password rolls back its reset token on error).
#[derive(Debug, Clone)]
pub struct Mailer {
    frontend_url: String,
}

impl Mailer {
    pub fn new(frontend_url: String) -> Self {
        Self { frontend_url }
    }

    pub fn reset_url(&self, raw_token: &str) -> String {
        format!("{}/reset-password/{}", self.frontend_url, raw_token)
    }

    fn send(&self, to: &str, subject: &str, message: &str) -> Result<()> {
        tracing::info!(to, subject, "=== EMAIL SENDING SIMULATION ===");
        tracing::debug!(message, "email body");
        Ok(())
    }

    pub fn send_password_reset(&self, email: &str, username: &str, raw_token: &str) -> Result<()> {
        let reset_url = self.reset_url(raw_token);
        let message = format!(
            "<h1>Password Reset Request</h1>\
             <p>Hello {username},</p>\
             <p>You requested to reset your password. Click the link below to reset your password:</p>\
             <a href=\"{reset_url}\">{reset_url}</a>\
             <p>This link will expire in 10 minutes.</p>\
             <p>If you didn't request this, please ignore this email.</p>"
        );
        self.send(email, "Password Reset Request", &message)
    }

    pub fn send_password_changed(&self, email: &str, username: &str) -> Result<()> {
        let message = format!(
            "<h1>Password Changed Successfully</h1>\
             <p>Hello {username},</p>\
             <p>Your password has been changed successfully.</p>\
             <p>If you didn't make this change, please contact support immediately.</p>"
        );
        self.send(email, "Password Changed Successfully", &message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_url() {
        let mailer = Mailer::new("https://app.example.com".to_string());
        assert_eq!(
            mailer.reset_url("abc123"),
            "https://app.example.com/reset-password/abc123"
        );
    }

    #[test]
    fn test_simulated_sends_succeed() {
        let mailer = Mailer::new("http://localhost:5173".to_string());
        assert!(mailer
            .send_password_reset("jane@example.com", "jane", "token")
            .is_ok());
        assert!(mailer.send_password_changed("jane@example.com", "jane").is_ok());
    }
}
