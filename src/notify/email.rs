use std::fs;
use std::path::Path;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "smtp.json";

fn default_port() -> u16 {
    587
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Recipient of the notifications; falls back to the username.
    #[serde(default)]
    pub to: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        SmtpConfig {
            host: String::new(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            to: String::new(),
        }
    }
}

impl SmtpConfig {
    /// Credential file first, environment fallback.
    pub fn load(dir: &Path) -> Option<Self> {
        if let Some(cfg) = Self::load_file(dir) {
            return Some(cfg);
        }
        let cfg = SmtpConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_default(),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_port),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            to: std::env::var("SMTP_TO").unwrap_or_default(),
        };
        cfg.is_complete().then_some(cfg)
    }

    /// Only the credential file, for the settings form.
    pub fn load_file(dir: &Path) -> Option<Self> {
        let path = dir.join(CONFIG_FILE);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<SmtpConfig>(&raw) {
            Ok(cfg) if cfg.is_complete() => Some(cfg),
            Ok(_) => None,
            Err(e) => {
                log::warn!("[notify] {} unreadable: {}", path.display(), e);
                None
            }
        }
    }

    /// Persist from the settings form; empty credentials remove the file.
    pub fn store(&self, dir: &Path) -> Result<(), String> {
        let path = dir.join(CONFIG_FILE);
        if !self.is_complete() {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| e.to_string())?;
            }
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, json).map_err(|e| e.to_string())
    }

    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty()
    }

    pub fn recipient(&self) -> &str {
        if self.to.is_empty() {
            &self.username
        } else {
            &self.to
        }
    }
}

/// Send one plain-text notification through the configured SMTP relay.
pub fn send(cfg: &SmtpConfig, subject: &str, body: &str) -> Result<(), String> {
    let email = Message::builder()
        .from(cfg
            .username
            .parse()
            .map_err(|e| format!("invalid from address: {}", e))?)
        .to(cfg
            .recipient()
            .parse()
            .map_err(|e| format!("invalid to address: {}", e))?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| format!("failed to build email: {}", e))?;

    let creds = Credentials::new(cfg.username.clone(), cfg.password.clone());

    let mailer = SmtpTransport::starttls_relay(&cfg.host)
        .map_err(|e| format!("SMTP relay error: {}", e))?
        .port(cfg.port)
        .credentials(creds)
        .timeout(Some(std::time::Duration::from_secs(10)))
        .build();

    mailer
        .send(&email)
        .map_err(|e| format!("SMTP send error: {}", e))?;
    Ok(())
}
