use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "telegram.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

impl TelegramConfig {
    /// Credential file first, environment fallback.
    pub fn load(dir: &Path) -> Option<Self> {
        if let Some(cfg) = Self::load_file(dir) {
            return Some(cfg);
        }
        let cfg = TelegramConfig {
            bot_token: std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            chat_id: std::env::var("TELEGRAM_CHAT_ID").unwrap_or_default(),
        };
        cfg.is_complete().then_some(cfg)
    }

    /// Only the credential file, for the settings form.
    pub fn load_file(dir: &Path) -> Option<Self> {
        let path = dir.join(CONFIG_FILE);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<TelegramConfig>(&raw) {
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
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

/// Send one text message via the Telegram bot API.
pub fn send(cfg: &TelegramConfig, text: &str) -> Result<(), String> {
    let url = format!("https://api.telegram.org/bot{}/sendMessage", cfg.bot_token);

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| format!("HTTP client error: {}", e))?;

    let resp = client
        .post(&url)
        .json(&serde_json::json!({
            "chat_id": cfg.chat_id,
            "text": text,
        }))
        .send()
        .map_err(|e| format!("telegram request failed: {}", e))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        return Err(format!("telegram returned {}: {}", status, body));
    }
    Ok(())
}
