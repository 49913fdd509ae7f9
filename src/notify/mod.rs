pub mod email;
pub mod telegram;

use std::path::{Path, PathBuf};

use crate::models::client::ClientStatus;

/// Domain events that fan out to the configured notification channels.
#[derive(Debug, Clone)]
pub enum Event {
    NewMessage {
        name: String,
        email: String,
        body: String,
    },
    ClientStatusChanged {
        client: String,
        from: ClientStatus,
        to: ClientStatus,
    },
    AdminLogin {
        username: String,
        ip: String,
        demo: bool,
    },
    BackupCreated {
        file: String,
    },
    BackupRestored {
        file: String,
    },
    ConfigChanged {
        section: String,
    },
}

impl Event {
    pub fn subject(&self) -> String {
        match self {
            Event::NewMessage { name, .. } => format!("New message from {}", name),
            Event::ClientStatusChanged { client, .. } => {
                format!("Client update: {}", client)
            }
            Event::AdminLogin { username, .. } => format!("Admin login: {}", username),
            Event::BackupCreated { .. } => "Backup created".to_string(),
            Event::BackupRestored { .. } => "Backup restored".to_string(),
            Event::ConfigChanged { .. } => "Settings changed".to_string(),
        }
    }

    /// The templated notification text shared by every channel.
    pub fn render(&self) -> String {
        match self {
            Event::NewMessage { name, email, body } => format!(
                "New contact message\n\nFrom: {} <{}>\n\n{}",
                name, email, body
            ),
            Event::ClientStatusChanged { client, from, to } => format!(
                "Client \"{}\" moved from {} to {}.",
                client,
                from.label(),
                to.label()
            ),
            Event::AdminLogin { username, ip, demo } => {
                if *demo {
                    format!("Demo login as {} from {}.", username, ip)
                } else {
                    format!("Dashboard login as {} from {}.", username, ip)
                }
            }
            Event::BackupCreated { file } => format!("Manual backup created: {}.", file),
            Event::BackupRestored { file } => {
                format!("Site restored from backup {}.", file)
            }
            Event::ConfigChanged { section } => {
                format!("The {} settings were changed.", section)
            }
        }
    }
}

/// Fire-and-forget delivery on a detached worker thread: the triggering
/// request never waits on outbound network calls, and a delivery failure is
/// logged, never raised, never retried.
pub fn dispatch(config_dir: &Path, event: Event) {
    let dir: PathBuf = config_dir.to_path_buf();
    std::thread::spawn(move || deliver(&dir, &event));
}

pub(crate) fn deliver(config_dir: &Path, event: &Event) {
    let text = event.render();

    match telegram::TelegramConfig::load(config_dir) {
        Some(cfg) => {
            if let Err(e) = telegram::send(&cfg, &text) {
                log::warn!("[notify] telegram delivery failed: {}", e);
            }
        }
        None => log::debug!("[notify] telegram channel not configured"),
    }

    match email::SmtpConfig::load(config_dir) {
        Some(cfg) => {
            if let Err(e) = email::send(&cfg, &event.subject(), &text) {
                log::warn!("[notify] email delivery failed: {}", e);
            }
        }
        None => log::debug!("[notify] email channel not configured"),
    }
}
