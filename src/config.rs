use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::auth;
use crate::backup;

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Deployment knobs, read once at boot and shared via managed state.
pub struct AppConfig {
    pub site_dir: PathBuf,
    pub site_url: String,
    pub allowed_extensions: Vec<String>,
    pub backup_retention: usize,
    pub session_expiry_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let allowed_extensions = match env::var("UPLOAD_EXTENSIONS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };
        AppConfig {
            site_dir: PathBuf::from(env::var("VITRINE_SITE_DIR").unwrap_or_else(|_| "site".into())),
            site_url: env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:8000".into()),
            allowed_extensions,
            backup_retention: env::var("BACKUP_RETENTION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(backup::DEFAULT_RETENTION),
            session_expiry_hours: env::var("SESSION_EXPIRY_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
        }
    }

    /// Where the notifier credential files live.
    pub fn notify_config_dir(&self) -> PathBuf {
        self.site_dir.join("config")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.site_dir.join("uploads")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.site_dir.join("static")
    }

    pub fn extension_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => self
                .allowed_extensions
                .iter()
                .any(|a| a.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// The role a successful login grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRole {
    Admin,
    Demo,
}

/// Admin credentials as an owned, injected object: the password hash sits
/// behind a Mutex and only `set_password` replaces it. Demo credentials,
/// when configured, open read-only sessions.
pub struct AdminCredentials {
    username: String,
    password_hash: Mutex<String>,
    demo_username: Option<String>,
    demo_password_hash: Option<String>,
}

impl AdminCredentials {
    pub fn new(
        username: &str,
        password_hash: String,
        demo: Option<(String, String)>,
    ) -> Self {
        let (demo_username, demo_password_hash) = match demo {
            Some((user, hash)) => (Some(user), Some(hash)),
            None => (None, None),
        };
        AdminCredentials {
            username: username.to_string(),
            password_hash: Mutex::new(password_hash),
            demo_username,
            demo_password_hash,
        }
    }

    pub fn from_env() -> Self {
        let username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
        let password_hash =
            auth::hash_password(&password).expect("Failed to hash admin password");
        let demo = match (env::var("DEMO_USERNAME"), env::var("DEMO_PASSWORD")) {
            (Ok(user), Ok(pass)) if !user.is_empty() => {
                let hash = auth::hash_password(&pass).expect("Failed to hash demo password");
                Some((user, hash))
            }
            _ => None,
        };
        AdminCredentials::new(&username, password_hash, demo)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Verify a login attempt. The caller must not reveal which part was
    /// wrong; a `None` here always surfaces as "Invalid credentials".
    pub fn verify(&self, username: &str, password: &str) -> Option<LoginRole> {
        if username == self.username {
            let hash = self.password_hash.lock().unwrap().clone();
            if auth::verify_password(password, &hash) {
                return Some(LoginRole::Admin);
            }
        }
        if let (Some(demo_user), Some(demo_hash)) =
            (&self.demo_username, &self.demo_password_hash)
        {
            if username == demo_user.as_str() && auth::verify_password(password, demo_hash) {
                return Some(LoginRole::Demo);
            }
        }
        None
    }

    /// Current-password check for the change-password flow.
    pub fn verify_admin_password(&self, password: &str) -> bool {
        let hash = self.password_hash.lock().unwrap().clone();
        auth::verify_password(password, &hash)
    }

    /// The one defined update operation on the credential object.
    pub fn set_password(&self, new_password: &str) -> Result<(), String> {
        let hash = auth::hash_password(new_password)?;
        *self.password_hash.lock().unwrap() = hash;
        Ok(())
    }
}
