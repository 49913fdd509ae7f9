use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, NaiveDateTime, Utc};
use rocket::http::{Cookie, CookieJar, Status};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;
use sha2::{Digest, Sha256};

const SESSION_COOKIE: &str = "vitrine_session";

pub struct Session {
    pub expires_at: NaiveDateTime,
    pub demo: bool,
}

/// In-memory session table. Sessions do not survive a restart, which
/// matches the rest of the per-process state (rate-limit counters).
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn create(&self, expiry_hours: i64, demo: bool) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let expires_at = Utc::now().naive_utc() + Duration::hours(expiry_hours.max(1));
        self.sessions
            .lock()
            .unwrap()
            .insert(id.clone(), Session { expires_at, demo });
        id
    }

    /// Returns the session's demo flag when the id is valid and unexpired.
    pub fn validate(&self, id: &str) -> Option<bool> {
        let sessions = self.sessions.lock().unwrap();
        let now = Utc::now().naive_utc();
        sessions
            .get(id)
            .filter(|s| s.expires_at > now)
            .map(|s| s.demo)
    }

    pub fn destroy(&self, id: &str) {
        self.sessions.lock().unwrap().remove(id);
    }

    /// Invalidate every session, e.g. after a password change.
    pub fn destroy_all(&self) {
        self.sessions.lock().unwrap().clear();
    }

    pub fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().unwrap();
        let now = Utc::now().naive_utc();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }
}

/// Guard that ensures the request carries a valid admin session. A demo
/// session passes the guard; mutating handlers check `demo` themselves.
pub struct AdminUser {
    pub demo: bool,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let sessions = match request.guard::<&State<std::sync::Arc<SessionStore>>>().await {
            Outcome::Success(s) => s,
            _ => return Outcome::Forward(Status::Unauthorized),
        };

        let cookies = request.cookies();
        let session_id = match cookies.get_private(SESSION_COOKIE) {
            Some(c) => c.value().to_string(),
            None => return Outcome::Forward(Status::Unauthorized),
        };

        match sessions.validate(&session_id) {
            Some(demo) => Outcome::Success(AdminUser { demo }),
            None => {
                cookies.remove_private(Cookie::from(SESSION_COOKIE));
                Outcome::Forward(Status::Unauthorized)
            }
        }
    }
}

/// Best-effort client address: first X-Forwarded-For hop, else the socket
/// peer, else "unknown".
pub struct ClientIp(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let forwarded = request
            .headers()
            .get_one("X-Forwarded-For")
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let ip = forwarded
            .or_else(|| request.client_ip().map(|a| a.to_string()))
            .unwrap_or_else(|| "unknown".to_string());
        Outcome::Success(ClientIp(ip))
    }
}

pub fn hash_password(password: &str) -> Result<String, String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| e.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Rate-limit keys carry a hash rather than the raw address.
pub fn hash_ip(ip: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn set_session_cookie(cookies: &CookieJar<'_>, session_id: &str) {
    let mut cookie = Cookie::new(SESSION_COOKIE, session_id.to_string());
    cookie.set_http_only(true);
    cookie.set_same_site(rocket::http::SameSite::Strict);
    cookie.set_path("/");
    cookies.add_private(cookie);
}

pub fn current_session_id(cookies: &CookieJar<'_>) -> Option<String> {
    cookies
        .get_private(SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

pub fn clear_session_cookie(cookies: &CookieJar<'_>) {
    cookies.remove_private(Cookie::from(SESSION_COOKIE));
}
