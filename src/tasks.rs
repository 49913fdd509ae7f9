use std::sync::Arc;
use std::time::Duration;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::tokio;
use rocket::{Orbit, Rocket};

use crate::auth::SessionStore;
use crate::rate_limit::RateLimiter;
use crate::store::DocumentStore;

const BACKUP_INTERVAL_SECS: u64 = 60 * 60;
const LIMITER_CLEANUP_INTERVAL_SECS: u64 = 10 * 60;
const SESSION_CLEANUP_INTERVAL_SECS: u64 = 30 * 60;
const VISITOR_PRUNE_INTERVAL_SECS: u64 = 60 * 60;

pub struct BackgroundTasks;

#[rocket::async_trait]
impl Fairing for BackgroundTasks {
    fn info(&self) -> Info {
        Info {
            name: "Background Tasks",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let store = rocket
            .state::<Arc<DocumentStore>>()
            .expect("DocumentStore not found in managed state")
            .clone();
        let limiter = rocket
            .state::<Arc<RateLimiter>>()
            .expect("RateLimiter not found in managed state")
            .clone();
        let sessions = rocket
            .state::<Arc<SessionStore>>()
            .expect("SessionStore not found in managed state")
            .clone();

        // Hourly automatic backup, unconditional.
        let s = Arc::clone(&store);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(BACKUP_INTERVAL_SECS)).await;
                match s.backups().create_backup(false) {
                    Ok(Some(record)) => {
                        log::info!("[task] Automatic backup created: {}", record.file)
                    }
                    Ok(None) => {}
                    Err(e) => log::error!("[task] Automatic backup failed: {}", e),
                }
            }
        });

        // Rate limiter housekeeping.
        let l = Arc::clone(&limiter);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(LIMITER_CLEANUP_INTERVAL_SECS)).await;
                l.cleanup(Duration::from_secs(60 * 60));
            }
        });

        // Expired session cleanup.
        let ss = Arc::clone(&sessions);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(SESSION_CLEANUP_INTERVAL_SECS)).await;
                let count = ss.cleanup_expired();
                if count > 0 {
                    log::info!("[task] Cleaned up {} expired sessions", count);
                }
            }
        });

        // Daily visitor-list reset, checked hourly.
        let s = Arc::clone(&store);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(VISITOR_PRUNE_INTERVAL_SECS)).await;
                let mut doc = s.load();
                let pruned = doc.prune_stale_visits();
                if pruned > 0 {
                    match s.save(&doc) {
                        Ok(()) => {
                            log::info!("[task] Pruned {} stale visitor entries", pruned)
                        }
                        Err(e) => log::error!("[task] Visitor prune failed: {}", e),
                    }
                }
            }
        });

        log::info!("[task] Background tasks started");
    }
}
