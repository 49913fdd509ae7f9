#![cfg(test)]

use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};

use crate::auth::{self, SessionStore};
use crate::backup::BackupKind;
use crate::config::{AdminCredentials, AppConfig, LoginRole, DEFAULT_ALLOWED_EXTENSIONS};
use crate::models::client::{Client, ClientFields, ClientStatus, PaymentStatus};
use crate::models::document::{Document, Skill, VisitEntry};
use crate::models::message::Message;
use crate::models::project::{parse_technologies, Project, ProjectFields};
use crate::notify::email::SmtpConfig;
use crate::notify::telegram::TelegramConfig;
use crate::notify::Event;
use crate::pdf;
use crate::rate_limit::RateLimiter;
use crate::routes::public::{process_contact, ContactOutcome};
use crate::seo;
use crate::store::DocumentStore;

/// Fresh store rooted in its own temp directory. The TempDir must stay
/// alive for the duration of the test.
fn test_store() -> (TempDir, DocumentStore) {
    let dir = tempdir().expect("tempdir");
    let store = DocumentStore::open(dir.path(), 5);
    (dir, store)
}

fn test_config(dir: &Path) -> AppConfig {
    AppConfig {
        site_dir: dir.to_path_buf(),
        site_url: "http://localhost:8000".to_string(),
        allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        backup_retention: 5,
        session_expiry_hours: 12,
    }
}

/// Fast bcrypt hash for tests (cost=4 instead of DEFAULT_COST=12).
fn fast_hash(password: &str) -> String {
    bcrypt::hash(password, 4).unwrap()
}

fn project_fields(title: &str) -> ProjectFields {
    ProjectFields {
        title: title.to_string(),
        short_description: "short".to_string(),
        content: "content".to_string(),
        demo_url: "https://example.com".to_string(),
        source_url: String::new(),
        technologies: vec!["Rust".to_string()],
    }
}

// ═══════════════════════════════════════════════════════════
// Document store
// ═══════════════════════════════════════════════════════════

#[test]
fn store_seeds_default_document() {
    let (dir, store) = test_store();
    let doc = store.load();
    assert_eq!(doc, Document::default());
    assert!(dir.path().join("data.json").exists());
}

#[test]
fn save_then_load_roundtrip() {
    let (_dir, store) = test_store();
    let mut doc = store.load();
    doc.name = "Ada Lovelace".to_string();
    doc.title = "Engineer".to_string();
    doc.skills.push(Skill {
        name: "Rust".to_string(),
        level: 90,
    });
    Project::add(&mut doc, project_fields("First"), "/static/p.svg".to_string());
    store.save(&doc).unwrap();

    let loaded = store.load();
    assert_eq!(loaded, doc);
}

#[test]
fn corrupt_document_fails_soft() {
    let (dir, store) = test_store();
    let _ = store.load();
    fs::write(dir.path().join("data.json"), "{not json").unwrap();

    assert!(store.try_load().is_err());
    assert_eq!(store.load(), Document::default());
    // The broken file is left in place for inspection/restore.
    assert_eq!(
        fs::read_to_string(dir.path().join("data.json")).unwrap(),
        "{not json"
    );
}

#[test]
fn save_backs_up_previous_version() {
    let (_dir, store) = test_store();
    let mut doc = store.load();
    doc.name = "v2".to_string();
    store.save(&doc).unwrap();

    let backups = store.backups().list_backups();
    assert_eq!(backups.len(), 1);
    assert_eq!(backups[0].kind, BackupKind::Automatic);
}

// ═══════════════════════════════════════════════════════════
// Backup manager
// ═══════════════════════════════════════════════════════════

#[test]
fn backup_retention_keeps_most_recent() {
    let (dir, store) = test_store();
    let _ = store.load();

    let mut created = Vec::new();
    for _ in 0..8 {
        let record = store.backups().create_backup(true).unwrap().unwrap();
        created.push(record.file);
    }

    // Cap is 5: exactly the 5 most recent remain, newest first.
    let listed: Vec<String> = store
        .backups()
        .list_backups()
        .into_iter()
        .map(|r| r.file)
        .collect();
    let mut expected: Vec<String> = created[3..].to_vec();
    expected.reverse();
    assert_eq!(listed, expected);

    // The kept snapshots exist, and eviction leaves exactly 5 on disk.
    for kept in &created[3..] {
        assert!(dir.path().join("backups").join(kept).exists());
    }
    let snapshots_on_disk = fs::read_dir(dir.path().join("backups"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            name.starts_with("backup_") && name.ends_with(".json")
        })
        .count();
    assert_eq!(snapshots_on_disk, 5);
}

#[test]
fn backup_without_document_is_a_noop() {
    let dir = tempdir().unwrap();
    let store = DocumentStore::open(dir.path(), 5);
    assert_eq!(store.backups().create_backup(true).unwrap(), None);
}

#[test]
fn restore_is_byte_for_byte() {
    let (dir, store) = test_store();
    let mut doc = store.load();
    doc.name = "before".to_string();
    store.save(&doc).unwrap();

    let record = store.backups().create_backup(true).unwrap().unwrap();
    let snapshot = fs::read(dir.path().join("backups").join(&record.file)).unwrap();

    doc.name = "after".to_string();
    store.save(&doc).unwrap();
    assert_eq!(store.load().name, "after");

    store.backups().restore_backup(&record.file).unwrap();
    assert_eq!(fs::read(dir.path().join("data.json")).unwrap(), snapshot);
    assert_eq!(store.load().name, "before");
}

#[test]
fn restore_saves_a_safety_copy_first() {
    let (_dir, store) = test_store();
    let _ = store.load();
    let record = store.backups().create_backup(true).unwrap().unwrap();

    let before = store.backups().list_backups().len();
    store.backups().restore_backup(&record.file).unwrap();
    let after = store.backups().list_backups();
    assert_eq!(after.len(), before + 1);
    assert!(after.iter().any(|r| r.kind == BackupKind::Automatic));
}

#[test]
fn restore_rejects_malformed_names() {
    let (_dir, store) = test_store();
    let _ = store.load();
    assert!(store.backups().restore_backup("../data.json").is_err());
    assert!(store.backups().restore_backup("notabackup.json").is_err());
    assert!(store
        .backups()
        .restore_backup("backup_20260101_000000.json")
        .is_err()); // well-formed but absent
}

#[test]
fn delete_backup_removes_file_and_record() {
    let (dir, store) = test_store();
    let _ = store.load();
    let record = store.backups().create_backup(true).unwrap().unwrap();

    store.backups().delete_backup(&record.file).unwrap();
    assert!(store.backups().list_backups().is_empty());
    assert!(!dir.path().join("backups").join(&record.file).exists());

    assert!(store
        .backups()
        .delete_backup("backup_20260101_000000.json")
        .is_err());
}

// ═══════════════════════════════════════════════════════════
// Id assignment
// ═══════════════════════════════════════════════════════════

#[test]
fn project_ids_are_max_plus_one() {
    let mut doc = Document::default();
    assert_eq!(
        Project::add(&mut doc, project_fields("a"), String::new()),
        1
    );
    assert_eq!(
        Project::add(&mut doc, project_fields("b"), String::new()),
        2
    );
    assert_eq!(
        Project::add(&mut doc, project_fields("c"), String::new()),
        3
    );
}

#[test]
fn deleting_max_id_lets_it_be_reused() {
    // The high-water mark is recomputed over the remaining records:
    // [1,2,3], delete 3, add -> the new record is 3 again.
    let mut doc = Document::default();
    for title in ["a", "b", "c"] {
        Project::add(&mut doc, project_fields(title), String::new());
    }
    assert!(Project::delete(&mut doc, 3));
    assert_eq!(
        Project::add(&mut doc, project_fields("d"), String::new()),
        3
    );
}

#[test]
fn deleting_a_middle_id_leaves_a_gap() {
    let mut doc = Document::default();
    for title in ["a", "b", "c"] {
        Project::add(&mut doc, project_fields(title), String::new());
    }
    assert!(Project::delete(&mut doc, 2));
    assert_eq!(
        Project::add(&mut doc, project_fields("d"), String::new()),
        4
    );
}

#[test]
fn message_and_client_ids_follow_the_same_rule() {
    let mut doc = Document::default();
    assert_eq!(Message::add(&mut doc, "a", "a@x", "hi", "1.1.1.1"), 1);
    assert_eq!(Message::add(&mut doc, "b", "b@x", "hi", "1.1.1.1"), 2);
    Message::delete(&mut doc, 2);
    assert_eq!(Message::add(&mut doc, "c", "c@x", "hi", "1.1.1.1"), 2);

    let fields = ClientFields {
        name: "Acme".to_string(),
        ..ClientFields::default()
    };
    assert_eq!(Client::add(&mut doc, fields.clone()), 1);
    assert_eq!(Client::add(&mut doc, fields), 2);
}

// ═══════════════════════════════════════════════════════════
// Contact guard
// ═══════════════════════════════════════════════════════════

#[test]
fn contact_records_a_message() {
    let (_dir, store) = test_store();
    let limiter = RateLimiter::new();
    let outcome = process_contact(
        &store,
        &limiter,
        "9.8.7.6",
        "  Grace  ",
        "grace@example.com",
        "Hello there",
        None,
    );
    assert!(matches!(outcome, ContactOutcome::Accepted { id: 1 }));

    let doc = store.load();
    assert_eq!(doc.messages.len(), 1);
    let message = &doc.messages[0];
    assert_eq!(message.name, "Grace");
    assert_eq!(message.email, "grace@example.com");
    assert_eq!(message.ip, "9.8.7.6");
    assert!(!message.read);
}

#[test]
fn honeypot_never_creates_a_message() {
    let (_dir, store) = test_store();
    let limiter = RateLimiter::new();
    let outcome = process_contact(
        &store,
        &limiter,
        "9.8.7.6",
        "Bot",
        "bot@example.com",
        "Buy things",
        Some("gotcha"),
    );
    assert_eq!(outcome, ContactOutcome::SpamDiscarded);
    assert!(store.load().messages.is_empty());

    // The bot still sees a success message.
    let (success, _) = outcome.flash();
    assert!(success);
}

#[test]
fn contact_requires_all_fields() {
    let (_dir, store) = test_store();
    let limiter = RateLimiter::new();
    let outcome = process_contact(&store, &limiter, "1.1.1.1", "Grace", "", "Hello", None);
    assert_eq!(outcome, ContactOutcome::MissingFields);
    assert!(store.load().messages.is_empty());
}

#[test]
fn contact_is_rate_limited_per_ip() {
    let (_dir, store) = test_store();
    let limiter = RateLimiter::new();

    for i in 0..10 {
        let outcome = process_contact(
            &store,
            &limiter,
            "5.5.5.5",
            "Grace",
            "g@example.com",
            &format!("message {}", i),
            None,
        );
        assert!(matches!(outcome, ContactOutcome::Accepted { .. }));
    }
    let outcome = process_contact(
        &store,
        &limiter,
        "5.5.5.5",
        "Grace",
        "g@example.com",
        "one too many",
        None,
    );
    assert_eq!(outcome, ContactOutcome::RateLimited);
    assert_eq!(store.load().messages.len(), 10);

    // A different caller is unaffected.
    let outcome = process_contact(
        &store,
        &limiter,
        "6.6.6.6",
        "Other",
        "o@example.com",
        "hello",
        None,
    );
    assert!(matches!(outcome, ContactOutcome::Accepted { .. }));
}

// ═══════════════════════════════════════════════════════════
// In-memory RateLimiter
// ═══════════════════════════════════════════════════════════

#[test]
fn rate_limiter_basic() {
    let rl = RateLimiter::new();
    let window = std::time::Duration::from_secs(60);

    assert!(rl.allow("login", "1.2.3.4", 3, window));
    assert!(rl.allow("login", "1.2.3.4", 3, window));
    assert!(rl.allow("login", "1.2.3.4", 3, window));
    // 4th should be blocked
    assert!(!rl.allow("login", "1.2.3.4", 3, window));

    // Different IP and different endpoint are independent
    assert!(rl.allow("login", "5.6.7.8", 3, window));
    assert!(rl.allow("contact", "1.2.3.4", 3, window));
}

#[test]
fn rate_limiter_window_expires() {
    let rl = RateLimiter::new();
    let window = std::time::Duration::from_millis(80);

    assert!(rl.allow("contact", "1.2.3.4", 1, window));
    assert!(!rl.allow("contact", "1.2.3.4", 1, window));
    std::thread::sleep(std::time::Duration::from_millis(120));
    assert!(rl.allow("contact", "1.2.3.4", 1, window));
}

#[test]
fn rate_limiter_remaining() {
    let rl = RateLimiter::new();
    let window = std::time::Duration::from_secs(60);

    assert_eq!(rl.remaining("contact", "1.2.3.4", 5, window), 5);
    rl.allow("contact", "1.2.3.4", 5, window);
    rl.allow("contact", "1.2.3.4", 5, window);
    assert_eq!(rl.remaining("contact", "1.2.3.4", 5, window), 3);
}

#[test]
fn rate_limiter_cleanup() {
    let rl = RateLimiter::new();
    let window = std::time::Duration::from_secs(60);

    rl.allow("a", "1.1.1.1", 10, window);
    rl.allow("b", "2.2.2.2", 10, window);

    // A generous max_age keeps everything
    rl.cleanup(std::time::Duration::from_secs(3600));
    assert_eq!(rl.remaining("a", "1.1.1.1", 10, window), 9);

    // A zero max_age removes everything
    rl.cleanup(std::time::Duration::from_secs(0));
    assert_eq!(rl.remaining("a", "1.1.1.1", 10, window), 10);
}

// ═══════════════════════════════════════════════════════════
// Messages and clients
// ═══════════════════════════════════════════════════════════

#[test]
fn mark_read_clears_the_unread_count() {
    let mut doc = Document::default();
    Message::add(&mut doc, "a", "a@x", "one", "1.1.1.1");
    Message::add(&mut doc, "b", "b@x", "two", "1.1.1.1");
    assert_eq!(doc.unread_messages(), 2);

    assert!(Message::mark_read(&mut doc, 1));
    assert_eq!(doc.unread_messages(), 1);
    assert!(!Message::mark_read(&mut doc, 99));
}

#[test]
fn convert_message_to_client() {
    let mut doc = Document::default();
    let id = Message::add(&mut doc, "Grace", "grace@example.com", "Need a site", "1.1.1.1");
    let message = Message::find(&doc, id).cloned().unwrap();

    let client_id = Client::from_message(&mut doc, &message);
    let client = Client::find(&doc, client_id).unwrap();
    assert_eq!(client.name, "Grace");
    assert_eq!(client.email, "grace@example.com");
    assert_eq!(client.project_description, "Need a site");
    assert_eq!(client.status, ClientStatus::Lead);
    assert!(!client.start_date.is_empty());
    assert!(!client.created_at.is_empty());
}

#[test]
fn client_update_reports_previous_status() {
    let mut doc = Document::default();
    let id = Client::add(
        &mut doc,
        ClientFields {
            name: "Acme".to_string(),
            ..ClientFields::default()
        },
    );
    let previous = Client::update(
        &mut doc,
        id,
        ClientFields {
            name: "Acme".to_string(),
            status: ClientStatus::InProgress,
            ..ClientFields::default()
        },
    );
    assert_eq!(previous, Some(ClientStatus::Lead));
    assert_eq!(Client::find(&doc, id).unwrap().status, ClientStatus::InProgress);
    assert_eq!(Client::update(&mut doc, 99, ClientFields::default()), None);
}

#[test]
fn client_stats_fold_legacy_statuses() {
    let mut doc = Document::default();
    let statuses = [
        (ClientStatus::Lead, "1000"),
        (ClientStatus::Pending, ""),
        (ClientStatus::Active, "250.5"),
        (ClientStatus::InProgress, "not-a-number"),
        (ClientStatus::Completed, "100"),
        (ClientStatus::Delivered, ""),
    ];
    for (status, price) in statuses {
        Client::add(
            &mut doc,
            ClientFields {
                name: "c".to_string(),
                status,
                price: price.to_string(),
                ..ClientFields::default()
            },
        );
    }

    let stats = Client::stats(&doc);
    assert_eq!(stats.total, 6);
    assert_eq!(stats.leads, 2); // lead + legacy pending
    assert_eq!(stats.in_progress, 2); // in-progress + legacy active
    assert_eq!(stats.delivered, 2); // delivered + legacy completed
    assert_eq!(stats.revenue, 1350.5);
}

#[test]
fn client_status_parsing() {
    assert_eq!(ClientStatus::parse("in-progress"), ClientStatus::InProgress);
    assert_eq!(ClientStatus::parse("completed"), ClientStatus::Completed);
    // Unknown input lands at the head of the pipeline
    assert_eq!(ClientStatus::parse("nonsense"), ClientStatus::Lead);
    assert_eq!(PaymentStatus::parse("paid"), PaymentStatus::Paid);
    assert_eq!(PaymentStatus::parse(""), PaymentStatus::Unpaid);
}

// ═══════════════════════════════════════════════════════════
// Visitors
// ═══════════════════════════════════════════════════════════

#[test]
fn track_visit_counts_and_dedups_ips() {
    let mut doc = Document::default();
    doc.track_visit("1.1.1.1");
    doc.track_visit("1.1.1.1");
    doc.track_visit("2.2.2.2");

    assert_eq!(doc.visitors.total, 3);
    assert_eq!(doc.visitors.today.len(), 3);
    assert_eq!(doc.visitors.unique_ips.len(), 2);
}

#[test]
fn prune_drops_entries_from_other_days() {
    let mut doc = Document::default();
    doc.visitors.today.push(VisitEntry {
        ip: "1.1.1.1".to_string(),
        timestamp: "2020-01-01 10:00:00".to_string(),
        date: "2020-01-01".to_string(),
    });
    doc.track_visit("2.2.2.2");
    // track_visit already prunes; re-check the standalone prune too.
    assert_eq!(doc.visitors.today.len(), 1);
    assert_eq!(doc.prune_stale_visits(), 0);
}

// ═══════════════════════════════════════════════════════════
// Credentials and sessions
// ═══════════════════════════════════════════════════════════

#[test]
fn credentials_verify_and_roles() {
    let creds = AdminCredentials::new(
        "admin",
        fast_hash("secret123"),
        Some(("demo".to_string(), fast_hash("demo123"))),
    );
    assert_eq!(creds.verify("admin", "secret123"), Some(LoginRole::Admin));
    assert_eq!(creds.verify("demo", "demo123"), Some(LoginRole::Demo));
    assert_eq!(creds.verify("admin", "wrong"), None);
    assert_eq!(creds.verify("nobody", "secret123"), None);
}

#[test]
fn set_password_replaces_the_hash() {
    let creds = AdminCredentials::new("admin", fast_hash("old-password"), None);
    assert!(creds.verify_admin_password("old-password"));

    creds.set_password("new-password").unwrap();
    assert!(creds.verify_admin_password("new-password"));
    assert!(!creds.verify_admin_password("old-password"));
    assert_eq!(creds.verify("admin", "new-password"), Some(LoginRole::Admin));
}

#[test]
fn session_lifecycle() {
    let sessions = SessionStore::new();
    let id = sessions.create(12, false);
    assert_eq!(sessions.validate(&id), Some(false));

    let demo_id = sessions.create(12, true);
    assert_eq!(sessions.validate(&demo_id), Some(true));

    sessions.destroy(&id);
    assert_eq!(sessions.validate(&id), None);
    assert_eq!(sessions.validate("no-such-session"), None);

    sessions.destroy_all();
    assert_eq!(sessions.validate(&demo_id), None);
    assert_eq!(sessions.cleanup_expired(), 0);
}

#[test]
fn ip_hashing_is_stable() {
    assert_eq!(auth::hash_ip("1.2.3.4"), auth::hash_ip("1.2.3.4"));
    assert_ne!(auth::hash_ip("1.2.3.4"), auth::hash_ip("1.2.3.5"));
}

// ═══════════════════════════════════════════════════════════
// Upload validation
// ═══════════════════════════════════════════════════════════

#[test]
fn upload_extension_allow_list() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    assert!(config.extension_allowed("photo.png"));
    assert!(config.extension_allowed("photo.JPG"));
    assert!(!config.extension_allowed("script.exe"));
    assert!(!config.extension_allowed("no_extension"));
}

// ═══════════════════════════════════════════════════════════
// Notifications
// ═══════════════════════════════════════════════════════════

#[test]
fn event_templates() {
    let event = Event::NewMessage {
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        body: "Hello".to_string(),
    };
    let text = event.render();
    assert!(text.contains("Grace"));
    assert!(text.contains("grace@example.com"));
    assert!(text.contains("Hello"));
    assert_eq!(event.subject(), "New message from Grace");

    let event = Event::ClientStatusChanged {
        client: "Acme".to_string(),
        from: ClientStatus::Lead,
        to: ClientStatus::InProgress,
    };
    let text = event.render();
    assert!(text.contains("Acme"));
    assert!(text.contains("Lead"));
    assert!(text.contains("In progress"));
}

#[test]
fn telegram_config_file_roundtrip() {
    let dir = tempdir().unwrap();
    let cfg = TelegramConfig {
        bot_token: "123:abc".to_string(),
        chat_id: "42".to_string(),
    };
    cfg.store(dir.path()).unwrap();

    let loaded = TelegramConfig::load_file(dir.path()).unwrap();
    assert_eq!(loaded.bot_token, "123:abc");
    assert_eq!(loaded.chat_id, "42");

    // Clearing the credentials removes the file.
    TelegramConfig::default().store(dir.path()).unwrap();
    assert!(TelegramConfig::load_file(dir.path()).is_none());
}

#[test]
fn smtp_config_recipient_falls_back_to_username() {
    let cfg = SmtpConfig {
        host: "smtp.example.com".to_string(),
        username: "me@example.com".to_string(),
        ..SmtpConfig::default()
    };
    assert_eq!(cfg.recipient(), "me@example.com");

    let cfg = SmtpConfig {
        to: "inbox@example.com".to_string(),
        ..cfg
    };
    assert_eq!(cfg.recipient(), "inbox@example.com");
}

// ═══════════════════════════════════════════════════════════
// SEO
// ═══════════════════════════════════════════════════════════

#[test]
fn sitemap_lists_projects() {
    let mut doc = Document::default();
    Project::add(&mut doc, project_fields("a"), String::new());
    Project::add(&mut doc, project_fields("b"), String::new());

    let xml = seo::generate_sitemap(&doc, "https://example.com");
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<loc>https://example.com/</loc>"));
    assert!(xml.contains("<loc>https://example.com/project/1</loc>"));
    assert!(xml.contains("<loc>https://example.com/project/2</loc>"));
    assert!(xml.ends_with("</urlset>"));
}

#[test]
fn robots_points_at_the_sitemap() {
    let txt = seo::generate_robots("https://example.com");
    assert!(txt.contains("User-agent: *"));
    assert!(txt.contains("Sitemap: https://example.com/sitemap.xml"));
}

// ═══════════════════════════════════════════════════════════
// CV export
// ═══════════════════════════════════════════════════════════

#[test]
fn cv_export_produces_a_pdf() {
    let mut doc = Document::default();
    doc.name = "Ada Lovelace".to_string();
    doc.title = "Engineer".to_string();
    doc.about = "First programmer.".to_string();
    doc.skills.push(Skill {
        name: "Analysis".to_string(),
        level: 100,
    });
    Project::add(&mut doc, project_fields("Engine"), String::new());

    let bytes = pdf::render_cv(&doc).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

// ═══════════════════════════════════════════════════════════
// Misc
// ═══════════════════════════════════════════════════════════

#[test]
fn technologies_parse_from_comma_list() {
    assert_eq!(
        parse_technologies(" Rust, Rocket ,  , serde "),
        vec!["Rust", "Rocket", "serde"]
    );
    assert!(parse_technologies("").is_empty());
}
