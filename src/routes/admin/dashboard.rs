use std::sync::Arc;

use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::auth::AdminUser;
use crate::models::client::Client;
use crate::models::document::Document;
use crate::render;
use crate::render::admin::DashboardStats;
use crate::routes::flash_pair;
use crate::store::DocumentStore;

fn stats_for(doc: &Document) -> DashboardStats {
    DashboardStats {
        projects: doc.projects.len(),
        skills: doc.skills.len(),
        messages: doc.messages.len(),
        unread_messages: doc.unread_messages(),
        visitors: doc.visitors.total,
        today_visitors: doc.visitors.today.len(),
        clients: Client::stats(doc),
    }
}

#[get("/")]
pub fn dashboard(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    // try_load so a corrupt document surfaces as a warning banner instead
    // of silently rendering an empty dashboard.
    let (doc, warning) = match store.try_load() {
        Ok(doc) => (doc, None),
        Err(e) => (
            Document::default(),
            Some(format!("Error reading the data file: {}", e)),
        ),
    };
    let stats = stats_for(&doc);
    RawHtml(render::admin::layout(
        "Dashboard",
        "",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::dashboard(&stats, warning.as_deref()),
    ))
}

/// Stats endpoint polled by the dashboard UI.
#[get("/api/stats")]
pub fn api_stats(_admin: AdminUser, store: &State<Arc<DocumentStore>>) -> Json<Value> {
    let doc = store.load();
    let stats = stats_for(&doc);
    Json(json!({
        "projects": stats.projects,
        "skills": stats.skills,
        "messages": stats.messages,
        "unread_messages": stats.unread_messages,
        "visitors": stats.visitors,
        "today_visitors": stats.today_visitors,
        "clients": stats.clients,
    }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![dashboard, api_stats]
}
