use std::sync::Arc;

use rocket::form::Form;
use rocket::fs::NamedFile;
use rocket::http::Header;
use rocket::request::FlashMessage;
use rocket::response::content::{RawHtml, RawXml};
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::auth::{self, ClientIp};
use crate::config::AppConfig;
use crate::models::message::Message;
use crate::models::project::Project;
use crate::notify::{self, Event};
use crate::pdf;
use crate::rate_limit::{RateLimiter, CONTACT_CAP, CONTACT_WINDOW};
use crate::render;
use crate::routes::flash_pair;
use crate::seo;
use crate::store::DocumentStore;

// ── Landing page ───────────────────────────────────────

#[get("/")]
pub fn index(
    store: &State<Arc<DocumentStore>>,
    client_ip: ClientIp,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let mut doc = store.load();
    doc.track_visit(&client_ip.0);
    if let Err(e) = store.save(&doc) {
        log::warn!("[visitors] could not persist visit: {}", e);
    }
    RawHtml(render::site::index(&doc, &flash_pair(flash)))
}

// ── Contact form ───────────────────────────────────────

#[derive(FromForm)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub honeypot: Option<String>,
}

/// What happened to a contact submission. Only `Accepted` touched the
/// document; the flash mapping keeps guard rejections indistinguishable
/// from success so abusers get no signal.
#[derive(Debug, PartialEq)]
pub enum ContactOutcome {
    Accepted { id: i64 },
    SpamDiscarded,
    RateLimited,
    MissingFields,
    SaveFailed(String),
}

const CONTACT_THANKS: &str = "Thank you for your message! I will get back to you soon.";

impl ContactOutcome {
    /// (success flash?, user-visible message). A discarded bot submission
    /// still reads as success so automation learns nothing.
    pub fn flash(&self) -> (bool, &'static str) {
        match self {
            ContactOutcome::Accepted { .. } | ContactOutcome::SpamDiscarded => {
                (true, CONTACT_THANKS)
            }
            ContactOutcome::MissingFields => (false, "Please fill in all required fields."),
            ContactOutcome::RateLimited | ContactOutcome::SaveFailed(_) => (
                false,
                "Sorry, there was an error sending your message. Please try again.",
            ),
        }
    }
}

/// Rate limit, honeypot, validation, then record the message. Split from
/// the handler so the guard path is testable without HTTP plumbing.
pub(crate) fn process_contact(
    store: &DocumentStore,
    limiter: &RateLimiter,
    ip: &str,
    name: &str,
    email: &str,
    message: &str,
    honeypot: Option<&str>,
) -> ContactOutcome {
    if !limiter.allow("contact", &auth::hash_ip(ip), CONTACT_CAP, CONTACT_WINDOW) {
        return ContactOutcome::RateLimited;
    }

    if honeypot.map(|h| !h.trim().is_empty()).unwrap_or(false) {
        log::info!("[contact] honeypot tripped, discarding submission from {}", ip);
        return ContactOutcome::SpamDiscarded;
    }

    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return ContactOutcome::MissingFields;
    }

    let mut doc = store.load();
    let id = Message::add(&mut doc, name, email, message, ip);
    match store.save(&doc) {
        Ok(()) => ContactOutcome::Accepted { id },
        Err(e) => ContactOutcome::SaveFailed(e),
    }
}

#[post("/contact", data = "<form>")]
pub fn contact_submit(
    form: Form<ContactForm>,
    store: &State<Arc<DocumentStore>>,
    limiter: &State<Arc<RateLimiter>>,
    config: &State<AppConfig>,
    client_ip: ClientIp,
) -> Flash<Redirect> {
    let outcome = process_contact(
        store,
        limiter,
        &client_ip.0,
        &form.name,
        &form.email,
        &form.message,
        form.honeypot.as_deref(),
    );

    if let ContactOutcome::Accepted { id } = &outcome {
        log::info!("[contact] message {} recorded", id);
        notify::dispatch(
            &config.notify_config_dir(),
            Event::NewMessage {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                body: form.message.trim().to_string(),
            },
        );
    }
    if let ContactOutcome::SaveFailed(e) = &outcome {
        log::error!("[contact] could not persist message: {}", e);
    }

    let (success, message) = outcome.flash();
    let redirect = Redirect::to("/#contact");
    if success {
        Flash::success(redirect, message)
    } else {
        Flash::error(redirect, message)
    }
}

// ── Project detail ─────────────────────────────────────

#[get("/project/<id>")]
pub fn project_detail(store: &State<Arc<DocumentStore>>, id: i64) -> Option<RawHtml<String>> {
    let doc = store.load();
    let project = Project::find(&doc, id)?;
    Some(RawHtml(render::site::project_detail(&doc, project)))
}

// ── CV ─────────────────────────────────────────────────

#[get("/cv")]
pub fn cv_preview(
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    RawHtml(render::site::cv_preview(&doc, &flash_pair(flash)))
}

#[derive(Responder)]
#[response(content_type = "application/pdf")]
pub struct PdfDownload {
    bytes: Vec<u8>,
    disposition: Header<'static>,
}

#[get("/cv.pdf")]
pub fn cv_download(
    store: &State<Arc<DocumentStore>>,
) -> Result<PdfDownload, Flash<Redirect>> {
    let doc = store.load();
    match pdf::render_cv(&doc) {
        Ok(bytes) => {
            let stem = if doc.name.is_empty() {
                "CV".to_string()
            } else {
                doc.name.replace(' ', "_")
            };
            Ok(PdfDownload {
                bytes,
                disposition: Header::new(
                    "Content-Disposition",
                    format!("attachment; filename=\"{}_CV.pdf\"", stem),
                ),
            })
        }
        Err(e) => {
            log::error!("[pdf] CV generation failed: {}", e);
            Err(Flash::error(
                Redirect::to("/cv"),
                "Error generating the PDF. Please try again.",
            ))
        }
    }
}

// ── SEO plumbing ───────────────────────────────────────

#[get("/sitemap.xml")]
pub fn sitemap(store: &State<Arc<DocumentStore>>, config: &State<AppConfig>) -> RawXml<String> {
    let doc = store.load();
    RawXml(seo::generate_sitemap(&doc, &config.site_url))
}

#[get("/robots.txt")]
pub fn robots(config: &State<AppConfig>) -> String {
    seo::generate_robots(&config.site_url)
}

#[get("/favicon.ico")]
pub async fn favicon(config: &State<AppConfig>) -> Option<NamedFile> {
    NamedFile::open(config.static_dir().join("favicon.ico"))
        .await
        .ok()
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        index,
        contact_submit,
        project_detail,
        cv_preview,
        cv_download,
        sitemap,
        robots,
        favicon,
    ]
}
