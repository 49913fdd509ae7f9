use std::sync::Arc;

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::auth::AdminUser;
use crate::config::AppConfig;
use crate::models::document::Skill;
use crate::render;
use crate::routes::flash_pair;
use crate::store::DocumentStore;

use super::{demo_guard, save_upload};

fn page(
    title: &str,
    active: &str,
    admin: &AdminUser,
    unread: usize,
    flash: Option<FlashMessage<'_>>,
    content: String,
) -> RawHtml<String> {
    RawHtml(render::admin::layout(
        title,
        active,
        admin.demo,
        unread,
        &flash_pair(flash),
        &content,
    ))
}

// ── General ────────────────────────────────────────────

#[get("/general")]
pub fn general_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let content = render::admin::general_form(&doc);
    page("General", "general", &admin, doc.unread_messages(), flash, content)
}

#[derive(FromForm)]
pub struct GeneralForm<'r> {
    pub name: String,
    pub title: String,
    pub description: String,
    pub photo: Option<TempFile<'r>>,
}

#[post("/general", data = "<form>")]
pub async fn general_save(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    config: &State<AppConfig>,
    mut form: Form<GeneralForm<'_>>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/general") {
        return flash;
    }
    let back = Redirect::to("/dashboard/general");

    let mut doc = store.load();
    doc.name = form.name.trim().to_string();
    doc.title = form.title.trim().to_string();
    doc.description = form.description.trim().to_string();

    // A rejected upload keeps the rest of the form applying.
    let mut upload_error = None;
    if let Some(file) = form.photo.as_mut() {
        match save_upload(file, "profile", config).await {
            Ok(Some(path)) => doc.photo = path,
            Ok(None) => {}
            Err(e) => upload_error = Some(e),
        }
    }

    if let Err(e) = store.save(&doc) {
        log::error!("[profile] save failed: {}", e);
        return Flash::error(back, "Error saving data. Please try again.");
    }
    match upload_error {
        Some(e) => Flash::error(back, format!("Saved, but the photo was rejected: {}", e)),
        None => Flash::success(back, "General information saved successfully"),
    }
}

// ── About ──────────────────────────────────────────────

#[get("/about")]
pub fn about_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let content = render::admin::about_form(&doc);
    page("About", "about", &admin, doc.unread_messages(), flash, content)
}

#[derive(FromForm)]
pub struct AboutForm {
    pub about: String,
}

#[post("/about", data = "<form>")]
pub fn about_save(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    form: Form<AboutForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/about") {
        return flash;
    }
    let back = Redirect::to("/dashboard/about");
    let mut doc = store.load();
    doc.about = form.about.trim().to_string();
    match store.save(&doc) {
        Ok(()) => Flash::success(back, "About section saved successfully"),
        Err(e) => {
            log::error!("[profile] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

// ── Skills ─────────────────────────────────────────────

#[get("/skills")]
pub fn skills_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let content = render::admin::skills_form(&doc);
    page("Skills", "skills", &admin, doc.unread_messages(), flash, content)
}

#[derive(FromForm)]
pub struct SkillsForm {
    pub skill_name: Vec<String>,
    pub skill_level: Vec<String>,
}

#[post("/skills", data = "<form>")]
pub fn skills_save(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    form: Form<SkillsForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/skills") {
        return flash;
    }
    let back = Redirect::to("/dashboard/skills");

    let mut skills = Vec::new();
    for (name, level) in form.skill_name.iter().zip(form.skill_level.iter()) {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        // Out-of-range or junk levels fall back to zero.
        let level = level
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|l| *l <= 100)
            .unwrap_or(0);
        skills.push(Skill {
            name: name.to_string(),
            level,
        });
    }

    let mut doc = store.load();
    doc.skills = skills;
    match store.save(&doc) {
        Ok(()) => Flash::success(back, "Skills saved successfully"),
        Err(e) => {
            log::error!("[profile] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

// ── Contact info ───────────────────────────────────────

#[get("/contact")]
pub fn contact_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let content = render::admin::contact_form(&doc);
    page("Contact", "contact", &admin, doc.unread_messages(), flash, content)
}

#[derive(FromForm)]
pub struct ContactInfoForm {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[post("/contact", data = "<form>")]
pub fn contact_save(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    form: Form<ContactInfoForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/contact") {
        return flash;
    }
    let back = Redirect::to("/dashboard/contact");
    let mut doc = store.load();
    doc.contact.email = form.email.trim().to_string();
    doc.contact.phone = form.phone.trim().to_string();
    doc.contact.location = form.location.trim().to_string();
    match store.save(&doc) {
        Ok(()) => Flash::success(back, "Contact information saved successfully"),
        Err(e) => {
            log::error!("[profile] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

// ── Social links ───────────────────────────────────────

#[get("/social")]
pub fn social_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let content = render::admin::social_form(&doc);
    page("Social", "social", &admin, doc.unread_messages(), flash, content)
}

#[derive(FromForm)]
pub struct SocialForm {
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
    pub instagram: String,
    pub facebook: String,
    pub youtube: String,
    pub behance: String,
    pub dribbble: String,
}

#[post("/social", data = "<form>")]
pub fn social_save(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    form: Form<SocialForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/social") {
        return flash;
    }
    let back = Redirect::to("/dashboard/social");
    let mut doc = store.load();
    let entries = [
        ("linkedin", &form.linkedin),
        ("github", &form.github),
        ("twitter", &form.twitter),
        ("instagram", &form.instagram),
        ("facebook", &form.facebook),
        ("youtube", &form.youtube),
        ("behance", &form.behance),
        ("dribbble", &form.dribbble),
    ];
    for (network, url) in entries {
        doc.social
            .insert(network.to_string(), url.trim().to_string());
    }
    match store.save(&doc) {
        Ok(()) => Flash::success(back, "Social media links saved successfully"),
        Err(e) => {
            log::error!("[profile] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        general_page,
        general_save,
        about_page,
        about_save,
        skills_page,
        skills_save,
        contact_page,
        contact_save,
        social_page,
        social_save,
    ]
}
