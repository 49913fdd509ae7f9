use std::sync::Arc;

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::auth::AdminUser;
use crate::config::AppConfig;
use crate::models::project::{parse_technologies, Project, ProjectFields};
use crate::render;
use crate::routes::flash_pair;
use crate::store::DocumentStore;

use super::{demo_guard, save_upload};

const PLACEHOLDER_IMAGE: &str = "/static/project-placeholder.svg";

#[get("/projects")]
pub fn projects_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    RawHtml(render::admin::layout(
        "Projects",
        "projects",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::projects_list(&doc.projects),
    ))
}

#[derive(FromForm)]
pub struct ProjectFormData<'r> {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub demo_url: String,
    pub source_url: String,
    pub technologies: String,
    pub image: Option<TempFile<'r>>,
}

impl ProjectFormData<'_> {
    fn fields(&self) -> ProjectFields {
        ProjectFields {
            title: self.title.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            content: self.content.trim().to_string(),
            demo_url: self.demo_url.trim().to_string(),
            source_url: self.source_url.trim().to_string(),
            technologies: parse_technologies(&self.technologies),
        }
    }
}

#[get("/projects/add")]
pub fn project_add_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    RawHtml(render::admin::layout(
        "Add project",
        "projects",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::project_form(None),
    ))
}

#[post("/projects/add", data = "<form>")]
pub async fn project_add(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    config: &State<AppConfig>,
    mut form: Form<ProjectFormData<'_>>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/projects") {
        return flash;
    }
    let back = Redirect::to("/dashboard/projects");

    let mut image = PLACEHOLDER_IMAGE.to_string();
    let mut upload_error = None;
    if let Some(file) = form.image.as_mut() {
        match save_upload(file, "project", config).await {
            Ok(Some(path)) => image = path,
            Ok(None) => {}
            Err(e) => upload_error = Some(e),
        }
    }

    let fields = form.fields();
    let mut doc = store.load();
    let id = Project::add(&mut doc, fields, image);
    if let Err(e) = store.save(&doc) {
        log::error!("[projects] save failed: {}", e);
        return Flash::error(back, "Error saving data. Please try again.");
    }
    log::info!("[projects] project {} added", id);
    match upload_error {
        Some(e) => Flash::error(back, format!("Project added, but the image was rejected: {}", e)),
        None => Flash::success(back, "Project added successfully"),
    }
}

#[get("/projects/edit/<id>")]
pub fn project_edit_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> Result<RawHtml<String>, Flash<Redirect>> {
    let doc = store.load();
    let project = match Project::find(&doc, id) {
        Some(p) => p,
        None => {
            return Err(Flash::error(
                Redirect::to("/dashboard/projects"),
                "Project not found",
            ))
        }
    };
    Ok(RawHtml(render::admin::layout(
        "Edit project",
        "projects",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::project_form(Some(project)),
    )))
}

#[post("/projects/edit/<id>", data = "<form>")]
pub async fn project_edit(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    config: &State<AppConfig>,
    id: i64,
    mut form: Form<ProjectFormData<'_>>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/projects") {
        return flash;
    }
    let back = Redirect::to("/dashboard/projects");

    let mut image = None;
    let mut upload_error = None;
    if let Some(file) = form.image.as_mut() {
        match save_upload(file, "project", config).await {
            Ok(found) => image = found,
            Err(e) => upload_error = Some(e),
        }
    }

    let fields = form.fields();
    let mut doc = store.load();
    if !Project::update(&mut doc, id, fields, image) {
        return Flash::error(back, "Project not found");
    }
    if let Err(e) = store.save(&doc) {
        log::error!("[projects] save failed: {}", e);
        return Flash::error(back, "Error saving data. Please try again.");
    }
    match upload_error {
        Some(e) => Flash::error(back, format!("Project updated, but the image was rejected: {}", e)),
        None => Flash::success(back, "Project updated successfully"),
    }
}

#[post("/projects/delete/<id>")]
pub fn project_delete(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    id: i64,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/projects") {
        return flash;
    }
    let back = Redirect::to("/dashboard/projects");
    let mut doc = store.load();
    if !Project::delete(&mut doc, id) {
        return Flash::error(back, "Project not found");
    }
    match store.save(&doc) {
        Ok(()) => Flash::success(back, "Project deleted successfully"),
        Err(e) => {
            log::error!("[projects] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        projects_page,
        project_add_page,
        project_add,
        project_edit_page,
        project_edit,
        project_delete,
    ]
}
