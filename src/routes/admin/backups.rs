use std::sync::Arc;

use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::auth::AdminUser;
use crate::config::AppConfig;
use crate::notify::{self, Event};
use crate::render;
use crate::routes::flash_pair;
use crate::store::DocumentStore;

use super::demo_guard;

#[get("/backups")]
pub fn backups_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let records = store.backups().list_backups();
    RawHtml(render::admin::layout(
        "Backups",
        "backups",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::backups_list(&records, store.backups().retention()),
    ))
}

#[post("/backups/create")]
pub fn backup_create(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    config: &State<AppConfig>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/backups") {
        return flash;
    }
    let back = Redirect::to("/dashboard/backups");
    match store.backups().create_backup(true) {
        Ok(Some(record)) => {
            notify::dispatch(
                &config.notify_config_dir(),
                Event::BackupCreated {
                    file: record.file.clone(),
                },
            );
            Flash::success(back, format!("Backup {} created", record.file))
        }
        Ok(None) => Flash::error(back, "Nothing to back up yet"),
        Err(e) => {
            log::error!("[backup] manual backup failed: {}", e);
            Flash::error(back, format!("Backup failed: {}", e))
        }
    }
}

#[post("/backups/restore/<name>")]
pub fn backup_restore(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    config: &State<AppConfig>,
    name: &str,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/backups") {
        return flash;
    }
    let back = Redirect::to("/dashboard/backups");
    match store.backups().restore_backup(name) {
        Ok(()) => {
            notify::dispatch(
                &config.notify_config_dir(),
                Event::BackupRestored {
                    file: name.to_string(),
                },
            );
            Flash::success(back, format!("Backup {} restored", name))
        }
        Err(e) => {
            log::error!("[backup] restore failed: {}", e);
            Flash::error(back, format!("Restore failed: {}", e))
        }
    }
}

#[post("/backups/delete/<name>")]
pub fn backup_delete(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    name: &str,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/backups") {
        return flash;
    }
    let back = Redirect::to("/dashboard/backups");
    match store.backups().delete_backup(name) {
        Ok(()) => Flash::success(back, format!("Backup {} deleted", name)),
        Err(e) => {
            log::error!("[backup] delete failed: {}", e);
            Flash::error(back, format!("Delete failed: {}", e))
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![backups_page, backup_create, backup_restore, backup_delete]
}
