use rocket::fs::TempFile;
use rocket::response::{Flash, Redirect};

use crate::auth::AdminUser;
use crate::config::AppConfig;

pub mod access;
pub mod backups;
pub mod clients;
pub mod dashboard;
pub mod messages;
pub mod profile;
pub mod projects;
pub mod settings;

/// Demo sessions see everything and change nothing.
pub(crate) fn demo_guard(admin: &AdminUser, back: &str) -> Option<Flash<Redirect>> {
    if admin.demo {
        Some(Flash::error(
            Redirect::to(back.to_string()),
            "Demo mode is read-only.",
        ))
    } else {
        None
    }
}

/// Persist a multipart upload into the uploads directory and return its
/// public path. `Ok(None)` means no file was submitted; `Err` carries the
/// user-visible rejection.
pub(crate) async fn save_upload(
    file: &mut TempFile<'_>,
    prefix: &str,
    config: &AppConfig,
) -> Result<Option<String>, String> {
    if file.len() == 0 {
        return Ok(None);
    }

    let original = file
        .raw_name()
        .map(|rn| rn.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .unwrap_or_default();
    if !config.extension_allowed(&original) {
        return Err(format!(
            "File type not allowed (use {}).",
            config.allowed_extensions.join(", ")
        ));
    }
    let ext = original
        .rsplit_once('.')
        .map(|(_, e)| e.to_lowercase())
        .unwrap_or_else(|| "jpg".to_string());

    let filename = format!("{}_{}.{}", prefix, uuid::Uuid::new_v4(), ext);
    let dir = config.uploads_dir();
    std::fs::create_dir_all(&dir).map_err(|e| format!("Upload failed: {}", e))?;
    let dest = dir.join(&filename);
    file.persist_to(&dest)
        .await
        .map_err(|e| format!("Upload failed: {}", e))?;

    Ok(Some(format!("/uploads/{}", filename)))
}

pub fn routes() -> Vec<rocket::Route> {
    let mut all = access::routes();
    all.extend(dashboard::routes());
    all.extend(profile::routes());
    all.extend(projects::routes());
    all.extend(messages::routes());
    all.extend(clients::routes());
    all.extend(backups::routes());
    all.extend(settings::routes());
    all
}
