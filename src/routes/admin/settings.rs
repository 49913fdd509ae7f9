use std::sync::Arc;

use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::auth::AdminUser;
use crate::config::AppConfig;
use crate::notify::email::SmtpConfig;
use crate::notify::telegram::TelegramConfig;
use crate::notify::{self, Event};
use crate::render;
use crate::routes::flash_pair;
use crate::store::DocumentStore;

use super::demo_guard;

#[get("/settings")]
pub fn settings_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    config: &State<AppConfig>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let dir = config.notify_config_dir();
    let telegram = TelegramConfig::load_file(&dir);
    let smtp = SmtpConfig::load_file(&dir);
    RawHtml(render::admin::layout(
        "Settings",
        "settings",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::settings_page(&doc.settings.theme, telegram.as_ref(), smtp.as_ref()),
    ))
}

// ── Theme ──────────────────────────────────────────────

#[derive(FromForm)]
pub struct ThemeForm {
    pub theme: String,
}

#[post("/settings/theme", data = "<form>")]
pub fn theme_save(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    config: &State<AppConfig>,
    form: Form<ThemeForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/settings") {
        return flash;
    }
    let back = Redirect::to("/dashboard/settings");
    let theme = match form.theme.as_str() {
        "dark" => "dark",
        _ => "light",
    };
    let mut doc = store.load();
    doc.settings.theme = theme.to_string();
    match store.save(&doc) {
        Ok(()) => {
            notify::dispatch(
                &config.notify_config_dir(),
                Event::ConfigChanged {
                    section: "theme".to_string(),
                },
            );
            Flash::success(back, "Theme saved successfully")
        }
        Err(e) => {
            log::error!("[settings] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

// ── Telegram channel ───────────────────────────────────

#[derive(FromForm)]
pub struct TelegramForm {
    pub bot_token: String,
    pub chat_id: String,
}

#[post("/settings/telegram", data = "<form>")]
pub fn telegram_save(
    admin: AdminUser,
    config: &State<AppConfig>,
    form: Form<TelegramForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/settings") {
        return flash;
    }
    let back = Redirect::to("/dashboard/settings");
    let cfg = TelegramConfig {
        bot_token: form.bot_token.trim().to_string(),
        chat_id: form.chat_id.trim().to_string(),
    };
    let dir = config.notify_config_dir();
    match cfg.store(&dir) {
        Ok(()) => {
            notify::dispatch(
                &dir,
                Event::ConfigChanged {
                    section: "telegram".to_string(),
                },
            );
            Flash::success(back, "Telegram settings saved")
        }
        Err(e) => {
            log::error!("[settings] telegram config save failed: {}", e);
            Flash::error(back, "Could not save the Telegram settings.")
        }
    }
}

// ── SMTP channel ───────────────────────────────────────

#[derive(FromForm)]
pub struct SmtpForm {
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
    pub to: String,
}

#[post("/settings/smtp", data = "<form>")]
pub fn smtp_save(
    admin: AdminUser,
    config: &State<AppConfig>,
    form: Form<SmtpForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/settings") {
        return flash;
    }
    let back = Redirect::to("/dashboard/settings");
    let cfg = SmtpConfig {
        host: form.host.trim().to_string(),
        port: form.port.unwrap_or(587),
        username: form.username.trim().to_string(),
        password: form.password.clone(),
        to: form.to.trim().to_string(),
    };
    let dir = config.notify_config_dir();
    match cfg.store(&dir) {
        Ok(()) => {
            notify::dispatch(
                &dir,
                Event::ConfigChanged {
                    section: "email".to_string(),
                },
            );
            Flash::success(back, "Email settings saved")
        }
        Err(e) => {
            log::error!("[settings] smtp config save failed: {}", e);
            Flash::error(back, "Could not save the email settings.")
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![settings_page, theme_save, telegram_save, smtp_save]
}
