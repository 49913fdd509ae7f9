use std::sync::Arc;

use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::auth::{self, AdminUser, ClientIp, SessionStore};
use crate::config::{AdminCredentials, AppConfig, LoginRole};
use crate::notify::{self, Event};
use crate::rate_limit::{RateLimiter, LOGIN_CAP, LOGIN_WINDOW};
use crate::render;
use crate::routes::flash_pair;

#[derive(FromForm)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[get("/login")]
pub fn login_page(
    admin: Option<AdminUser>,
    flash: Option<FlashMessage<'_>>,
) -> Result<RawHtml<String>, Redirect> {
    if admin.is_some() {
        return Err(Redirect::to("/dashboard"));
    }
    Ok(RawHtml(render::admin::login(&flash_pair(flash))))
}

#[post("/login", data = "<form>")]
pub fn login_submit(
    form: Form<LoginForm>,
    credentials: &State<AdminCredentials>,
    sessions: &State<Arc<SessionStore>>,
    limiter: &State<Arc<RateLimiter>>,
    config: &State<AppConfig>,
    cookies: &CookieJar<'_>,
    client_ip: ClientIp,
) -> Flash<Redirect> {
    let ip = &client_ip.0;

    if !limiter.allow("login", &auth::hash_ip(ip), LOGIN_CAP, LOGIN_WINDOW) {
        return Flash::error(
            Redirect::to("/dashboard/login"),
            "Too many login attempts. Please try again in 15 minutes.",
        );
    }

    // One generic message for every failure; never say which part was wrong.
    let role = match credentials.verify(&form.username, &form.password) {
        Some(role) => role,
        None => {
            log::warn!("[auth] failed login from {}", ip);
            return Flash::error(Redirect::to("/dashboard/login"), "Invalid credentials");
        }
    };

    let demo = role == LoginRole::Demo;
    let session_id = sessions.create(config.session_expiry_hours, demo);
    auth::set_session_cookie(cookies, &session_id);

    notify::dispatch(
        &config.notify_config_dir(),
        Event::AdminLogin {
            username: form.username.clone(),
            ip: ip.clone(),
            demo,
        },
    );

    Flash::success(Redirect::to("/dashboard"), "Login successful")
}

#[get("/logout")]
pub fn logout(
    sessions: &State<Arc<SessionStore>>,
    cookies: &CookieJar<'_>,
) -> Flash<Redirect> {
    if let Some(session_id) = auth::current_session_id(cookies) {
        sessions.destroy(&session_id);
    }
    auth::clear_session_cookie(cookies);
    Flash::success(Redirect::to("/dashboard/login"), "Logout successful")
}

// ── Change password ────────────────────────────────────

#[derive(FromForm)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[get("/change-password")]
pub fn change_password_page(
    admin: AdminUser,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    RawHtml(render::admin::layout(
        "Change password",
        "change-password",
        admin.demo,
        0,
        &flash_pair(flash),
        &render::admin::change_password_form(),
    ))
}

#[post("/change-password", data = "<form>")]
pub fn change_password_submit(
    admin: AdminUser,
    form: Form<ChangePasswordForm>,
    credentials: &State<AdminCredentials>,
    sessions: &State<Arc<SessionStore>>,
    cookies: &CookieJar<'_>,
) -> Flash<Redirect> {
    if let Some(flash) = super::demo_guard(&admin, "/dashboard/change-password") {
        return flash;
    }
    let back = Redirect::to("/dashboard/change-password");

    if !credentials.verify_admin_password(&form.current_password) {
        return Flash::error(back, "Current password is incorrect");
    }
    if form.new_password != form.confirm_password {
        return Flash::error(back, "New password and confirmation do not match");
    }
    if form.new_password.len() < 8 {
        return Flash::error(back, "New password must be at least 8 characters long");
    }
    if let Err(e) = credentials.set_password(&form.new_password) {
        log::error!("[auth] password update failed: {}", e);
        return Flash::error(back, "Could not update the password. Please try again.");
    }

    // Every session dies with the old password.
    sessions.destroy_all();
    auth::clear_session_cookie(cookies);
    Flash::success(
        Redirect::to("/dashboard/login"),
        "Password changed successfully. Please login again.",
    )
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        login_page,
        login_submit,
        logout,
        change_password_page,
        change_password_submit,
    ]
}
