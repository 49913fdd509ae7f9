#[macro_use]
extern crate rocket;

use std::sync::Arc;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;

mod auth;
mod backup;
mod boot;
mod config;
mod models;
mod notify;
mod pdf;
mod rate_limit;
mod render;
mod routes;
mod seo;
mod store;
mod tasks;

#[cfg(test)]
mod tests;

use config::{AdminCredentials, AppConfig};
use rate_limit::RateLimiter;
use store::DocumentStore;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>&larr; Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>&larr; Home</a></body></html>".to_string())
}

/// A request that fell through the admin guard lands on the login page.
#[catch(401)]
fn unauthorized() -> Redirect {
    Redirect::to("/dashboard/login")
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let app_config = AppConfig::from_env();

    // Boot check: verify/create directories before anything touches disk
    boot::run(&app_config);

    let credentials = AdminCredentials::from_env();
    let store = Arc::new(DocumentStore::open(
        &app_config.site_dir,
        app_config.backup_retention,
    ));
    // First access seeds the default document so the public site renders.
    let _ = store.load();

    let uploads_dir = app_config.uploads_dir();
    let static_dir = app_config.static_dir();

    rocket::build()
        .manage(store)
        .manage(credentials)
        .manage(Arc::new(RateLimiter::new()))
        .manage(Arc::new(auth::SessionStore::new()))
        .manage(app_config)
        .attach(tasks::BackgroundTasks)
        .mount("/static", FileServer::from(static_dir))
        .mount("/uploads", FileServer::from(uploads_dir))
        .mount("/", routes::public::routes())
        .mount("/dashboard", routes::admin::routes())
        .register("/", catchers![not_found, server_error, unauthorized])
}
