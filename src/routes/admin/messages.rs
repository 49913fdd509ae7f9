use std::sync::Arc;

use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::auth::AdminUser;
use crate::models::client::Client;
use crate::models::message::Message;
use crate::render;
use crate::routes::flash_pair;
use crate::store::DocumentStore;

use super::demo_guard;

#[get("/messages")]
pub fn messages_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let messages = Message::sorted_desc(&doc);
    RawHtml(render::admin::layout(
        "Messages",
        "messages",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::messages_list(&messages),
    ))
}

#[get("/messages/view/<id>")]
pub fn message_view(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> Result<RawHtml<String>, Flash<Redirect>> {
    let mut doc = store.load();
    if Message::find(&doc, id).is_none() {
        return Err(Flash::error(
            Redirect::to("/dashboard/messages"),
            "Message not found",
        ));
    }

    // Opening a message marks it read; demo sessions stay hands-off.
    if !admin.demo && Message::mark_read(&mut doc, id) {
        if let Err(e) = store.save(&doc) {
            log::warn!("[messages] could not persist read flag: {}", e);
        }
    }

    let message = Message::find(&doc, id).cloned().unwrap_or_default();
    Ok(RawHtml(render::admin::layout(
        "Message",
        "messages",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::message_view(&message),
    )))
}

#[post("/messages/delete/<id>")]
pub fn message_delete(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    id: i64,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/messages") {
        return flash;
    }
    let back = Redirect::to("/dashboard/messages");
    let mut doc = store.load();
    if !Message::delete(&mut doc, id) {
        return Flash::error(back, "Message not found");
    }
    match store.save(&doc) {
        Ok(()) => Flash::success(back, "Message deleted successfully"),
        Err(e) => {
            log::error!("[messages] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

#[post("/messages/convert/<id>")]
pub fn message_convert(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    id: i64,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/messages") {
        return flash;
    }
    let mut doc = store.load();
    let message = match Message::find(&doc, id).cloned() {
        Some(m) => m,
        None => {
            return Flash::error(Redirect::to("/dashboard/messages"), "Message not found")
        }
    };
    let client_id = Client::from_message(&mut doc, &message);
    match store.save(&doc) {
        Ok(()) => Flash::success(
            Redirect::to(format!("/dashboard/clients/edit/{}", client_id)),
            "Message converted to client successfully",
        ),
        Err(e) => {
            log::error!("[messages] save failed: {}", e);
            Flash::error(
                Redirect::to("/dashboard/messages"),
                "Error saving data. Please try again.",
            )
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![messages_page, message_view, message_delete, message_convert]
}
