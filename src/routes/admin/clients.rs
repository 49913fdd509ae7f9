use std::sync::Arc;

use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::State;

use crate::auth::AdminUser;
use crate::config::AppConfig;
use crate::models::client::{Client, ClientFields, ClientStatus, PaymentStatus};
use crate::notify::{self, Event};
use crate::render;
use crate::routes::flash_pair;
use crate::store::DocumentStore;

use super::demo_guard;

#[derive(FromForm)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub project_title: String,
    pub project_description: String,
    pub status: String,
    pub price: String,
    pub deadline: String,
    pub start_date: String,
    pub notes: String,
    pub payment_status: String,
}

impl ClientForm {
    fn fields(&self) -> ClientFields {
        ClientFields {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company: self.company.trim().to_string(),
            project_title: self.project_title.trim().to_string(),
            project_description: self.project_description.trim().to_string(),
            status: ClientStatus::parse(self.status.trim()),
            price: self.price.trim().to_string(),
            deadline: self.deadline.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
            notes: self.notes.trim().to_string(),
            payment_status: PaymentStatus::parse(self.payment_status.trim()),
        }
    }
}

#[get("/clients")]
pub fn clients_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    let clients = Client::sorted_desc(&doc);
    let stats = Client::stats(&doc);
    RawHtml(render::admin::layout(
        "Clients",
        "clients",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::clients_list(&clients, &stats),
    ))
}

#[get("/clients/add")]
pub fn client_add_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    flash: Option<FlashMessage<'_>>,
) -> RawHtml<String> {
    let doc = store.load();
    RawHtml(render::admin::layout(
        "Add client",
        "clients",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::client_form(None),
    ))
}

#[post("/clients/add", data = "<form>")]
pub fn client_add(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    form: Form<ClientForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/clients") {
        return flash;
    }
    let back = Redirect::to("/dashboard/clients");
    let mut doc = store.load();
    Client::add(&mut doc, form.fields());
    match store.save(&doc) {
        Ok(()) => Flash::success(back, "Client added successfully"),
        Err(e) => {
            log::error!("[clients] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

#[get("/clients/edit/<id>")]
pub fn client_edit_page(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> Result<RawHtml<String>, Flash<Redirect>> {
    let doc = store.load();
    let client = match Client::find(&doc, id) {
        Some(c) => c,
        None => {
            return Err(Flash::error(
                Redirect::to("/dashboard/clients"),
                "Client not found",
            ))
        }
    };
    Ok(RawHtml(render::admin::layout(
        "Edit client",
        "clients",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::client_form(Some(client)),
    )))
}

#[post("/clients/edit/<id>", data = "<form>")]
pub fn client_edit(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    config: &State<AppConfig>,
    id: i64,
    form: Form<ClientForm>,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/clients") {
        return flash;
    }
    let back = Redirect::to("/dashboard/clients");
    let fields = form.fields();
    let new_status = fields.status;
    let client_name = fields.name.clone();

    let mut doc = store.load();
    let previous = match Client::update(&mut doc, id, fields) {
        Some(previous) => previous,
        None => return Flash::error(back, "Client not found"),
    };
    if let Err(e) = store.save(&doc) {
        log::error!("[clients] save failed: {}", e);
        return Flash::error(back, "Error saving data. Please try again.");
    }

    if previous != new_status {
        notify::dispatch(
            &config.notify_config_dir(),
            Event::ClientStatusChanged {
                client: client_name,
                from: previous,
                to: new_status,
            },
        );
    }
    Flash::success(back, "Client updated successfully")
}

#[get("/clients/view/<id>")]
pub fn client_view(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    id: i64,
    flash: Option<FlashMessage<'_>>,
) -> Result<RawHtml<String>, Flash<Redirect>> {
    let doc = store.load();
    let client = match Client::find(&doc, id) {
        Some(c) => c,
        None => {
            return Err(Flash::error(
                Redirect::to("/dashboard/clients"),
                "Client not found",
            ))
        }
    };
    Ok(RawHtml(render::admin::layout(
        "Client",
        "clients",
        admin.demo,
        doc.unread_messages(),
        &flash_pair(flash),
        &render::admin::client_view(client),
    )))
}

#[post("/clients/delete/<id>")]
pub fn client_delete(
    admin: AdminUser,
    store: &State<Arc<DocumentStore>>,
    id: i64,
) -> Flash<Redirect> {
    if let Some(flash) = demo_guard(&admin, "/dashboard/clients") {
        return flash;
    }
    let back = Redirect::to("/dashboard/clients");
    let mut doc = store.load();
    if !Client::delete(&mut doc, id) {
        return Flash::error(back, "Client not found");
    }
    match store.save(&doc) {
        Ok(()) => Flash::success(back, "Client deleted successfully"),
        Err(e) => {
            log::error!("[clients] save failed: {}", e);
            Flash::error(back, "Error saving data. Please try again.")
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        clients_page,
        client_add_page,
        client_add,
        client_edit_page,
        client_edit,
        client_view,
        client_delete,
    ]
}
