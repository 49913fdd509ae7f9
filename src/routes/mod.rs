pub mod admin;
pub mod public;

use rocket::request::FlashMessage;

/// Convert Rocket's flash cookie into the (kind, message) pair the page
/// builders take.
pub(crate) fn flash_pair(flash: Option<FlashMessage<'_>>) -> Option<(String, String)> {
    flash.map(|f| (f.kind().to_string(), f.message().to_string()))
}
