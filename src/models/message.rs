use serde::{Deserialize, Serialize};

use crate::models::document::Document;
use crate::models::{next_id, timestamp_now};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub ip: String,
}

impl Message {
    pub fn find(doc: &Document, id: i64) -> Option<&Message> {
        doc.messages.iter().find(|m| m.id == id)
    }

    /// Record an accepted contact submission and return the new id.
    pub fn add(doc: &mut Document, name: &str, email: &str, body: &str, ip: &str) -> i64 {
        let id = next_id(doc.messages.iter().map(|m| m.id));
        doc.messages.push(Message {
            id,
            name: name.to_string(),
            email: email.to_string(),
            message: body.to_string(),
            date: timestamp_now(),
            read: false,
            ip: ip.to_string(),
        });
        id
    }

    pub fn mark_read(doc: &mut Document, id: i64) -> bool {
        match doc.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                message.read = true;
                true
            }
            None => false,
        }
    }

    pub fn delete(doc: &mut Document, id: i64) -> bool {
        let before = doc.messages.len();
        doc.messages.retain(|m| m.id != id);
        doc.messages.len() != before
    }

    /// Messages for the admin list, newest first.
    pub fn sorted_desc(doc: &Document) -> Vec<Message> {
        let mut messages = doc.messages.clone();
        messages.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        messages
    }
}
