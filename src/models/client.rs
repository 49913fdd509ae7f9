use serde::{Deserialize, Serialize};

use crate::models::document::Document;
use crate::models::message::Message;
use crate::models::{next_id, timestamp_now};

/// Pipeline states, plus the legacy values older documents still carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientStatus {
    Lead,
    Negotiation,
    InProgress,
    Delivered,
    Active,
    Completed,
    Pending,
}

impl Default for ClientStatus {
    fn default() -> Self {
        ClientStatus::Lead
    }
}

impl ClientStatus {
    pub const ALL: &'static [ClientStatus] = &[
        ClientStatus::Lead,
        ClientStatus::Negotiation,
        ClientStatus::InProgress,
        ClientStatus::Delivered,
        ClientStatus::Active,
        ClientStatus::Completed,
        ClientStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Lead => "lead",
            ClientStatus::Negotiation => "negotiation",
            ClientStatus::InProgress => "in-progress",
            ClientStatus::Delivered => "delivered",
            ClientStatus::Active => "active",
            ClientStatus::Completed => "completed",
            ClientStatus::Pending => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClientStatus::Lead => "Lead",
            ClientStatus::Negotiation => "Negotiation",
            ClientStatus::InProgress => "In progress",
            ClientStatus::Delivered => "Delivered",
            ClientStatus::Active => "Active (legacy)",
            ClientStatus::Completed => "Completed (legacy)",
            ClientStatus::Pending => "Pending (legacy)",
        }
    }

    /// Parse a form value; unknown input lands at the head of the pipeline.
    pub fn parse(raw: &str) -> ClientStatus {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == raw)
            .unwrap_or_default()
    }

    /// Legacy statuses fold into their modern pipeline equivalent so old
    /// documents produce sensible dashboard stats.
    pub fn canonical(&self) -> ClientStatus {
        match self {
            ClientStatus::Active => ClientStatus::InProgress,
            ClientStatus::Completed => ClientStatus::Delivered,
            ClientStatus::Pending => ClientStatus::Lead,
            other => *other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

impl PaymentStatus {
    pub const ALL: &'static [PaymentStatus] = &[
        PaymentStatus::Unpaid,
        PaymentStatus::Partial,
        PaymentStatus::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(raw: &str) -> PaymentStatus {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == raw)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub project_title: String,
    #[serde(default)]
    pub project_description: String,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub created_at: String,
}

/// Client form fields, already trimmed by the route.
#[derive(Debug, Clone, Default)]
pub struct ClientFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub project_title: String,
    pub project_description: String,
    pub status: ClientStatus,
    pub price: String,
    pub deadline: String,
    pub start_date: String,
    pub notes: String,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientStats {
    pub total: usize,
    pub leads: usize,
    pub negotiation: usize,
    pub in_progress: usize,
    pub delivered: usize,
    pub revenue: f64,
}

impl Client {
    pub fn find(doc: &Document, id: i64) -> Option<&Client> {
        doc.clients.iter().find(|c| c.id == id)
    }

    pub fn add(doc: &mut Document, fields: ClientFields) -> i64 {
        let id = next_id(doc.clients.iter().map(|c| c.id));
        let start_date = if fields.start_date.is_empty() {
            crate::models::date_today()
        } else {
            fields.start_date
        };
        doc.clients.push(Client {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            company: fields.company,
            project_title: fields.project_title,
            project_description: fields.project_description,
            status: fields.status,
            price: fields.price,
            deadline: fields.deadline,
            start_date,
            notes: fields.notes,
            payment_status: fields.payment_status,
            created_at: timestamp_now(),
        });
        id
    }

    /// Apply edited fields; returns the previous status so the caller can
    /// notice a pipeline change.
    pub fn update(doc: &mut Document, id: i64, fields: ClientFields) -> Option<ClientStatus> {
        let client = doc.clients.iter_mut().find(|c| c.id == id)?;
        let previous = client.status;
        client.name = fields.name;
        client.email = fields.email;
        client.phone = fields.phone;
        client.company = fields.company;
        client.project_title = fields.project_title;
        client.project_description = fields.project_description;
        client.status = fields.status;
        client.price = fields.price;
        client.deadline = fields.deadline;
        client.start_date = fields.start_date;
        client.notes = fields.notes;
        client.payment_status = fields.payment_status;
        Some(previous)
    }

    pub fn delete(doc: &mut Document, id: i64) -> bool {
        let before = doc.clients.len();
        doc.clients.retain(|c| c.id != id);
        doc.clients.len() != before
    }

    /// Convert a contact message into a new lead and return its id.
    pub fn from_message(doc: &mut Document, message: &Message) -> i64 {
        Client::add(
            doc,
            ClientFields {
                name: message.name.clone(),
                email: message.email.clone(),
                project_description: message.message.clone(),
                status: ClientStatus::Lead,
                ..ClientFields::default()
            },
        )
    }

    /// Clients for the admin list, newest first.
    pub fn sorted_desc(doc: &Document) -> Vec<Client> {
        let mut clients = doc.clients.clone();
        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        clients
    }

    pub fn stats(doc: &Document) -> ClientStats {
        let mut stats = ClientStats {
            total: doc.clients.len(),
            ..ClientStats::default()
        };
        for client in &doc.clients {
            match client.status.canonical() {
                ClientStatus::Lead => stats.leads += 1,
                ClientStatus::Negotiation => stats.negotiation += 1,
                ClientStatus::InProgress => stats.in_progress += 1,
                ClientStatus::Delivered => stats.delivered += 1,
                // canonical() never yields a legacy value
                _ => {}
            }
            if let Ok(price) = client.price.trim().parse::<f64>() {
                stats.revenue += price;
            }
        }
        stats
    }
}
