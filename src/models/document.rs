use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::client::Client;
use crate::models::message::Message;
use crate::models::project::Project;
use crate::models::{date_today, timestamp_now};

/// The single aggregate holding the whole site's state. One instance lives
/// in `data.json`; every mutation re-reads and re-writes it in full.
/// All fields default so documents written by older builds still parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub social: BTreeMap<String, String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub visitors: Visitors,
    #[serde(default)]
    pub settings: SiteSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visitors {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub today: Vec<VisitEntry>,
    #[serde(default)]
    pub unique_ips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitEntry {
    pub ip: String,
    pub timestamp: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "light".to_string()
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            theme: default_theme(),
        }
    }
}

impl Document {
    /// Record a page view: bump the total, keep today's entries plus the new
    /// one, and remember the IP in the unique set.
    pub fn track_visit(&mut self, ip: &str) {
        let today = date_today();
        self.visitors.total += 1;
        self.visitors.today.retain(|v| v.date == today);
        self.visitors.today.push(VisitEntry {
            ip: ip.to_string(),
            timestamp: timestamp_now(),
            date: today,
        });
        if !self.visitors.unique_ips.iter().any(|u| u == ip) {
            self.visitors.unique_ips.push(ip.to_string());
        }
    }

    /// Drop visit entries that are not from today. Returns how many were
    /// pruned; the caller persists only when the answer is non-zero.
    pub fn prune_stale_visits(&mut self) -> usize {
        let today = date_today();
        let before = self.visitors.today.len();
        self.visitors.today.retain(|v| v.date == today);
        before - self.visitors.today.len()
    }

    pub fn unread_messages(&self) -> usize {
        self.messages.iter().filter(|m| !m.read).count()
    }
}
