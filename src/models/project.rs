use serde::{Deserialize, Serialize};

use crate::models::document::Document;
use crate::models::next_id;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub demo_url: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Fields common to the add and edit forms, already trimmed by the route.
#[derive(Debug, Clone, Default)]
pub struct ProjectFields {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub demo_url: String,
    pub source_url: String,
    pub technologies: Vec<String>,
}

impl Project {
    pub fn find(doc: &Document, id: i64) -> Option<&Project> {
        doc.projects.iter().find(|p| p.id == id)
    }

    pub fn find_mut(doc: &mut Document, id: i64) -> Option<&mut Project> {
        doc.projects.iter_mut().find(|p| p.id == id)
    }

    /// Insert a new project with the next free id and return that id.
    /// `image` is the stored upload path, or the placeholder.
    pub fn add(doc: &mut Document, fields: ProjectFields, image: String) -> i64 {
        let id = next_id(doc.projects.iter().map(|p| p.id));
        doc.projects.push(Project {
            id,
            title: fields.title,
            short_description: fields.short_description,
            content: fields.content,
            image,
            demo_url: or_hash(fields.demo_url),
            source_url: or_hash(fields.source_url),
            technologies: fields.technologies,
        });
        id
    }

    /// Apply edited fields to an existing project. The image is only
    /// replaced when a new upload came through.
    pub fn update(
        doc: &mut Document,
        id: i64,
        fields: ProjectFields,
        image: Option<String>,
    ) -> bool {
        match Self::find_mut(doc, id) {
            Some(project) => {
                project.title = fields.title;
                project.short_description = fields.short_description;
                project.content = fields.content;
                project.demo_url = or_hash(fields.demo_url);
                project.source_url = or_hash(fields.source_url);
                project.technologies = fields.technologies;
                if let Some(image) = image {
                    project.image = image;
                }
                true
            }
            None => false,
        }
    }

    pub fn delete(doc: &mut Document, id: i64) -> bool {
        let before = doc.projects.len();
        doc.projects.retain(|p| p.id != id);
        doc.projects.len() != before
    }
}

/// Empty link fields render as a dead anchor rather than a broken one.
fn or_hash(url: String) -> String {
    if url.is_empty() {
        "#".to_string()
    } else {
        url
    }
}

/// Parse a comma-separated technology list from the project form.
pub fn parse_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
