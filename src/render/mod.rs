pub mod admin;
pub mod site;

use pulldown_cmark::{html, Options, Parser};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render trusted admin-authored markdown (about text, project content).
pub fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(text, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// One flash banner, or nothing.
pub fn flash_banner(flash: &Option<(String, String)>) -> String {
    match flash {
        Some((kind, message)) => {
            let class = if kind == "success" { "flash-success" } else { "flash-error" };
            format!(
                r#"<div class="flash {}">{}</div>"#,
                class,
                html_escape(message)
            )
        }
        None => String::new(),
    }
}

pub fn current_year() -> String {
    chrono::Utc::now().format("%Y").to_string()
}
