use crate::models::document::Document;
use crate::models::project::Project;
use crate::render::{current_year, flash_banner, html_escape, markdown_to_html};

const SITE_CSS: &str = r#"
:root{--bg:#ffffff;--fg:#1c1d21;--muted:#6b6f76;--accent:#2563eb;--card:#f4f5f7;--border:#e2e4e8}
body.theme-dark{--bg:#14151a;--fg:#e8e9ec;--muted:#9aa0a8;--accent:#60a5fa;--card:#1e2027;--border:#2c2f38}
*{box-sizing:border-box}
body{margin:0;font-family:-apple-system,'Segoe UI',Helvetica,Arial,sans-serif;background:var(--bg);color:var(--fg);line-height:1.6}
a{color:var(--accent);text-decoration:none}
.wrap{max-width:960px;margin:0 auto;padding:0 24px}
section{padding:48px 0;border-bottom:1px solid var(--border)}
h1{font-size:2.4em;margin:0 0 8px}
h2{font-size:1.5em;margin:0 0 24px}
.hero{display:flex;gap:32px;align-items:center;padding:64px 0}
.hero img{width:160px;height:160px;border-radius:50%;object-fit:cover}
.hero .tagline{color:var(--muted);font-size:1.1em}
.skill{margin-bottom:12px}
.skill .bar{background:var(--card);border-radius:4px;height:8px;overflow:hidden}
.skill .bar span{display:block;height:100%;background:var(--accent)}
.projects{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:24px}
.project-card{background:var(--card);border:1px solid var(--border);border-radius:8px;overflow:hidden}
.project-card img{width:100%;height:160px;object-fit:cover;display:block}
.project-card .body{padding:16px}
.project-card h3{margin:0 0 8px}
.tech{display:inline-block;background:var(--bg);border:1px solid var(--border);border-radius:4px;padding:1px 8px;margin:2px;font-size:.8em;color:var(--muted)}
form.contact{max-width:480px}
form.contact input,form.contact textarea{width:100%;padding:10px;margin-bottom:12px;border:1px solid var(--border);border-radius:4px;background:var(--bg);color:var(--fg)}
form.contact textarea{min-height:120px}
button{background:var(--accent);color:#fff;border:0;border-radius:4px;padding:10px 20px;cursor:pointer;font-size:1em}
.flash{padding:12px 16px;border-radius:4px;margin:16px 0}
.flash-success{background:#e7f6ec;color:#14703a;border:1px solid #bce5cb}
.flash-error{background:#fbebec;color:#9c2329;border:1px solid #f2c8ca}
body.theme-dark .flash-success{background:#12311d;color:#8fe0ab;border-color:#1d5632}
body.theme-dark .flash-error{background:#3a1719;color:#f0a6aa;border-color:#6e2a2e}
footer{padding:32px 0;color:var(--muted);font-size:.9em;display:flex;justify-content:space-between}
.social a{margin-right:12px}
"#;

fn layout(doc: &Document, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<style>{css}</style>
</head>
<body class="theme-{theme}">
{body}
<footer class="wrap">
    <span>&copy; {year} {name}</span>
    <span>{visits} visits</span>
</footer>
</body>
</html>"#,
        title = html_escape(title),
        description = html_escape(&doc.description),
        css = SITE_CSS,
        theme = html_escape(&doc.settings.theme),
        body = body,
        year = current_year(),
        name = html_escape(&doc.name),
        visits = doc.visitors.total,
    )
}

/// The landing page: hero, about, skills, projects, contact form.
pub fn index(doc: &Document, flash: &Option<(String, String)>) -> String {
    let mut body = String::new();
    body.push_str(r#"<div class="wrap">"#);
    body.push_str(&flash_banner(flash));

    // ── Hero ──
    let photo = if doc.photo.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(&doc.photo),
            html_escape(&doc.name)
        )
    };
    body.push_str(&format!(
        r#"<section class="hero" id="top">
    {photo}
    <div>
        <h1>{name}</h1>
        <p class="tagline">{title}</p>
        <p>{description}</p>
    </div>
</section>"#,
        photo = photo,
        name = html_escape(&doc.name),
        title = html_escape(&doc.title),
        description = html_escape(&doc.description),
    ));

    // ── About ──
    if !doc.about.is_empty() {
        body.push_str(&format!(
            r#"<section id="about"><h2>About</h2>{}</section>"#,
            markdown_to_html(&doc.about)
        ));
    }

    // ── Skills ──
    if !doc.skills.is_empty() {
        body.push_str(r#"<section id="skills"><h2>Skills</h2>"#);
        for skill in &doc.skills {
            body.push_str(&format!(
                r#"<div class="skill"><span>{name} — {level}%</span><div class="bar"><span style="width:{level}%"></span></div></div>"#,
                name = html_escape(&skill.name),
                level = skill.level.min(100),
            ));
        }
        body.push_str("</section>");
    }

    // ── Projects ──
    if !doc.projects.is_empty() {
        body.push_str(r#"<section id="projects"><h2>Projects</h2><div class="projects">"#);
        for project in &doc.projects {
            body.push_str(&project_card(project));
        }
        body.push_str("</div></section>");
    }

    // ── Contact ──
    body.push_str(&contact_section(doc));

    body.push_str("</div>");
    let title = if doc.name.is_empty() {
        "Portfolio".to_string()
    } else {
        format!("{} — {}", doc.name, doc.title)
    };
    layout(doc, &title, &body)
}

fn project_card(project: &Project) -> String {
    let techs: String = project
        .technologies
        .iter()
        .map(|t| format!(r#"<span class="tech">{}</span>"#, html_escape(t)))
        .collect();
    format!(
        r#"<div class="project-card">
    <a href="/project/{id}"><img src="{image}" alt="{title}"></a>
    <div class="body">
        <h3><a href="/project/{id}">{title}</a></h3>
        <p>{short}</p>
        <div>{techs}</div>
    </div>
</div>"#,
        id = project.id,
        image = html_escape(&project.image),
        title = html_escape(&project.title),
        short = html_escape(&project.short_description),
        techs = techs,
    )
}

fn contact_section(doc: &Document) -> String {
    let mut info = String::new();
    if !doc.contact.email.is_empty() {
        info.push_str(&format!(
            r#"<p>Email: <a href="mailto:{0}">{0}</a></p>"#,
            html_escape(&doc.contact.email)
        ));
    }
    if !doc.contact.phone.is_empty() {
        info.push_str(&format!("<p>Phone: {}</p>", html_escape(&doc.contact.phone)));
    }
    if !doc.contact.location.is_empty() {
        info.push_str(&format!(
            "<p>Location: {}</p>",
            html_escape(&doc.contact.location)
        ));
    }

    let social: String = doc
        .social
        .iter()
        .filter(|(_, url)| !url.is_empty())
        .map(|(network, url)| {
            format!(
                r#"<a href="{}" rel="noopener">{}</a>"#,
                html_escape(url),
                html_escape(network)
            )
        })
        .collect();

    format!(
        r#"<section id="contact">
    <h2>Contact</h2>
    {info}
    <div class="social">{social}</div>
    <form class="contact" method="post" action="/contact">
        <input type="text" name="name" placeholder="Your name" required>
        <input type="email" name="email" placeholder="Your email" required>
        <textarea name="message" placeholder="Your message" required></textarea>
        <div style="display:none"><input type="text" name="honeypot"></div>
        <button type="submit">Send message</button>
    </form>
</section>"#,
        info = info,
        social = social,
    )
}

/// Project detail page.
pub fn project_detail(doc: &Document, project: &Project) -> String {
    let techs: String = project
        .technologies
        .iter()
        .map(|t| format!(r#"<span class="tech">{}</span>"#, html_escape(t)))
        .collect();
    let content = if project.content.is_empty() {
        format!("<p>{}</p>", html_escape(&project.short_description))
    } else {
        markdown_to_html(&project.content)
    };
    let body = format!(
        r#"<div class="wrap">
<section>
    <p><a href="/">&larr; Back</a></p>
    <h1>{title}</h1>
    <img src="{image}" alt="{title}" style="max-width:100%;border-radius:8px">
    {content}
    <div>{techs}</div>
    <p style="margin-top:24px">
        <a href="{demo}" rel="noopener">Live demo</a> &nbsp;&middot;&nbsp;
        <a href="{source}" rel="noopener">Source code</a>
    </p>
</section>
</div>"#,
        title = html_escape(&project.title),
        image = html_escape(&project.image),
        content = content,
        techs = techs,
        demo = html_escape(&project.demo_url),
        source = html_escape(&project.source_url),
    );
    layout(doc, &project.title, &body)
}

/// Printable CV view backing the PDF export.
pub fn cv_preview(doc: &Document, flash: &Option<(String, String)>) -> String {
    let mut body = String::new();
    body.push_str(r#"<div class="wrap">"#);
    body.push_str(&flash_banner(flash));
    body.push_str("<section>");
    body.push_str(&format!(
        r#"<p><a href="/">&larr; Back</a> &nbsp;&middot;&nbsp; <a href="/cv.pdf">Download PDF</a></p>
<h1>{}</h1><p class="tagline">{}</p>"#,
        html_escape(&doc.name),
        html_escape(&doc.title),
    ));
    let contact_bits: Vec<String> = [
        &doc.contact.email,
        &doc.contact.phone,
        &doc.contact.location,
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .map(|s| html_escape(s))
    .collect();
    if !contact_bits.is_empty() {
        body.push_str(&format!("<p>{}</p>", contact_bits.join(" &middot; ")));
    }
    if !doc.about.is_empty() {
        body.push_str("<h2>About</h2>");
        body.push_str(&markdown_to_html(&doc.about));
    }
    if !doc.skills.is_empty() {
        body.push_str("<h2>Skills</h2><ul>");
        for skill in &doc.skills {
            body.push_str(&format!(
                "<li>{} — {}%</li>",
                html_escape(&skill.name),
                skill.level.min(100)
            ));
        }
        body.push_str("</ul>");
    }
    if !doc.projects.is_empty() {
        body.push_str("<h2>Projects</h2>");
        for project in &doc.projects {
            body.push_str(&format!(
                "<h3>{}</h3><p>{}</p>",
                html_escape(&project.title),
                html_escape(&project.short_description)
            ));
        }
    }
    body.push_str("</section></div>");
    layout(doc, &format!("{} — CV", doc.name), &body)
}
