use crate::backup::{BackupKind, BackupRecord};
use crate::models::client::{Client, ClientStats, ClientStatus, PaymentStatus};
use crate::models::document::Document;
use crate::models::message::Message;
use crate::models::project::Project;
use crate::notify::{email::SmtpConfig, telegram::TelegramConfig};
use crate::render::{flash_banner, html_escape};

const ADMIN_CSS: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:-apple-system,'Segoe UI',Helvetica,Arial,sans-serif;background:#f1f2f5;color:#1c1d21}
a{color:#2563eb;text-decoration:none}
.shell{display:flex;min-height:100vh}
nav.side{width:220px;background:#1c1d21;color:#cfd2d8;padding:24px 0;flex-shrink:0}
nav.side .brand{padding:0 20px 20px;font-weight:700;color:#fff;font-size:1.1em}
nav.side a{display:block;padding:9px 20px;color:#cfd2d8}
nav.side a.active,nav.side a:hover{background:#2c2f38;color:#fff}
nav.side .badge{background:#dc2626;color:#fff;border-radius:9px;padding:0 7px;font-size:.75em;margin-left:6px}
main{flex:1;padding:32px;max-width:980px}
h1{font-size:1.6em;margin:0 0 24px}
.card{background:#fff;border:1px solid #e2e4e8;border-radius:8px;padding:24px;margin-bottom:24px}
label{display:block;font-weight:600;margin-bottom:4px}
input[type=text],input[type=email],input[type=password],input[type=number],input[type=date],textarea,select{width:100%;padding:9px;margin-bottom:16px;border:1px solid #cfd2d8;border-radius:4px;font:inherit}
textarea{min-height:120px}
button,.btn{display:inline-block;background:#2563eb;color:#fff;border:0;border-radius:4px;padding:9px 18px;cursor:pointer;font:inherit}
.btn-danger{background:#dc2626}
.btn-quiet{background:#6b6f76}
table{width:100%;border-collapse:collapse;background:#fff}
th,td{text-align:left;padding:10px 12px;border-bottom:1px solid #e2e4e8}
tr.unread td{font-weight:600}
.stats{display:grid;grid-template-columns:repeat(auto-fit,minmax(140px,1fr));gap:16px;margin-bottom:24px}
.stat{background:#fff;border:1px solid #e2e4e8;border-radius:8px;padding:16px}
.stat .num{font-size:1.8em;font-weight:700}
.stat .label{color:#6b6f76;font-size:.85em}
.flash{padding:12px 16px;border-radius:4px;margin-bottom:16px}
.flash-success{background:#e7f6ec;color:#14703a;border:1px solid #bce5cb}
.flash-error{background:#fbebec;color:#9c2329;border:1px solid #f2c8ca}
.demo-banner{background:#fef3c7;color:#92400e;border:1px solid #fcd34d;padding:10px 16px;border-radius:4px;margin-bottom:16px}
.status{border-radius:4px;padding:2px 8px;font-size:.8em;background:#e2e4e8}
.inline-form{display:inline}
"#;

const NAV_ITEMS: &[(&str, &str)] = &[
    ("", "Dashboard"),
    ("general", "General"),
    ("about", "About"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("contact", "Contact"),
    ("social", "Social"),
    ("messages", "Messages"),
    ("clients", "Clients"),
    ("backups", "Backups"),
    ("settings", "Settings"),
    ("change-password", "Password"),
];

pub fn layout(
    title: &str,
    active: &str,
    demo: bool,
    unread: usize,
    flash: &Option<(String, String)>,
    content: &str,
) -> String {
    let mut nav = String::new();
    for (slug, label) in NAV_ITEMS {
        let href = if slug.is_empty() {
            "/dashboard".to_string()
        } else {
            format!("/dashboard/{}", slug)
        };
        let class = if *slug == active { r#" class="active""# } else { "" };
        let badge = if *slug == "messages" && unread > 0 {
            format!(r#"<span class="badge">{}</span>"#, unread)
        } else {
            String::new()
        };
        nav.push_str(&format!(
            r#"<a href="{href}"{class}>{label}{badge}</a>"#,
            href = href,
            class = class,
            label = label,
            badge = badge,
        ));
    }
    let demo_banner = if demo {
        r#"<div class="demo-banner">Demo mode — changes are disabled.</div>"#
    } else {
        ""
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — Dashboard</title>
<style>{css}</style>
</head>
<body>
<div class="shell">
<nav class="side">
    <div class="brand">vitrine</div>
    {nav}
    <a href="/dashboard/logout">Logout</a>
    <a href="/" target="_blank">View site &rarr;</a>
</nav>
<main>
<h1>{title}</h1>
{demo_banner}
{flash}
{content}
</main>
</div>
</body>
</html>"#,
        title = html_escape(title),
        css = ADMIN_CSS,
        nav = nav,
        demo_banner = demo_banner,
        flash = flash_banner(flash),
        content = content,
    )
}

pub fn login(flash: &Option<(String, String)>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Login — Dashboard</title>
<style>{css}
.login-box{{max-width:360px;margin:10vh auto}}</style>
</head>
<body>
<div class="login-box">
<div class="card">
<h1>Dashboard login</h1>
{flash}
<form method="post" action="/dashboard/login">
    <label for="username">Username</label>
    <input type="text" id="username" name="username" required autofocus>
    <label for="password">Password</label>
    <input type="password" id="password" name="password" required>
    <button type="submit">Login</button>
</form>
</div>
</div>
</body>
</html>"#,
        css = ADMIN_CSS,
        flash = flash_banner(flash),
    )
}

/// View data for the dashboard landing page.
pub struct DashboardStats {
    pub projects: usize,
    pub skills: usize,
    pub messages: usize,
    pub unread_messages: usize,
    pub visitors: u64,
    pub today_visitors: usize,
    pub clients: ClientStats,
}

pub fn dashboard(stats: &DashboardStats, warning: Option<&str>) -> String {
    let warning_html = match warning {
        Some(w) => format!(r#"<div class="flash flash-error">{}</div>"#, html_escape(w)),
        None => String::new(),
    };
    format!(
        r#"{warning}
<div class="stats">
    <div class="stat"><div class="num">{projects}</div><div class="label">Projects</div></div>
    <div class="stat"><div class="num">{skills}</div><div class="label">Skills</div></div>
    <div class="stat"><div class="num">{messages}</div><div class="label">Messages</div></div>
    <div class="stat"><div class="num">{unread}</div><div class="label">Unread</div></div>
    <div class="stat"><div class="num">{visitors}</div><div class="label">Total visits</div></div>
    <div class="stat"><div class="num">{today}</div><div class="label">Today</div></div>
</div>
<div class="card">
    <h2>Clients</h2>
    <p>{total} total &middot; {leads} leads &middot; {negotiation} in negotiation &middot; {in_progress} in progress &middot; {delivered} delivered</p>
    <p>Revenue: {revenue:.2}</p>
</div>"#,
        warning = warning_html,
        projects = stats.projects,
        skills = stats.skills,
        messages = stats.messages,
        unread = stats.unread_messages,
        visitors = stats.visitors,
        today = stats.today_visitors,
        total = stats.clients.total,
        leads = stats.clients.leads,
        negotiation = stats.clients.negotiation,
        in_progress = stats.clients.in_progress,
        delivered = stats.clients.delivered,
        revenue = stats.clients.revenue,
    )
}

// ── Profile forms ──────────────────────────────────────

pub fn general_form(doc: &Document) -> String {
    let photo = if doc.photo.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p><img src="{}" alt="profile photo" style="width:120px;border-radius:8px"></p>"#,
            html_escape(&doc.photo)
        )
    };
    format!(
        r#"<div class="card">
<form method="post" action="/dashboard/general" enctype="multipart/form-data">
    <label for="name">Name</label>
    <input type="text" id="name" name="name" value="{name}">
    <label for="title">Title</label>
    <input type="text" id="title" name="title" value="{title}">
    <label for="description">Short description</label>
    <textarea id="description" name="description">{description}</textarea>
    {photo}
    <label for="photo">Profile photo</label>
    <input type="file" id="photo" name="photo" accept="image/*">
    <button type="submit">Save</button>
</form>
</div>"#,
        name = html_escape(&doc.name),
        title = html_escape(&doc.title),
        description = html_escape(&doc.description),
        photo = photo,
    )
}

pub fn about_form(doc: &Document) -> String {
    format!(
        r#"<div class="card">
<form method="post" action="/dashboard/about">
    <label for="about">About (markdown)</label>
    <textarea id="about" name="about" style="min-height:280px">{}</textarea>
    <button type="submit">Save</button>
</form>
</div>"#,
        html_escape(&doc.about)
    )
}

pub fn skills_form(doc: &Document) -> String {
    let mut rows = String::new();
    // Existing rows plus a few blanks; empty names are dropped on save.
    for skill in &doc.skills {
        rows.push_str(&skill_row(&skill.name, skill.level));
    }
    for _ in 0..3 {
        rows.push_str(&skill_row("", 0));
    }
    format!(
        r#"<div class="card">
<form method="post" action="/dashboard/skills">
    <table>
    <tr><th>Skill</th><th>Level (0&ndash;100)</th></tr>
    {rows}
    </table>
    <p><button type="submit">Save</button></p>
</form>
</div>"#,
        rows = rows,
    )
}

fn skill_row(name: &str, level: u8) -> String {
    format!(
        r#"<tr>
    <td><input type="text" name="skill_name" value="{}"></td>
    <td><input type="number" name="skill_level" min="0" max="100" value="{}"></td>
</tr>"#,
        html_escape(name),
        level,
    )
}

pub fn contact_form(doc: &Document) -> String {
    format!(
        r#"<div class="card">
<form method="post" action="/dashboard/contact">
    <label for="email">Email</label>
    <input type="email" id="email" name="email" value="{email}">
    <label for="phone">Phone</label>
    <input type="text" id="phone" name="phone" value="{phone}">
    <label for="location">Location</label>
    <input type="text" id="location" name="location" value="{location}">
    <button type="submit">Save</button>
</form>
</div>"#,
        email = html_escape(&doc.contact.email),
        phone = html_escape(&doc.contact.phone),
        location = html_escape(&doc.contact.location),
    )
}

pub const SOCIAL_NETWORKS: &[&str] = &[
    "linkedin", "github", "twitter", "instagram", "facebook", "youtube", "behance", "dribbble",
];

pub fn social_form(doc: &Document) -> String {
    let mut fields = String::new();
    for network in SOCIAL_NETWORKS {
        let value = doc.social.get(*network).map(String::as_str).unwrap_or("");
        fields.push_str(&format!(
            r#"<label for="{network}">{network}</label>
<input type="text" id="{network}" name="{network}" value="{value}" placeholder="https://">"#,
            network = network,
            value = html_escape(value),
        ));
    }
    format!(
        r#"<div class="card">
<form method="post" action="/dashboard/social">
{fields}
<button type="submit">Save</button>
</form>
</div>"#,
        fields = fields,
    )
}

// ── Projects ───────────────────────────────────────────

pub fn projects_list(projects: &[Project]) -> String {
    let mut rows = String::new();
    for project in projects {
        rows.push_str(&format!(
            r#"<tr>
    <td>{id}</td>
    <td><a href="/project/{id}" target="_blank">{title}</a></td>
    <td>{techs}</td>
    <td>
        <a class="btn btn-quiet" href="/dashboard/projects/edit/{id}">Edit</a>
        <form class="inline-form" method="post" action="/dashboard/projects/delete/{id}"><button class="btn-danger" type="submit">Delete</button></form>
    </td>
</tr>"#,
            id = project.id,
            title = html_escape(&project.title),
            techs = html_escape(&project.technologies.join(", ")),
        ));
    }
    format!(
        r#"<p><a class="btn" href="/dashboard/projects/add">Add project</a></p>
<table>
<tr><th>Id</th><th>Title</th><th>Technologies</th><th></th></tr>
{rows}
</table>"#,
        rows = rows,
    )
}

pub fn project_form(project: Option<&Project>) -> String {
    let blank = Project::default();
    let p = project.unwrap_or(&blank);
    let action = match project {
        Some(p) => format!("/dashboard/projects/edit/{}", p.id),
        None => "/dashboard/projects/add".to_string(),
    };
    let image = if p.image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p><img src="{}" alt="project image" style="width:200px;border-radius:8px"></p>"#,
            html_escape(&p.image)
        )
    };
    format!(
        r#"<div class="card">
<form method="post" action="{action}" enctype="multipart/form-data">
    <label for="title">Title</label>
    <input type="text" id="title" name="title" value="{title}" required>
    <label for="short_description">Short description</label>
    <textarea id="short_description" name="short_description" style="min-height:70px">{short}</textarea>
    <label for="content">Content (markdown)</label>
    <textarea id="content" name="content">{content}</textarea>
    <label for="demo_url">Demo URL</label>
    <input type="text" id="demo_url" name="demo_url" value="{demo}">
    <label for="source_url">Source URL</label>
    <input type="text" id="source_url" name="source_url" value="{source}">
    <label for="technologies">Technologies (comma separated)</label>
    <input type="text" id="technologies" name="technologies" value="{techs}">
    {image}
    <label for="image">Image</label>
    <input type="file" id="image" name="image" accept="image/*">
    <button type="submit">Save</button>
</form>
</div>"#,
        action = action,
        title = html_escape(&p.title),
        short = html_escape(&p.short_description),
        content = html_escape(&p.content),
        demo = html_escape(&p.demo_url),
        source = html_escape(&p.source_url),
        techs = html_escape(&p.technologies.join(", ")),
        image = image,
    )
}

// ── Messages ───────────────────────────────────────────

pub fn messages_list(messages: &[Message]) -> String {
    if messages.is_empty() {
        return r#"<div class="card"><p>No messages yet.</p></div>"#.to_string();
    }
    let mut rows = String::new();
    for message in messages {
        let class = if message.read { "" } else { r#" class="unread""# };
        rows.push_str(&format!(
            r#"<tr{class}>
    <td><a href="/dashboard/messages/view/{id}">{name}</a></td>
    <td>{email}</td>
    <td>{date}</td>
    <td>
        <form class="inline-form" method="post" action="/dashboard/messages/convert/{id}"><button class="btn-quiet" type="submit">To client</button></form>
        <form class="inline-form" method="post" action="/dashboard/messages/delete/{id}"><button class="btn-danger" type="submit">Delete</button></form>
    </td>
</tr>"#,
            class = class,
            id = message.id,
            name = html_escape(&message.name),
            email = html_escape(&message.email),
            date = html_escape(&message.date),
        ));
    }
    format!(
        r#"<table>
<tr><th>From</th><th>Email</th><th>Date</th><th></th></tr>
{rows}
</table>"#,
        rows = rows,
    )
}

pub fn message_view(message: &Message) -> String {
    format!(
        r#"<div class="card">
    <p><strong>{name}</strong> &lt;{email}&gt;</p>
    <p style="color:#6b6f76">{date} &middot; from {ip}</p>
    <p>{body}</p>
    <p>
        <form class="inline-form" method="post" action="/dashboard/messages/convert/{id}"><button type="submit">Convert to client</button></form>
        <form class="inline-form" method="post" action="/dashboard/messages/delete/{id}"><button class="btn-danger" type="submit">Delete</button></form>
        <a class="btn btn-quiet" href="/dashboard/messages">Back</a>
    </p>
</div>"#,
        id = message.id,
        name = html_escape(&message.name),
        email = html_escape(&message.email),
        date = html_escape(&message.date),
        ip = html_escape(&message.ip),
        body = html_escape(&message.message),
    )
}

// ── Clients ────────────────────────────────────────────

pub fn clients_list(clients: &[Client], stats: &ClientStats) -> String {
    let mut rows = String::new();
    for client in clients {
        rows.push_str(&format!(
            r#"<tr>
    <td><a href="/dashboard/clients/view/{id}">{name}</a></td>
    <td>{company}</td>
    <td><span class="status">{status}</span></td>
    <td>{price}</td>
    <td>{payment}</td>
    <td>
        <a class="btn btn-quiet" href="/dashboard/clients/edit/{id}">Edit</a>
        <form class="inline-form" method="post" action="/dashboard/clients/delete/{id}"><button class="btn-danger" type="submit">Delete</button></form>
    </td>
</tr>"#,
            id = client.id,
            name = html_escape(&client.name),
            company = html_escape(&client.company),
            status = client.status.label(),
            price = html_escape(&client.price),
            payment = client.payment_status.as_str(),
        ));
    }
    format!(
        r#"<div class="stats">
    <div class="stat"><div class="num">{total}</div><div class="label">Total</div></div>
    <div class="stat"><div class="num">{leads}</div><div class="label">Leads</div></div>
    <div class="stat"><div class="num">{in_progress}</div><div class="label">In progress</div></div>
    <div class="stat"><div class="num">{delivered}</div><div class="label">Delivered</div></div>
    <div class="stat"><div class="num">{revenue:.2}</div><div class="label">Revenue</div></div>
</div>
<p><a class="btn" href="/dashboard/clients/add">Add client</a></p>
<table>
<tr><th>Name</th><th>Company</th><th>Status</th><th>Price</th><th>Payment</th><th></th></tr>
{rows}
</table>"#,
        total = stats.total,
        leads = stats.leads,
        in_progress = stats.in_progress,
        delivered = stats.delivered,
        revenue = stats.revenue,
        rows = rows,
    )
}

pub fn client_form(client: Option<&Client>) -> String {
    let blank = Client::default();
    let c = client.unwrap_or(&blank);
    let action = match client {
        Some(c) => format!("/dashboard/clients/edit/{}", c.id),
        None => "/dashboard/clients/add".to_string(),
    };
    let status_options: String = ClientStatus::ALL
        .iter()
        .map(|s| {
            let selected = if *s == c.status { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                s.as_str(),
                selected,
                s.label()
            )
        })
        .collect();
    let payment_options: String = PaymentStatus::ALL
        .iter()
        .map(|s| {
            let selected = if *s == c.payment_status { " selected" } else { "" };
            format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                s.as_str(),
                selected
            )
        })
        .collect();
    format!(
        r#"<div class="card">
<form method="post" action="{action}">
    <label for="name">Name</label>
    <input type="text" id="name" name="name" value="{name}" required>
    <label for="email">Email</label>
    <input type="email" id="email" name="email" value="{email}">
    <label for="phone">Phone</label>
    <input type="text" id="phone" name="phone" value="{phone}">
    <label for="company">Company</label>
    <input type="text" id="company" name="company" value="{company}">
    <label for="project_title">Project title</label>
    <input type="text" id="project_title" name="project_title" value="{project_title}">
    <label for="project_description">Project description</label>
    <textarea id="project_description" name="project_description">{project_description}</textarea>
    <label for="status">Status</label>
    <select id="status" name="status">{status_options}</select>
    <label for="price">Price</label>
    <input type="text" id="price" name="price" value="{price}">
    <label for="start_date">Start date</label>
    <input type="date" id="start_date" name="start_date" value="{start_date}">
    <label for="deadline">Deadline</label>
    <input type="date" id="deadline" name="deadline" value="{deadline}">
    <label for="payment_status">Payment</label>
    <select id="payment_status" name="payment_status">{payment_options}</select>
    <label for="notes">Notes</label>
    <textarea id="notes" name="notes">{notes}</textarea>
    <button type="submit">Save</button>
</form>
</div>"#,
        action = action,
        name = html_escape(&c.name),
        email = html_escape(&c.email),
        phone = html_escape(&c.phone),
        company = html_escape(&c.company),
        project_title = html_escape(&c.project_title),
        project_description = html_escape(&c.project_description),
        status_options = status_options,
        price = html_escape(&c.price),
        start_date = html_escape(&c.start_date),
        deadline = html_escape(&c.deadline),
        payment_options = payment_options,
        notes = html_escape(&c.notes),
    )
}

pub fn client_view(client: &Client) -> String {
    format!(
        r#"<div class="card">
    <p><strong>{name}</strong>{company}</p>
    <p>{email} {phone}</p>
    <p><span class="status">{status}</span> &middot; payment: {payment}</p>
    <p>Project: <strong>{project_title}</strong></p>
    <p>{project_description}</p>
    <p>Price: {price} &middot; start: {start_date} &middot; deadline: {deadline}</p>
    <p>{notes}</p>
    <p style="color:#6b6f76">Added {created_at}</p>
    <p>
        <a class="btn" href="/dashboard/clients/edit/{id}">Edit</a>
        <a class="btn btn-quiet" href="/dashboard/clients">Back</a>
    </p>
</div>"#,
        id = client.id,
        name = html_escape(&client.name),
        company = if client.company.is_empty() {
            String::new()
        } else {
            format!(" &middot; {}", html_escape(&client.company))
        },
        email = html_escape(&client.email),
        phone = html_escape(&client.phone),
        status = client.status.label(),
        payment = client.payment_status.as_str(),
        project_title = html_escape(&client.project_title),
        project_description = html_escape(&client.project_description),
        price = html_escape(&client.price),
        start_date = html_escape(&client.start_date),
        deadline = html_escape(&client.deadline),
        notes = html_escape(&client.notes),
        created_at = html_escape(&client.created_at),
    )
}

// ── Backups ────────────────────────────────────────────

pub fn backups_list(records: &[BackupRecord], retention: usize) -> String {
    let mut rows = String::new();
    for record in records {
        let kind = match record.kind {
            BackupKind::Manual => "manual",
            BackupKind::Automatic => "automatic",
        };
        rows.push_str(&format!(
            r#"<tr>
    <td>{file}</td>
    <td>{created_at}</td>
    <td>{size}</td>
    <td>{kind}</td>
    <td>
        <form class="inline-form" method="post" action="/dashboard/backups/restore/{file}"><button type="submit">Restore</button></form>
        <form class="inline-form" method="post" action="/dashboard/backups/delete/{file}"><button class="btn-danger" type="submit">Delete</button></form>
    </td>
</tr>"#,
            file = html_escape(&record.file),
            created_at = html_escape(&record.created_at),
            size = record.size,
            kind = kind,
        ));
    }
    format!(
        r#"<p>The {retention} most recent snapshots are kept; older ones are evicted automatically.</p>
<form method="post" action="/dashboard/backups/create"><button type="submit">Create backup now</button></form>
<p></p>
<table>
<tr><th>File</th><th>Created</th><th>Bytes</th><th>Type</th><th></th></tr>
{rows}
</table>"#,
        retention = retention,
        rows = rows,
    )
}

// ── Settings ───────────────────────────────────────────

pub fn settings_page(
    theme: &str,
    telegram: Option<&TelegramConfig>,
    smtp: Option<&SmtpConfig>,
) -> String {
    let theme_options: String = ["light", "dark"]
        .iter()
        .map(|t| {
            let selected = if *t == theme { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, t, selected)
        })
        .collect();
    let tg = telegram.cloned().unwrap_or_default();
    let mail = smtp.cloned().unwrap_or_default();
    format!(
        r#"<div class="card">
<h2>Site theme</h2>
<form method="post" action="/dashboard/settings/theme">
    <label for="theme">Theme</label>
    <select id="theme" name="theme">{theme_options}</select>
    <button type="submit">Save</button>
</form>
</div>
<div class="card">
<h2>Telegram notifications</h2>
<form method="post" action="/dashboard/settings/telegram">
    <label for="bot_token">Bot token</label>
    <input type="text" id="bot_token" name="bot_token" value="{bot_token}">
    <label for="chat_id">Chat id</label>
    <input type="text" id="chat_id" name="chat_id" value="{chat_id}">
    <button type="submit">Save</button>
</form>
<p style="color:#6b6f76">Leave both fields empty to disable the channel.</p>
</div>
<div class="card">
<h2>Email notifications</h2>
<form method="post" action="/dashboard/settings/smtp">
    <label for="host">SMTP host</label>
    <input type="text" id="host" name="host" value="{host}">
    <label for="port">Port</label>
    <input type="number" id="port" name="port" value="{port}">
    <label for="username">Username</label>
    <input type="text" id="username" name="username" value="{username}">
    <label for="password">Password</label>
    <input type="password" id="password" name="password" value="{password}">
    <label for="to">Send notifications to</label>
    <input type="email" id="to" name="to" value="{to}">
    <button type="submit">Save</button>
</form>
<p style="color:#6b6f76">Leave the host empty to disable the channel.</p>
</div>"#,
        theme_options = theme_options,
        bot_token = html_escape(&tg.bot_token),
        chat_id = html_escape(&tg.chat_id),
        host = html_escape(&mail.host),
        port = mail.port,
        username = html_escape(&mail.username),
        password = html_escape(&mail.password),
        to = html_escape(&mail.to),
    )
}

pub fn change_password_form() -> String {
    r#"<div class="card">
<form method="post" action="/dashboard/change-password">
    <label for="current_password">Current password</label>
    <input type="password" id="current_password" name="current_password" required>
    <label for="new_password">New password (8+ characters)</label>
    <input type="password" id="new_password" name="new_password" required>
    <label for="confirm_password">Confirm new password</label>
    <input type="password" id="confirm_password" name="confirm_password" required>
    <button type="submit">Change password</button>
</form>
</div>"#
        .to_string()
}
