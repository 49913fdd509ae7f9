use crate::models::document::Document;

/// Generate sitemap.xml for the public pages: the landing page, the CV
/// view, and one entry per project.
pub fn generate_sitemap(doc: &Document, site_url: &str) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    xml.push_str(&format!(
        "  <url><loc>{}/</loc><changefreq>weekly</changefreq><priority>1.0</priority></url>\n",
        site_url
    ));
    xml.push_str(&format!(
        "  <url><loc>{}/cv</loc><changefreq>weekly</changefreq><priority>0.5</priority></url>\n",
        site_url
    ));

    for project in &doc.projects {
        xml.push_str(&format!(
            "  <url><loc>{}/project/{}</loc><changefreq>weekly</changefreq><priority>0.8</priority></url>\n",
            site_url, project.id
        ));
    }

    xml.push_str("</urlset>");
    xml
}

/// Generate robots.txt with the sitemap location appended.
pub fn generate_robots(site_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml",
        site_url
    )
}
