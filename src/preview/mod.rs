//! Pure rendering of platform-specific preview mockups and `<meta>` tag
//! markup. Everything here is a function of the supplied record; nothing
//! fetches. Output is structural HTML only — styling is up to the consumer.

use crate::models::{LinkMetadata, PreviewVariant};

/// Render the chosen platform mockup for `meta`.
pub fn render(variant: PreviewVariant, meta: &LinkMetadata) -> String {
    match variant {
        PreviewVariant::Card => render_card(meta),
        PreviewVariant::Twitter => render_twitter(meta),
        PreviewVariant::WhatsApp => render_whatsapp(meta),
        PreviewVariant::Google => render_google(meta),
    }
}

fn render_card(meta: &LinkMetadata) -> String {
    format!(
        r#"<div class="preview preview-card">
  {image}
  <div class="preview-body">
    <span class="preview-domain">{domain}</span>
    <h3 class="preview-title">{title}</h3>
    <p class="preview-description">{description}</p>
  </div>
</div>"#,
        image = image_or_placeholder(meta),
        domain = escape(&meta.domain),
        title = escape(&meta.title),
        description = escape(&meta.description),
    )
}

fn render_twitter(meta: &LinkMetadata) -> String {
    format!(
        r#"<div class="preview preview-twitter">
  {image}
  <div class="preview-body">
    <span class="preview-domain">{domain}</span>
    <h3 class="preview-title">{title}</h3>
    <p class="preview-description">{description}</p>
  </div>
</div>"#,
        image = image_or_placeholder(meta),
        domain = escape(&meta.domain),
        title = escape(&meta.title),
        description = escape(&meta.description),
    )
}

/// WhatsApp wraps the preview in a message bubble and shows the raw URL
/// below it; the image row and description are omitted entirely when empty.
fn render_whatsapp(meta: &LinkMetadata) -> String {
    let mut out = String::from("<div class=\"preview preview-whatsapp\">\n");
    out.push_str("  <div class=\"preview-bubble\">\n");
    if !meta.image.is_empty() {
        out.push_str(&format!(
            "    <img class=\"preview-image\" src=\"{}\" alt=\"{}\">\n",
            escape(&meta.image),
            escape(&meta.title),
        ));
    }
    out.push_str(&format!(
        "    <span class=\"preview-domain\">{}</span>\n",
        escape(&meta.domain)
    ));
    out.push_str(&format!(
        "    <h3 class=\"preview-title\">{}</h3>\n",
        escape(&meta.title)
    ));
    if !meta.description.is_empty() {
        out.push_str(&format!(
            "    <p class=\"preview-description\">{}</p>\n",
            escape(&meta.description)
        ));
    }
    out.push_str("  </div>\n");
    out.push_str(&format!(
        "  <a class=\"preview-url\" href=\"{url}\">{url}</a>\n",
        url = escape(&meta.url)
    ));
    out.push_str("</div>");
    out
}

fn render_google(meta: &LinkMetadata) -> String {
    format!(
        r#"<div class="preview preview-google">
  <div class="preview-source">
    <img class="preview-favicon" src="{favicon}" alt="">
    <span class="preview-domain">{domain}</span>
    <span class="preview-url">{url}</span>
  </div>
  <h3 class="preview-title">{title}</h3>
  <p class="preview-description">{description}</p>
</div>"#,
        favicon = escape(&meta.favicon),
        domain = escape(&meta.domain),
        url = escape(&meta.url),
        title = escape(&meta.title),
        description = escape(&meta.description),
    )
}

fn image_or_placeholder(meta: &LinkMetadata) -> String {
    if meta.image.is_empty() {
        "<div class=\"preview-image preview-image-placeholder\"></div>".to_string()
    } else {
        format!(
            "<img class=\"preview-image\" src=\"{}\" alt=\"{}\">",
            escape(&meta.image),
            escape(&meta.title),
        )
    }
}

/// Generate the `<meta>` tag block for `meta`: primary tags, Open Graph,
/// and Twitter card groups.
pub fn meta_tags(meta: &LinkMetadata) -> String {
    let title = escape(&meta.title);
    let description = escape(&meta.description);
    let image = escape(&meta.image);
    let url = escape(&meta.url);

    format!(
        r#"<!-- Primary Meta Tags -->
<title>{title}</title>
<meta name="title" content="{title}" />
<meta name="description" content="{description}" />

<!-- Open Graph / Facebook -->
<meta property="og:type" content="website" />
<meta property="og:url" content="{url}" />
<meta property="og:title" content="{title}" />
<meta property="og:description" content="{description}" />
<meta property="og:image" content="{image}" />

<!-- Twitter -->
<meta property="twitter:card" content="summary_large_image" />
<meta property="twitter:url" content="{url}" />
<meta property="twitter:title" content="{title}" />
<meta property="twitter:description" content="{description}" />
<meta property="twitter:image" content="{image}" />"#
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LinkMetadata {
        LinkMetadata {
            title: "Example Title".into(),
            description: "Example description".into(),
            image: "https://example.com/img.png".into(),
            url: "https://example.com/page".into(),
            domain: "example.com".into(),
            favicon: "https://example.com/favicon.ico".into(),
        }
    }

    #[test]
    fn card_shows_domain_title_description() {
        let html = render(PreviewVariant::Card, &sample());
        assert!(html.contains("example.com"));
        assert!(html.contains("Example Title"));
        assert!(html.contains("Example description"));
        assert!(html.contains("https://example.com/img.png"));
    }

    #[test]
    fn card_without_image_renders_placeholder() {
        let mut meta = sample();
        meta.image = String::new();
        let html = render(PreviewVariant::Card, &meta);
        assert!(html.contains("preview-image-placeholder"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn whatsapp_omits_empty_description() {
        let mut meta = sample();
        meta.description = String::new();
        let html = render(PreviewVariant::WhatsApp, &meta);
        assert!(!html.contains("preview-description"));
    }

    #[test]
    fn whatsapp_shows_raw_url() {
        let html = render(PreviewVariant::WhatsApp, &sample());
        assert!(html.contains("https://example.com/page"));
    }

    #[test]
    fn google_shows_favicon_domain_and_url() {
        let html = render(PreviewVariant::Google, &sample());
        assert!(html.contains("https://example.com/favicon.ico"));
        assert!(html.contains("example.com"));
        assert!(html.contains("https://example.com/page"));
    }

    #[test]
    fn rendered_html_escapes_field_values() {
        let mut meta = sample();
        meta.title = r#"<script>alert("x")</script>"#.into();
        let html = render(PreviewVariant::Card, &meta);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn meta_tags_contain_all_three_groups() {
        let tags = meta_tags(&sample());
        assert!(tags.contains("<!-- Primary Meta Tags -->"));
        assert!(tags.contains("<!-- Open Graph / Facebook -->"));
        assert!(tags.contains("<!-- Twitter -->"));
    }

    #[test]
    fn meta_tags_carry_field_values() {
        let tags = meta_tags(&sample());
        assert!(tags.contains(r#"<meta property="og:title" content="Example Title" />"#));
        assert!(tags.contains(r#"<meta property="og:image" content="https://example.com/img.png" />"#));
        assert!(tags.contains(r#"<meta property="twitter:card" content="summary_large_image" />"#));
    }

    #[test]
    fn meta_tags_escape_quotes_in_content() {
        let mut meta = sample();
        meta.title = r#"He said "hi""#.into();
        let tags = meta_tags(&meta);
        assert!(tags.contains("He said &quot;hi&quot;"));
        assert!(!tags.contains(r#"content="He said "hi"" />"#));
    }
}
