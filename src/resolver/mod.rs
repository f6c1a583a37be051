use std::net::IpAddr;

use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::models::LinkMetadata;
use crate::state::AppState;

/// How the page metadata is retrieved.
///
/// `Direct` fetches the page HTML and extracts tags locally, optionally
/// routing the GET through the configured relay. `Delegated` asks the remote
/// metadata service to do the fetch and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Direct { via_relay: bool },
    Delegated,
}

// ── Public helpers ─────────────────────────────────────────────────────────

/// Returns `true` if `ip` is a private, loopback, or link-local address.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            matches!(
                o,
                [127, ..]
                    | [10, ..]
                    | [169, 254, ..]
                    | [192, 168, ..]
                    | [0, ..]
                    | [255, 255, 255, 255]
            ) || (o[0] == 172 && (16..=31).contains(&o[1]))
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00 == 0xfc00)
                || (v6.segments()[0] & 0xffc0 == 0xfe80)
        }
    }
}

/// Resolve `target_url` into a normalized [`LinkMetadata`] record.
///
/// Single-shot: one fetch, one record. Failures are terminal for this
/// invocation — no retry, no partial record.
pub async fn resolve(
    state: &AppState,
    target_url: &str,
    mode: FetchMode,
) -> AppResult<LinkMetadata> {
    let parsed = parse_target(target_url)?;

    match mode {
        FetchMode::Direct { via_relay } => {
            let fetch_url = if via_relay {
                format!("{}{}", state.relay_base, urlencoding::encode(target_url))
            } else {
                target_url.to_string()
            };

            let response = state
                .http_client
                .get(&fetch_url)
                .send()
                .await
                .map_err(AppError::from_fetch)?;

            let status = response.status();
            if !status.is_success() {
                return Err(AppError::Fetch {
                    status: Some(status.as_u16()),
                    message: format!("Upstream returned HTTP {}", status.as_u16()),
                });
            }

            let html = response.text().await.map_err(AppError::from_fetch)?;
            Ok(extract_metadata(&html, target_url, &parsed))
        }
        FetchMode::Delegated => {
            let response = state
                .http_client
                .post(state.metadata_service_url.as_ref())
                .json(&serde_json::json!({ "url": target_url }))
                .send()
                .await
                .map_err(AppError::from_fetch)?;

            let status = response.status();
            if !status.is_success() {
                return Err(AppError::Fetch {
                    status: Some(status.as_u16()),
                    message: format!("Metadata service returned HTTP {}", status.as_u16()),
                });
            }

            let remote: DelegatedMetadata =
                response.json().await.map_err(AppError::from_fetch)?;
            Ok(remote.into_metadata(target_url, &parsed))
        }
    }
}

/// Parse the target and require a host; the hostname is what `domain` is
/// derived from, so a URL without one is rejected before any network call.
fn parse_target(target_url: &str) -> AppResult<Url> {
    let parsed = Url::parse(target_url)
        .map_err(|_| AppError::InvalidUrl(format!("Not an absolute URL: {target_url}")))?;
    if parsed.host_str().is_none() {
        return Err(AppError::InvalidUrl(format!("URL has no host: {target_url}")));
    }
    Ok(parsed)
}

fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

// ── HTML extraction ────────────────────────────────────────────────────────

/// Extract metadata from `html`, applying the field fallback chains.
/// `scraper` degrades gracefully on malformed input, so this never fails.
pub fn extract_metadata(html: &str, target_url: &str, parsed: &Url) -> LinkMetadata {
    let document = Html::parse_document(html);

    let title = get_meta_property(&document, "og:title")
        .or_else(|| get_title_tag(&document))
        .unwrap_or_default();

    let description = get_meta_property(&document, "og:description")
        .or_else(|| get_meta_name(&document, "description"))
        .unwrap_or_default();

    let image = get_meta_property(&document, "og:image").unwrap_or_default();

    let origin = origin_of(parsed);
    let favicon = match get_icon_href(&document) {
        Some(href) => resolve_favicon_href(&href, &origin),
        None => format!("{origin}/favicon.ico"),
    };

    LinkMetadata {
        title,
        description,
        image,
        url: target_url.to_string(),
        domain: parsed.host_str().unwrap_or_default().to_string(),
        favicon,
    }
}

/// Make a favicon `href` absolute against the page origin.
pub fn resolve_favicon_href(href: &str, origin: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

fn get_meta_property(doc: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_meta_name(doc: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_title_tag(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First icon link, checked in specificity order: exact `icon`, then
/// `shortcut icon`, then anything whose rel contains "icon".
fn get_icon_href(doc: &Html) -> Option<String> {
    for selector_str in [
        r#"link[rel="icon"]"#,
        r#"link[rel="shortcut icon"]"#,
        r#"link[rel*="icon"]"#,
    ] {
        let selector = Selector::parse(selector_str).ok()?;
        if let Some(href) = doc
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            return Some(href);
        }
    }
    None
}

// ── Delegated service payload ──────────────────────────────────────────────

/// Shape of the metadata service's JSON response. Every field is optional;
/// missing ones take the same local fallbacks as direct extraction.
#[derive(Debug, Deserialize)]
struct DelegatedMetadata {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    favicon: Option<String>,
}

impl DelegatedMetadata {
    fn into_metadata(self, target_url: &str, parsed: &Url) -> LinkMetadata {
        let origin = origin_of(parsed);

        LinkMetadata {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            url: target_url.to_string(),
            domain: self
                .domain
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| parsed.host_str().unwrap_or_default().to_string()),
            favicon: self
                .favicon
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| format!("{origin}/favicon.ico")),
        }
    }
}

// ── Unit tests ─────────────────────────────────────────────────────────────
