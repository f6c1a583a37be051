use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::models::LinkMetadata;
use crate::resolver::{self, is_private_ip, FetchMode};
use crate::state::AppState;

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub url: String,
    /// Route direct fetches through the configured relay. Defaults on.
    #[serde(default = "default_relay")]
    pub relay: bool,
    /// Delegate fetching and extraction to the remote metadata service.
    #[serde(default)]
    pub delegated: bool,
}

fn default_relay() -> bool {
    true
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /resolve?url=<encoded-url>&relay=<bool>&delegated=<bool>
///
/// Resolves the target page's metadata and returns the normalized record.
/// Rejects non-http(s) schemes and targets resolving to private/loopback
/// IPs (SSRF protection) before any fetch is issued.
pub async fn resolve_metadata(
    State(state): State<AppState>,
    Query(params): Query<ResolveQuery>,
) -> AppResult<Json<LinkMetadata>> {
    // ── Validate URL ──────────────────────────────────────────────────────
    let parsed =
        Url::parse(&params.url).map_err(|_| AppError::InvalidUrl("Invalid URL".into()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(AppError::Validation(
                "Only http/https URLs are supported".into(),
            ))
        }
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::InvalidUrl("URL has no host".into()))?
        .to_string();

    // ── SSRF: resolve hostname and check all IPs ──────────────────────────
    let lookup_target = format!("{}:80", host);
    let addrs = tokio::net::lookup_host(&lookup_target)
        .await
        .map_err(|_| AppError::Validation("Could not resolve URL host".into()))?;

    for addr in addrs {
        if is_private_ip(addr.ip()) {
            return Err(AppError::Validation(
                "URL resolves to a private or reserved address".into(),
            ));
        }
    }

    // ── Resolve ───────────────────────────────────────────────────────────
    let mode = if params.delegated {
        FetchMode::Delegated
    } else {
        FetchMode::Direct {
            via_relay: params.relay,
        }
    };

    let metadata = resolver::resolve(&state, &params.url, mode).await.map_err(|e| {
        tracing::warn!(url = %params.url, error = %e, "Metadata resolution failed");
        e
    })?;

    Ok(Json(metadata))
}
