use axum::response::Html;
use axum::Json;
use serde::Deserialize;

use crate::models::{LinkMetadata, MetadataOverrides, PreviewVariant};
use crate::preview;

#[derive(Deserialize)]
pub struct RenderRequest {
    pub metadata: LinkMetadata,
    #[serde(default)]
    pub overrides: MetadataOverrides,
    pub variant: PreviewVariant,
}

#[derive(Deserialize)]
pub struct MetaTagsRequest {
    pub metadata: LinkMetadata,
    #[serde(default)]
    pub overrides: MetadataOverrides,
}

/// POST /render
///
/// Renders the chosen platform mockup for the supplied metadata record,
/// with display overrides merged in. Pure — never refetches the page.
pub async fn render_preview(Json(req): Json<RenderRequest>) -> Html<String> {
    let display = req.metadata.with_overrides(&req.overrides);
    Html(preview::render(req.variant, &display))
}

/// POST /meta-tags
///
/// Returns the `<meta>` tag block for the supplied record as plain text,
/// ready to paste into a page's `<head>`.
pub async fn generate_meta_tags(Json(req): Json<MetaTagsRequest>) -> String {
    let display = req.metadata.with_overrides(&req.overrides);
    preview::meta_tags(&display)
}
