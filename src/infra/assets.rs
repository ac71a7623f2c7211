//! Embedded static asset serving.

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, include_dir};
use mime_guess::Mime;

use crate::application::error::ErrorReport;

static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

const SOURCE: &str = "infra::assets::serve_static";

/// Serve a file from the embedded `static/` bundle.
pub async fn serve_static(path: Option<Path<String>>) -> Response {
    let captured = path.map(|Path(value)| value);
    match resolve_asset(&STATIC_ASSETS, captured) {
        Some(asset) => asset.into_response(),
        None => {
            let mut response = StatusCode::NOT_FOUND.into_response();
            ErrorReport::from_message(SOURCE, StatusCode::NOT_FOUND, "Static asset not found")
                .attach(&mut response);
            response
        }
    }
}

struct Asset {
    contents: &'static [u8],
    mime: Mime,
}

fn resolve_asset(bundle: &'static Dir<'static>, path: Option<String>) -> Option<Asset> {
    let candidate = path.unwrap_or_default();
    let candidate = candidate.trim_start_matches('/');

    // No directory listings and no traversal out of the bundle.
    if candidate.is_empty() || candidate.ends_with('/') || candidate.contains("..") {
        return None;
    }

    let file = bundle.get_file(candidate)?;
    Some(Asset {
        contents: file.contents(),
        mime: mime_guess::from_path(candidate).first_or_octet_stream(),
    })
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        let bytes = Bytes::from_static(self.contents);
        let len = bytes.len();
        let mut response = Response::new(Body::from(bytes));

        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(self.mime.as_ref()) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
            headers.insert(header::CONTENT_LENGTH, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_is_embedded_with_css_mime() {
        let asset = resolve_asset(&STATIC_ASSETS, Some("css/site.css".to_string()))
            .expect("stylesheet embedded");
        assert_eq!(asset.mime.essence_str(), "text/css");
        assert!(!asset.contents.is_empty());
    }

    #[test]
    fn traversal_and_directories_are_rejected() {
        for path in ["../Cargo.toml", "css/", "", "css/../css/site.css"] {
            assert!(
                resolve_asset(&STATIC_ASSETS, Some(path.to_string())).is_none(),
                "`{path}` should not resolve"
            );
        }
        assert!(resolve_asset(&STATIC_ASSETS, None).is_none());
    }
}
