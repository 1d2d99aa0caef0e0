//! `Network` implementations for a local app bundle and for offline mode.

use super::{Network, NetworkError, Request, Response};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

const INDEX_DOCUMENT: &str = "index.html";

/// Serves request paths from a directory, like a static origin server.
///
/// `/` maps to `index.html`; query strings and fragments are ignored; paths
/// escaping the root answer `404`.
#[derive(Debug, Clone)]
pub struct DirectoryOrigin {
    root: PathBuf,
}

impl DirectoryOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let relative = path.trim_start_matches('/');
        let relative = if relative.is_empty() || relative.ends_with('/') {
            format!("{relative}{INDEX_DOCUMENT}")
        } else {
            relative.to_string()
        };

        let relative = Path::new(&relative);
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl Network for DirectoryOrigin {
    fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        let Some(path) = self.resolve(&request.url) else {
            return Ok(Response::not_found());
        };
        match std::fs::read(&path) {
            Ok(body) => Ok(Response::ok(content_type_for(&path), body)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Response::not_found()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Network that is always down.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNetwork;

impl Network for OfflineNetwork {
    fn fetch(&self, _request: &Request) -> Result<Response, NetworkError> {
        Err(NetworkError::Unreachable)
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "webmanifest" => "application/manifest+json",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        _ => return None,
    };
    Some(content_type)
}
