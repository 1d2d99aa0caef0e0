//! Install / activate / fetch hooks of the offline cache.

use super::{CacheError, CacheResult, CacheStorage, Network, Request, Response};
use crate::config::CacheConfig;
use log::{debug, error, info, warn};
use std::time::Instant;

pub struct CacheController<S, N> {
    config: CacheConfig,
    storage: S,
    network: N,
}

impl<S: CacheStorage, N: Network> CacheController<S, N> {
    pub fn new(config: CacheConfig, storage: S, network: N) -> Self {
        Self {
            config,
            storage,
            network,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Fetches the whole asset manifest into the current bucket.
    ///
    /// All-or-nothing: the first failed fetch or non-2xx response aborts
    /// before anything is written. Returns the number of stored entries.
    pub fn install(&self) -> CacheResult<usize> {
        let started_at = Instant::now();
        let cache_name = self.config.cache_name.as_str();
        info!("event=cache_install module=cache status=start cache={cache_name}");

        let mut entries = Vec::with_capacity(self.config.assets.len());
        for url in &self.config.assets {
            let response = match self.network.fetch(&Request::get(url.as_str())) {
                Ok(response) if response.is_ok() => response,
                Ok(response) => {
                    return Err(self.install_failed(url, format!("status {}", response.status)));
                }
                Err(err) => return Err(self.install_failed(url, err.to_string())),
            };
            entries.push((url.clone(), response));
        }

        self.storage.open(cache_name)?;
        self.storage.put_all(cache_name, &entries)?;
        info!(
            "event=cache_install module=cache status=ok cache={cache_name} entries={} duration_ms={}",
            entries.len(),
            started_at.elapsed().as_millis()
        );
        Ok(entries.len())
    }

    /// Deletes every bucket not named after the current version. Returns the
    /// deleted names.
    pub fn activate(&self) -> CacheResult<Vec<String>> {
        let cache_name = self.config.cache_name.as_str();
        let mut deleted = Vec::new();
        for name in self.storage.keys()? {
            if name != cache_name && self.storage.delete(&name)? {
                deleted.push(name);
            }
        }
        info!(
            "event=cache_activate module=cache status=ok cache={cache_name} evicted={}",
            deleted.len()
        );
        Ok(deleted)
    }

    /// Answers an intercepted request. `None` means no response at all.
    pub fn handle_fetch(&self, request: &Request) -> Option<Response> {
        if request.is_navigation() {
            self.handle_navigation(request)
        } else {
            self.handle_asset(request)
        }
    }

    /// Cached shell, else network, else cached shell again.
    fn handle_navigation(&self, request: &Request) -> Option<Response> {
        let shell = self.config.shell.as_str();
        if let Some(cached) = self.lookup(shell) {
            debug!("event=cache_fetch module=cache status=ok mode=navigate source=cache");
            return Some(cached);
        }

        match self.network.fetch(request) {
            Ok(response) => {
                debug!("event=cache_fetch module=cache status=ok mode=navigate source=network");
                Some(response)
            }
            Err(err) => {
                debug!(
                    "event=cache_fetch module=cache status=fallback mode=navigate error={err}"
                );
                self.lookup(shell)
            }
        }
    }

    /// Cache-first; a network hit is copied into the current bucket.
    fn handle_asset(&self, request: &Request) -> Option<Response> {
        let url = request.url.as_str();
        if let Some(cached) = self.lookup(url) {
            debug!("event=cache_fetch module=cache status=ok mode=other source=cache");
            return Some(cached);
        }

        match self.network.fetch(request) {
            Ok(response) => {
                if let Err(err) = self.storage.put(&self.config.cache_name, url, &response) {
                    debug!("event=cache_put module=cache status=error error={err}");
                }
                debug!(
                    "event=cache_fetch module=cache status=ok mode=other source=network http_status={}",
                    response.status
                );
                Some(response)
            }
            Err(err) => {
                debug!("event=cache_fetch module=cache status=fallback mode=other error={err}");
                self.lookup(url)
            }
        }
    }

    /// Storage read errors count as a miss.
    fn lookup(&self, url: &str) -> Option<Response> {
        match self.storage.match_any(url) {
            Ok(found) => found,
            Err(err) => {
                warn!("event=cache_match module=cache status=error error={err}");
                None
            }
        }
    }

    fn install_failed(&self, url: &str, reason: String) -> CacheError {
        error!(
            "event=cache_install module=cache status=error cache={} error_code=asset_fetch_failed",
            self.config.cache_name
        );
        CacheError::Install {
            url: url.to_string(),
            reason,
        }
    }
}
