use pocketdeck_core::db::open_db_in_memory;
use pocketdeck_core::{
    CacheConfig, CacheController, CacheError, CacheStorage, DirectoryOrigin, Network,
    NetworkError, OfflineNetwork, Request, Response, SqliteCacheStorage,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Static origin that records every request it sees.
#[derive(Default)]
struct MockNetwork {
    responses: HashMap<String, Response>,
    offline: Cell<bool>,
    requests: RefCell<Vec<String>>,
}

impl MockNetwork {
    fn serving(urls: &[&str]) -> Self {
        let responses = urls
            .iter()
            .map(|url| {
                (
                    url.to_string(),
                    Response::ok(Some("text/plain"), format!("live {url}")),
                )
            })
            .collect();
        Self {
            responses,
            ..Self::default()
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Network for &MockNetwork {
    fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        self.requests.borrow_mut().push(request.url.clone());
        if self.offline.get() {
            return Err(NetworkError::Unreachable);
        }
        Ok(self
            .responses
            .get(&request.url)
            .cloned()
            .unwrap_or_else(Response::not_found))
    }
}

fn small_config(cache_name: &str) -> CacheConfig {
    CacheConfig {
        cache_name: cache_name.to_string(),
        assets: vec!["/index.html".to_string(), "/style.css".to_string()],
        shell: "/index.html".to_string(),
    }
}

#[test]
fn install_stores_every_manifest_entry() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteCacheStorage::new(&conn);
    let network = MockNetwork::serving(&["/index.html", "/style.css"]);
    let controller = CacheController::new(small_config("app-v1"), storage, &network);

    assert_eq!(controller.install().unwrap(), 2);
    assert_eq!(storage.keys().unwrap(), ["app-v1"]);
    assert_eq!(
        storage.entries("app-v1").unwrap(),
        ["/index.html", "/style.css"]
    );
}

#[test]
fn install_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteCacheStorage::new(&conn);
    let network = MockNetwork::serving(&["/index.html"]);
    let controller = CacheController::new(small_config("app-v1"), storage, &network);

    let err = controller.install().unwrap_err();
    assert!(matches!(err, CacheError::Install { ref url, .. } if url == "/style.css"));
    assert!(storage.keys().unwrap().is_empty());
    assert!(storage.match_any("/index.html").unwrap().is_none());
}

#[test]
fn activation_evicts_every_other_version() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteCacheStorage::new(&conn);
    let network = MockNetwork::serving(&["/index.html", "/style.css"]);

    CacheController::new(small_config("app-v1"), storage, &network)
        .install()
        .unwrap();
    storage.open("scratch").unwrap();

    let v2 = CacheController::new(small_config("app-v2"), storage, &network);
    v2.install().unwrap();
    let deleted = v2.activate().unwrap();

    assert_eq!(deleted, ["app-v1", "scratch"]);
    assert_eq!(storage.keys().unwrap(), ["app-v2"]);
    assert!(storage.entries("app-v1").unwrap().is_empty());
}

#[test]
fn cached_assets_never_touch_the_network() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteCacheStorage::new(&conn);
    storage
        .put("app-v1", "/style.css", &Response::ok(Some("text/css"), "body{}"))
        .unwrap();
    let network = MockNetwork::serving(&["/style.css"]);
    let controller = CacheController::new(small_config("app-v1"), storage, &network);

    let response = controller.handle_fetch(&Request::get("/style.css")).unwrap();
    assert_eq!(response.body, b"body{}");
    assert!(network.requests().is_empty());
}

#[test]
fn network_responses_are_copied_into_the_current_bucket() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteCacheStorage::new(&conn);
    let network = MockNetwork::serving(&["/api/quote.json"]);
    let controller = CacheController::new(small_config("app-v1"), storage, &network);

    let live = controller
        .handle_fetch(&Request::get("/api/quote.json"))
        .unwrap();
    assert_eq!(live.body, b"live /api/quote.json");
    assert_eq!(storage.entries("app-v1").unwrap(), ["/api/quote.json"]);

    network.offline.set(true);
    let again = controller
        .handle_fetch(&Request::get("/api/quote.json"))
        .unwrap();
    assert_eq!(again, live);
    assert_eq!(network.requests(), ["/api/quote.json"]);
}

#[test]
fn offline_miss_yields_no_response() {
    let conn = open_db_in_memory().unwrap();
    let controller = CacheController::new(
        small_config("app-v1"),
        SqliteCacheStorage::new(&conn),
        OfflineNetwork,
    );
    assert!(controller
        .handle_fetch(&Request::get("/icons/icon-192.png"))
        .is_none());
}

#[test]
fn navigation_serves_cached_shell_while_offline() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteCacheStorage::new(&conn);
    let network = MockNetwork::serving(&["/index.html", "/style.css"]);
    let controller = CacheController::new(small_config("app-v1"), storage, &network);
    controller.install().unwrap();

    network.offline.set(true);
    let response = controller
        .handle_fetch(&Request::navigate("/notes?tab=alarms"))
        .unwrap();
    assert_eq!(response.body, b"live /index.html");
    assert_eq!(network.requests().len(), 2);
}

#[test]
fn navigation_without_cached_shell_goes_to_network() {
    let conn = open_db_in_memory().unwrap();
    let network = MockNetwork::serving(&["/about"]);
    let controller =
        CacheController::new(small_config("app-v1"), SqliteCacheStorage::new(&conn), &network);

    let response = controller.handle_fetch(&Request::navigate("/about")).unwrap();
    assert_eq!(response.body, b"live /about");

    network.offline.set(true);
    assert!(controller.handle_fetch(&Request::navigate("/about")).is_none());
}

#[test]
fn installs_default_manifest_from_an_app_bundle_directory() {
    let bundle = tempfile::tempdir().unwrap();
    for asset in [
        "index.html",
        "style.css",
        "script.js",
        "manifest.json",
        "assets/alarm.mp3",
        "icons/icon-192.png",
        "icons/icon-512.png",
    ] {
        let path = bundle.path().join(asset);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, asset).unwrap();
    }

    let conn = open_db_in_memory().unwrap();
    let storage = SqliteCacheStorage::new(&conn);
    let controller = CacheController::new(
        CacheConfig::default(),
        storage,
        DirectoryOrigin::new(bundle.path()),
    );
    assert_eq!(controller.install().unwrap(), 8);

    let root = storage.match_any("/").unwrap().unwrap();
    assert_eq!(root.body, b"index.html");
    let sound = storage.match_any("/assets/alarm.mp3").unwrap().unwrap();
    assert_eq!(sound.content_type.as_deref(), Some("audio/mpeg"));
}
