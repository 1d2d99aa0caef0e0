//! Offline cache commands: install, activate and fetch against a local
//! app bundle.

use crate::common::{CliResult, Context};
use clap::{Args, Subcommand};
use pocketdeck_core::config::CACHE_NAME;
use pocketdeck_core::{
    CacheConfig, CacheController, CacheStorage, DirectoryOrigin, Network, OfflineNetwork,
    Request, SqliteCacheStorage,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Args)]
pub struct CacheArgs {
    /// Bucket name of the current version
    #[arg(long, global = true, default_value = CACHE_NAME)]
    cache_name: String,
    #[command(subcommand)]
    action: CacheAction,
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Pre-cache the core assets from an app bundle directory
    Install {
        #[arg(long)]
        origin: PathBuf,
    },
    /// Delete buckets of other versions
    Activate,
    /// Answer a request like the offline cache would
    Fetch {
        url: String,
        /// Treat as a page navigation
        #[arg(long)]
        navigate: bool,
        /// App bundle directory; the network is offline when absent
        #[arg(long)]
        origin: Option<PathBuf>,
        /// Write the body to stdout instead of a summary
        #[arg(long)]
        body: bool,
    },
    /// List buckets and their entries
    List,
}

pub fn run(ctx: &Context, args: CacheArgs) -> CliResult {
    let conn = ctx.open_db()?;
    let storage = SqliteCacheStorage::new(&conn);
    let config = CacheConfig::with_cache_name(args.cache_name);

    match args.action {
        CacheAction::Install { origin } => {
            let controller = CacheController::new(config, storage, DirectoryOrigin::new(origin));
            let stored = controller.install()?;
            println!("Installed {stored} assets into {}", controller.config().cache_name);
        }
        CacheAction::Activate => {
            let controller = CacheController::new(config, storage, OfflineNetwork);
            let evicted = controller.activate()?;
            if evicted.is_empty() {
                println!("Nothing to evict");
            }
            for name in evicted {
                println!("Deleted {name}");
            }
        }
        CacheAction::Fetch {
            url,
            navigate,
            origin,
            body,
        } => {
            let request = if navigate {
                Request::navigate(url)
            } else {
                Request::get(url)
            };
            match origin {
                Some(root) => fetch(config, storage, DirectoryOrigin::new(root), &request, body)?,
                None => fetch(config, storage, OfflineNetwork, &request, body)?,
            }
        }
        CacheAction::List => {
            for bucket in storage.keys()? {
                let marker = if bucket == config.cache_name { "*" } else { " " };
                println!("{marker} {bucket}");
                for url in storage.entries(&bucket)? {
                    println!("    {url}");
                }
            }
        }
    }
    Ok(())
}

fn fetch<N: Network>(
    config: CacheConfig,
    storage: SqliteCacheStorage<'_>,
    network: N,
    request: &Request,
    write_body: bool,
) -> CliResult {
    let controller = CacheController::new(config, storage, network);
    let Some(response) = controller.handle_fetch(request) else {
        return Err(format!("no response for {}", request.url).into());
    };
    if write_body {
        std::io::stdout().write_all(&response.body)?;
    } else {
        println!(
            "{} {} ({} bytes)",
            response.status,
            response.content_type.as_deref().unwrap_or("-"),
            response.body.len()
        );
    }
    Ok(())
}
