use pocketdeck_core::db::{open_db, Connection};
use pocketdeck_core::{default_log_level, init_logging, EntityId, Priority, Repeat};
use std::error::Error;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "pocketdeck";
const DB_FILE_NAME: &str = "pocketdeck.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const SHORT_ID_LEN: usize = 8;

pub type CliResult = Result<(), Box<dyn Error>>;

/// Resolved data directory with logging already started.
pub struct Context {
    data_dir: PathBuf,
}

impl Context {
    pub fn new(data_dir: Option<PathBuf>, log_level: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .map(|dir| dir.join(DATA_DIR_NAME))
                .ok_or("cannot determine data directory; pass --data-dir")?,
        };
        let data_dir = if data_dir.is_absolute() {
            data_dir
        } else {
            std::env::current_dir()?.join(data_dir)
        };
        std::fs::create_dir_all(&data_dir)?;

        let log_dir = data_dir.join(LOG_DIR_NAME);
        init_logging(
            log_level.unwrap_or(default_log_level()),
            &log_dir.to_string_lossy(),
        )?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn open_db(&self) -> Result<Connection, Box<dyn Error>> {
        Ok(open_db(self.data_dir.join(DB_FILE_NAME))?)
    }
}

/// Resolves a full id or a unique prefix of one among `ids`.
pub fn resolve_id<I>(input: &str, ids: I) -> Result<EntityId, String>
where
    I: IntoIterator<Item = EntityId>,
{
    let needle = input.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err("empty id".to_string());
    }
    let mut matches = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => Err(format!("no item with id `{input}`")),
        (Some(_), Some(_)) => Err(format!("id prefix `{input}` is ambiguous")),
    }
}

/// Resolves every input id, keeping the input order.
pub fn resolve_ids<I>(inputs: &[String], ids: I) -> Result<Vec<EntityId>, String>
where
    I: IntoIterator<Item = EntityId>,
{
    let known: Vec<EntityId> = ids.into_iter().collect();
    inputs
        .iter()
        .map(|input| resolve_id(input, known.iter().copied()))
        .collect()
}

pub fn short_id(id: EntityId) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

pub fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value).ok_or_else(|| format!("unknown priority `{value}` (low|medium|high)"))
}

pub fn parse_repeat(value: &str) -> Result<Repeat, String> {
    Repeat::parse(value)
        .ok_or_else(|| format!("unknown repeat `{value}` (once|daily|weekdays|weekends)"))
}
