pub mod migration;

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::binders::BinderCollection;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Corrupt collection file: {0}")]
    Corrupt(String),
}

/// Durable home of one binder collection, backed by a single JSON file.
///
/// All access goes through one lock: a transaction sees the whole collection,
/// mutates a working copy, writes it out and only then publishes it. Nothing
/// interleaves with it and a failed closure or write leaves no trace.
pub struct BinderStore {
    path: PathBuf,
    collection: Mutex<BinderCollection>,
}

impl BinderStore {
    /// Load (or create) the collection at `path`, migrating and repairing it.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let (collection, changed) = load(&path).await?;
        if changed {
            persist(&path, &collection).await?;
        }
        tracing::info!(
            path = %path.display(),
            binders = collection.len(),
            active = %collection.active_id(),
            "Binder store opened"
        );
        Ok(Self {
            path,
            collection: Mutex::new(collection),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read<T>(&self, f: impl FnOnce(&BinderCollection) -> T) -> T {
        let guard = self.collection.lock().await;
        f(&*guard)
    }

    /// Run a load-mutate-save unit. The closure's error aborts the unit with no
    /// write; an unchanged collection is not rewritten.
    pub async fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut BinderCollection) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.collection.lock().await;
        let mut working = (*guard).clone();
        let value = f(&mut working)?;

        if working != *guard {
            persist(&self.path, &working).await?;
            *guard = working;
        }
        Ok(value)
    }
}

async fn load(path: &Path) -> Result<(BinderCollection, bool), StoreError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No collection file, creating default");
            return Ok((BinderCollection::default(), true));
        }
        Err(e) => return Err(e.into()),
    };

    let doc: serde_json::Value = serde_json::from_str(&raw)?;
    migration::upgrade(doc)
}

/// Write to a sibling temp file and rename over the target so readers never
/// observe a half-written collection.
async fn persist(path: &Path, collection: &BinderCollection) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let content = serde_json::to_string_pretty(collection)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;
    tracing::debug!(path = %path.display(), "Collection saved");
    Ok(())
}
