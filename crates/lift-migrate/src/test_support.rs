//! In-memory [`ContentStore`] for driver tests.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use lift_cms::{
    Asset, CmsError, Collection, ContentStore, ContentTypeLink, ContentTypeSys, Entry, EntryQuery,
    Fields, NewAsset, Sys,
};
use lift_config::ThrottleConfig;
use serde_json::{Value, json};

use crate::checkpoint::CheckpointStore;
use crate::session::Session;

/// Which store operation a scripted fault applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Lookup,
    CreateAsset,
    ProcessAsset,
    PublishAsset,
    CreateEntry,
    Publish,
    Get,
    Update,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    RateLimited,
    VersionConflict,
    Server,
}

impl Fault {
    fn into_error(self) -> CmsError {
        match self {
            Self::RateLimited => CmsError::RateLimited {
                retry_after_secs: 1,
            },
            Self::VersionConflict => CmsError::VersionConflict {
                message: "VersionMismatch".into(),
            },
            Self::Server => CmsError::Api {
                status: 500,
                message: "scripted failure".into(),
            },
        }
    }
}

/// Per-operation call counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub lookups: usize,
    pub asset_creates: usize,
    pub asset_processes: usize,
    pub asset_publishes: usize,
    pub entry_creates: usize,
    pub publishes: usize,
    pub gets: usize,
    pub updates: usize,
    pub lists: usize,
    pub unpublishes: usize,
    pub deletes: usize,
}

#[derive(Default)]
struct State {
    next_id: u64,
    assets: BTreeMap<String, Asset>,
    uploads: Vec<NewAsset>,
    entries: BTreeMap<String, Entry>,
    faults: HashMap<Op, VecDeque<Fault>>,
    failing_titles: Vec<String>,
    calls: Calls,
}

impl State {
    fn take_fault(&mut self, op: Op) -> Result<(), CmsError> {
        match self.faults.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(fault) => Err(fault.into_error()),
            None => Ok(()),
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Seed a published remote asset with the given stored file name.
    pub fn seed_asset(&self, file_name: &str, id: &str) {
        let asset = Asset {
            sys: sys(id, 2, Some(1), None),
            fields: fields(json!({ "file": { "en-US": { "fileName": file_name, "url": format!("//images/{file_name}") } } })),
        };
        self.state().assets.insert(id.to_string(), asset);
    }

    /// Seed an entry of `content_type`; returns its id.
    pub fn seed_entry(&self, content_type: &str, entry_fields: Value, published: bool) -> String {
        let mut state = self.state();
        let id = state.next_id("seed");
        let entry = Entry {
            sys: sys(&id, 2, published.then_some(1), Some(content_type)),
            fields: fields(entry_fields),
        };
        state.entries.insert(id.clone(), entry);
        id
    }

    /// Queue faults returned, in order, by the next calls to `op`.
    pub fn script(&self, op: Op, faults: impl IntoIterator<Item = Fault>) {
        self.state().faults.entry(op).or_default().extend(faults);
    }

    /// Fail every entry creation whose title contains `needle`.
    pub fn fail_titles_containing(&self, needle: &str) {
        self.state().failing_titles.push(needle.to_string());
    }

    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.failing_titles.clear();
        state.faults.clear();
    }

    pub fn calls(&self) -> Calls {
        self.state().calls
    }

    pub fn uploads(&self) -> Vec<NewAsset> {
        self.state().uploads.clone()
    }

    pub fn entry(&self, id: &str) -> Option<Entry> {
        self.state().entries.get(id).cloned()
    }

    pub fn entries_of_type(&self, content_type: &str) -> Vec<Entry> {
        self.state()
            .entries
            .values()
            .filter(|e| e.content_type() == Some(content_type))
            .cloned()
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.state().entries.len()
    }
}

fn sys(id: &str, version: u64, published: Option<u64>, content_type: Option<&str>) -> Sys {
    Sys {
        id: id.to_string(),
        version,
        published_version: published,
        content_type: content_type.map(|ct| ContentTypeLink {
            sys: ContentTypeSys { id: ct.to_string() },
        }),
    }
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

fn not_found(id: &str) -> CmsError {
    CmsError::Api {
        status: 404,
        message: format!("{id} not found"),
    }
}

fn conflict() -> CmsError {
    Fault::VersionConflict.into_error()
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn lookup_assets_by_filename(&self, file_name: &str) -> Result<Vec<Asset>, CmsError> {
        let mut state = self.state();
        state.calls.lookups += 1;
        state.take_fault(Op::Lookup)?;
        Ok(state
            .assets
            .values()
            .filter(|a| {
                a.fields
                    .get("file")
                    .and_then(|f| f.as_object())
                    .is_some_and(|locales| {
                        locales
                            .values()
                            .any(|file| file.get("fileName").and_then(Value::as_str) == Some(file_name))
                    })
            })
            .take(1)
            .cloned()
            .collect())
    }

    async fn create_asset(&self, asset: &NewAsset) -> Result<Asset, CmsError> {
        let mut state = self.state();
        state.calls.asset_creates += 1;
        state.take_fault(Op::CreateAsset)?;
        let id = state.next_id("asset");
        let created = Asset {
            sys: sys(&id, 1, None, None),
            fields: fields(json!({
                "title": { "en-US": asset.title },
                "file": { "en-US": {
                    "fileName": asset.file_name,
                    "contentType": asset.content_type,
                    "upload": asset.upload_url
                } }
            })),
        };
        state.uploads.push(asset.clone());
        state.assets.insert(id, created.clone());
        Ok(created)
    }

    async fn process_asset(&self, asset: &Asset) -> Result<(), CmsError> {
        let mut state = self.state();
        state.calls.asset_processes += 1;
        state.take_fault(Op::ProcessAsset)?;
        let stored = state
            .assets
            .get_mut(asset.id())
            .ok_or_else(|| not_found(asset.id()))?;
        if stored.sys.version != asset.sys.version {
            return Err(conflict());
        }
        stored.sys.version += 1;
        Ok(())
    }

    async fn await_processed_asset(&self, id: &str) -> Result<Asset, CmsError> {
        self.state().assets.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn publish_asset(&self, asset: &Asset) -> Result<Asset, CmsError> {
        let mut state = self.state();
        state.calls.asset_publishes += 1;
        state.take_fault(Op::PublishAsset)?;
        let stored = state
            .assets
            .get_mut(asset.id())
            .ok_or_else(|| not_found(asset.id()))?;
        if stored.sys.version != asset.sys.version {
            return Err(conflict());
        }
        stored.sys.published_version = Some(stored.sys.version);
        stored.sys.version += 1;
        Ok(stored.clone())
    }

    async fn create_entry(&self, content_type: &str, entry_fields: Fields) -> Result<Entry, CmsError> {
        let mut state = self.state();
        state.calls.entry_creates += 1;
        state.take_fault(Op::CreateEntry)?;

        let title = entry_fields
            .get("title")
            .and_then(Value::as_object)
            .and_then(|locales| locales.values().find_map(Value::as_str))
            .unwrap_or_default();
        if state.failing_titles.iter().any(|needle| title.contains(needle.as_str())) {
            return Err(Fault::Server.into_error());
        }

        let id = state.next_id(content_type);
        let entry = Entry {
            sys: sys(&id, 1, None, Some(content_type)),
            fields: entry_fields,
        };
        state.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn publish_entry(&self, entry: &Entry) -> Result<Entry, CmsError> {
        let mut state = self.state();
        state.calls.publishes += 1;
        state.take_fault(Op::Publish)?;
        let stored = state
            .entries
            .get_mut(entry.id())
            .ok_or_else(|| not_found(entry.id()))?;
        if stored.sys.version != entry.sys.version {
            return Err(conflict());
        }
        stored.sys.published_version = Some(stored.sys.version);
        stored.sys.version += 1;
        Ok(stored.clone())
    }

    async fn get_entry(&self, id: &str) -> Result<Entry, CmsError> {
        let mut state = self.state();
        state.calls.gets += 1;
        state.take_fault(Op::Get)?;
        state.entries.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn update_entry(&self, entry: &Entry) -> Result<Entry, CmsError> {
        let mut state = self.state();
        state.calls.updates += 1;
        if let Err(error) = state.take_fault(Op::Update) {
            // A conflict means someone else wrote; bump the stored version.
            if error.is_version_conflict()
                && let Some(stored) = state.entries.get_mut(entry.id())
            {
                stored.sys.version += 1;
            }
            return Err(error);
        }
        let stored = state
            .entries
            .get_mut(entry.id())
            .ok_or_else(|| not_found(entry.id()))?;
        if stored.sys.version != entry.sys.version {
            return Err(conflict());
        }
        stored.fields = entry.fields.clone();
        stored.sys.version += 1;
        Ok(stored.clone())
    }

    async fn list_entries(&self, query: &EntryQuery) -> Result<Collection<Entry>, CmsError> {
        let mut state = self.state();
        state.calls.lists += 1;
        state.take_fault(Op::List)?;
        let matching: Vec<Entry> = state
            .entries
            .values()
            .filter(|e| {
                query
                    .content_type
                    .as_deref()
                    .is_none_or(|ct| e.content_type() == Some(ct))
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect();
        Ok(Collection { items, total })
    }

    async fn unpublish_entry(&self, entry: &Entry) -> Result<Entry, CmsError> {
        let mut state = self.state();
        state.calls.unpublishes += 1;
        let stored = state
            .entries
            .get_mut(entry.id())
            .ok_or_else(|| not_found(entry.id()))?;
        stored.sys.published_version = None;
        stored.sys.version += 1;
        Ok(stored.clone())
    }

    async fn delete_entry(&self, entry: &Entry) -> Result<(), CmsError> {
        let mut state = self.state();
        state.calls.deletes += 1;
        match state.entries.get(entry.id()) {
            Some(stored) if stored.is_published() => Err(CmsError::Api {
                status: 400,
                message: "cannot delete a published entry".into(),
            }),
            Some(_) => {
                state.entries.remove(entry.id());
                Ok(())
            }
            None => Err(not_found(entry.id())),
        }
    }
}

/// Session over `store` with no throughput delays.
pub fn session(store: &Arc<MemoryStore>, checkpoint_dir: &std::path::Path) -> Session {
    let store: Arc<dyn ContentStore> = store.clone();
    Session::new(store, "en-US", CheckpointStore::new(checkpoint_dir))
        .with_throttle(ThrottleConfig::none())
}
