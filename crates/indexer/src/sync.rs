use crate::fingerprint::fingerprint;
use crate::manifest::Manifest;
use std::collections::BTreeSet;
use std::path::Path;

/// A tracked file that needs (re-)embedding, with its content already read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub path: String,
    pub content: String,
    pub hash: String,
}

/// Classification of the tracked file set against the manifest.
///
/// `unchanged` files must not be re-embedded; that is the entire point of
/// incrementality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Manifest paths no longer in the tracked set
    pub deleted: Vec<String>,
    /// Tracked paths not yet in the manifest
    pub to_add: Vec<PendingFile>,
    /// Tracked paths whose content fingerprint changed
    pub to_modify: Vec<PendingFile>,
    /// Tracked paths whose fingerprint matches the manifest
    pub unchanged: Vec<String>,
    /// Ids recorded for every deleted or modified path, in plan order
    pub ids_to_retire: Vec<u64>,
}

impl SyncPlan {
    /// True when the build would change nothing and can skip persistence
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.deleted.is_empty() && self.to_add.is_empty() && self.to_modify.is_empty()
    }
}

/// Compare the current tracked set against the manifest.
///
/// File contents are read relative to `root`. A file that fails to read is
/// logged and left exactly as recorded in the manifest: neither added,
/// modified, nor deleted. A single file's I/O error never fails the plan.
#[must_use]
pub fn plan_sync(root: &Path, tracked: &[String], manifest: &Manifest) -> SyncPlan {
    let tracked_set: BTreeSet<&str> = tracked.iter().map(String::as_str).collect();
    let mut plan = SyncPlan::default();

    for (path, entry) in &manifest.files {
        if !tracked_set.contains(path.as_str()) {
            log::info!("File deleted: {path}");
            plan.ids_to_retire.extend(entry.vector_ids.iter().copied());
            plan.deleted.push(path.clone());
        }
    }

    for path in tracked {
        let content = match std::fs::read_to_string(root.join(path)) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Could not process file {path}: {e}");
                continue;
            }
        };
        let hash = fingerprint(&content);

        match manifest.files.get(path) {
            Some(entry) if entry.hash == hash => plan.unchanged.push(path.clone()),
            Some(entry) => {
                log::info!("File modified: {path}");
                plan.ids_to_retire.extend(entry.vector_ids.iter().copied());
                plan.to_modify.push(PendingFile {
                    path: path.clone(),
                    content,
                    hash,
                });
            }
            None => {
                log::info!("New file found: {path}");
                plan.to_add.push(PendingFile {
                    path: path.clone(),
                    content,
                    hash,
                });
            }
        }
    }

    plan
}
