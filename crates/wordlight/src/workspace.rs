//! The uploads directory and the per-request sessions inside it.
//!
//! Every POST works in its own `<root>/<session id>/` directory. Sessions are
//! registered as active while their request is processed; the purge that runs
//! at the start of each POST only deletes inactive sessions and loose files.

use std::collections::HashSet;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use wordlight_core::report::highlighted_file_name;

/// Return the final path component of an uploaded file name.
///
/// Browsers may send full client paths (`C:\docs\a.pdf`), so both separators
/// are stripped. `None` for names that do not leave a usable file name.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }
    Some(base.to_string())
}

/// True when `name` can be joined to a directory without leaving it.
fn is_plain_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains('\\')
}

/// One request's private directory.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub id: String,
    pub dir: PathBuf,
}

impl UploadSession {
    /// Write an uploaded file under its (already sanitized) name.
    ///
    /// There is no collision handling: a second file with the same name
    /// overwrites the first.
    pub fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        log::debug!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

/// Keeps a session registered as active until dropped.
#[derive(Debug)]
pub struct SessionGuard {
    uploads: Arc<Uploads>,
    session: UploadSession,
}

impl SessionGuard {
    pub fn session(&self) -> &UploadSession {
        &self.session
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.uploads.active().remove(&self.session.id);
    }
}

#[derive(Debug)]
pub struct Uploads {
    root: PathBuf,
    active: Mutex<HashSet<String>>,
}

impl Uploads {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Uploads {
            root: root.into(),
            active: Mutex::new(HashSet::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn active(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delete everything in the uploads root except active sessions.
    ///
    /// Failures are logged per entry and do not stop the purge. Returns the
    /// number of entries removed.
    pub fn purge_inactive(&self) -> usize {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return 0,
            Err(e) => {
                log::error!("Error while listing {}: {e}", self.root.display());
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if self.active().contains(&name) {
                log::debug!("Keeping active session {name}");
                continue;
            }

            let result = match entry.file_type() {
                Ok(kind) if kind.is_dir() => std::fs::remove_dir_all(&path),
                Ok(_) => std::fs::remove_file(&path),
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => removed += 1,
                Err(e) => log::error!("Error while deleting {}: {e}", path.display()),
            }
        }

        if removed > 0 {
            log::info!("Purged {removed} previous upload(s)");
        }
        removed
    }

    /// Create a fresh session directory and mark it active.
    pub fn open_session(self: &Arc<Self>) -> io::Result<SessionGuard> {
        let id = loop {
            let candidate = format!("{:016x}", rand::random::<u64>());
            if self.active().insert(candidate.clone()) {
                break candidate;
            }
        };

        let dir = self.root.join(&id);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            self.active().remove(&id);
            return Err(e);
        }

        log::info!("Opened upload session {id}");
        Ok(SessionGuard {
            uploads: Arc::clone(self),
            session: UploadSession { id, dir },
        })
    }

    /// Path of the highlighted rendering of `file_name`, inside `session` or,
    /// without a session, directly in the uploads root.
    ///
    /// `None` if either name would escape the uploads directory.
    pub fn locate_highlighted(&self, session: Option<&str>, file_name: &str) -> Option<PathBuf> {
        let artifact = highlighted_file_name(file_name);
        if !is_plain_component(&artifact) {
            return None;
        }

        let dir = match session {
            Some(id) if is_plain_component(id) => self.root.join(id),
            Some(_) => return None,
            None => self.root.clone(),
        };

        Some(dir.join(artifact))
    }
}
