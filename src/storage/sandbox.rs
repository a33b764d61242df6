//! Filesystem side of the app sandbox.
//!
//! Layout under the app's home directory:
//!
//! ```text
//! <home>/Library/Caches        StorageArea::Caches
//! <home>/Documents             StorageArea::Documents
//! <home>/Library/Preferences   StorageArea::Preferences
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::accessor::{Cleared, CookieStore, DefaultsStore, StorageAccessor, StorageArea};
use super::error::StorageError;
use crate::model::CookieRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxDirs {
    pub caches: PathBuf,
    pub documents: PathBuf,
    pub preferences: PathBuf,
}

impl SandboxDirs {
    pub fn from_home(home: &Path) -> Self {
        Self {
            caches: home.join("Library").join("Caches"),
            documents: home.join("Documents"),
            preferences: home.join("Library").join("Preferences"),
        }
    }

    /// Locate the sandbox from the process' home directory.
    pub fn discover() -> Result<Self, StorageError> {
        dirs::home_dir()
            .map(|home| Self::from_home(&home))
            .ok_or(StorageError::Unavailable("home directory"))
    }

    pub fn path(&self, area: StorageArea) -> &Path {
        match area {
            StorageArea::Caches => &self.caches,
            StorageArea::Documents => &self.documents,
            StorageArea::Preferences => &self.preferences,
        }
    }
}

/// Total size of the regular files below `root`. A missing root is empty.
pub fn directory_size(root: &Path) -> Result<u64, StorageError> {
    if !root.exists() {
        return Ok(0);
    }
    Ok(measure(root).bytes)
}

/// Remove everything inside `root`. A missing root is an empty success.
pub fn clear_directory(root: &Path) -> Result<Cleared, StorageError> {
    let entries = match fs_err::read_dir(root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Cleared::default()),
        Err(err) => return Err(StorageError::io(root, err)),
    };

    let mut cleared = Cleared::default();
    for entry in entries {
        let entry = entry.map_err(|e| StorageError::io(root, e))?;
        let path = entry.path();
        let counted = measure(&path);
        let file_type = entry.file_type().map_err(|e| StorageError::io(&path, e))?;
        let removed = if file_type.is_dir() {
            fs_err::remove_dir_all(&path)
        } else {
            fs_err::remove_file(&path)
        };
        removed.map_err(|e| StorageError::io(&path, e))?;
        cleared.items += counted.items;
        cleared.bytes += counted.bytes;
    }
    debug!(root = %root.display(), items = cleared.items, bytes = cleared.bytes, "directory cleared");
    Ok(cleared)
}

fn measure(path: &Path) -> Cleared {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| !e.file_type().is_dir())
        .fold(Cleared::default(), |acc, e| Cleared {
            items: acc.items + 1,
            bytes: acc.bytes + e.metadata().map(|m| m.len()).unwrap_or(0),
        })
}

/// [`StorageAccessor`] over a cookie store and the sandbox directories.
pub struct SandboxStorage<C: CookieStore, D: DefaultsStore = ()> {
    cookies: C,
    defaults: D,
    dirs: SandboxDirs,
}

impl<C: CookieStore> SandboxStorage<C, ()> {
    pub fn new(cookies: C, dirs: SandboxDirs) -> Self {
        Self {
            cookies,
            defaults: (),
            dirs,
        }
    }
}

impl<C: CookieStore, D: DefaultsStore> SandboxStorage<C, D> {
    pub fn with_defaults(cookies: C, defaults: D, dirs: SandboxDirs) -> Self {
        Self {
            cookies,
            defaults,
            dirs,
        }
    }

    pub fn dirs(&self) -> &SandboxDirs {
        &self.dirs
    }

    pub fn cookie_store(&self) -> &C {
        &self.cookies
    }
}

impl<C: CookieStore, D: DefaultsStore> StorageAccessor for SandboxStorage<C, D> {
    fn cookies(&self) -> Result<Vec<CookieRecord>, StorageError> {
        self.cookies.cookies()
    }

    fn delete_all_cookies(&mut self) -> Result<usize, StorageError> {
        self.cookies.delete_all()
    }

    fn delete_cookies_for_domain(&mut self, domain: &str) -> Result<usize, StorageError> {
        self.cookies.delete_domain(domain)
    }

    fn clear_area(&mut self, area: StorageArea) -> Result<Cleared, StorageError> {
        if area == StorageArea::Preferences {
            // The defaults daemon rewrites plists it still has in memory.
            self.defaults.reset()?;
        }
        clear_directory(self.dirs.path(area))
    }

    fn area_size(&self, area: StorageArea) -> Result<u64, StorageError> {
        directory_size(self.dirs.path(area))
    }
}
