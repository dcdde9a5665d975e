//! Blacklisted event titles and their on-disk store.
//!
//! The file is a JSON array of strings. Membership is an exact,
//! case-sensitive match; insertion order is only kept for display.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IcsFilterError, IcsFilterResult};

#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    titles: Vec<String>,
    index: HashSet<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`, or start empty when the file does not exist.
    pub fn load(path: &Path) -> IcsFilterResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no blacklist file, starting empty");
            return Ok(Blacklist::new());
        }

        let contents =
            std::fs::read_to_string(path).map_err(|e| IcsFilterError::storage(path, e))?;
        let titles: Vec<String> =
            serde_json::from_str(&contents).map_err(|e| IcsFilterError::storage(path, e))?;

        let blacklist: Blacklist = titles.into_iter().collect();
        debug!(path = %path.display(), entries = blacklist.len(), "loaded blacklist");
        Ok(blacklist)
    }

    /// Write the full set to `path`, replacing its previous contents atomically.
    pub fn save(&self, path: &Path) -> IcsFilterResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| IcsFilterError::storage(path, e))?;
        }

        let contents = serde_json::to_string_pretty(&self.titles)
            .map_err(|e| IcsFilterError::storage(path, e))?;

        let temp = temp_path(path);
        std::fs::write(&temp, contents).map_err(|e| IcsFilterError::storage(path, e))?;
        if let Err(e) = std::fs::rename(&temp, path) {
            let _ = std::fs::remove_file(&temp);
            return Err(IcsFilterError::storage(path, e));
        }

        debug!(path = %path.display(), entries = self.len(), "saved blacklist");
        Ok(())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.index.contains(title)
    }

    /// Returns `false` if the title was already blacklisted.
    pub fn add(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.index.contains(&title) {
            return false;
        }
        self.index.insert(title.clone());
        self.titles.push(title);
        true
    }

    pub fn remove(&mut self, title: &str) -> bool {
        if !self.index.remove(title) {
            return false;
        }
        self.titles.retain(|t| t != title);
        true
    }

    /// Replace the whole set, e.g. with the selection from the checklist.
    pub fn replace<I, S>(&mut self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = titles.into_iter().collect();
    }

    /// Titles in insertion order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Blacklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut blacklist = Blacklist::new();
        for title in iter {
            blacklist.add(title);
        }
        blacklist
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}
