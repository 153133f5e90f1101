//! Editing session orchestration
//!
//! One session per open config file: read through the store collaborator,
//! parse into a tree (or fall back to raw text), funnel edits through
//! immediate re-serialization, and track dirtiness as a string compare
//! between current and last-saved text. Dropping a session never writes —
//! navigating away from unsaved changes discards them by design.

use std::path::{Path, PathBuf};

use modcfg_content::{CommentMap, ConfigValue, Document, Format};
use modcfg_edit::EditOp;

use crate::cache::ParseCache;
use crate::error::{Error, Result};
use crate::files::{CandidateIndex, ConfigStore};

/// An open config file being edited.
pub struct EditorSession<S: ConfigStore> {
    store: S,
    path: PathBuf,
    format: Format,
    last_saved_text: String,
    current_text: String,
    /// `None` while in raw-text mode (unstructured format or parse failure).
    document: Option<Document>,
    cache: ParseCache,
}

impl<S: ConfigStore> EditorSession<S> {
    /// Read and parse a config file.
    ///
    /// A read failure is an error; a parse failure is not — the session
    /// opens in raw-text mode so the user can still edit and save.
    pub fn open(store: S, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = store.read(&path)?;
        let format = Format::from_filename(&path.to_string_lossy());

        let mut cache = ParseCache::new();
        let document = if format.supports_structure() {
            let document = cache.parse(&text, format);
            if document.is_none() {
                tracing::warn!(
                    "structural parse of {} failed; editing as raw text",
                    path.display()
                );
            }
            document
        } else {
            None
        };

        Ok(Self {
            store,
            path,
            format,
            last_saved_text: text.clone(),
            current_text: text,
            document,
            cache,
        })
    }

    /// Open the default (first) candidate for a mod, or `None` when the
    /// index has nothing to offer.
    pub fn open_default(
        store: S,
        index: &dyn CandidateIndex,
        mod_name: &str,
        filename_base: &str,
    ) -> Result<Option<Self>> {
        match index.list_candidates(mod_name, filename_base).first() {
            Some(candidate) => Self::open(store, &candidate.path).map(Some),
            None => Ok(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Whether in-memory text differs from the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.current_text != self.last_saved_text
    }

    /// Whether structural editing is available.
    pub fn is_structured(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The current tree, when structured.
    pub fn tree(&self) -> Option<&ConfigValue> {
        self.document.as_ref().map(Document::root)
    }

    /// Comments captured at parse time, when structured.
    pub fn comments(&self) -> Option<&CommentMap> {
        self.document.as_ref().map(Document::comments)
    }

    /// The text that would be written by [`save`](Self::save).
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    /// Apply a structural edit and immediately re-serialize into the
    /// current text. Fails without touching the tree when the session is
    /// in raw-text mode or the edit itself is invalid.
    pub fn apply_edit(&mut self, node_path: &str, op: EditOp) -> Result<()> {
        let document = self.document.as_mut().ok_or(Error::NotStructured)?;
        let new_root = modcfg_edit::apply(document.root().clone(), node_path, op)?;
        document.replace_root(new_root);
        self.current_text = document.serialize()?;
        Ok(())
    }

    /// Replace the raw text wholesale. Always available; for structured
    /// formats the text is re-parsed (memoized), and the session drops to
    /// raw-text mode if it no longer parses.
    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.current_text = text.into();
        if self.format.supports_structure() {
            self.document = self.cache.parse(&self.current_text, self.format);
        }
    }

    /// Write the current text through the store collaborator.
    ///
    /// A no-op returning `Ok(false)` when not dirty. On write failure the
    /// dirty flag stays set and nothing else changes; the caller may
    /// re-trigger the save.
    pub fn save(&mut self) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.store.write(&self.path, &self.current_text)?;
        self.last_saved_text = self.current_text.clone();
        Ok(true)
    }

    /// Discard unsaved changes: current text returns to the last saved
    /// text and the tree is re-parsed from it.
    pub fn reset(&mut self) {
        self.current_text = self.last_saved_text.clone();
        if self.format.supports_structure() {
            self.document = self.cache.parse(&self.current_text, self.format);
        } else {
            self.document = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::CandidateFile;
    use modcfg_content::ConfigValue;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    /// In-memory store with switchable write failure.
    #[derive(Clone, Default)]
    struct MemStore {
        files: Rc<RefCell<HashMap<PathBuf, String>>>,
        fail_writes: Rc<Cell<bool>>,
    }

    impl MemStore {
        fn with_file(path: &str, text: &str) -> Self {
            let store = Self::default();
            store
                .files
                .borrow_mut()
                .insert(PathBuf::from(path), text.to_string());
            store
        }

        fn contents(&self, path: &str) -> Option<String> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl ConfigStore for MemStore {
        fn read(&self, path: &Path) -> Result<String> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                Error::read(path, std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
            })
        }

        fn write(&self, path: &Path, text: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(Error::write(
                    path,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ));
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), text.to_string());
            Ok(())
        }
    }

    const TOML: &str = "[server]\n# max players allowed\nmax-players = 20\n";

    fn toml_session(store: &MemStore) -> EditorSession<MemStore> {
        EditorSession::open(store.clone(), "config/server.toml").unwrap()
    }

    #[test]
    fn test_open_parses_and_is_clean() {
        let store = MemStore::with_file("config/server.toml", TOML);
        let session = toml_session(&store);
        assert!(session.is_structured());
        assert!(!session.is_dirty());
        assert_eq!(
            session.tree().and_then(|t| t.get("server")).and_then(|s| s.get("max-players")),
            Some(&ConfigValue::Number(20.0))
        );
        assert_eq!(
            session.comments().and_then(|c| c.get("server.max-players")),
            Some("max players allowed")
        );
    }

    #[test]
    fn test_edit_marks_dirty_and_reserializes() {
        let store = MemStore::with_file("config/server.toml", TOML);
        let mut session = toml_session(&store);
        session
            .apply_edit("server.max-players", EditOp::Set(ConfigValue::Number(32.0)))
            .unwrap();
        assert!(session.is_dirty());
        assert_eq!(session.current_text(), "\n[server]\nmax-players = 32\n");
    }

    #[test]
    fn test_save_is_noop_when_clean() {
        let store = MemStore::with_file("config/server.toml", TOML);
        let mut session = toml_session(&store);
        assert_eq!(session.save().unwrap(), false);
        assert_eq!(store.contents("config/server.toml").unwrap(), TOML);
    }

    #[test]
    fn test_save_writes_and_clears_dirty() {
        let store = MemStore::with_file("config/server.toml", TOML);
        let mut session = toml_session(&store);
        session
            .apply_edit("server.max-players", EditOp::Set(ConfigValue::Number(32.0)))
            .unwrap();
        assert_eq!(session.save().unwrap(), true);
        assert!(!session.is_dirty());
        assert_eq!(
            store.contents("config/server.toml").unwrap(),
            "\n[server]\nmax-players = 32\n"
        );
    }

    #[test]
    fn test_failed_write_keeps_dirty_and_text() {
        let store = MemStore::with_file("config/server.toml", TOML);
        let mut session = toml_session(&store);
        session
            .apply_edit("server.max-players", EditOp::Set(ConfigValue::Number(32.0)))
            .unwrap();
        store.fail_writes.set(true);
        assert!(session.save().is_err());
        assert!(session.is_dirty());
        // The file was not touched
        assert_eq!(store.contents("config/server.toml").unwrap(), TOML);
        // Retry succeeds once the store recovers
        store.fail_writes.set(false);
        assert_eq!(session.save().unwrap(), true);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_reset_discards_edits_and_reparses() {
        let store = MemStore::with_file("config/server.toml", TOML);
        let mut session = toml_session(&store);
        session
            .apply_edit("server.max-players", EditOp::Set(ConfigValue::Number(32.0)))
            .unwrap();
        session.reset();
        assert!(!session.is_dirty());
        assert_eq!(session.current_text(), TOML);
        assert_eq!(
            session.tree().and_then(|t| t.get("server")).and_then(|s| s.get("max-players")),
            Some(&ConfigValue::Number(20.0))
        );
    }

    #[test]
    fn test_parse_failure_degrades_to_raw_text() {
        let store = MemStore::with_file("bad.json", "{ definitely not json");
        let mut session = EditorSession::open(store.clone(), "bad.json").unwrap();
        assert!(!session.is_structured());
        assert!(session.apply_edit("a", EditOp::Toggle).is_err());
        // Raw-text editing and saving still work
        session.set_raw_text("{\"fixed\": true}");
        assert!(session.is_dirty());
        assert!(session.is_structured());
        assert_eq!(session.save().unwrap(), true);
    }

    #[test]
    fn test_text_format_never_parses() {
        let store = MemStore::with_file("README.txt", "hello\n");
        let session = EditorSession::open(store, "README.txt").unwrap();
        assert_eq!(session.format(), Format::Text);
        assert!(!session.is_structured());
    }

    #[test]
    fn test_dropping_dirty_session_does_not_write() {
        let store = MemStore::with_file("config/server.toml", TOML);
        {
            let mut session = toml_session(&store);
            session
                .apply_edit("server.max-players", EditOp::Set(ConfigValue::Number(32.0)))
                .unwrap();
            // navigate away without saving
        }
        assert_eq!(store.contents("config/server.toml").unwrap(), TOML);
    }

    struct OneFileIndex(Option<CandidateFile>);

    impl CandidateIndex for OneFileIndex {
        fn list_candidates(&self, _mod_name: &str, _base: &str) -> Vec<CandidateFile> {
            self.0.clone().into_iter().collect()
        }
    }

    #[test]
    fn test_open_default_uses_first_candidate() {
        let store = MemStore::with_file("config/server.toml", TOML);
        let index = OneFileIndex(Some(CandidateFile {
            path: PathBuf::from("config/server.toml"),
            name: "server.toml".to_string(),
        }));
        let session = EditorSession::open_default(store.clone(), &index, "server", "server")
            .unwrap()
            .unwrap();
        assert!(session.is_structured());

        let empty = OneFileIndex(None);
        assert!(
            EditorSession::open_default(store, &empty, "server", "server")
                .unwrap()
                .is_none()
        );
    }
}
