//! Colorizer session manager
//!
//! Keeps one `DocumentSession` per open document, built from a shared
//! configuration and the language tables. Sessions live from
//! `open_document` until `close_document`; nothing is global.

use std::collections::HashMap;
use std::path::Path;

use crate::config::Config;
use crate::document::{ContentChange, TextSource};
use crate::error::{ColorizerError, Result};
use crate::scheduler::{Scheduler, TaskHandle};

use super::builtin;
use super::dispatch::RenderTarget;
use super::language::LanguageDefinition;
use super::session::DocumentSession;
use super::settings::Settings;

pub struct ColorizerManager {
    /// User configuration shared by every document
    config: Config,
    /// Language id -> token table
    languages: HashMap<String, LanguageDefinition>,
    /// Extension -> language id
    extension_map: HashMap<String, String>,
    /// Open documents
    sessions: HashMap<String, DocumentSession>,
}

impl ColorizerManager {
    /// Create a manager with the built-in languages
    pub fn new(config: Config) -> Self {
        let mut manager = Self {
            config,
            languages: HashMap::new(),
            extension_map: HashMap::new(),
            sessions: HashMap::new(),
        };

        for lang in builtin::all_languages() {
            manager.add_language(lang);
        }

        manager
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Add or replace a language definition
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        if let Some(primary) = lang.ids.first() {
            for ext in &lang.extensions {
                self.extension_map.insert(ext.to_lowercase(), primary.clone());
            }
        }
        for id in &lang.ids {
            self.languages.insert(id.clone(), lang.clone());
        }
    }

    /// Detect a language id from a filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// List known language ids
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Start a session for a document, replacing any previous one
    pub fn open_document(&mut self, id: &str, language_id: &str) -> Result<&mut DocumentSession> {
        let language = self.languages.get(language_id);
        if language.is_none() {
            tracing::debug!(document = id, language = language_id, "unsupported language, contextual parsing disabled");
        }
        let settings = Settings::new(&self.config, language)?;
        tracing::debug!(document = id, language = language_id, "opened document");

        let session = DocumentSession::new(settings);
        self.sessions.insert(id.to_string(), session);
        self.session_mut(id)
    }

    /// End a document's session, cancelling its pending rescan
    pub fn close_document(&mut self, id: &str, scheduler: &mut dyn Scheduler) -> bool {
        match self.sessions.remove(id) {
            Some(mut session) => {
                session.cancel(scheduler);
                tracing::debug!(document = id, "closed document");
                true
            }
            None => false,
        }
    }

    pub fn session(&self, id: &str) -> Option<&DocumentSession> {
        self.sessions.get(id)
    }

    pub fn session_mut(&mut self, id: &str) -> Result<&mut DocumentSession> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| ColorizerError::NoSuchDocument(id.to_string()))
    }

    /// Forward an edit notification to a document's session
    pub fn on_did_change(
        &mut self,
        id: &str,
        changes: &[ContentChange],
        scheduler: &mut dyn Scheduler,
        source: &dyn TextSource,
        target: &mut dyn RenderTarget,
    ) -> Result<()> {
        self.session_mut(id)?
            .on_did_change(changes, scheduler, source, target);
        Ok(())
    }

    /// Deliver a due timer; returns whether a rescan ran
    pub fn on_timer(
        &mut self,
        id: &str,
        handle: TaskHandle,
        source: &dyn TextSource,
        target: &mut dyn RenderTarget,
    ) -> Result<bool> {
        Ok(self.session_mut(id)?.on_timer(handle, source, target))
    }

    /// Rescan anything pending and redispatch, e.g. when a view becomes visible
    pub fn update_decorations(
        &mut self,
        id: &str,
        source: &dyn TextSource,
        target: &mut dyn RenderTarget,
    ) -> Result<()> {
        self.session_mut(id)?.update_decorations(source, target);
        Ok(())
    }
}

impl Default for ColorizerManager {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorizer::dispatch::tests::RecordingTarget;
    use crate::document::{Position, TextDocument};
    use crate::scheduler::ManualScheduler;

    #[test]
    fn test_detect_language() {
        let manager = ColorizerManager::default();

        assert_eq!(manager.detect_language(Path::new("main.c")), Some("c"));
        assert_eq!(manager.detect_language(Path::new("App.TSX")), Some("javascript"));
        assert_eq!(manager.detect_language(Path::new("test.py")), Some("python"));
        assert_eq!(manager.detect_language(Path::new("no_extension")), None);
        assert!(manager.list_languages().contains(&"typescript"));
    }

    #[test]
    fn test_open_and_close() {
        let mut manager = ColorizerManager::default();
        let mut scheduler = ManualScheduler::new();

        assert!(manager.open_document("a.c", "c").unwrap().settings().contextual_parsing);
        assert!(!manager.open_document("notes", "plaintext").unwrap().settings().contextual_parsing);
        assert!(manager.session("a.c").is_some());

        assert!(manager.close_document("a.c", &mut scheduler));
        assert!(!manager.close_document("a.c", &mut scheduler));
        assert!(manager.session("a.c").is_none());
    }

    #[test]
    fn test_unknown_document() {
        let mut manager = ColorizerManager::default();
        let doc = TextDocument::new("()", "c");
        let mut target = RecordingTarget::default();
        let err = manager.update_decorations("missing", &doc, &mut target).unwrap_err();
        assert!(matches!(err, ColorizerError::NoSuchDocument(id) if id == "missing"));
    }

    #[test]
    fn test_bad_config_refuses_document() {
        let mut config = Config::default();
        config.bracket_pairs.clear();
        let mut manager = ColorizerManager::new(config);
        assert!(matches!(
            manager.open_document("a.c", "c"),
            Err(ColorizerError::Config(_))
        ));
        assert!(manager.session("a.c").is_none());
    }

    #[test]
    fn test_edit_through_manager() {
        let mut manager = ColorizerManager::default();
        let mut scheduler = ManualScheduler::new();
        let mut target = RecordingTarget::default();
        let mut doc = TextDocument::new("(", "c");

        manager.open_document("doc", "c").unwrap();
        manager.update_decorations("doc", &doc, &mut target).unwrap();

        let change = doc.insert(Position::new(0, 1), ")");
        manager
            .on_did_change("doc", &[change], &mut scheduler, &doc, &mut target)
            .unwrap();
        let due = scheduler.advance(manager.config().timeout);
        assert_eq!(due.len(), 1);
        assert!(manager.on_timer("doc", due[0], &doc, &mut target).unwrap());

        let gold = target.calls.iter().rev().find(|(color, _)| color == "Gold").unwrap();
        assert_eq!(gold.1.len(), 2);
    }
}
