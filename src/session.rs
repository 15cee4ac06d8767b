//! Session state: what the learner is looking at and what they finished.
//!
//! A [`Session`] owns the catalog and all mutable UI state. The only way to
//! change that state is through the navigation actions; rendering reads it
//! and recomputes markup from raw module content on every call.

use crate::catalog::{Catalog, Module};
use crate::error::SessionError;
use crate::render::{render_module_view, render_overview};
use std::collections::BTreeSet;

/// Current navigation mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Overview,
    /// Viewing the module with this id
    Module(String),
}

/// Ids of modules marked complete. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: BTreeSet<String>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Aggregated view of course progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub viewed: usize,
    /// Completed share, rounded down
    pub percent: u8,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// One learner's pass through a catalog.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    view: ViewState,
    completed: CompletionSet,
    viewed: CompletionSet,
}

impl Session {
    /// Start a session on the overview with nothing completed.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            view: ViewState::Overview,
            completed: CompletionSet::new(),
            viewed: CompletionSet::new(),
        }
    }

    /// Open a module. Unknown ids leave the state untouched.
    pub fn select_module(&mut self, id: &str) -> Result<&Module, SessionError> {
        let module = self.catalog.get(id).ok_or_else(|| {
            log::warn!("select of unknown module {:?}", id);
            SessionError::UnknownModule(id.to_string())
        })?;

        self.view = ViewState::Module(id.to_string());
        if self.viewed.insert(id) {
            log::info!("first view of module {:?}", id);
        }
        Ok(module)
    }

    /// Return to the module grid.
    pub fn go_to_overview(&mut self) {
        log::debug!("back to overview");
        self.view = ViewState::Overview;
    }

    /// Mark a module complete. Returns `true` the first time only.
    pub fn mark_complete(&mut self, id: &str) -> Result<bool, SessionError> {
        if self.catalog.get(id).is_none() {
            return Err(SessionError::UnknownModule(id.to_string()));
        }

        let added = self.completed.insert(id);
        if added {
            log::info!(
                "module {:?} complete ({}/{})",
                id,
                self.completed.len(),
                self.catalog.len()
            );
        }
        Ok(added)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The module being viewed, if any.
    pub fn current_module(&self) -> Option<&Module> {
        match &self.view {
            ViewState::Overview => None,
            ViewState::Module(id) => self.catalog.get(id),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    pub fn is_complete(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    pub fn is_viewed(&self, id: &str) -> bool {
        self.viewed.contains(id)
    }

    pub fn progress(&self) -> Progress {
        let total = self.catalog.len();
        let completed = self.completed.len();
        let percent = if total == 0 {
            0
        } else {
            (completed * 100 / total) as u8
        };

        Progress {
            total,
            completed,
            viewed: self.viewed.len(),
            percent,
        }
    }

    /// Markup for the current view, rebuilt from scratch.
    pub fn render(&self) -> String {
        match self.current_module() {
            Some(module) => render_module_view(self, module),
            None => render_overview(self),
        }
    }
}
