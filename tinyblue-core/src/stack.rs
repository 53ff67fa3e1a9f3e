//! Navigation history
//!
//! The top of the stack is always the path of the active screen. The first
//! entry is never popped, so the root screen cannot be navigated away from
//! with back.

use heapless::Vec;

use crate::config::MAX_DEPTH;
use crate::error::NavError;
use crate::registry::{to_path, Path};

/// Ordered history of opened screen paths
#[derive(Debug, Clone, Default)]
pub struct NavigationStack {
    paths: Vec<Path, MAX_DEPTH>,
}

impl NavigationStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Push `path`, making it the active screen
    pub fn push(&mut self, path: &str) -> Result<(), NavError> {
        let path = to_path(path)?;
        self.paths.push(path).map_err(|_| NavError::StackFull)
    }

    /// Pop the active path
    ///
    /// With one entry or less this does nothing and returns `None`.
    pub fn pop(&mut self) -> Option<Path> {
        if self.paths.len() > 1 {
            self.paths.pop()
        } else {
            None
        }
    }

    /// Path of the active screen
    pub fn top(&self) -> Option<&str> {
        self.paths.last().map(|p| p.as_str())
    }

    /// Number of entries
    pub fn depth(&self) -> usize {
        self.paths.len()
    }

    /// True before the first screen is opened
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths from the first opened screen to the active one
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|p| p.as_str())
    }
}
