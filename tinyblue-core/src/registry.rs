//! Screen registry
//!
//! Maps path strings to screens. Paths are opaque keys; the leading-slash
//! convention (`"/"`, `"/led"`) is not enforced.

use heapless::{FnvIndexMap, String};

use crate::config::{MAX_PATH_LEN, MAX_SCREENS};
use crate::error::NavError;
use crate::screen::Screen;

/// Fixed-capacity path string
pub type Path = String<MAX_PATH_LEN>;

/// Convert a `&str` into a registry key
pub fn to_path(path: &str) -> Result<Path, NavError> {
    let mut key = Path::new();
    key.push_str(path).map_err(|_| NavError::PathTooLong)?;
    Ok(key)
}

/// Path to screen mapping
pub struct ScreenRegistry<A> {
    screens: FnvIndexMap<Path, Screen<A>, MAX_SCREENS>,
}

impl<A> Default for ScreenRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ScreenRegistry<A> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            screens: FnvIndexMap::new(),
        }
    }

    /// Register `screen` under `path`, replacing any previous screen
    ///
    /// Returns the replaced screen, if any.
    pub fn register(&mut self, path: &str, screen: Screen<A>) -> Result<Option<Screen<A>>, NavError> {
        let key = to_path(path)?;
        if let Some(existing) = self.screens.get_mut(&key) {
            return Ok(Some(core::mem::replace(existing, screen)));
        }
        self.screens
            .insert(key, screen)
            .map_err(|_| NavError::RegistryFull)
            .map(|_| None)
    }

    /// Look up the screen registered under `path`
    pub fn lookup(&self, path: &str) -> Result<&Screen<A>, NavError> {
        let key = to_path(path).map_err(|_| NavError::UnknownPath)?;
        self.screens.get(&key).ok_or(NavError::UnknownPath)
    }

    /// Mutable lookup
    pub fn lookup_mut(&mut self, path: &str) -> Result<&mut Screen<A>, NavError> {
        let key = to_path(path).map_err(|_| NavError::UnknownPath)?;
        self.screens.get_mut(&key).ok_or(NavError::UnknownPath)
    }

    /// Number of registered screens
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::format;
    use crate::item::Item;

    fn screen(label: &str) -> Screen<()> {
        Screen::new([Item::new(label).unwrap()]).unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ScreenRegistry::new();
        assert!(registry.register("/", screen("Main")).unwrap().is_none());
        assert!(registry.register("/led", screen("LED")).unwrap().is_none());

        assert_eq!(registry.len(), 2);
        let led = registry.lookup("/led").unwrap();
        assert_eq!(led.current_item().unwrap().text(), "LED");
    }

    #[test]
    fn test_unknown_path() {
        let mut registry = ScreenRegistry::<()>::new();
        assert_eq!(registry.lookup("/missing").unwrap_err(), NavError::UnknownPath);
        assert!(registry.lookup_mut("/missing").is_err());
    }

    #[test]
    fn test_overwrite_is_silent() {
        let mut registry = ScreenRegistry::new();
        registry.register("/", screen("Old")).unwrap();
        let replaced = registry.register("/", screen("New")).unwrap();

        assert_eq!(replaced.unwrap().current_item().unwrap().text(), "Old");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("/").unwrap().current_item().unwrap().text(), "New");
    }

    #[test]
    fn test_paths_are_opaque() {
        let mut registry = ScreenRegistry::new();
        registry.register("settings", screen("S")).unwrap();
        assert!(registry.lookup("settings").is_ok());
        assert!(registry.lookup("/settings").is_err());
    }

    #[test]
    fn test_long_path() {
        let mut registry = ScreenRegistry::new();
        let long = "/".repeat(MAX_PATH_LEN + 1);
        assert_eq!(
            registry.register(&long, screen("x")).unwrap_err(),
            NavError::PathTooLong
        );
        assert_eq!(registry.lookup(&long).unwrap_err(), NavError::UnknownPath);
    }

    #[test]
    fn test_registry_full() {
        let mut registry = ScreenRegistry::new();
        for i in 0..MAX_SCREENS {
            registry.register(&format!("/{}", i), screen("x")).unwrap();
        }
        assert_eq!(
            registry.register("/extra", screen("x")).unwrap_err(),
            NavError::RegistryFull
        );
        // Overwriting an existing key still works when full
        assert!(registry.register("/0", screen("y")).unwrap().is_some());
    }
}
