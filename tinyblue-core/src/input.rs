//! Navigation input
//!
//! The host turns raw button presses into these events. The engine has no
//! knowledge of pins, debouncing or timing.

/// Scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Next item (down)
    #[default]
    Forward,
    /// Previous item (up)
    Backward,
}

/// A single user action on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationEvent {
    /// Move the cursor
    Scroll(Direction),
    /// Activate the focused item
    Select,
    /// Return to the previous screen
    Back,
}
