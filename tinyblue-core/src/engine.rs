//! Menu engine
//!
//! `TinyBlue` owns the display, the screen registry and the navigation
//! history. The active screen is always the one registered under the top of
//! the history; it is never stored separately.
//!
//! Every operation runs to completion. Activations invoked from `select` get
//! the engine back as their first argument, so they can open screens or
//! update item text before `select` returns.

use crate::config::MenuConfig;
use crate::error::{Error, NavError};
use crate::input::{Direction, NavigationEvent};
use crate::item::{pad_line, Action, Item};
use crate::registry::ScreenRegistry;
use crate::screen::{CursorMove, Screen};
use crate::stack::NavigationStack;
use crate::traits::{CharDisplay, Glyph};

/// Activation run when an item is selected
///
/// Receives the engine and the host context passed to `select`.
pub type Callback<D, C> =
    fn(&mut TinyBlue<D, C>, &mut C) -> Result<(), Error<<D as CharDisplay>::Error>>;

/// Item whose activation is an engine callback
pub type MenuItem<D, C = ()> = Item<Callback<D, C>>;

/// Screen of engine items
pub type MenuScreen<D, C = ()> = Screen<Callback<D, C>>;

/// Column where item text starts (column 0 holds the cursor glyph)
const TEXT_COL: u8 = 1;

/// Menu engine
///
/// `D` is the character display, `C` the host context handed to
/// activations (LED pins, counters, anything the menu controls).
pub struct TinyBlue<D: CharDisplay, C = ()> {
    display: D,
    config: MenuConfig,
    registry: ScreenRegistry<Callback<D, C>>,
    stack: NavigationStack,
}

impl<D: CharDisplay, C> TinyBlue<D, C> {
    /// Create an engine for `display`
    ///
    /// Nothing is drawn until the first `open_screen`.
    pub fn new(display: D, config: MenuConfig) -> Result<Self, NavError> {
        config.validate()?;
        Ok(Self {
            display,
            config,
            registry: ScreenRegistry::new(),
            stack: NavigationStack::new(),
        })
    }

    /// Configuration the engine was built with
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Display lines
    pub fn rows(&self) -> u8 {
        self.config.rows
    }

    /// Characters per line
    pub fn columns(&self) -> u8 {
        self.config.columns
    }

    /// Borrow the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutably borrow the display (backlight, contrast, ...)
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Tear down the engine and give the display back
    pub fn release(self) -> D {
        self.display
    }

    /// Register `screen` under `path`
    ///
    /// Re-registering a path silently replaces the old screen. Replacing the
    /// active screen redraws it.
    pub fn add_screen(&mut self, path: &str, screen: MenuScreen<D, C>) -> Result<(), Error<D::Error>> {
        if screen.is_empty() {
            return Err(NavError::EmptyScreen.into());
        }
        self.registry.register(path, screen)?;
        if self.stack.top() == Some(path) {
            self.render()?;
        }
        Ok(())
    }

    /// Screen registered under `path`
    pub fn screen(&self, path: &str) -> Result<&MenuScreen<D, C>, NavError> {
        self.registry.lookup(path)
    }

    /// Path of the active screen
    pub fn active_path(&self) -> Option<&str> {
        self.stack.top()
    }

    /// The active screen
    pub fn active_screen(&self) -> Result<&MenuScreen<D, C>, NavError> {
        active_screen_of(&self.registry, &self.stack)
    }

    /// Navigation history
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Open the screen registered under `path` and draw it
    ///
    /// Lookup and history errors leave the history and the active screen
    /// untouched. A display error is reported after the screen became
    /// active; redraw it with `render` rather than opening it again.
    pub fn open_screen(&mut self, path: &str) -> Result<(), Error<D::Error>> {
        let screen = match self.registry.lookup(path) {
            Ok(screen) => screen,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("open_screen: unknown path {=str}", path);
                return Err(err.into());
            }
        };
        if screen.is_empty() {
            return Err(NavError::EmptyScreen.into());
        }
        self.stack.push(path)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("open_screen {=str} (depth {})", path, self.stack.depth());

        self.render()
    }

    /// Move the cursor on the active screen
    ///
    /// Redraws every row if the window scrolled, otherwise only the glyph
    /// column of the previously and newly focused rows.
    pub fn scroll(&mut self, direction: Direction) -> Result<(), Error<D::Error>> {
        let rows = self.config.rows as usize;
        let wrap = self.config.wrap;
        let path = self.stack.top().ok_or(NavError::NoActiveScreen)?;
        let moved = self
            .registry
            .lookup_mut(path)?
            .cursor_move(direction, wrap, rows);

        match moved {
            CursorMove::Scrolled => self.render(),
            CursorMove::Cursor { from_row, to_row } => {
                let screen = active_screen_of(&self.registry, &self.stack)?;
                draw_glyph(&mut self.display, screen, from_row).map_err(Error::Display)?;
                if to_row != from_row {
                    draw_glyph(&mut self.display, screen, to_row).map_err(Error::Display)?;
                }
                Ok(())
            }
            CursorMove::Unchanged => Ok(()),
        }
    }

    /// Select the focused item
    ///
    /// Back items navigate back, activations are run with `ctx`, plain
    /// items do nothing.
    pub fn select(&mut self, ctx: &mut C) -> Result<(), Error<D::Error>> {
        let action = *self
            .active_screen()?
            .current_item()
            .ok_or(NavError::EmptyScreen)?
            .action();

        match action {
            Action::Back => self.back(),
            Action::Invoke(activation) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("select: running activation");
                activation(self, ctx)
            }
            Action::None => Ok(()),
        }
    }

    /// Return to the previous screen
    ///
    /// Does nothing on the first opened screen.
    pub fn back(&mut self) -> Result<(), Error<D::Error>> {
        let Some(left) = self.stack.pop() else {
            return Ok(());
        };

        if self.config.reset_on_back {
            if let Ok(screen) = self.registry.lookup_mut(&left) {
                screen.reset();
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("back from {=str} (depth {})", left.as_str(), self.stack.depth());

        let changed = self.stack.top() != Some(left.as_str());
        if changed || self.config.reset_on_back {
            self.render()?;
        }
        Ok(())
    }

    /// Dispatch one input event
    pub fn handle(&mut self, event: NavigationEvent, ctx: &mut C) -> Result<(), Error<D::Error>> {
        match event {
            NavigationEvent::Scroll(direction) => self.scroll(direction),
            NavigationEvent::Select => self.select(ctx),
            NavigationEvent::Back => self.back(),
        }
    }

    /// Draw every row of the active screen
    pub fn render(&mut self) -> Result<(), Error<D::Error>> {
        let screen = active_screen_of(&self.registry, &self.stack)?;
        let width = self.config.text_width();
        for row in 0..self.config.rows as usize {
            draw_glyph(&mut self.display, screen, row).map_err(Error::Display)?;
            draw_text(&mut self.display, screen, row, width).map_err(Error::Display)?;
        }
        Ok(())
    }

    /// Replace the text of item `slot` on the screen at `path`
    ///
    /// If that item is on the active screen and inside the window, only its
    /// row's text is redrawn.
    pub fn set_text(&mut self, path: &str, slot: usize, text: &str) -> Result<(), Error<D::Error>> {
        self.item_mut(path, slot)?.set_text(text)?;
        self.refresh_item(path, slot)
    }

    /// `set_text` with formatted text
    pub fn set_fmt(
        &mut self,
        path: &str,
        slot: usize,
        args: core::fmt::Arguments<'_>,
    ) -> Result<(), Error<D::Error>> {
        self.item_mut(path, slot)?.set_fmt(args)?;
        self.refresh_item(path, slot)
    }

    fn item_mut(&mut self, path: &str, slot: usize) -> Result<&mut MenuItem<D, C>, NavError> {
        self.registry
            .lookup_mut(path)?
            .item_mut(slot)
            .ok_or(NavError::SlotOutOfRange)
    }

    fn refresh_item(&mut self, path: &str, slot: usize) -> Result<(), Error<D::Error>> {
        if self.stack.top() != Some(path) {
            return Ok(());
        }
        let screen = active_screen_of(&self.registry, &self.stack)?;
        if let Some(row) = screen.visible_row(slot, self.config.rows as usize) {
            draw_text(&mut self.display, screen, row, self.config.text_width())
                .map_err(Error::Display)?;
        }
        Ok(())
    }
}

fn active_screen_of<'a, A>(
    registry: &'a ScreenRegistry<A>,
    stack: &NavigationStack,
) -> Result<&'a Screen<A>, NavError> {
    let path = stack.top().ok_or(NavError::NoActiveScreen)?;
    registry.lookup(path)
}

/// Glyph for display `row`: the item kind on the focused row, blank elsewhere
fn row_glyph<A>(screen: &Screen<A>, row: usize) -> Glyph {
    let slot = screen.window_top() + row;
    if slot != screen.cursor() {
        return Glyph::Blank;
    }
    screen.item(slot).map_or(Glyph::Blank, |item| item.glyph())
}

fn draw_glyph<D: CharDisplay, A>(display: &mut D, screen: &Screen<A>, row: usize) -> Result<(), D::Error> {
    display.write_glyph(row as u8, row_glyph(screen, row))
}

fn draw_text<D: CharDisplay, A>(
    display: &mut D,
    screen: &Screen<A>,
    row: usize,
    width: usize,
) -> Result<(), D::Error> {
    let slot = screen.window_top() + row;
    let line = match screen.item(slot) {
        Some(item) => item.visible_text(width),
        None => pad_line("", width),
    };
    display.write_at(row as u8, TEXT_COL, &line)
}
