//! Debounced push buttons
//!
//! Buttons are wired active-low with pull-ups. A press is reported on the
//! released→pressed edge only. Any edge arriving within `DEBOUNCE_MS` of
//! the previous one is treated as contact bounce: it is dropped and
//! restarts the lockout window.

use embedded_hal::digital::InputPin;

use tinyblue_core::{Direction, NavigationEvent};

/// Lockout window after an edge, in milliseconds
pub const DEBOUNCE_MS: u32 = 100;

/// Edge lockout shared by one or more buttons
#[derive(Debug, Clone, Copy, Default)]
struct Lockout {
    last_edge: Option<u32>,
}

impl Lockout {
    /// Record an edge at `now_ms`, returning true if it should be accepted
    fn edge(&mut self, now_ms: u32) -> bool {
        let accept = match self.last_edge {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) > DEBOUNCE_MS,
        };
        self.last_edge = Some(now_ms);
        accept
    }
}

/// Single active-low push button
pub struct Button<P> {
    pin: P,
    was_pressed: bool,
    lockout: Lockout,
}

impl<P: InputPin> Button<P> {
    /// Wrap an input pin configured with a pull-up
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            was_pressed: false,
            lockout: Lockout::default(),
        }
    }

    /// Current level, true while held down
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        self.pin.is_low()
    }

    /// Sample the pin, returning true on a debounced press
    ///
    /// `now_ms` is a free-running millisecond counter; wrap-around is
    /// handled.
    pub fn poll(&mut self, now_ms: u32) -> Result<bool, P::Error> {
        if self.pressed_edge()? {
            Ok(self.lockout.edge(now_ms))
        } else {
            Ok(false)
        }
    }

    /// True on the released→pressed transition, without debouncing
    fn pressed_edge(&mut self) -> Result<bool, P::Error> {
        let pressed = self.is_pressed()?;
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        Ok(edge)
    }

    /// Give back the pin
    pub fn release(self) -> P {
        self.pin
    }
}

/// Set of menu buttons producing navigation events
///
/// Scroll and select are required. Reverse (scroll backward) and back are
/// optional; without a back button the menu relies on back items. All
/// buttons share one lockout window.
pub struct ButtonPad<P> {
    scroll: Button<P>,
    select: Button<P>,
    reverse: Option<Button<P>>,
    back: Option<Button<P>>,
    lockout: Lockout,
}

impl<P: InputPin> ButtonPad<P> {
    /// Two-button pad: scroll forward and select
    pub fn new(scroll: P, select: P) -> Self {
        Self {
            scroll: Button::new(scroll),
            select: Button::new(select),
            reverse: None,
            back: None,
            lockout: Lockout::default(),
        }
    }

    /// Add a button that scrolls backward
    pub fn with_reverse(mut self, pin: P) -> Self {
        self.reverse = Some(Button::new(pin));
        self
    }

    /// Add a dedicated back button
    pub fn with_back(mut self, pin: P) -> Self {
        self.back = Some(Button::new(pin));
        self
    }

    /// Sample every button, returning at most one event
    ///
    /// Every button's edge state is updated on each call. When several
    /// edges land in the same poll, back wins over select, select over
    /// scroll, and scroll over reverse.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<NavigationEvent>, P::Error> {
        let back = match self.back.as_mut() {
            Some(button) => button.pressed_edge()?,
            None => false,
        };
        let select = self.select.pressed_edge()?;
        let scroll = self.scroll.pressed_edge()?;
        let reverse = match self.reverse.as_mut() {
            Some(button) => button.pressed_edge()?,
            None => false,
        };

        let event = if back {
            NavigationEvent::Back
        } else if select {
            NavigationEvent::Select
        } else if scroll {
            NavigationEvent::Scroll(Direction::Forward)
        } else if reverse {
            NavigationEvent::Scroll(Direction::Backward)
        } else {
            return Ok(None);
        };

        if self.lockout.edge(now_ms) {
            #[cfg(feature = "defmt")]
            defmt::debug!("button event {}", event);
            Ok(Some(event))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::rc::Rc;

    /// Mock active-low pin whose level is shared with the test
    #[derive(Clone)]
    struct MockPin {
        low: Rc<Cell<bool>>,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                low: Rc::new(Cell::new(false)),
            }
        }

        fn press(&self) {
            self.low.set(true);
        }

        fn release(&self) {
            self.low.set(false);
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low.get())
        }
    }

    #[test]
    fn test_press_reported_once() {
        let pin = MockPin::new();
        let mut button = Button::new(pin.clone());

        assert!(!button.poll(0).unwrap());
        pin.press();
        assert!(button.poll(10).unwrap());
        // Held down: no repeat
        assert!(!button.poll(500).unwrap());
        assert!(button.is_pressed().unwrap());
    }

    #[test]
    fn test_bounce_is_dropped() {
        let pin = MockPin::new();
        let mut button = Button::new(pin.clone());

        pin.press();
        assert!(button.poll(1000).unwrap());
        pin.release();
        button.poll(1020).unwrap();
        pin.press();
        // 50 ms after the last edge
        assert!(!button.poll(1050).unwrap());

        pin.release();
        button.poll(1100).unwrap();
        pin.press();
        // Bounce restarted the window at 1050
        assert!(!button.poll(1140).unwrap());

        pin.release();
        button.poll(1200).unwrap();
        pin.press();
        assert!(button.poll(1300).unwrap());
    }

    #[test]
    fn test_exactly_debounce_window_is_dropped() {
        let pin = MockPin::new();
        let mut button = Button::new(pin.clone());

        pin.press();
        assert!(button.poll(0).unwrap());
        pin.release();
        button.poll(50).unwrap();
        pin.press();
        assert!(!button.poll(DEBOUNCE_MS).unwrap());
        pin.release();
        button.poll(150).unwrap();
        pin.press();
        assert!(button.poll(DEBOUNCE_MS * 2 + 1).unwrap());
    }

    #[test]
    fn test_timer_wraparound() {
        let pin = MockPin::new();
        let mut button = Button::new(pin.clone());

        pin.press();
        assert!(button.poll(u32::MAX - 10).unwrap());
        pin.release();
        button.poll(u32::MAX - 5).unwrap();
        pin.press();
        // 31 ms after wrapping
        assert!(!button.poll(20).unwrap());
    }

    #[test]
    fn test_pad_events() {
        let scroll = MockPin::new();
        let select = MockPin::new();
        let mut pad = ButtonPad::new(scroll.clone(), select.clone());

        assert_eq!(pad.poll(0).unwrap(), None);

        scroll.press();
        assert_eq!(
            pad.poll(200).unwrap(),
            Some(NavigationEvent::Scroll(Direction::Forward))
        );
        scroll.release();

        select.press();
        assert_eq!(pad.poll(400).unwrap(), Some(NavigationEvent::Select));
    }

    #[test]
    fn test_pad_shared_lockout() {
        let scroll = MockPin::new();
        let select = MockPin::new();
        let mut pad = ButtonPad::new(scroll.clone(), select.clone());

        scroll.press();
        assert!(pad.poll(1000).unwrap().is_some());
        // A different button inside the window is still dropped
        select.press();
        assert_eq!(pad.poll(1040).unwrap(), None);
    }

    #[test]
    fn test_pad_optional_buttons() {
        let scroll = MockPin::new();
        let select = MockPin::new();
        let reverse = MockPin::new();
        let back = MockPin::new();
        let mut pad = ButtonPad::new(scroll, select.clone())
            .with_reverse(reverse.clone())
            .with_back(back.clone());

        reverse.press();
        assert_eq!(
            pad.poll(200).unwrap(),
            Some(NavigationEvent::Scroll(Direction::Backward))
        );

        // Back takes precedence over select in the same poll
        back.press();
        select.press();
        assert_eq!(pad.poll(400).unwrap(), Some(NavigationEvent::Back));
    }
}
