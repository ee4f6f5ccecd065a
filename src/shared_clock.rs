use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use crate::{BuzzerOutput, ClockController, DisplayPanel, Gps, Rtc};

/// A [`ClockController`] that the periodic interrupt and the main loop can both reach.
///
/// Each call runs inside a critical section, so a tick never lands in the middle of an update.
///
/// ```ignore
/// let shared = SharedClock::new(ClockController::new(&EVENTS, collaborators, halt)?);
/// // In the ~6 Hz timer interrupt:
/// shared.tick();
/// // In the main loop:
/// shared.update();
/// ```
pub struct SharedClock<'q, D, R, G, B>
where
    D: DisplayPanel,
    R: Rtc,
    G: Gps,
    B: BuzzerOutput,
{
    controller: Mutex<CriticalSectionRawMutex, RefCell<ClockController<'q, D, R, G, B>>>,
}

impl<'q, D, R, G, B> SharedClock<'q, D, R, G, B>
where
    D: DisplayPanel,
    R: Rtc,
    G: Gps,
    B: BuzzerOutput,
{
    #[must_use]
    pub const fn new(controller: ClockController<'q, D, R, G, B>) -> Self {
        Self {
            controller: Mutex::new(RefCell::new(controller)),
        }
    }

    /// Forward the periodic tick to [`ClockController::timer_callback`].
    pub fn tick(&self) {
        self.with(ClockController::timer_callback);
    }

    /// Run one [`ClockController::update`] pass.
    pub fn update(&self) {
        self.with(ClockController::update);
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<T>(&self, f: impl FnOnce(&mut ClockController<'q, D, R, G, B>) -> T) -> T {
        self.controller.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Give the controller back, e.g. to hand it to a different runner.
    pub fn into_inner(self) -> ClockController<'q, D, R, G, B> {
        self.controller.into_inner().into_inner()
    }
}
