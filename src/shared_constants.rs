use embassy_time::Duration;

/// Milliseconds in one day; every millisecond-of-day value is kept below this.
pub const ONE_DAY_MS: u32 = 86_400_000;
/// Last millisecond of the morning. Times at or after this render as PM.
pub const PM_BOUNDARY_MS: u32 = 43_200_000 - 1;

pub const ONE_SECOND_MS: u32 = 1_000;
pub const ONE_MINUTE_MS: u32 = 60_000;
pub const ONE_HOUR_MS: u32 = 3_600_000;

/// Period of the interrupt that drives `ClockController::timer_callback` (about 6 Hz).
pub const TICK_PERIOD: Duration = Duration::from_millis(167);
/// Every `BLINK_DIVIDER`-th tick toggles the edit-cursor blink (about 2 Hz).
pub const BLINK_DIVIDER: u8 = 3;
/// A fired alarm or timer sounds for this long unless cancelled.
pub const ALARM_SILENCE_AFTER: Duration = Duration::from_secs(30);

pub const EVENT_QUEUE_CAPACITY: usize = 5;

/// Number of RTC second changes between GPS resynchronisations.
pub const GPS_RESYNC_SECONDS: u16 = 3_600;
/// The RTC calendar restarts at day 1 on every write; beyond this many days it is stale.
pub const MAX_DAYS_SINCE_SET: u8 = 5;

pub const LOW_BRIGHTNESS: u8 = 30;
pub const MEDIUM_BRIGHTNESS: u8 = 130;
pub const HIGH_BRIGHTNESS: u8 = 255;

pub const MIN_VOLUME: u8 = 10;
pub const MAX_VOLUME: u8 = 100;

/// Calibration step for short and long presses in calibration mode.
pub const CALIBRATION_STEP: i32 = 1;
pub const CALIBRATION_LARGE_STEP: i32 = 10;

/// Digits in the widest format (Trad12H, including its AM/PM flag).
pub const MAX_DIGITS: usize = 7;
