use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// The three `*Init` variants are fatal: they come from collaborator handshakes at construction
/// or from losing the RTC while resynchronising. Everything else is a local, recoverable
/// failure that leaves state unchanged.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[display("Event queue is full; event dropped")]
    QueueFull,

    #[display("Event queue is empty")]
    QueueEmpty,

    #[display("Volume {_0} is outside the supported range")]
    VolumeOutOfRange(#[error(not(source))] u8),

    #[display("RTC rejected calibration value {_0}")]
    CalibrationRejected(#[error(not(source))] i32),

    #[display("RTC does not provide a calibration value")]
    CalibrationUnavailable,

    #[display("RTC did not respond")]
    RtcUnavailable,

    #[display("Buzzer output could not be configured")]
    BuzzerUnavailable,

    #[display("Software driver initialization failed")]
    SoftwareInit,

    #[display("Display initialization failed")]
    DisplayInit,

    #[display("Time tracking initialization failed")]
    TimeInit,
}

impl Error {
    /// The status tag latched into the clock's `error_code` for this error.
    #[must_use]
    pub const fn status(self) -> ClockStatus {
        match self {
            Self::SoftwareInit => ClockStatus::SoftwareInit,
            Self::DisplayInit => ClockStatus::DisplayInit,
            Self::TimeInit => ClockStatus::TimeInit,
            Self::QueueFull
            | Self::QueueEmpty
            | Self::VolumeOutOfRange(_)
            | Self::CalibrationRejected(_)
            | Self::CalibrationUnavailable
            | Self::RtcUnavailable
            | Self::BuzzerUnavailable => ClockStatus::Fail,
        }
    }
}

/// Latched clock status shown to the user through the row 1 `!` glyph.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockStatus {
    #[default]
    Ok,
    Fail,
    SoftwareInit,
    DisplayInit,
    TimeInit,
}

impl ClockStatus {
    /// Fatal statuses halt the clock through the fatal handler.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::SoftwareInit | Self::DisplayInit | Self::TimeInit)
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}
