use crate::{
    BuzzerOutput, Error, Result,
    shared_constants::{MAX_VOLUME, MIN_VOLUME},
};

/// Volume-aware wrapper over a [`BuzzerOutput`].
///
/// `start` and `stop` are idempotent. Changing the volume while sounding stops the output,
/// applies the level, then starts it again.
pub struct Buzzer<B: BuzzerOutput> {
    output: B,
    volume: u8,
    is_active: bool,
}

impl<B: BuzzerOutput> Buzzer<B> {
    #[must_use]
    pub const fn new(output: B) -> Self {
        Self {
            output,
            volume: MIN_VOLUME,
            is_active: false,
        }
    }

    /// Run the output's handshake and set the minimum volume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SoftwareInit`] if the output cannot be configured.
    pub fn init(&mut self) -> Result<()> {
        self.output.init().map_err(|_| Error::SoftwareInit)?;
        self.is_active = false;
        self.set_volume_min().map_err(|_| Error::SoftwareInit)
    }

    pub fn start(&mut self) {
        if !self.is_active {
            self.is_active = true;
            self.output.start();
        }
    }

    pub fn stop(&mut self) {
        if self.is_active {
            self.is_active = false;
            self.output.stop();
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::VolumeOutOfRange`] for values outside `MIN_VOLUME..=MAX_VOLUME`, leaving
    /// the volume unchanged, or the output's error if the level cannot be applied.
    pub fn set_volume(&mut self, volume: u8) -> Result<()> {
        if !(MIN_VOLUME..=MAX_VOLUME).contains(&volume) {
            return Err(Error::VolumeOutOfRange(volume));
        }
        if self.is_active {
            self.output.stop();
            self.output.set_output_level(volume)?;
            self.output.start();
        } else {
            self.output.set_output_level(volume)?;
        }
        self.volume = volume;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`Self::set_volume`].
    pub fn set_volume_max(&mut self) -> Result<()> {
        self.set_volume(MAX_VOLUME)
    }

    /// # Errors
    ///
    /// See [`Self::set_volume`].
    pub fn set_volume_min(&mut self) -> Result<()> {
        self.set_volume(MIN_VOLUME)
    }

    /// # Errors
    ///
    /// Returns [`Error::VolumeOutOfRange`] at the maximum.
    pub fn volume_up(&mut self) -> Result<()> {
        self.set_volume(self.volume.saturating_add(1))
    }

    /// # Errors
    ///
    /// Returns [`Error::VolumeOutOfRange`] at the minimum.
    pub fn volume_down(&mut self) -> Result<()> {
        self.set_volume(self.volume.saturating_sub(1))
    }

    #[must_use]
    pub const fn volume(&self) -> u8 {
        self.volume
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// The wrapped output, e.g. for inspection in tests.
    #[must_use]
    pub const fn output(&self) -> &B {
        &self.output
    }
}
