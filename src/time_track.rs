use embassy_time::Duration;

use crate::{
    Error, Gps, Result, Rtc, RtcTime,
    hardware::write_rtc_time,
    shared_constants::{GPS_RESYNC_SECONDS, ONE_DAY_MS},
};

/// Outcome of the GPS step of [`TimeTrack::update`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsSync {
    /// Fewer than `GPS_RESYNC_SECONDS` RTC seconds since the last resync.
    NotDue,
    /// The time was taken from GPS and written back to the RTC.
    Synced,
    /// A resync was due but no fix was available; retried on the next update.
    Lost,
}

/// The internal millisecond clock.
///
/// The periodic tick advances it between RTC seconds. Whenever the RTC's second changes it
/// snaps to the RTC, and once every `GPS_RESYNC_SECONDS` changes both are set from GPS.
#[derive(Debug, Default)]
pub struct TimeTrack {
    time_ms: u32,
    prev_rtc: RtcTime,
    rtc_changes: u16,
    check_rtc: bool,
    gps_lost: bool,
}

impl TimeTrack {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time_ms: 0,
            prev_rtc: RtcTime::new(0, 0, 0),
            rtc_changes: 0,
            check_rtc: false,
            gps_lost: false,
        }
    }

    /// Load the time from the RTC and restart the resync count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeInit`] if the RTC cannot be read.
    pub fn init<R: Rtc>(&mut self, rtc: &mut R) -> Result<()> {
        self.sync_to_rtc(rtc)?;
        self.rtc_changes = 0;
        Ok(())
    }

    /// Load the time from the RTC, keeping the resync count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeInit`] if the RTC cannot be read.
    pub fn sync_to_rtc<R: Rtc>(&mut self, rtc: &mut R) -> Result<()> {
        let rtc_time = rtc.time().map_err(|_| Error::TimeInit)?;
        self.prev_rtc = rtc_time;
        self.time_ms = rtc_time.to_ms() % ONE_DAY_MS;
        Ok(())
    }

    /// Advance by `period` and arm the next RTC check. Called from the periodic tick.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        clippy::cast_possible_truncation,
        reason = "Summed in u64 and reduced below one day before the cast."
    )]
    pub fn periodic(&mut self, period: Duration) {
        let elapsed = u64::from(self.time_ms) + period.as_millis();
        self.time_ms = (elapsed % u64::from(ONE_DAY_MS)) as u32;
        self.check_rtc = true;
    }

    /// Snap to the RTC if its second changed, then resync from GPS when due.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RtcUnavailable`] if the RTC cannot be read or written. The tracked time
    /// keeps free-running from the tick.
    pub fn update<R: Rtc, G: Gps>(&mut self, rtc: &mut R, gps: &mut G) -> Result<GpsSync> {
        if self.check_rtc {
            self.check_rtc = false;
            let rtc_time = rtc.time().map_err(|_| Error::RtcUnavailable)?;
            if rtc_time != self.prev_rtc {
                self.time_ms = rtc_time.to_ms() % ONE_DAY_MS;
                self.prev_rtc = rtc_time;
                self.rtc_changes = self.rtc_changes.saturating_add(1);
            }
        }

        if self.rtc_changes < GPS_RESYNC_SECONDS {
            return Ok(GpsSync::NotDue);
        }

        if !gps.is_connected() {
            if !self.gps_lost {
                #[cfg(feature = "defmt")]
                defmt::warn!("GPS resync due but no fix");
            }
            self.gps_lost = true;
            return Ok(GpsSync::Lost);
        }

        self.gps_lost = false;
        let gps_time = RtcTime::from_hhmmss(gps.utc_time());
        let gps_ms = gps_time.to_ms() % ONE_DAY_MS;
        self.time_ms = gps_ms;
        write_rtc_time(rtc, gps_ms).map_err(|_| Error::RtcUnavailable)?;
        self.prev_rtc = RtcTime::from_ms(gps_ms);
        self.rtc_changes = 0;
        #[cfg(feature = "defmt")]
        defmt::info!("GPS resync to {}", gps_ms);
        Ok(GpsSync::Synced)
    }

    #[must_use]
    pub const fn time_ms(&self) -> u32 {
        self.time_ms
    }

    #[must_use]
    pub const fn gps_lost(&self) -> bool {
        self.gps_lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlarmId;

    #[derive(Default)]
    struct FakeRtc {
        now: RtcTime,
        reads: usize,
    }

    impl Rtc for FakeRtc {
        fn set_time(&mut self, time: RtcTime) -> Result<()> {
            self.now = time;
            Ok(())
        }
        fn time(&mut self) -> Result<RtcTime> {
            self.reads += 1;
            Ok(self.now)
        }
        fn set_day(&mut self, _day: u8) {}
        fn day(&mut self) -> u8 {
            1
        }
        fn set_month(&mut self, _month: u8) {}
        fn month(&mut self) -> u8 {
            1
        }
        fn set_alarm(&mut self, _id: AlarmId, _time: RtcTime) {}
        fn alarm(&mut self, _id: AlarmId) -> RtcTime {
            RtcTime::default()
        }
        fn enable_alarm(&mut self, _id: AlarmId, _enabled: bool) {}
        fn alarm_enabled(&mut self, _id: AlarmId) -> bool {
            false
        }
        fn set_calibration(&mut self, _value: i32) -> bool {
            true
        }
        fn calibration(&mut self) -> Result<i32> {
            Ok(0)
        }
    }

    struct NoGps;

    impl Gps for NoGps {
        fn utc_time(&mut self) -> f32 {
            0.0
        }
        fn is_connected(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn rtc_is_only_read_after_a_tick() {
        let mut rtc = FakeRtc::default();
        let mut track = TimeTrack::new();
        track.init(&mut rtc).unwrap();
        assert_eq!(rtc.reads, 1);

        assert_eq!(track.update(&mut rtc, &mut NoGps), Ok(GpsSync::NotDue));
        assert_eq!(rtc.reads, 1);

        track.periodic(Duration::from_millis(167));
        track.update(&mut rtc, &mut NoGps).unwrap();
        assert_eq!(rtc.reads, 2);
    }

    #[test]
    fn unchanged_rtc_second_keeps_sub_second_time() {
        let mut rtc = FakeRtc {
            now: RtcTime::new(8, 0, 0),
            ..FakeRtc::default()
        };
        let mut track = TimeTrack::new();
        track.init(&mut rtc).unwrap();
        track.periodic(Duration::from_millis(500));
        track.update(&mut rtc, &mut NoGps).unwrap();
        assert_eq!(track.time_ms(), 28_800_500);
    }

    #[test]
    fn resync_counts_rtc_second_changes() {
        let mut rtc = FakeRtc::default();
        let mut track = TimeTrack::new();
        track.init(&mut rtc).unwrap();
        for second in 1..=u32::from(GPS_RESYNC_SECONDS) {
            rtc.now = RtcTime::from_ms(second * 1000);
            track.periodic(Duration::from_millis(0));
            let sync = track.update(&mut rtc, &mut NoGps).unwrap();
            if second < u32::from(GPS_RESYNC_SECONDS) {
                assert_eq!(sync, GpsSync::NotDue);
            } else {
                assert_eq!(sync, GpsSync::Lost);
            }
        }
        assert!(track.gps_lost());
    }
}
