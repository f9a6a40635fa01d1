//! Local time of a city
//!
//! The city's wall-clock time is derived from the shared clock tick and the
//! provider's timezone shift. The instant is shifted by the city offset and
//! by the viewer's offset (minutes, UTC minus local, positive west of
//! Greenwich), then rendered on the viewer's wall clock. The two viewer terms
//! cancel, leaving the city's local time.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use domain::DomainError;

use crate::services::clock::ClockTick;

/// Output format: `hh:mm:ss AM|PM`
const TIME_FORMAT: &str = "%I:%M:%S %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Viewer {
    Fixed(FixedOffset),
    /// Machine timezone, resolved for every instant so DST changes apply
    Local,
}

/// Formats a city's local time for a particular viewer timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeComputer {
    viewer: Viewer,
}

impl LocalTimeComputer {
    /// Computer for a viewer at a fixed offset
    #[must_use]
    pub const fn for_viewer(viewer: FixedOffset) -> Self {
        Self {
            viewer: Viewer::Fixed(viewer),
        }
    }

    /// Computer for the machine's local timezone
    ///
    /// The offset is looked up for each computed instant.
    #[must_use]
    pub const fn local() -> Self {
        Self {
            viewer: Viewer::Local,
        }
    }

    /// Computer for a viewer on UTC
    #[must_use]
    pub fn utc() -> Self {
        Self::for_viewer(Utc.fix())
    }

    /// Viewer offset at `utc_millis` in minutes, UTC minus local
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the instant is out of range.
    pub fn viewer_offset_minutes_at(&self, utc_millis: i64) -> Result<i64, DomainError> {
        Ok(-i64::from(self.viewer_at(utc_millis)?.local_minus_utc()) / 60)
    }

    fn viewer_at(&self, utc_millis: i64) -> Result<FixedOffset, DomainError> {
        match self.viewer {
            Viewer::Fixed(offset) => Ok(offset),
            Viewer::Local => DateTime::from_timestamp_millis(utc_millis)
                .map(|at| *at.with_timezone(&Local).offset())
                .ok_or_else(|| DomainError::InvalidDateTime(format!("{utc_millis} ms is out of range"))),
        }
    }

    /// Format the local time for `utc_millis` in a zone `timezone_offset_seconds` from UTC
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the shifted instant is out of range.
    pub fn compute(&self, utc_millis: i64, timezone_offset_seconds: i32) -> Result<String, DomainError> {
        let viewer = self.viewer_at(utc_millis)?;
        let viewer_minutes = -i64::from(viewer.local_minus_utc()) / 60;
        let local_millis = utc_millis
            .checked_add(i64::from(timezone_offset_seconds) * 1000)
            .and_then(|ms| ms.checked_add(viewer_minutes * 60_000))
            .ok_or_else(|| DomainError::InvalidDateTime(format!("{utc_millis} ms overflows")))?;

        let instant = DateTime::from_timestamp_millis(local_millis)
            .ok_or_else(|| DomainError::InvalidDateTime(format!("{local_millis} ms is out of range")))?;

        Ok(instant.with_timezone(&viewer).format(TIME_FORMAT).to_string())
    }

    /// Format the local time at a clock tick
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the shifted instant is out of range.
    pub fn at_tick(&self, tick: ClockTick, timezone_offset_seconds: i32) -> Result<String, DomainError> {
        self.compute(tick.utc_millis(), timezone_offset_seconds)
    }
}

impl Default for LocalTimeComputer {
    fn default() -> Self {
        Self::local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(seconds_east: i32) -> LocalTimeComputer {
        LocalTimeComputer::for_viewer(FixedOffset::east_opt(seconds_east).unwrap())
    }

    #[test]
    fn epoch_on_utc_viewer_is_midnight() {
        assert_eq!(LocalTimeComputer::utc().compute(0, 0).unwrap(), "12:00:00 AM");
    }

    #[test]
    fn city_offset_is_applied() {
        // 2023-11-14T22:13:20Z
        let utc = 1_700_000_000_000;
        assert_eq!(LocalTimeComputer::utc().compute(utc, 3600).unwrap(), "11:13:20 PM");
        assert_eq!(LocalTimeComputer::utc().compute(utc, 19_800).unwrap(), "03:43:20 AM");
        assert_eq!(LocalTimeComputer::utc().compute(utc, -25_200).unwrap(), "03:13:20 PM");
    }

    #[test]
    fn viewer_offset_cancels_out() {
        let utc = 1_700_000_000_000;
        for seconds_east in [-28_800, -3600, 0, 3600, 19_800, 45_900] {
            assert_eq!(
                viewer(seconds_east).compute(utc, 3600).unwrap(),
                "11:13:20 PM",
                "viewer at {seconds_east}s"
            );
        }
    }

    #[test]
    fn viewer_offset_minutes_follows_west_positive_convention() {
        assert_eq!(viewer(19_800).viewer_offset_minutes_at(0).unwrap(), -330);
        assert_eq!(viewer(-18_000).viewer_offset_minutes_at(0).unwrap(), 300);
        assert_eq!(LocalTimeComputer::utc().viewer_offset_minutes_at(0).unwrap(), 0);
    }

    #[test]
    fn local_viewer_offset_is_resolved_per_instant() {
        let local = LocalTimeComputer::local();
        // 2023-01-15 and 2023-07-15, on either side of any DST switch
        for utc in [1_673_740_800_000_i64, 1_689_379_200_000] {
            let at = DateTime::from_timestamp_millis(utc).unwrap().with_timezone(&Local);
            let expected = -i64::from(at.offset().local_minus_utc()) / 60;
            assert_eq!(local.viewer_offset_minutes_at(utc).unwrap(), expected);

            // The city's time does not depend on the viewer
            assert_eq!(
                local.compute(utc, 3600).unwrap(),
                LocalTimeComputer::utc().compute(utc, 3600).unwrap()
            );
        }
    }

    #[test]
    fn noon_renders_pm() {
        assert_eq!(LocalTimeComputer::utc().compute(12 * 3_600_000, 0).unwrap(), "12:00:00 PM");
    }

    #[test]
    fn at_tick_matches_compute() {
        let computer = viewer(3600);
        let tick = ClockTick::from_millis(1_700_000_000_000);
        assert_eq!(
            computer.at_tick(tick, -3600).unwrap(),
            computer.compute(1_700_000_000_000, -3600).unwrap()
        );
    }

    #[test]
    fn out_of_range_is_error() {
        let err = LocalTimeComputer::utc().compute(i64::MAX, 3600).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateTime(_)));

        let err = LocalTimeComputer::utc().compute(i64::MAX - 1, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateTime(_)));
    }
}
