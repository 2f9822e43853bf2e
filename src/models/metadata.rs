use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{
    gps::{GpsInfo, Rational},
    thumbnail::Thumbnail,
};

/// Metadata pulled from a WG-1 movie.
///
/// This is read-only once created. The `gps_*` methods are computed from the
/// raw [`GpsInfo`] on each call, and all return `None` when the camera had no
/// GPS fix.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metadata {
    camera_model: String,
    captured_at: NaiveDateTime,
    thumbnail: Thumbnail,
    gps: Option<GpsInfo>,
}

impl Metadata {
    pub fn new(
        camera_model: impl Into<String>,
        captured_at: NaiveDateTime,
        thumbnail: Thumbnail,
        gps: Option<GpsInfo>,
    ) -> Self {
        Self {
            camera_model: camera_model.into(),
            captured_at,
            thumbnail,
            gps,
        }
    }

    /// The camera's model name.
    pub fn camera_model(&self) -> &str {
        &self.camera_model
    }

    /// When recording started.
    ///
    /// This is local time wherever the camera's world clock was set, so
    /// there's no offset attached. For UTC, see [`Metadata::gps_datetime`].
    pub fn captured_at(&self) -> NaiveDateTime {
        self.captured_at
    }

    pub fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }

    /// The raw GPS fields, if the camera had a fix.
    pub fn gps(&self) -> Option<&GpsInfo> {
        self.gps.as_ref()
    }

    /// The GPS IFD version, like `2.3.0.0`.
    pub fn gps_version_id(&self) -> Option<String> {
        let [a, b, c, d] = self.gps.as_ref()?.version;
        Some(format!("{a}.{b}.{c}.{d}"))
    }

    /// Latitude in decimal degrees. South is negative.
    pub fn gps_latitude(&self) -> Option<f64> {
        let gps = self.gps.as_ref()?;
        let deg = to_degrees(&gps.latitude)?;

        Some(if gps.latitude_ref == "S" { -deg } else { deg })
    }

    /// Longitude in decimal degrees. West is negative.
    pub fn gps_longitude(&self) -> Option<f64> {
        let gps = self.gps.as_ref()?;
        let deg = to_degrees(&gps.longitude)?;

        Some(if gps.longitude_ref == "W" { -deg } else { deg })
    }

    /// Altitude in meters. Below sea level is negative.
    pub fn gps_altitude(&self) -> Option<f64> {
        let gps = self.gps.as_ref()?;
        let altitude = gps.altitude.to_f64()?;

        Some(if gps.altitude_ref == 1 {
            -altitude
        } else {
            altitude
        })
    }

    /// Info on the satellites used for the fix.
    ///
    /// The format isn't specified anywhere. It's probably the satellite count.
    pub fn gps_satellites(&self) -> Option<&str> {
        self.gps.as_ref().map(|gps| gps.satellites.as_str())
    }

    /// The receiver's status: `A` when measuring, `V` when not.
    pub fn gps_status(&self) -> Option<&str> {
        self.gps.as_ref().map(|gps| gps.status.as_str())
    }

    /// `2` for a 2D fix, `3` for 3D.
    pub fn gps_measure_mode(&self) -> Option<&str> {
        self.gps.as_ref().map(|gps| gps.measure_mode.as_str())
    }

    /// The geodetic datum, like `WGS-84`.
    pub fn gps_map_datum(&self) -> Option<&str> {
        self.gps.as_ref().map(|gps| gps.map_datum.as_str())
    }

    /// When the fix was taken, in UTC.
    ///
    /// Both the date and the time come from the GPS record, not the camera's
    /// clock. Every component is truncated to a whole number, seconds
    /// included. The exact rationals are still available through
    /// [`Metadata::gps`].
    pub fn gps_datetime(&self) -> Option<DateTime<Utc>> {
        let gps = self.gps.as_ref()?;

        let date = NaiveDate::parse_from_str(&gps.date_stamp.replace(':', "/"), "%Y/%m/%d")
            .inspect_err(|e| {
                tracing::debug!("gps date stamp `{}` didn't parse. err: {e}", gps.date_stamp)
            })
            .ok()?;

        let [h, m, s] = gps.time_stamp;
        let time = NaiveTime::from_hms_opt(whole(h)?, whole(m)?, whole(s)?)?;

        Some(NaiveDateTime::new(date, time).and_utc())
    }
}

impl std::fmt::Display for Metadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "camera model: {}", self.camera_model)?;
        writeln!(f, "captured at: {}", self.captured_at)?;
        writeln!(f, "thumbnail: {} bytes", self.thumbnail.len())?;

        match self.gps {
            Some(ref gps) => write!(f, "{gps}"),
            None => writeln!(f, "gps: no fix"),
        }
    }
}

/// `deg + min / 60 + sec / 3600`.
fn to_degrees([d, m, s]: &[Rational; 3]) -> Option<f64> {
    Some(d.to_f64()? + m.to_f64()? / 60.0 + s.to_f64()? / 3600.0)
}

fn whole(r: Rational) -> Option<u32> {
    r.numerator.checked_div(r.denominator)
}
