//! GPS fix data, laid out like an EXIF GPS IFD.
//!
//! See: <http://www.awaresystems.be/imaging/tiff/tifftags/privateifd/gps.html>

use fraction::GenericFraction;

/// An exact `numerator / denominator` pair, as stored in the GPS record.
///
/// This keeps the raw integers around. Use [`Rational::exact`] if you need
/// the value without rounding, or [`Rational::to_f64`] if you don't.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// The exact value of this rational.
    ///
    /// A zero denominator gives `fraction`'s infinity (or NaN for `0/0`).
    pub fn exact(&self) -> GenericFraction<u32> {
        GenericFraction::new(self.numerator, self.denominator)
    }

    /// The value as a float, or `None` when the denominator is zero.
    pub fn to_f64(&self) -> Option<f64> {
        if self.denominator == 0 {
            return None;
        }

        Some(f64::from(self.numerator) / f64::from(self.denominator))
    }
}

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// The GPS tags the WG-1 records, with their EXIF GPS IFD ids.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum GpsTag {
    VersionId,
    LatitudeRef,
    Latitude,
    LongitudeRef,
    Longitude,
    AltitudeRef,
    Altitude,
    TimeStamp,
    Satellites,
    Status,
    MeasureMode,
    MapDatum,
    DateStamp,
}

impl GpsTag {
    /// Every tag, in record order.
    pub const ALL: [GpsTag; 13] = [
        GpsTag::VersionId,
        GpsTag::LatitudeRef,
        GpsTag::Latitude,
        GpsTag::LongitudeRef,
        GpsTag::Longitude,
        GpsTag::AltitudeRef,
        GpsTag::Altitude,
        GpsTag::TimeStamp,
        GpsTag::Satellites,
        GpsTag::Status,
        GpsTag::MeasureMode,
        GpsTag::MapDatum,
        GpsTag::DateStamp,
    ];

    /// The tag's id in an EXIF GPS IFD.
    pub const fn id(self) -> u16 {
        match self {
            GpsTag::VersionId => 0,
            GpsTag::LatitudeRef => 1,
            GpsTag::Latitude => 2,
            GpsTag::LongitudeRef => 3,
            GpsTag::Longitude => 4,
            GpsTag::AltitudeRef => 5,
            GpsTag::Altitude => 6,
            GpsTag::TimeStamp => 7,
            GpsTag::Satellites => 8,
            GpsTag::Status => 9,
            GpsTag::MeasureMode => 10,
            GpsTag::MapDatum => 18,
            GpsTag::DateStamp => 29,
        }
    }
}

impl std::fmt::Display for GpsTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GpsTag::VersionId => "GPSVersionID",
            GpsTag::LatitudeRef => "GPSLatitudeRef",
            GpsTag::Latitude => "GPSLatitude",
            GpsTag::LongitudeRef => "GPSLongitudeRef",
            GpsTag::Longitude => "GPSLongitude",
            GpsTag::AltitudeRef => "GPSAltitudeRef",
            GpsTag::Altitude => "GPSAltitude",
            GpsTag::TimeStamp => "GPSTimeStamp",
            GpsTag::Satellites => "GPSSatellites",
            GpsTag::Status => "GPSStatus",
            GpsTag::MeasureMode => "GPSMeasureMode",
            GpsTag::MapDatum => "GPSMapDatum",
            GpsTag::DateStamp => "GPSDateStamp",
        };

        f.write_str(name)
    }
}

/// One decoded GPS field value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GpsValue {
    Bytes([u8; 4]),
    Byte(u8),
    Rational(Rational),
    Rationals([Rational; 3]),
    Ascii(String),
}

impl std::fmt::Display for GpsValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpsValue::Bytes([a, b, c, d]) => write!(f, "{a} {b} {c} {d}"),
            GpsValue::Byte(b) => write!(f, "{b}"),
            GpsValue::Rational(r) => write!(f, "{r}"),
            GpsValue::Rationals([a, b, c]) => write!(f, "{a} {b} {c}"),
            GpsValue::Ascii(s) => write!(f, "{s:?}"),
        }
    }
}

/// A complete GPS fix from the camera.
///
/// This only exists when the fix was good enough to have a latitude
/// reference. Strings are already trimmed of trailing spaces and NULs.
///
/// The camera writes those strings as ASCII, but they're decoded leniently:
/// a byte that isn't valid UTF-8 turns into U+FFFD instead of failing the
/// whole record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GpsInfo {
    pub version: [u8; 4],
    /// `N` or `S`.
    pub latitude_ref: String,
    /// Degrees, minutes, seconds.
    pub latitude: [Rational; 3],
    /// `E` or `W`.
    pub longitude_ref: String,
    /// Degrees, minutes, seconds.
    pub longitude: [Rational; 3],
    /// `0` is above sea level, `1` is below.
    pub altitude_ref: u8,
    /// Meters.
    pub altitude: Rational,
    /// UTC hours, minutes, seconds.
    pub time_stamp: [Rational; 3],
    pub satellites: String,
    /// `A` when measuring, `V` when not.
    pub status: String,
    /// `2` or `3`, for 2D or 3D measurement.
    pub measure_mode: String,
    /// Usually `WGS-84`.
    pub map_datum: String,
    /// `YYYY:MM:DD`, in UTC.
    pub date_stamp: String,
}

impl GpsInfo {
    /// Grabs a single field by tag.
    pub fn field(&self, tag: GpsTag) -> GpsValue {
        match tag {
            GpsTag::VersionId => GpsValue::Bytes(self.version),
            GpsTag::LatitudeRef => GpsValue::Ascii(self.latitude_ref.clone()),
            GpsTag::Latitude => GpsValue::Rationals(self.latitude),
            GpsTag::LongitudeRef => GpsValue::Ascii(self.longitude_ref.clone()),
            GpsTag::Longitude => GpsValue::Rationals(self.longitude),
            GpsTag::AltitudeRef => GpsValue::Byte(self.altitude_ref),
            GpsTag::Altitude => GpsValue::Rational(self.altitude),
            GpsTag::TimeStamp => GpsValue::Rationals(self.time_stamp),
            GpsTag::Satellites => GpsValue::Ascii(self.satellites.clone()),
            GpsTag::Status => GpsValue::Ascii(self.status.clone()),
            GpsTag::MeasureMode => GpsValue::Ascii(self.measure_mode.clone()),
            GpsTag::MapDatum => GpsValue::Ascii(self.map_datum.clone()),
            GpsTag::DateStamp => GpsValue::Ascii(self.date_stamp.clone()),
        }
    }

    /// All fields, in record order.
    pub fn fields(&self) -> impl Iterator<Item = (GpsTag, GpsValue)> + '_ {
        GpsTag::ALL.into_iter().map(|tag| (tag, self.field(tag)))
    }
}

impl std::fmt::Display for GpsInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (tag, value) in self.fields() {
            writeln!(f, "{tag} ({}): {value}", tag.id())?;
        }

        Ok(())
    }
}
