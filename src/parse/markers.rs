//! Pulls the four payload fragments out of the camera's `JUNK` chunk.
//!
//! The chunk looks roughly like this, with arbitrary filler in between:
//!
//! ```text
//! PENTAX Optio WG-1 GPS ... Mon Jan 02 03:04:05 2012 ... FF D8 .. FF D9 ... GPS_<130 bytes>
//! ```
//!
//! Each marker is searched for once, strictly after the previous one, so the
//! scan is linear in the chunk's length.

use chrono::NaiveDateTime;
use memchr::memmem;

use super::gps_record::GPS_RECORD_LEN;

/// The device identifier the camera writes first.
pub const CAMERA_MODEL: &str = "PENTAX Optio WG-1 GPS";

const JPEG_SOI: &[u8] = &[0xFF, 0xD8];
const JPEG_EOI: &[u8] = &[0xFF, 0xD9];
const GPS_MARKER: &[u8] = b"GPS_";

/// The shape of the capture timestamp, e.g. `Mon Jan 02 03:04:05 2012`.
///
/// `A` is an uppercase ASCII letter, `a` is lowercase, `0` is a digit.
/// Everything else must match exactly.
const TIMESTAMP_SHAPE: &[u8; 24] = b"Aaa Aaa 00 00:00:00 0000";

/// The raw fragments found in a `JUNK` chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragments<'a> {
    pub camera_model: &'a str,
    pub captured_at: NaiveDateTime,
    pub thumbnail: &'a [u8],
    pub gps_record: &'a [u8; GPS_RECORD_LEN],
}

impl<'a> Fragments<'a> {
    /// Scans `junk` for the model, timestamp, thumbnail, and GPS record, in
    /// that order.
    ///
    /// Returns `None` if any of them can't be found, which just means the
    /// file wasn't made by the WG-1.
    #[tracing::instrument(skip_all)]
    pub fn scan(junk: &'a [u8]) -> Option<Self> {
        // 1. camera model
        let model_start = memmem::find(junk, CAMERA_MODEL.as_bytes())
            .or_else(|| none("no camera model marker"))?;
        let mut pos = model_start + CAMERA_MODEL.len();
        tracing::trace!("camera model at offset {model_start}");

        // 2. timestamp
        let (ts_start, captured_at) =
            find_timestamp(&junk[pos..]).or_else(|| none("no capture timestamp"))?;
        pos += ts_start + TIMESTAMP_SHAPE.len();
        tracing::trace!("capture timestamp `{captured_at}` ends at offset {pos}");

        // 3. thumbnail, through the first EOI after its SOI
        let soi = pos + memmem::find(&junk[pos..], JPEG_SOI).or_else(|| none("no jpeg soi"))?;
        let body = soi + JPEG_SOI.len();
        let eoi = body + memmem::find(&junk[body..], JPEG_EOI).or_else(|| none("no jpeg eoi"))?;
        pos = eoi + JPEG_EOI.len();
        let thumbnail = &junk[soi..pos];
        tracing::trace!("thumbnail spans {soi}..{pos}");

        // 4. gps record
        let marker =
            pos + memmem::find(&junk[pos..], GPS_MARKER).or_else(|| none("no `GPS_` marker"))?;
        let record_start = marker + GPS_MARKER.len();
        let gps_record: &[u8; GPS_RECORD_LEN] = junk
            .get(record_start..record_start + GPS_RECORD_LEN)
            .and_then(|r| r.try_into().ok())
            .or_else(|| none("gps record is cut short"))?;

        Some(Self {
            camera_model: CAMERA_MODEL,
            captured_at,
            thumbnail,
            gps_record,
        })
    }
}

/// Finds the first window shaped like a capture timestamp that also parses.
///
/// Returns its offset in `haystack` alongside the parsed time.
fn find_timestamp(haystack: &[u8]) -> Option<(usize, NaiveDateTime)> {
    haystack
        .windows(TIMESTAMP_SHAPE.len())
        .enumerate()
        .filter(|(_, window)| has_timestamp_shape(window))
        .find_map(|(i, window)| parse_timestamp(window).map(|ts| (i, ts)))
}

fn has_timestamp_shape(window: &[u8]) -> bool {
    window
        .iter()
        .zip(TIMESTAMP_SHAPE)
        .all(|(&b, &shape)| match shape {
            b'A' => b.is_ascii_uppercase(),
            b'a' => b.is_ascii_lowercase(),
            b'0' => b.is_ascii_digit(),
            lit => b == lit,
        })
}

/// Parses `Www Mmm DD HH:MM:SS YYYY`.
///
/// The weekday is dropped before parsing. `chrono` refuses a weekday that
/// disagrees with the date, but the camera's clock is what it is.
fn parse_timestamp(window: &[u8]) -> Option<NaiveDateTime> {
    let s = core::str::from_utf8(window.get(4..)?).ok()?;
    NaiveDateTime::parse_from_str(s, "%b %d %H:%M:%S %Y")
        .inspect_err(|e| tracing::debug!("timestamp-shaped text `{s}` didn't parse. err: {e}"))
        .ok()
}

fn none<T>(why: &str) -> Option<T> {
    tracing::debug!("junk chunk not recognized: {why}");
    None
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{find_timestamp, Fragments, CAMERA_MODEL, GPS_RECORD_LEN};

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn junk(filler: &[u8], thumb: &[u8], record: &[u8]) -> Vec<u8> {
        let parts: [&[u8]; 10] = [
            filler,
            CAMERA_MODEL.as_bytes(),
            filler,
            b"Mon Jan 02 03:04:05 2012",
            filler,
            thumb,
            filler,
            b"GPS_",
            record,
            filler,
        ];
        parts.concat()
    }

    #[test]
    fn scans_all_fragments() {
        let record = [0x5A_u8; GPS_RECORD_LEN];
        let bytes = junk(b"\0\0\x01\n", &[0xFF, 0xD8, 0x00, 0xFF, 0xD9], &record);
        let frags = Fragments::scan(&bytes).expect("should be recognized");

        assert_eq!(frags.camera_model, CAMERA_MODEL);
        assert_eq!(frags.captured_at, dt(2012, 1, 2, 3, 4, 5));
        assert_eq!(frags.thumbnail, &[0xFF, 0xD8, 0x00, 0xFF, 0xD9]);
        assert_eq!(frags.gps_record, &record);
    }

    #[test]
    fn fragments_can_touch() {
        let record = [1_u8; GPS_RECORD_LEN];
        let bytes = junk(b"", &[0xFF, 0xD8, 0xFF, 0xD9], &record);
        let frags = Fragments::scan(&bytes).unwrap();
        assert_eq!(frags.thumbnail, &[0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(frags.gps_record, &record);
    }

    #[test]
    fn thumbnail_stops_at_first_eoi() {
        let record = [0_u8; GPS_RECORD_LEN];
        let thumb = [0xFF, 0xD8, 1, 0xFF, 0xD9, 2, 0xFF, 0xD9];
        let bytes = junk(b"..", &thumb, &record);
        let frags = Fragments::scan(&bytes).unwrap();
        assert_eq!(frags.thumbnail, &[0xFF, 0xD8, 1, 0xFF, 0xD9]);
    }

    #[test]
    fn short_gps_record_is_unrecognized() {
        let bytes = junk(b"", &[0xFF, 0xD8, 0xFF, 0xD9], &[0; GPS_RECORD_LEN - 1]);
        // `junk` appends the (empty) filler after, so nothing pads us out
        assert_eq!(Fragments::scan(&bytes), None);
    }

    #[test]
    fn out_of_order_markers_are_unrecognized() {
        let mut bytes = b"Mon Jan 02 03:04:05 2012".to_vec();
        bytes.extend_from_slice(CAMERA_MODEL.as_bytes());
        bytes.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xD9]);
        bytes.extend_from_slice(b"GPS_");
        bytes.extend_from_slice(&[0; GPS_RECORD_LEN]);

        assert_eq!(Fragments::scan(&bytes), None);
    }

    #[test]
    fn other_cameras_are_unrecognized() {
        assert_eq!(Fragments::scan(b"Canon PowerShot lots of junk"), None);
        assert_eq!(Fragments::scan(&[]), None);
    }

    #[test]
    fn timestamp_skips_lookalikes() {
        // month `Foo` has the right shape but doesn't parse
        let hay = b"xx Mon Foo 02 03:04:05 2012 yy Tue Feb 29 23:59:59 2012";
        let (i, ts) = find_timestamp(hay).unwrap();
        assert_eq!(&hay[i..i + 3], b"Tue");
        assert_eq!(ts, dt(2012, 2, 29, 23, 59, 59));
    }

    #[test]
    fn timestamp_ignores_weekday() {
        // 2012-01-02 was a monday
        let (_, ts) = find_timestamp(b"Fri Jan 02 03:04:05 2012").unwrap();
        assert_eq!(ts, dt(2012, 1, 2, 3, 4, 5));
    }
}
