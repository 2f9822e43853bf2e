//! Decodes the fixed-size GPS record that follows the `GPS_` marker.
//!
//! All integers are little-endian. Layout, in order:
//!
//! | field           | bytes | kind            |
//! |-----------------|-------|-----------------|
//! | version         | 4     | 4x u8           |
//! | latitude ref    | 2     | ascii           |
//! | latitude        | 24    | 3x rational     |
//! | longitude ref   | 2     | ascii           |
//! | longitude       | 24    | 3x rational     |
//! | altitude ref    | 1     | u8              |
//! | altitude        | 8     | rational        |
//! | (reserved)      | 16    | skipped         |
//! | time stamp      | 24    | 3x rational     |
//! | satellites      | 3     | ascii           |
//! | status          | 2     | ascii           |
//! | measure mode    | 2     | ascii           |
//! | map datum       | 7     | ascii           |
//! | date stamp      | 11    | ascii           |

use byteorder::{ByteOrder, LittleEndian};

use crate::models::gps::{GpsInfo, Rational};

/// The GPS record's total width in bytes.
pub const GPS_RECORD_LEN: usize = 4 + 2 + 24 + 2 + 24 + 1 + 8 + 16 + 24 + 3 + 2 + 2 + 7 + 11;

const RESERVED_LEN: usize = 16;

/// Decodes a GPS record.
///
/// Returns `None` when the latitude reference is blank, meaning the camera
/// had no fix. It tends to zero out only some fields in that case, so the
/// whole record is thrown away.
#[tracing::instrument(skip_all)]
pub fn decode_gps_record(record: &[u8; GPS_RECORD_LEN]) -> Option<GpsInfo> {
    let mut rec = Record { buf: record, pos: 0 };

    let version = rec.bytes::<4>();
    let latitude_ref = rec.ascii::<2>();
    let latitude = rec.rationals();
    let longitude_ref = rec.ascii::<2>();
    let longitude = rec.rationals();
    let altitude_ref = rec.bytes::<1>()[0];
    let altitude = rec.rational();
    let _reserved = rec.bytes::<RESERVED_LEN>();
    let time_stamp = rec.rationals();
    let satellites = rec.ascii::<3>();
    let status = rec.ascii::<2>();
    let measure_mode = rec.ascii::<2>();
    let map_datum = rec.ascii::<7>();
    let date_stamp = rec.ascii::<11>();
    debug_assert_eq!(rec.pos, GPS_RECORD_LEN);

    if latitude_ref.is_empty() {
        tracing::debug!("gps record has no latitude reference. treating as no fix");
        return None;
    }

    Some(GpsInfo {
        version,
        latitude_ref,
        latitude,
        longitude_ref,
        longitude,
        altitude_ref,
        altitude,
        time_stamp,
        satellites,
        status,
        measure_mode,
        map_datum,
        date_stamp,
    })
}

/// Walks a record field by field.
///
/// The fields add up to exactly [`GPS_RECORD_LEN`], so every read is a plain
/// slice of the array.
struct Record<'a> {
    buf: &'a [u8; GPS_RECORD_LEN],
    pos: usize,
}

impl Record<'_> {
    fn take(&mut self, len: usize) -> &[u8] {
        let field = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        field
    }

    fn bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0_u8; N];
        out.copy_from_slice(self.take(N));
        out
    }

    fn u32(&mut self) -> u32 {
        LittleEndian::read_u32(self.take(4))
    }

    fn rational(&mut self) -> Rational {
        let numerator = self.u32();
        let denominator = self.u32();
        Rational::new(numerator, denominator)
    }

    fn rationals(&mut self) -> [Rational; 3] {
        [self.rational(), self.rational(), self.rational()]
    }

    /// A fixed-width ASCII field, without trailing spaces or NULs.
    ///
    /// Anything that isn't valid UTF-8 becomes U+FFFD.
    fn ascii<const N: usize>(&mut self) -> String {
        String::from_utf8_lossy(self.take(N))
            .trim_end_matches([' ', '\0'])
            .to_string()
    }
}
