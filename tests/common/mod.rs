//! The parent of the other tests.
//!
//! Builds synthetic WG-1 movies and sets up logging.

use std::{str::FromStr as _, sync::Once};

use camino::Utf8PathBuf;
use temp_dir::TempDir;
use tracing_subscriber::{filter, layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer};

static LOGGING: Once = Once::new();

/// call this at the top of any new test func! :)
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn setup() {
    LOGGING.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter::EnvFilter::from_str("DEBUG").unwrap()),
            )
            .init();
    });
}

/// The parts of a GPS record, ready to be laid out as 130 bytes.
#[allow(dead_code, reason = "it's used in the other tests")]
#[derive(Clone, Debug)]
pub struct GpsRecord {
    pub version: [u8; 4],
    pub latitude_ref: &'static [u8],
    pub latitude: [(u32, u32); 3],
    pub longitude_ref: &'static [u8],
    pub longitude: [(u32, u32); 3],
    pub altitude_ref: u8,
    pub altitude: (u32, u32),
    pub time_stamp: [(u32, u32); 3],
    pub satellites: &'static [u8],
    pub status: &'static [u8],
    pub measure_mode: &'static [u8],
    pub map_datum: &'static [u8],
    pub date_stamp: &'static [u8],
}

impl GpsRecord {
    /// The fix from the camera's manual-ish example: a bit north of Tokyo.
    #[allow(dead_code, reason = "it's used in the other tests")]
    pub fn tokyo() -> Self {
        Self {
            version: [2, 3, 0, 0],
            latitude_ref: b"N",
            latitude: [(35, 1), (12, 1), (3456, 100)],
            longitude_ref: b"E",
            longitude: [(139, 1), (0, 1), (0, 1)],
            altitude_ref: 0,
            altitude: (10, 1),
            time_stamp: [(3, 1), (4, 1), (5, 1)],
            satellites: b"07",
            status: b"A",
            measure_mode: b"3",
            map_datum: b"WGS-84",
            date_stamp: b"2012:01:02",
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(130);
        let ascii = |v: &mut Vec<u8>, s: &[u8], width: usize| {
            let mut field = s.to_vec();
            field.resize(width, 0);
            v.extend_from_slice(&field);
        };
        let rational = |v: &mut Vec<u8>, (n, d): (u32, u32)| {
            v.extend_from_slice(&n.to_le_bytes());
            v.extend_from_slice(&d.to_le_bytes());
        };

        v.extend_from_slice(&self.version);
        ascii(&mut v, self.latitude_ref, 2);
        self.latitude.iter().for_each(|r| rational(&mut v, *r));
        ascii(&mut v, self.longitude_ref, 2);
        self.longitude.iter().for_each(|r| rational(&mut v, *r));
        v.push(self.altitude_ref);
        rational(&mut v, self.altitude);
        v.extend_from_slice(&[0; 16]);
        self.time_stamp.iter().for_each(|r| rational(&mut v, *r));
        ascii(&mut v, self.satellites, 3);
        ascii(&mut v, self.status, 2);
        ascii(&mut v, self.measure_mode, 2);
        ascii(&mut v, self.map_datum, 7);
        ascii(&mut v, self.date_stamp, 11);

        assert_eq!(v.len(), 130, "gps record should be 130 bytes");
        v
    }
}

pub const MODEL: &[u8] = b"PENTAX Optio WG-1 GPS";
pub const CAPTURED_AT: &[u8] = b"Mon Jan 02 03:04:05 2012";
pub const THUMBNAIL: &[u8] = &[0xFF, 0xD8, 0x00, 0xFF, 0xD9];

/// A `JUNK` payload like the camera writes, with some filler between fields.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn wg1_junk(gps: &GpsRecord) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(MODEL);
    v.extend_from_slice(&[0; 11]);
    v.extend_from_slice(CAPTURED_AT);
    v.extend_from_slice(b"\0\0\n\r  \xAB\xCD");
    v.extend_from_slice(THUMBNAIL);
    v.extend_from_slice(&[0x20; 7]);
    v.extend_from_slice(b"GPS_");
    v.extend_from_slice(&gps.to_bytes());
    v.extend_from_slice(&[0; 32]);
    v
}

/// A single RIFF chunk.
pub fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = tag.to_vec();
    v.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    v.extend_from_slice(payload);
    v
}

/// A `LIST` chunk with the given list type.
pub fn list(list_type: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut inner = list_type.to_vec();
    inner.extend_from_slice(payload);
    chunk(b"LIST", &inner)
}

/// Wraps chunks in a `RIFF ... AVI ` header.
pub fn avi(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body = chunks.concat();
    let mut v = b"RIFF".to_vec();
    v.extend_from_slice(&((body.len() + 4) as u32).to_le_bytes());
    v.extend_from_slice(b"AVI ");
    v.extend_from_slice(&body);
    v
}

/// A whole movie as the WG-1 lays it out.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn wg1_avi(gps: &GpsRecord) -> Vec<u8> {
    avi(&[
        list(b"hdrl", &[0x11; 56]),
        chunk(b"JUNK", &wg1_junk(gps)),
        list(b"movi", &[0x22; 64]),
        chunk(b"idx1", &[0; 16]),
    ])
}

/// Writes `bytes` to a file in a new temporary folder.
///
/// Keep the `TempDir` around, or the file goes with it!
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn write_temp(name: &str, bytes: &[u8]) -> (TempDir, Utf8PathBuf) {
    let dir = TempDir::new().expect("make temp dir");
    let path = Utf8PathBuf::try_from(dir.child(name)).expect("temp dir should be utf-8");
    std::fs::write(&path, bytes).expect("write temp movie");
    (dir, path)
}
