/*! # `wg1gps`

Pulls capture metadata out of movies recorded by the PENTAX Optio WG-1 GPS.

## Purpose

The WG-1 writes a vendor `JUNK` chunk ahead of the movie data in its AVI
files. Inside, you'll find:

- the camera's model name
- when recording started (in the camera's local time)
- a JPEG thumbnail
- a GPS fix, when it had one

This crate finds that chunk and decodes it. Movies from any other camera
give back `Ok(None)`.

## Usage

```no_run
use camino::Utf8Path;

let meta = wg1gps::get_avi_metadata(Utf8Path::new("IMGP0001.AVI"))?;

if let Some(meta) = meta {
    println!("{} @ {}", meta.camera_model(), meta.captured_at());
    println!("lat/long: {:?}/{:?}", meta.gps_latitude(), meta.gps_longitude());
}
# Ok::<(), wg1gps::error::ExtractError>(())
```
*/

use camino::Utf8Path;

pub mod config;
pub mod error;
pub mod models;
pub mod parse;

pub use models::{
    gps::{GpsInfo, GpsTag, GpsValue, Rational},
    metadata::Metadata,
    thumbnail::Thumbnail,
};
pub use parse::Extractor;

/// Grabs [`Metadata`] from a WG-1 movie using the default [`config::Config`].
///
/// Returns `Ok(None)` when the file is a fine AVI, just not one from the WG-1.
pub fn get_avi_metadata(path: &Utf8Path) -> Result<Option<Metadata>, error::ExtractError> {
    Extractor::default().extract(path)
}
