//! # Extraction
//!
//! Turns a WG-1 movie into [`Metadata`].
//!
//! It has the following pipeline:
//!
//! 1. Walk the RIFF chunks until we find `JUNK` ([`riff`]).
//! 2. Scan that chunk for the model, timestamp, thumbnail, and GPS record
//!    ([`markers`]).
//! 3. Decode the GPS record, dropping it if there's no fix ([`gps_record`]).
//! 4. Stick it all into a [`Metadata`].
//!
//! Any step may decide the file isn't from the WG-1. That's `Ok(None)`, not
//! an error, since most movies out there aren't!

pub mod gps_record;
pub mod markers;
pub mod riff;

use std::io::{BufReader, Read, Seek};

use camino::Utf8Path;

use crate::{
    config::Config,
    error::ExtractError,
    models::{metadata::Metadata, thumbnail::Thumbnail},
};

use self::{gps_record::decode_gps_record, markers::Fragments, riff::find_junk_chunk};

/// Extracts [`Metadata`] from WG-1 movies.
///
/// Calls share no state, so one `Extractor` can be used from many threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extractor {
    config: Config,
}

impl Extractor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extracts metadata from the movie at `path`.
    ///
    /// The file is only open for the duration of this call.
    #[tracing::instrument(skip(self))]
    pub fn extract(&self, path: &Utf8Path) -> Result<Option<Metadata>, ExtractError> {
        let file = std::fs::File::open(path)
            .inspect_err(|e| tracing::warn!("Failed to open movie file. err: {e}"))
            .map_err(|err| ExtractError::FileOpenFailed {
                path: path.to_string(),
                err,
            })?;

        self.extract_from_reader(BufReader::new(file))
    }

    /// Extracts metadata from a reader positioned at the start of a RIFF
    /// container.
    #[tracing::instrument(skip_all)]
    pub fn extract_from_reader<R: Read + Seek>(
        &self,
        mut reader: R,
    ) -> Result<Option<Metadata>, ExtractError> {
        let Some(junk) = find_junk_chunk(&mut reader, self.config.max_junk_len)? else {
            return Ok(None);
        };

        Ok(Self::from_junk(&junk))
    }

    /// Builds [`Metadata`] from the payload of a `JUNK` chunk.
    pub fn from_junk(junk: &[u8]) -> Option<Metadata> {
        let fragments = Fragments::scan(junk)?;
        let gps = decode_gps_record(fragments.gps_record);
        tracing::debug!(
            "recognized wg-1 movie captured at `{}`. has gps fix: {}",
            fragments.captured_at,
            gps.is_some()
        );

        Some(Metadata::new(
            fragments.camera_model,
            fragments.captured_at,
            Thumbnail::new(fragments.thumbnail),
            gps,
        ))
    }

    /// Like [`Extractor::extract`], but runs on `tokio`'s blocking pool.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, path: &Utf8Path) -> Result<Option<Metadata>, ExtractError> {
        let extractor = self.clone();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || extractor.extract(&path))
            .await
            .map_err(ExtractError::TokioJoinError)?
    }
}
