//! The JPEG thumbnail the camera embeds in each movie.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::ThumbnailError;

/// A complete JPEG image, from its SOI marker through its EOI marker.
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Thumbnail(Vec<u8>);

impl Thumbnail {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sniffs the thumbnail's MIME type. For the WG-1, this is `image/jpeg`.
    ///
    /// Tiny or damaged thumbnails might not be recognized at all.
    pub fn mime_type(&self) -> Option<&'static str> {
        infer::get(&self.0).map(|kind| kind.mime_type())
    }

    /// Writes the thumbnail to `path` verbatim.
    #[tracing::instrument(skip(self))]
    pub async fn save(&self, path: &Utf8Path) -> Result<(), ThumbnailError> {
        tokio::fs::write(path, &self.0)
            .await
            .inspect_err(|e| tracing::warn!("Failed to save thumbnail. err: {e}"))
            .map_err(|e| ThumbnailError::ThumbnailSaveFailure(e, path.to_string()))?;

        tracing::debug!("saved {} byte thumbnail", self.0.len());
        Ok(())
    }

    /// Picks where a movie's thumbnail should be saved: `<dir>/<stem>.jpg`.
    ///
    /// Without a `dir`, it goes right next to the movie.
    pub fn path_for(
        movie: &Utf8Path,
        dir: Option<&Utf8Path>,
    ) -> Result<Utf8PathBuf, ThumbnailError> {
        let dir = match dir {
            Some(dir) => dir,
            None => movie
                .parent()
                .ok_or_else(|| ThumbnailError::NoThumbnailPath(movie.to_string()))?,
        };
        let stem = movie
            .file_stem()
            .ok_or_else(|| ThumbnailError::NoThumbnailPath(movie.to_string()))?;

        Ok(dir.join(format!("{stem}.jpg")))
    }
}

// the raw bytes are rarely useful in logs
impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("len", &self.0.len())
            .finish()
    }
}

impl AsRef<[u8]> for Thumbnail {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
