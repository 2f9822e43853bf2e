use core::error::Error;
use pisserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to open the movie file at `{path}`. Err: `{err}`.")]
    FileOpenFailed { path: String, err: std::io::Error },

    #[error("An I/O error occurred while reading the container. See: `{_0}`")]
    Io(#[from] std::io::Error),

    #[error("The file is not a RIFF container. Found tag `{_0}` instead.")]
    NotRiff(String),

    #[error("The RIFF container is not an AVI movie. Found form type `{_0}` instead.")]
    NotAvi(String),

    #[error("The `JUNK` chunk declares `{len}` bytes, but at most `{max}` are allowed.")]
    JunkTooLarge { len: u32, max: u32 },

    #[error("A `tokio` task unexpectedly panicked. See: `{_0}`")]
    TokioJoinError(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// during fs read from disk
    #[error("Failed to read config file. See: `{_0}`")]
    ReadFailed(#[from] tokio::io::Error),

    /// parsing
    #[error("Failed to parse config file. See: `{_0}`")]
    ParseFailed(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Writing the thumbnail to disk failed. Err: `{_0}`, path: `{_1}`.")]
    ThumbnailSaveFailure(std::io::Error, String),

    #[error("Couldn't pick a thumbnail path for the movie at `{_0}`.")]
    NoThumbnailPath(String),
}
