//! Types describing what we pull out of a movie.

pub mod gps;
pub mod metadata;
pub mod thumbnail;
