//! Dumps WG-1 metadata for each movie given on the command line, saving
//! thumbnails along the way.
//!
//! `cargo run --example dump -- [--config wg1gps.toml] IMGP0001.AVI ...`

use camino::Utf8PathBuf;
use tracing_subscriber::EnvFilter;
use wg1gps::{config::Config, Extractor, Thumbnail};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1).map(Utf8PathBuf::from).peekable();

    let config = if args.peek().is_some_and(|a| a.as_str() == "--config") {
        _ = args.next();
        let path = args
            .next()
            .ok_or_else(|| anyhow::anyhow!("`--config` needs a path"))?;
        Config::from_disk(&path).await?
    } else {
        Config::default()
    };
    let extractor = Extractor::new(config);

    for movie in args {
        let Some(meta) = extractor
            .load(&movie)
            .await
            .inspect_err(|e| tracing::error!("Failed to read `{movie}`. err: {e}"))?
        else {
            println!("{movie}: not a wg-1 movie\n");
            continue;
        };

        println!("{movie}:\n{meta}");
        if let (Some(lat), Some(long)) = (meta.gps_latitude(), meta.gps_longitude()) {
            println!("position: {lat:.6}, {long:.6}");
        }
        if let Some(utc) = meta.gps_datetime() {
            println!("fix time: {utc}");
        }

        let thumb_path =
            Thumbnail::path_for(&movie, extractor.config().thumbnail_dir.as_deref())?;
        meta.thumbnail().save(&thumb_path).await?;
        println!(
            "saved {} thumbnail to `{thumb_path}`\n",
            meta.thumbnail().mime_type().unwrap_or("unknown")
        );
    }

    Ok(())
}
