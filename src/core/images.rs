//! Screenshot loading.
//!
//! Decoding happens on a blocking task; results stream back over a channel
//! so the event loop never waits on disk or the decoder.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;
use tokio::sync::mpsc;

use super::strip::ImageItem;

/// Thumbnails are downsized to fit this box (pixels).  Cards never draw
/// more than 40 columns × 2 pixels per row, so this leaves headroom.
pub const THUMB_MAX_W: u32 = 320;
pub const THUMB_MAX_H: u32 = 180;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Map an image URI onto the assets directory.  Absolute URIs such as
/// `/images/home.png` are taken relative to `root`.
pub fn resolve(root: &Path, item: &ImageItem) -> PathBuf {
    root.join(item.uri().trim_start_matches('/'))
}

/// Read and decode `path`, then shrink it to a card-sized RGBA thumbnail.
pub fn load_thumbnail(path: &Path) -> Result<RgbaImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = image::load_from_memory(&bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.thumbnail(THUMB_MAX_W, THUMB_MAX_H).to_rgba8())
}

pub type LoadResult = (ImageItem, Result<RgbaImage, LoadError>);

/// Decode every item in the background, one message per item.
pub fn spawn_loader(root: PathBuf, items: Vec<ImageItem>) -> mpsc::UnboundedReceiver<LoadResult> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        for item in items {
            let t0 = std::time::Instant::now();
            let path = resolve(&root, &item);
            let result = load_thumbnail(&path);
            tracing::debug!("load_thumbnail: {:.2?} path={}", t0.elapsed(), path.display());
            if tx.send((item, result)).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn resolve_strips_leading_slash() {
        let root = Path::new("/srv/public");
        let item = ImageItem::new("/images/home.png");
        assert_eq!(resolve(root, &item), PathBuf::from("/srv/public/images/home.png"));
        let rel = ImageItem::new("shots/a.png");
        assert_eq!(resolve(root, &rel), PathBuf::from("/srv/public/shots/a.png"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_thumbnail(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("here.png"));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = scratch_dir("garbage");
        let path = dir.join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();
        let err = load_thumbnail(&path).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }

    #[test]
    fn large_images_are_shrunk_to_fit() {
        let dir = scratch_dir("large");
        let path = dir.join("wide.png");
        RgbaImage::from_pixel(1280, 720, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let thumb = load_thumbnail(&path).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (320, 180));
    }

    #[tokio::test]
    async fn loader_reports_every_item() {
        let dir = scratch_dir("loader");
        std::fs::create_dir_all(dir.join("images")).unwrap();
        RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]))
            .save(dir.join("images/ok.png"))
            .unwrap();

        let items = vec![ImageItem::new("/images/ok.png"), ImageItem::new("/images/missing.png")];
        let mut rx = spawn_loader(dir, items);

        let (first, first_result) = rx.recv().await.unwrap();
        assert_eq!(first.uri(), "/images/ok.png");
        assert!(first_result.is_ok());

        let (second, second_result) = rx.recv().await.unwrap();
        assert_eq!(second.uri(), "/images/missing.png");
        assert!(second_result.is_err());

        assert!(rx.recv().await.is_none());
    }
}
