//! Per-item processing behind the seam the pool drains through

use std::path::Path;

use crate::common::errors::StampError;
use crate::operations::annotate_image::CaptionFonts;
use crate::operations::resolve_timestamp::resolve_timestamp;

/// One unit of pool work. Implementations report all per-item failures
/// through the `Err` arm; the pool decides what to do with them.
pub trait FileProcessor {
    fn process(&mut self, item: &Path) -> Result<(), StampError>;
}

/// Production processor: resolve the capture's timestamp, burn it into the
/// image, save over the symlink target.
pub struct TimestampProcessor {
    fonts: CaptionFonts,
}

impl TimestampProcessor {
    pub fn new() -> Result<Self, StampError> {
        Ok(TimestampProcessor {
            fonts: CaptionFonts::load()?,
        })
    }
}

impl FileProcessor for TimestampProcessor {
    fn process(&mut self, item: &Path) -> Result<(), StampError> {
        let stamp = resolve_timestamp(item)?;

        // Open through the link so the content read matches what was listed
        let decoded = image::open(item).map_err(|source| StampError::ImageIo {
            path: item.to_path_buf(),
            source,
        })?;

        let mut canvas = decoded.into_rgb8();
        self.fonts
            .annotate(&mut canvas, &stamp.display_date, &stamp.display_time);

        canvas.save(&stamp.target).map_err(|source| StampError::ImageIo {
            path: stamp.target.clone(),
            source,
        })?;

        Ok(())
    }
}
