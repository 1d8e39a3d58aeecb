//! Caption rendering - burns the date/time text into an image buffer

use ab_glyph::{FontVec, PxScale};
use image::RgbImage;
use imageproc::drawing::draw_text_mut;
use std::fs;

use crate::common::errors::StampError;
use crate::common::{
    CAPTION_COLOR, DATE_BOTTOM_OFFSET, DATE_FONT_SIZE, TIME_BOTTOM_OFFSET, TIME_FONT_SIZE,
};
use crate::operations::locate_font::locate_font;

/// Font resources for caption drawing. Each worker owns one so no glyph
/// state is ever shared across threads.
pub struct CaptionFonts {
    face: FontVec,
}

impl CaptionFonts {
    /// Read and parse the platform font. This is the only fallible step of
    /// annotation; a worker that cannot load its font must not start.
    pub fn load() -> Result<Self, StampError> {
        let path = locate_font().ok_or_else(|| StampError::FontLoad {
            detail: "no known system font exists on this host".to_string(),
        })?;

        let bytes = fs::read(path).map_err(|source| StampError::FontLoad {
            detail: format!("{}: {source}", path.display()),
        })?;
        let face = FontVec::try_from_vec(bytes).map_err(|source| StampError::FontLoad {
            detail: format!("{}: {source}", path.display()),
        })?;

        Ok(CaptionFonts { face })
    }

    /// Draw the date and time captions near the bottom-left corner.
    ///
    /// Anchors that fall outside a short image are clipped by the rasterizer,
    /// never treated as an error.
    pub fn annotate(&self, canvas: &mut RgbImage, date: &str, time: &str) {
        let [(date_x, date_y), (time_x, time_y)] = caption_anchors(canvas.height());

        draw_text_mut(
            canvas,
            CAPTION_COLOR,
            date_x,
            date_y,
            PxScale::from(DATE_FONT_SIZE),
            &self.face,
            date,
        );
        draw_text_mut(
            canvas,
            CAPTION_COLOR,
            time_x,
            time_y,
            PxScale::from(TIME_FONT_SIZE),
            &self.face,
            time,
        );
    }
}

/// Pixel anchors for the date and time captions, in that order.
pub fn caption_anchors(height: u32) -> [(i32, i32); 2] {
    let height = height as i32;
    [
        (0, height - DATE_BOTTOM_OFFSET),
        (0, height - TIME_BOTTOM_OFFSET),
    ]
}
