pub mod errors;

use chrono_tz::Tz;
use image::Rgb;

pub const STAMP_FILE_SUFFIX: &'static str = ".jpg";

pub const CAPTION_COLOR: Rgb<u8> = Rgb([238, 161, 6]);

pub const DATE_FONT_SIZE: f32 = 32.0;

pub const TIME_FONT_SIZE: f32 = 72.0;

pub const DATE_BOTTOM_OFFSET: i32 = 150;

pub const TIME_BOTTOM_OFFSET: i32 = 120;

pub const PROGRESS_LOG_INTERVAL: usize = 10;

// Captures are labelled with this zone regardless of where the host runs.
pub const DISPLAY_TIMEZONE: Tz = chrono_tz::US::Mountain;

pub const DATE_FORMAT: &'static str = "%Y-%m-%d";

pub const TIME_FORMAT: &'static str = "%I:%M:%S%.6f %p %z %Z";
