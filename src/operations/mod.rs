pub mod annotate_image;
pub mod locate_font;
pub mod resolve_timestamp;
