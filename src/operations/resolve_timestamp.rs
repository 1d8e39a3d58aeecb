//! Timestamp resolution - turns a symlinked capture into display strings
//!
//! Includes:
//! - One-level symlink target resolution
//! - Epoch token extraction from the target's base name
//! - Millisecond epoch to zone-labelled calendar time conversion
//! - Date/time caption formatting

use chrono::{Local, LocalResult, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::errors::StampError;
use crate::common::{DATE_FORMAT, DISPLAY_TIMEZONE, TIME_FORMAT};
use crate::utils::PathExt;

/// A work item resolved down to its save destination and caption text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStamp {
    /// Symlink target, used verbatim as the save destination.
    pub target: PathBuf,
    pub display_date: String,
    pub display_time: String,
}

// ────────────────────────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────────────────────────

/// Resolve `item` through its symlink and derive the captions from the
/// millisecond epoch embedded in the target's base name.
///
/// The epoch is converted to the host's wall-clock time and the display
/// zone is then attached to that naive value as a label, without shifting
/// the clock. Captures are assumed to have been taken where the host ran.
pub fn resolve_timestamp(item: &Path) -> Result<ResolvedStamp, StampError> {
    let target = fs::read_link(item).map_err(|source| StampError::SymlinkRead {
        path: item.to_path_buf(),
        source,
    })?;

    let file_name = target.base_name();
    let token = epoch_token(&file_name);
    let millis: f64 = token
        .trim()
        .parse()
        .map_err(|_| StampError::TimestampFormat {
            file_name: file_name.clone(),
            reason: format!("token {token:?} is not a number"),
        })?;
    if !millis.is_finite() {
        return Err(StampError::TimestampFormat {
            file_name: file_name.clone(),
            reason: format!("token {token:?} is not a finite number"),
        });
    }

    let micros = (millis * 1000.0).round() as i64;
    let local = Local
        .timestamp_micros(micros)
        .single()
        .ok_or_else(|| StampError::TimestampFormat {
            file_name: file_name.clone(),
            reason: format!("epoch {token:?} ms is outside the representable range"),
        })?;

    let naive = local.naive_local();
    let stamped = match DISPLAY_TIMEZONE.from_local_datetime(&naive) {
        LocalResult::Single(stamped) => stamped,
        // A repeated wall-clock hour maps to the standard-time side
        LocalResult::Ambiguous(_, standard) => standard,
        LocalResult::None => {
            return Err(StampError::TimestampFormat {
                file_name,
                reason: format!("wall clock {naive} does not exist in {DISPLAY_TIMEZONE}"),
            });
        }
    };

    Ok(ResolvedStamp {
        target,
        display_date: stamped.format(DATE_FORMAT).to_string(),
        display_time: stamped.format(TIME_FORMAT).to_string(),
    })
}

// ────────────────────────────────────────────────────────────────
// Token Extraction
// ────────────────────────────────────────────────────────────────

/// Last `_`-delimited segment of `file_name`, truncated at the first `.`.
fn epoch_token(file_name: &str) -> &str {
    let tail = file_name.rsplit_once('_').map_or(file_name, |(_, tail)| tail);
    tail.split_once('.').map_or(tail, |(token, _)| token)
}
