//! Startup tasks.
//!
//! Includes:
//! - Logger initialization

use env_logger::Builder;
use env_logger::fmt::style::{AnsiColor, Style};
use log::LevelFilter;
use log::kv::Key;
use std::io::Write;

// ────────────────────────────────────────────────────────────────
// Logger Initialization
// ────────────────────────────────────────────────────────────────

/// Reformat a `Debug`-printed `Duration` such as `512.3ms` to `512.30 ms`.
fn pretty_duration(raw: &str) -> String {
    if let Some(idx) = raw.find(|c: char| c.is_alphabetic())
        && let Ok(val) = raw[..idx].parse::<f32>()
    {
        return format!("{:.2} {}", val, &raw[idx..]);
    }
    raw.to_string()
}

/// Initialize the global logger.
///
/// Lines carry the emitting thread's name so output from concurrent workers
/// stays attributable. `RUST_LOG` overrides the default `info` filter.
pub fn initialize_logger() {
    Builder::new()
        .format(|buf, record| {
            let dim = Style::new().fg_color(Some(AnsiColor::BrightBlack.into()));

            // Colorize timestamp in dark grey
            let ts = format!("{}{}{}", dim.render(), buf.timestamp(), dim.render_reset());

            // Colorize level with default style (includes reset)
            let level_style = buf.default_level_style(record.level());
            let lvl = format!(
                "{}{}{}",
                level_style.render(),
                record.level(),
                level_style.render_reset()
            );

            let thread = std::thread::current();
            let name = format!("({})", thread.name().unwrap_or("main"));

            // Colorize module target in dark grey
            let tgt = format!("{}{}{}", dim.render(), record.target(), dim.render_reset());

            // Append the `duration` key-value when the record carries one
            let dur = record
                .key_values()
                .get(Key::from("duration"))
                .map(|value| {
                    format!(
                        " {}[{}]{}",
                        dim.render(),
                        pretty_duration(&value.to_string()),
                        dim.render_reset()
                    )
                })
                .unwrap_or_default();

            writeln!(buf, "{} {} {} {} {}{}", ts, lvl, name, tgt, record.args(), dur)
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::pretty_duration;

    #[test]
    fn rounds_durations_to_two_decimals() {
        assert_eq!(pretty_duration("512.3ms"), "512.30 ms");
        assert_eq!(pretty_duration("1.234567s"), "1.23 s");
    }

    #[test]
    fn passes_unrecognized_values_through() {
        assert_eq!(pretty_duration("fast"), "fast");
        assert_eq!(pretty_duration(""), "");
    }
}
