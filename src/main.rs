use anyhow::{Context, Result};

use photostamp::bootstrap::setup::initialize_logger;
use photostamp::workflow::annotate_directory;

fn main() -> Result<()> {
    initialize_logger();

    let working_dir = std::env::current_dir().context("failed to resolve the working directory")?;
    annotate_directory(&working_dir)?;

    Ok(())
}
