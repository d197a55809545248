pub mod formats;

use flexi_logger::Logger;

use crate::Error;

/// Logs go to stderr so stdout carries only command output.
pub fn init() -> Result<(), Error> {
    Logger::try_with_env_or_str("warn")?
        .format(formats::cli_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}
