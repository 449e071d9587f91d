use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use std::path::Path;

pub const LOG_BASENAME: &str = "telegram-search";

/// Initialize file logging. In debug mode, logs to stdout + file.
/// In release mode, logs errors only to file with rotation.
/// The returned handle must be kept alive for buffered output to be flushed.
pub fn init(log_dir: &Path) -> Result<LoggerHandle, Box<dyn std::error::Error>> {
    let file_spec = FileSpec::default()
        .directory(log_dir)
        .basename(LOG_BASENAME);

    let logger = if cfg!(debug_assertions) {
        Logger::try_with_env_or_str("debug")?
            .log_to_file(file_spec)
            .duplicate_to_stdout(flexi_logger::Duplicate::All)
    } else {
        Logger::try_with_str("error")?
            .log_to_file(file_spec)
            .rotate(
                flexi_logger::Criterion::Size(10_000_000), // 10MB
                flexi_logger::Naming::Numbers,
                flexi_logger::Cleanup::KeepLogFiles(3),
            )
    };

    let handle = logger.write_mode(WriteMode::BufferAndFlush).start()?;
    log::debug!("file logging started in {}", log_dir.display());

    Ok(handle)
}

/// Stderr logging for one-shot CLI runs, filtered by `RUST_LOG` (default `warn`).
pub fn init_stderr() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
