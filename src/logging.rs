use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; `debug` is enabled via
/// the settings file. The level can be overridden via the `RUST_LOG`
/// environment variable, but only when debug logging is on.
///
/// When `log_file` is set, output goes to that file instead of stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // With debug logging off we force `info` regardless of `RUST_LOG` so a
    // stray variable in the user's environment cannot make the overlay noisy.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match log_file.as_deref().and_then(split_log_path) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            builder.with_writer(appender).with_ansi(false).try_init()
        }
        None => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("logger already initialised");
    }
}

fn split_log_path(path: &std::path::Path) -> Option<(PathBuf, std::ffi::OsString)> {
    let name = path.file_name()?.to_os_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, name))
}
