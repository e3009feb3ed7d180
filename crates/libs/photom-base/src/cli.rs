//! Command line helpers shared by the photom binaries.
use log::LevelFilter;

/// Parses the arguments, returns the arguments and the launch time.
///
/// # Arguments
///
/// * `name` - The name of the program.
pub fn parse_args<T: clap::Parser>(name: &str) -> (T, std::time::SystemTime) {
    let args = T::parse();
    let launch_time = std::time::SystemTime::now();
    log::info!(
        "{} launched at {} on {}.",
        name,
        chrono::DateTime::<chrono::Utc>::from(launch_time),
        std::env::consts::OS
    );

    (args, launch_time)
}

/// Environment variable holding extra logging directives.
pub const LOG_ENV: &str = "PHOTOM_LOG";

/// A filter for the logger.
///
/// This is a tuple of a module name and a log level filter.
pub type LogFilter<'a> = (&'a str, LevelFilter);

/// Initialises logging settings.
///
/// # Arguments
///
/// * `timestamp` - Whether to print the timestamp in the log; This is the base
///   time for the timestamp.
/// * `log_level` - The log level to filter. See [`log_filter_from_level`].
/// * `filters` - Per-module filters applied on top of the log level.
///
/// Directives found in the `PHOTOM_LOG` environment variable (same syntax as
/// `RUST_LOG`) take precedence over both.
pub fn setup_logging(
    timestamp: Option<std::time::SystemTime>,
    log_level: u8,
    filters: &[LogFilter],
) {
    use std::io::Write;
    let mut builder = env_logger::builder();
    builder.format(move |buf, record| {
        let top_level_module = record
            .module_path()
            .and_then(|path| path.split("::").next())
            .unwrap_or("?");
        match timestamp.and_then(|t| t.elapsed().ok()) {
            Some(duration) => {
                let millis = duration.as_millis() % 1000;
                let seconds = duration.as_secs() % 60;
                let minutes = (duration.as_secs() / 60) % 60;
                let hours = (duration.as_secs() / 60) / 60;
                writeln!(
                    buf,
                    "{}:{}:{}.{:03} {:5} [{}]: {}",
                    hours,
                    minutes,
                    seconds,
                    millis,
                    record.level(),
                    top_level_module,
                    record.args()
                )
            },
            None => {
                writeln!(
                    buf,
                    "{:5} [{}]: {}",
                    record.level(),
                    top_level_module,
                    record.args()
                )
            },
        }
    });
    for (module, level) in filters {
        builder.filter(Some(module), *level);
    }
    builder
        .filter_level(log_filter_from_level(log_level))
        .parse_env(LOG_ENV)
        .init();
}

/// Converts a log level to a log filter.
pub fn log_filter_from_level(level: u8) -> LevelFilter {
    match level {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Arguments shared by every photom binary.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Whether to show the timestamp in the log.
    #[clap(
        long,
        help = "Show timestamp for each log message in seconds since\nprogram starts"
    )]
    pub log_timestamp: bool,

    /// Verbosity level for the log.
    #[clap(
        long,
        help = "Setting logging verbosity level (higher for more\ndetails)\n  0 - error\n  1 - \
                warn + error\n  2 - info + warn + error\n  3 - debug + info + warn + error\n  4 - \
                trace + debug + info + warn + error\n\x08",
        default_value_t = 1
    )]
    pub log_level: u8,
}
