use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger on stderr.
///
/// `verbose` enables debug output (integration step counts, search
/// convergence). Otherwise only warnings and errors are shown. `RUST_LOG`
/// overrides both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None);

    // Already initialised (tests, embedding); keep the existing logger
    let _ = builder.try_init();
}
