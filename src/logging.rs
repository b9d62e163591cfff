use tracing::Level;

/// Installs the process-wide fmt subscriber. Returns false if one was already set.
pub fn init(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}
