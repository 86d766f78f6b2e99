use slog::{o, Drain, Logger};

/// Terminal logger used by both binaries.
pub fn root_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

/// Logger that drops every record.
pub fn discard_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}
