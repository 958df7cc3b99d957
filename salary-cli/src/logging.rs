use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    registry::LookupSpan,
};

// --- Formatter ---

/// Local-time timestamp, colored level, `file:line`, then the event fields.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        if ansi {
            write!(writer, "\x1b[2m")?
        }
        write!(
            writer,
            "{} ",
            Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )?;
        if ansi {
            write!(writer, "\x1b[0m")?
        }

        let (pre, post) = if ansi {
            match *meta.level() {
                Level::ERROR => ("\x1b[1;31m", "\x1b[0m"),
                Level::WARN => ("\x1b[1;33m", "\x1b[0m"),
                Level::INFO => ("\x1b[1;32m", "\x1b[0m"),
                Level::DEBUG => ("\x1b[1;34m", "\x1b[0m"),
                Level::TRACE => ("\x1b[1;35m", "\x1b[0m"),
            }
        } else {
            ("", "")
        };
        write!(writer, "{}{:>5}{} ", pre, meta.level(), post)?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file
                .strip_prefix("src/")
                .or_else(|| file.strip_prefix("src\\"))
                .unwrap_or(file);
            write!(writer, "{file}:{line} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Public API ---

/// Default filter directive for a `-v` count.
///
/// No flag keeps the CLI quiet apart from warnings; each `-v` opens one
/// more level, up to `trace`.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn make_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Initializes logging. Call once at startup.
///
/// - Level: from `RUST_LOG` when set, otherwise from `verbosity`.
/// - Output: stderr (colored when attached to a terminal), or appended to
///   `log_file` without colors. Stdout stays reserved for results.
pub fn init_logging(
    verbosity: u8,
    log_file: Option<&Path>,
) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(make_filter(verbosity));

    let installed = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            builder
                .with_ansi(false)
                .event_format(LocalFmt)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder
            .with_ansi(io::stderr().is_terminal())
            .event_format(LocalFmt)
            .with_writer(io::stderr)
            .try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))
}
