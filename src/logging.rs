use chrono::Local;
use console::Style;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

pub struct LogFormatter;

impl<S, N> FormatEvent<S, N> for LogFormatter
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
        let level = *event.metadata().level();
        let timestamp = Local::now().format("%H:%M:%S");

        let style = match level {
            tracing::Level::TRACE => Style::new().dim(),
            tracing::Level::DEBUG => Style::new().cyan(),
            tracing::Level::INFO => Style::new().green(),
            tracing::Level::WARN => Style::new().yellow(),
            tracing::Level::ERROR => Style::new().red(),
        };

        write!(
            writer,
            "{} [{}] ",
            style.apply_to(format!("{:>5}", level)),
            timestamp
        )?;

        // Write the message (and other fields)
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber for the harness process.
///
/// `RUST_LOG` wins when set; otherwise `silent` runs only surface errors.
pub fn init(settings: &crate::config::Settings) {
    let default_directive = if settings.silent { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(LogFormatter)
        .try_init();
}
