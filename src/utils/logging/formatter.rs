//! Compact console formatter for log events

use chrono::Local;
use console::style;
use std::fmt::{self as std_fmt, Debug, Write as _};
use tracing::Level;
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};

pub struct CleanFormatter {
    show_timestamps: bool,
    use_color: bool,
}

impl CleanFormatter {
    pub fn new(show_timestamps: bool, use_color: bool) -> Self {
        Self {
            show_timestamps,
            use_color,
        }
    }

    fn render(&self, level: &Level, message: &str, fields: &[(String, String)]) -> String {
        let mut output = String::new();

        if self.show_timestamps {
            let now = Local::now().format("%H:%M:%S").to_string();
            let timestamp = if self.use_color {
                style(now).dim().to_string()
            } else {
                now
            };
            output.push_str(&format!("[{}] ", timestamp));
        }

        let level_label = format_level(level, self.use_color);
        if !level_label.is_empty() {
            output.push_str(&level_label);
            output.push(' ');
        }

        output.push_str(message);

        for (name, value) in fields {
            let _ = write!(output, " {}={}", name, value);
        }

        output
    }
}

/// INFO is left unlabelled; it is the normal progress chatter.
pub fn format_level(level: &Level, use_color: bool) -> String {
    if !use_color {
        match *level {
            Level::ERROR => "ERROR".to_string(),
            Level::WARN => "WARN ".to_string(),
            Level::INFO => "".to_string(),
            Level::DEBUG => "DEBUG".to_string(),
            Level::TRACE => "TRACE".to_string(),
        }
    } else {
        match *level {
            Level::ERROR => style("ERROR").red().bold().to_string(),
            Level::WARN => style("WARN ").yellow().to_string(),
            Level::INFO => "".to_string(),
            Level::DEBUG => style("DEBUG").blue().to_string(),
            Level::TRACE => style("TRACE").magenta().to_string(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for CleanFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std_fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let line = self.render(event.metadata().level(), &visitor.message, &visitor.fields);
        writeln!(writer, "{}", line)
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value).trim_matches('"').to_string();
        } else {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }
}
