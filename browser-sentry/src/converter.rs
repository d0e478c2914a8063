use std::error::Error;

use tracing::field::{Field, Visit};

use super::protocol::{Breadcrumb, Event, Exception, Level, Map, Mechanism, Value};

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warning,
            tracing::Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// Fields of a tracing event: its message, recorded errors and everything else.
#[derive(Default)]
struct Fields {
    message: Option<String>,
    exceptions: Vec<Exception>,
    data: Map<String, Value>,
}

impl Fields {
    fn of(event: &tracing::Event) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);

        // `#[instrument(err)]` records the error in the `error` field instead of a message
        if fields.message.is_none() {
            if let Some(Value::String(error)) = fields.data.remove("error") {
                fields.message = Some(error);
            }
        }

        fields
    }

    fn insert(&mut self, field: &Field, value: impl Into<Value>) {
        match (field.name(), value.into()) {
            ("message", Value::String(message)) => self.message = Some(message),
            (name, value) => {
                self.data.insert(name.to_owned(), value);
            }
        }
    }
}

impl Visit for Fields {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value);
    }

    fn record_error(&mut self, _field: &Field, value: &(dyn Error + 'static)) {
        self.exceptions.extend(event_from_error(value).exception);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }
}

/// Info and warning logs, attached to the next captured event.
pub fn breadcrumb_from_event(event: &tracing::Event) -> Breadcrumb {
    let metadata = event.metadata();
    let fields = Fields::of(event);

    Breadcrumb {
        ty: Some("log".to_owned()),
        category: Some(metadata.target().to_owned()),
        level: metadata.level().into(),
        message: fields.message,
        data: fields.data,
        ..Default::default()
    }
}

pub fn exception_from_event(event: &tracing::Event) -> Event {
    let metadata = event.metadata();
    let fields = Fields::of(event);

    Event {
        logger: Some(metadata.target().to_owned()),
        level: metadata.level().into(),
        message: fields.message,
        exception: fields.exceptions,
        extra: fields.data,
        ..Default::default()
    }
}

/// Exceptions for `err` and its sources, innermost cause first.
pub fn event_from_error<E: Error + ?Sized>(err: &E) -> Event {
    let mut exception = vec![exception_from_error(err)];
    exception.extend(
        std::iter::successors(err.source(), |&err| err.source())
            .map(exception_from_error),
    );
    exception.reverse();

    Event {
        exception,
        level: Level::Error,
        ..Default::default()
    }
}

/// Creates an unhandled exception [`Event`] from a panic message.
pub fn event_from_panic(message: String, location: Option<String>) -> Event {
    Event {
        culprit: location,
        exception: vec![Exception {
            ty: "panic".to_owned(),
            value: Some(message),
            mechanism: Some(Mechanism {
                ty: "panic".to_owned(),
                handled: Some(false),
            }),
            ..Default::default()
        }],
        level: Level::Fatal,
        ..Default::default()
    }
}

fn exception_from_error<E: Error + ?Sized>(err: &E) -> Exception {
    let debug = format!("{err:?}");
    let value = err.to_string();

    // string errors debug-format as the quoted message
    let ty = if debug == format!("{value:?}") {
        "Error"
    } else {
        type_from_debug(&debug)
    };

    Exception {
        ty: ty.to_owned(),
        value: Some(value),
        ..Default::default()
    }
}

/// `Request(Closed)` and `Mount { .. }` are of type `Request` and `Mount`.
fn type_from_debug(debug: &str) -> &str {
    let end = debug.find([' ', '(', '{', '\r', '\n']).unwrap_or(debug.len());
    debug[..end].trim()
}
