use std::io::Write;

use serde::ser::SerializeStruct;
use serde::Serialize;

use super::utils::ts_rfc3339;

pub use serde_json::Value;
pub use std::collections::BTreeMap as Map;

#[derive(Default, Debug)]
pub struct Envelope {
    event_id: Option<uuid::Uuid>,
    items: Vec<EnvelopeItem>,
}

#[derive(Debug)]
pub enum EnvelopeItem {
    Event(Event),
}

impl Envelope {
    pub fn event_id(&self) -> Option<uuid::Uuid> {
        self.event_id
    }

    pub fn add_item(&mut self, item: EnvelopeItem) {
        if self.event_id.is_none() {
            let EnvelopeItem::Event(ref event) = item;
            self.event_id = Some(event.event_id);
        }
        self.items.push(item);
    }

    pub fn to_writer<W>(&self, mut writer: W) -> std::io::Result<()>
    where
        W: Write,
    {
        let mut item_buf = Vec::new();

        match self.event_id {
            Some(uuid) => writeln!(writer, r#"{{"event_id":"{}"}}"#, uuid.as_simple())?,
            _ => writeln!(writer, "{{}}")?,
        }

        for item in &self.items {
            // items are prefixed with their length, buffer them first
            let item_type = match item {
                EnvelopeItem::Event(event) => {
                    serde_json::to_writer(&mut item_buf, event)?;
                    "event"
                }
            };
            writeln!(
                writer,
                r#"{{"type":"{}","length":{}}}"#,
                item_type,
                item_buf.len()
            )?;
            writer.write_all(&item_buf)?;
            writeln!(writer)?;
            item_buf.clear();
        }

        Ok(())
    }
}

impl From<Event> for Envelope {
    fn from(event: Event) -> Self {
        let mut envelope = Self::default();
        envelope.add_item(EnvelopeItem::Event(event));
        envelope
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Timestamp {
        let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
        Self((nanos / 1_000_000) as u64)
    }

    pub fn from_msecs(msecs: u64) -> Timestamp {
        Self(msecs)
    }

    pub fn as_msecs(&self) -> u64 {
        self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ((self.0 as f64) / 1000.0).serialize(serializer)
    }
}

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Exception {
    /// The type of the exception.
    #[serde(rename = "type")]
    pub ty: String,
    /// The optional value of the exception.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// An optional module for this exception.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// How the exception was captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<Mechanism>,
}

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Mechanism {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handled: Option<bool>,
}

#[derive(Default, Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<url::Url>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub headers: Map<String, String>,
}

#[derive(Default, Clone, Debug, Serialize, PartialEq, Eq)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// Represents a full event for Sentry.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The ID of the event
    #[serde(serialize_with = "super::utils::serialize_id")]
    pub event_id: uuid::Uuid,
    /// The level of the event (defaults to error)
    pub level: Level,
    /// The culprit of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culprit: Option<String>,
    /// A message to be sent with the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optionally the name of the logger that created this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,
    /// A platform identifier for this event.
    pub platform: &'static str,
    /// The timestamp of when the event was created.
    #[serde(with = "ts_rfc3339")]
    pub timestamp: Timestamp,
    /// A release identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    /// An optional environment identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Optionally user data to be sent along.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// The page the event occurred on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub contexts: Map<String, Context>,
    /// List of breadcrumbs to send along.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Exceptions to be attached (one or multiple if chained).
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_exceptions"
    )]
    pub exception: Vec<Exception>,
    /// Optional tags to be attached to the event.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub tags: Map<String, String>,
    /// Optional extra information to be sent with the event.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Whether the event carries exception information.
    pub fn has_exception(&self) -> bool {
        !self.exception.is_empty()
    }
}

impl Default for Event {
    fn default() -> Self {
        Self {
            event_id: uuid::Uuid::new_v4(),
            level: Level::Error,
            culprit: Default::default(),
            message: Default::default(),
            logger: Default::default(),
            platform: "javascript",
            timestamp: Default::default(),
            release: Default::default(),
            environment: Default::default(),
            user: Default::default(),
            request: Default::default(),
            contexts: Default::default(),
            breadcrumbs: Default::default(),
            exception: Default::default(),
            tags: Default::default(),
            extra: Default::default(),
        }
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_exceptions<S>(exceptions: &Vec<Exception>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut s = serializer.serialize_struct("Exceptions", 1)?;
    s.serialize_field("values", exceptions)?;
    s.end()
}

/// Represents a single breadcrumb.
#[derive(Default, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub timestamp: Timestamp,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub level: Level,
    /// An optional human readbale message for the breadcrumb.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Arbitrary breadcrumb data that should be send along.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

#[derive(Default, Debug, Serialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
#[non_exhaustive]
pub enum Context {
    Component(ComponentContext),
}

/// The UI component which was rendering when an error occurred.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentContext {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Map<String, String>>,
}
