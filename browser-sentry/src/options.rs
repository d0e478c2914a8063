use std::rc::Rc;

use git_version::git_version;

use crate::{integrations::Integration, protocol::Event, Dsn};

/// Hook invoked for every event right before it is handed to the transport.
///
/// Returning `None` drops the event.
pub type BeforeSend = Rc<dyn Fn(Event, Option<&Hint>) -> Option<Event>>;

/// Additional information about the origin of a captured event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Hint {
    /// Description of the error or panic payload the event was created from.
    pub original_exception: Option<String>,
    /// Source location, `file:line:column`, if known.
    pub location: Option<String>,
}

pub struct Options {
    pub dsn: Dsn,
    pub release: Option<String>,
    pub environment: Option<String>,
    pub integrations: Vec<Box<dyn Integration>>,
    pub before_send: Option<BeforeSend>,
    pub max_breadcrumbs: usize,
}

impl Options {
    pub fn new(dsn: Dsn) -> Self {
        Self {
            dsn,
            release: Some(git_version!(fallback = "unknown").to_owned()),
            environment: None,
            integrations: Vec::new(),
            before_send: None,
            max_breadcrumbs: 100,
        }
    }

    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn integration(mut self, integration: impl Integration + 'static) -> Self {
        self.integrations.push(Box::new(integration));
        self
    }

    pub fn before_send<F>(mut self, f: F) -> Self
    where
        F: Fn(Event, Option<&Hint>) -> Option<Event> + 'static,
    {
        self.before_send = Some(Rc::new(f));
        self
    }

    pub fn max_breadcrumbs(mut self, max: usize) -> Self {
        self.max_breadcrumbs = max;
        self
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("dsn", &self.dsn)
            .field("release", &self.release)
            .field("environment", &self.environment)
            .field(
                "integrations",
                &self.integrations.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field("before_send", &self.before_send.is_some())
            .field("max_breadcrumbs", &self.max_breadcrumbs)
            .finish()
    }
}
