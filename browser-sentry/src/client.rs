use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::{
    converter,
    protocol::{self, Envelope, Event},
    transport::Transport,
    Hint, Options, Result,
};

pub const CLIENT_NAME: &str = "bustracker/1.0";

pub struct Client {
    transport: Box<dyn Transport>,
    options: Options,
    breadcrumbs: VecDeque<protocol::Breadcrumb>,
    user: Option<protocol::User>,
    request: Option<protocol::Request>,
}

impl Client {
    pub fn new(transport: Box<dyn Transport>, options: Options) -> Self {
        Self {
            transport,
            options,
            breadcrumbs: VecDeque::new(),
            user: None,
            request: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_user(&mut self, user: impl Into<Option<protocol::User>>) {
        self.user = user.into();
    }

    pub fn set_request(&mut self, request: impl Into<Option<protocol::Request>>) {
        self.request = request.into();
    }

    pub fn add_breadcrumb(&mut self, breadcrumb: protocol::Breadcrumb) {
        if self.options.max_breadcrumbs == 0 {
            return;
        }
        while self.breadcrumbs.len() >= self.options.max_breadcrumbs {
            self.breadcrumbs.pop_front();
        }
        self.breadcrumbs.push_back(breadcrumb);
    }

    pub fn capture_error(&self, err: &dyn std::error::Error) -> Option<uuid::Uuid> {
        let hint = Hint {
            original_exception: Some(err.to_string()),
            ..Default::default()
        };
        self.capture_event(converter::event_from_error(err), Some(&hint))
    }

    pub fn capture_message(
        &self,
        message: impl Into<String>,
        level: protocol::Level,
    ) -> Option<uuid::Uuid> {
        let event = Event {
            message: Some(message.into()),
            level,
            ..Default::default()
        };
        self.capture_event(event, None)
    }

    /// Enriches the event, passes it through the `before_send` hook and sends it.
    ///
    /// Returns the id of the sent event, `None` if it was dropped or could not be sent.
    pub fn capture_event(&self, mut event: Event, hint: Option<&Hint>) -> Option<uuid::Uuid> {
        if event.release.is_none() {
            event.release = self.options.release.clone();
        }
        if event.environment.is_none() {
            event.environment = self.options.environment.clone();
        }
        if event.user.is_none() {
            event.user = self.user.clone();
        }
        if event.request.is_none() {
            event.request = self.request.clone();
        }
        event.breadcrumbs.extend(self.breadcrumbs.iter().cloned());

        let event = match self.options.before_send {
            Some(ref before_send) => before_send(event, hint)?,
            None => event,
        };

        let event_id = event.event_id;
        match self.send_envelope(event.into()) {
            Ok(()) => Some(event_id),
            Err(err) => {
                tracing::warn!("failed to capture event with sentry: {err}");
                None
            }
        }
    }

    fn send_envelope(&self, envelope: Envelope) -> Result<()> {
        let mut body = Vec::new();
        envelope.to_writer(&mut body)?;

        let dsn = &self.options.dsn;
        self.transport
            .send(dsn.envelope_url(), dsn.auth_header(CLIENT_NAME), body)
    }
}

/// Shared handle to the single client of the application.
#[derive(Clone)]
pub struct Handle(Rc<RefCell<Client>>);

impl Handle {
    pub(crate) fn new(client: Client) -> Self {
        Self(Rc::new(RefCell::new(client)))
    }

    pub fn capture_event(&self, event: Event, hint: Option<&Hint>) -> Option<uuid::Uuid> {
        // re-entrant mutation (e.g. a breadcrumb logged from the hook) is skipped, not a panic
        self.0.try_borrow().ok()?.capture_event(event, hint)
    }

    pub fn capture_error(&self, err: &dyn std::error::Error) -> Option<uuid::Uuid> {
        self.0.try_borrow().ok()?.capture_error(err)
    }

    pub fn capture_message(
        &self,
        message: impl Into<String>,
        level: protocol::Level,
    ) -> Option<uuid::Uuid> {
        self.0.try_borrow().ok()?.capture_message(message, level)
    }

    pub fn add_breadcrumb(&self, breadcrumb: protocol::Breadcrumb) {
        if let Ok(mut client) = self.0.try_borrow_mut() {
            client.add_breadcrumb(breadcrumb);
        }
    }

    pub fn set_user(&self, user: impl Into<Option<protocol::User>>) {
        if let Ok(mut client) = self.0.try_borrow_mut() {
            client.set_user(user);
        }
    }

    pub fn set_request(&self, request: impl Into<Option<protocol::Request>>) {
        if let Ok(mut client) = self.0.try_borrow_mut() {
            client.set_request(request);
        }
    }

    pub fn ptr_eq(&self, other: &Handle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.try_borrow() {
            Ok(client) => f.debug_tuple("Handle").field(client.options()).finish(),
            Err(_) => f.debug_tuple("Handle").field(&"<borrowed>").finish(),
        }
    }
}
