use std::cell::RefCell;

use crate::{component, converter, protocol::Context, Handle, Hint};

// panic hooks must be `Send + Sync`, the handle is not
thread_local!(static PANIC_SENTRY: RefCell<Option<Handle>> = RefCell::new(None));

/// Connects the client to a source of errors or context.
pub trait Integration {
    fn name(&self) -> &'static str;

    /// Called exactly once when the client is initialized.
    fn setup(&self, sentry: &Handle);
}

/// Captures panics, the wasm equivalent of an uncaught exception in a component.
///
/// Panics are still printed to the console through [`console_error_panic_hook`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicIntegration {
    attach_props: bool,
}

impl PanicIntegration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the props of the rendering component in the component context.
    pub fn attach_props(mut self, attach_props: bool) -> Self {
        self.attach_props = attach_props;
        self
    }
}

impl Integration for PanicIntegration {
    fn name(&self) -> &'static str {
        "panic"
    }

    fn setup(&self, sentry: &Handle) {
        PANIC_SENTRY.with(|cell| *cell.borrow_mut() = Some(sentry.clone()));
        let attach_props = self.attach_props;

        std::panic::set_hook(Box::new(move |info| {
            console_error_panic_hook::hook(info);

            let message = match info.payload().downcast_ref::<&str>() {
                Some(s) => (*s).to_owned(),
                None => match info.payload().downcast_ref::<String>() {
                    Some(s) => s.clone(),
                    None => "Box<dyn Any>".to_owned(),
                },
            };
            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));

            let Some(sentry) = PANIC_SENTRY.with(|cell| cell.borrow().clone()) else {
                return;
            };
            let (event, hint) = panic_event(message, location, attach_props);
            sentry.capture_event(event, Some(&hint));
        }));
    }
}

fn panic_event(
    message: String,
    location: Option<String>,
    attach_props: bool,
) -> (crate::protocol::Event, Hint) {
    let mut event = converter::event_from_panic(message.clone(), location.clone());
    if let Some(mut context) = component::current() {
        if !attach_props {
            context.props = None;
        }
        event
            .contexts
            .insert("component".to_owned(), Context::Component(context));
    }

    let hint = Hint {
        original_exception: Some(message),
        location,
    };

    (event, hint)
}

/// Routes events of [`crate::Layer`] to the client.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingIntegration;

impl Integration for TracingIntegration {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn setup(&self, sentry: &Handle) {
        crate::layer::bind(sentry.clone());
    }
}
