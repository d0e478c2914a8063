use std::cell::RefCell;

use tracing::Subscriber;
use tracing_subscriber::{layer, registry::LookupSpan};

use crate::{protocol::Breadcrumb, Handle};

/// Breadcrumbs kept while no client is bound yet.
const MAX_PENDING: usize = 100;

thread_local! {
    static BOUND: RefCell<Option<Handle>> = RefCell::new(None);
    static PENDING: RefCell<Vec<Breadcrumb>> = RefCell::new(Vec::new());
}

pub(crate) fn bind(handle: Handle) {
    BOUND.with(|cell| *cell.borrow_mut() = Some(handle.clone()));

    // logs from before initialization, e.g. mounting the application
    let pending = PENDING.with(|cell| std::mem::take(&mut *cell.borrow_mut()));
    for breadcrumb in pending {
        handle.add_breadcrumb(breadcrumb);
    }
}

fn add_breadcrumb(breadcrumb: Breadcrumb) {
    let handle = BOUND.with(|cell| cell.borrow().clone());
    match handle {
        Some(handle) => handle.add_breadcrumb(breadcrumb),
        None => PENDING.with(|cell| {
            let mut pending = cell.borrow_mut();
            if pending.len() >= MAX_PENDING {
                pending.remove(0);
            }
            pending.push(breadcrumb);
        }),
    }
}

fn with_bound<F>(f: F)
where
    F: FnOnce(&Handle),
{
    // clone out of the cell, capturing may log again
    let handle = BOUND.with(|cell| cell.borrow().clone());
    if let Some(handle) = handle {
        f(&handle);
    }
}

/// Forwards `tracing` events to the client bound by [`crate::TracingIntegration`].
///
/// Errors are captured as events, warnings and infos are recorded as breadcrumbs.
/// Breadcrumbs recorded before a client is bound are handed to it once it is.
#[derive(Debug, Default)]
pub struct Layer {}

impl<S> layer::Layer<S> for Layer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: layer::Context<'_, S>) {
        use tracing::Level;

        // don't feed the client's own diagnostics back into it
        if event.metadata().target().starts_with(env!("CARGO_CRATE_NAME")) {
            return;
        }

        match event.metadata().level() {
            &Level::ERROR => {
                let event = super::converter::exception_from_event(event);
                with_bound(|sentry| {
                    sentry.capture_event(event, None);
                });
            }
            &Level::WARN | &Level::INFO => {
                let breadcrumb = super::converter::breadcrumb_from_event(event);
                add_breadcrumb(breadcrumb);
            }
            &Level::DEBUG | &Level::TRACE => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tracing_subscriber::prelude::*;

    use super::*;
    use crate::{Options, Result, Transport};

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Vec<u8>>>>);

    impl Transport for Recorder {
        fn send(&self, _url: String, _auth: String, content: Vec<u8>) -> Result<()> {
            self.0.borrow_mut().push(content);
            Ok(())
        }
    }

    #[test]
    fn test_layer_captures_errors() {
        let recorder = Recorder::default();
        let options = Options::new("https://key@sentry.example.com/1".parse().unwrap())
            .integration(crate::TracingIntegration);
        let _sentry = crate::init(options, recorder.clone());

        let subscriber = tracing_subscriber::registry().with(Layer::default());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "app", "mounted");
            tracing::debug!(target: "app", "ignored");
            tracing::error!(target: "app", "render failed");
        });

        let sent = recorder.0.borrow();
        assert_eq!(sent.len(), 1);

        let body = String::from_utf8(sent[0].clone()).unwrap();
        let payload: serde_json::Value =
            serde_json::from_str(body.lines().nth(2).unwrap()).unwrap();

        assert_eq!(payload["message"], "render failed");
        assert_eq!(payload["logger"], "app");
        assert_eq!(payload["breadcrumbs"][0]["message"], "mounted");
        assert_eq!(payload["breadcrumbs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_breadcrumbs_before_bind() {
        let recorder = Recorder::default();
        let subscriber = tracing_subscriber::registry().with(Layer::default());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "app", "mounting");
            tracing::warn!(target: "app", "mount point missing");

            let options = Options::new("https://key@sentry.example.com/1".parse().unwrap())
                .integration(crate::TracingIntegration);
            let _sentry = crate::init(options, recorder.clone());

            tracing::error!(target: "app", "render failed");
        });

        let sent = recorder.0.borrow();
        assert_eq!(sent.len(), 1);

        let body = String::from_utf8(sent[0].clone()).unwrap();
        let payload: serde_json::Value =
            serde_json::from_str(body.lines().nth(2).unwrap()).unwrap();

        let messages: Vec<_> = payload["breadcrumbs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["message"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(messages, ["mounting", "mount point missing"]);
    }
}
