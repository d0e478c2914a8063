mod client;
pub mod component;
mod converter;
mod dialog;
mod dsn;
mod error;
pub mod hooks;
mod integrations;
mod layer;
mod options;
pub mod protocol;
mod transport;
mod utils;

pub use self::client::{Client, Handle, CLIENT_NAME};
pub use self::converter::{event_from_error, event_from_panic};
pub use self::dialog::{BrowserReportDialog, ReportDialog};
pub use self::dsn::{Dsn, DsnError};
pub use self::error::{Error, Result};
pub use self::integrations::{Integration, PanicIntegration, TracingIntegration};
pub use self::layer::Layer;
pub use self::options::{BeforeSend, Hint, Options};
pub use self::protocol::{Breadcrumb, Event, Exception, Level, User};
pub use self::transport::{FetchTransport, Transport};

/// Creates the client and sets up every configured integration once.
///
/// The returned handle is the only client, keep it alive in the composition root.
pub fn init(mut options: Options, transport: impl Transport + 'static) -> Handle {
    let integrations = std::mem::take(&mut options.integrations);

    tracing::debug!(
        dsn = %options.dsn,
        integrations = ?integrations.iter().map(|i| i.name()).collect::<Vec<_>>(),
        "initializing sentry"
    );

    let handle = Handle::new(Client::new(Box::new(transport), options));
    for integration in &integrations {
        integration.setup(&handle);
    }

    handle
}

/// [`init`] with the browser's `fetch` as transport.
///
/// Events are tagged with the url of the page the application was loaded from.
pub fn init_browser(options: Options) -> Handle {
    let sentry = init(options, FetchTransport);

    let url = web_sys::window()
        .and_then(|window| window.location().href().ok())
        .and_then(|href| url::Url::parse(&href).ok());
    if let Some(url) = url {
        sentry.set_request(protocol::Request {
            url: Some(url),
            ..Default::default()
        });
    }

    sentry
}
