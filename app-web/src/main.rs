use app::{components::bus_icon, consts, Bootstrap};
use sycamore::prelude::DomNode;
use tracing_subscriber::prelude::*;

pub fn main() {
    console_error_panic_hook::set_once();
    setup_logging();

    let mounted = Bootstrap::<DomNode>::new(consts::MOUNT_POINT)
        .component(consts::BUS_ICON, bus_icon::render)
        .mount();

    // the panic hook and the tracing layer keep the client alive after `main` returns
    let sentry = match init_sentry() {
        Ok(sentry) => sentry,
        Err(err) => {
            tracing::warn!("error reporting disabled: {err}");
            return;
        }
    };

    match mounted {
        Ok(mounted) => tracing::info!("error reporting enabled for {}", mounted.selector()),
        Err(err) => {
            tracing::warn!("failed to mount application: {err}");
            sentry.capture_error(&err);
        }
    }
}

fn setup_logging() {
    let config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(tracing::Level::DEBUG)
        .build();

    tracing_subscriber::registry()
        .with(tracing_wasm::WASMLayer::new(config))
        .with(sentry::Layer::default())
        .init();
}

fn init_sentry() -> sentry::Result<sentry::Handle> {
    let dsn: sentry::Dsn = consts::SENTRY_DSN.parse()?;

    let dialog = sentry::BrowserReportDialog::new(dsn.clone());
    let options = sentry::Options::new(dsn)
        .integration(sentry::PanicIntegration::new().attach_props(true))
        .integration(sentry::TracingIntegration)
        .before_send(sentry::hooks::report_dialog_on_exception(dialog));

    Ok(sentry::init_browser(options))
}
