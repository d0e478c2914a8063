use wasm_bindgen::JsCast;

use crate::{Dsn, Error, Result};

const SCRIPT_ID: &str = "sentry-report-dialog";

/// User facing prompt asking for additional context about a captured error.
pub trait ReportDialog {
    fn show(&self, event_id: uuid::Uuid);
}

/// Opens the hosted feedback dialog by injecting its loader script into the page.
#[derive(Debug, Clone)]
pub struct BrowserReportDialog {
    dsn: Dsn,
}

impl BrowserReportDialog {
    pub fn new(dsn: Dsn) -> Self {
        Self { dsn }
    }

    fn inject(&self, event_id: uuid::Uuid) -> Result<()> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(Error::Unavailable("document"))?;
        let head = document.head().ok_or(Error::Unavailable("document head"))?;

        if let Some(previous) = document.get_element_by_id(SCRIPT_ID) {
            previous.remove();
        }

        let script: web_sys::HtmlScriptElement = document
            .create_element("script")
            .map_err(|_| Error::Unavailable("script element"))?
            .unchecked_into();
        script.set_id(SCRIPT_ID);
        script.set_async(true);
        script.set_src(&self.dsn.report_dialog_url(event_id));

        head.append_child(&script)
            .map_err(|_| Error::Unavailable("document head"))?;

        Ok(())
    }
}

impl ReportDialog for BrowserReportDialog {
    fn show(&self, event_id: uuid::Uuid) {
        if let Err(err) = self.inject(event_id) {
            tracing::warn!("unable to show report dialog for {event_id}: {err}");
        }
    }
}
