use crate::Result;

pub trait Transport {
    fn send(&self, url: String, auth: String, content: Vec<u8>) -> Result<()>;
}

/// Sends envelopes with the browser's `fetch`, fire and forget.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn send(&self, url: String, auth: String, content: Vec<u8>) -> Result<()> {
        wasm_bindgen_futures::spawn_local(async move {
            let body = js_sys::Uint8Array::from(content.as_slice());

            let response = reqwasm::http::Request::post(&url)
                .header("Content-Type", "application/x-sentry-envelope")
                .header("X-Sentry-Auth", &auth)
                .body(body)
                .send()
                .await;

            match response {
                Err(err) => tracing::warn!("failed to send envelope: {err:?}"),
                Ok(response) if response.status() >= 300 => {
                    tracing::warn!("failed to send envelope: {}", response.status())
                }
                Ok(_) => tracing::debug!("envelope sent"),
            }
        });

        Ok(())
    }
}
