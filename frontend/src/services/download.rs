//! Save generated text as a file through a temporary object URL.

use anyhow::{anyhow, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const TEXT_MIME_TYPE: &str = "text/plain;charset=utf-8";

fn js_error(action: &'static str) -> impl Fn(JsValue) -> anyhow::Error {
    move |e| anyhow!("{} failed: {:?}", action, e)
}

/// Offer `content` to the user as a download named `file_name`
pub fn download_text(file_name: &str, content: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no browser window"))?;
    let document = window.document().ok_or_else(|| anyhow!("no document"))?;
    let body = document.body().ok_or_else(|| anyhow!("document has no body"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(TEXT_MIME_TYPE);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error("creating blob"))?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error("creating object URL"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error("creating link"))?
        .dyn_into()
        .map_err(|_| anyhow!("created element is not a link"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    body.append_child(&anchor).map_err(js_error("attaching link"))?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_error("detaching link"))?;
    Url::revoke_object_url(&url).map_err(js_error("revoking object URL"))?;

    log::info!("Downloaded {}", file_name);
    Ok(())
}
