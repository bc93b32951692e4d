//! File helpers: saving downloaded bytes and reading picked files.

use icycon::FileUpload;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn describe(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Hand `bytes` to the browser as a download named `file_name`.
pub fn download_bytes(bytes: &[u8], content_type: &str, file_name: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let array = js_sys::Uint8Array::from(bytes);
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&array), &options)
        .map_err(describe)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(describe)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(describe)?
        .dyn_into()
        .map_err(|_| "anchor element expected".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    let _ = Url::revoke_object_url(&url);
    tracing::info!(file_name, size = bytes.len(), "download started");
    Ok(())
}

/// Read a picked file into memory for upload.
pub async fn read_file(file: web_sys::File) -> Result<FileUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(describe)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(FileUpload {
        file_name: file.name(),
        mime,
        bytes,
    })
}
