//! Cover decoding through `HtmlImageElement`.

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use super::js_message;
use crate::consts::CROSS_ORIGIN_MODE;
use crate::loader::{ImageFetcher, LoadError};

/// Loads covers as anonymous cross-origin images so the canvas stays exportable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlImageFetcher;

impl ImageFetcher for HtmlImageFetcher {
    type Image = HtmlImageElement;

    async fn fetch(&self, url: &str) -> Result<HtmlImageElement, LoadError> {
        let img = HtmlImageElement::new().map_err(|e| LoadError::Create(js_message(&e)))?;
        img.set_cross_origin(Some(CROSS_ORIGIN_MODE));
        img.set_src(url);
        JsFuture::from(img.decode())
            .await
            .map_err(|e| LoadError::Decode { url: url.to_owned(), message: js_message(&e) })?;
        Ok(img)
    }
}
