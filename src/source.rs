//! Fetches the dataset document over HTTP from the browser.

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::dataset::Dataset;
use crate::error::LoadError;

/// Where the dataset lives.
#[derive(Clone, Debug)]
pub struct HttpDataSource {
	url: String,
}

impl HttpDataSource {
	/// Source for the document at `url`.
	pub fn new(url: impl Into<String>) -> Self {
		Self { url: url.into() }
	}

	/// Fetch and parse the document. Transport and parse failures go back to
	/// the caller; nothing is retried here.
	pub async fn fetch(&self) -> Result<Dataset, LoadError> {
		let opts = RequestInit::new();
		opts.set_method("GET");
		opts.set_mode(RequestMode::Cors);

		let request = Request::new_with_str_and_init(&self.url, &opts)
			.map_err(|e| LoadError::Request(format!("{e:?}")))?;
		let window = web_sys::window().ok_or_else(|| LoadError::Request("no window".into()))?;
		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(|e| LoadError::Request(format!("{e:?}")))?
			.dyn_into()
			.map_err(|_| LoadError::Request("fetch did not yield a Response".into()))?;

		if !response.ok() {
			return Err(LoadError::Status(response.status()));
		}

		let text = JsFuture::from(response.text().map_err(|e| LoadError::Body(format!("{e:?}")))?)
			.await
			.map_err(|e| LoadError::Body(format!("{e:?}")))?
			.as_string()
			.ok_or_else(|| LoadError::Body("body is not text".into()))?;
		debug!("fetched {} bytes from {}", text.len(), self.url);

		Dataset::from_json(&text)
	}
}
