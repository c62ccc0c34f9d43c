use folio::OptionsError;

/// Errors raised while booting the page binding.
#[derive(Debug)]
pub enum WebError {
    NoWindow,
    NoDocument,
    NoBody,
    /// The JSON configuration could not be parsed.
    Config(serde_json::Error),
    Options(OptionsError),
    /// A DOM call threw.
    Js(String),
}

impl core::fmt::Display for WebError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no global `window`"),
            Self::NoDocument => f.write_str("window has no document"),
            Self::NoBody => f.write_str("document has no body"),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Options(err) => write!(f, "invalid options: {err}"),
            Self::Js(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Options(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WebError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}

impl From<OptionsError> for WebError {
    fn from(err: OptionsError) -> Self {
        Self::Options(err)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WebError> for wasm_bindgen::JsValue {
    fn from(err: WebError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
