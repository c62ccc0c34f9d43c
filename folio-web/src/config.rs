//! JSON configuration for the page binding.

use folio::PageOptions;

use crate::WebError;

/// Parses a (possibly partial) JSON document over [`PageOptions::default`].
///
/// Missing keys keep their defaults; a blank string yields the defaults unchanged. The
/// result is validated before it is returned.
pub fn parse_options(json: &str) -> Result<PageOptions, WebError> {
    if json.trim().is_empty() {
        return Ok(PageOptions::default());
    }
    let options: PageOptions = serde_json::from_str(json)?;
    options.validate()?;
    Ok(options)
}
