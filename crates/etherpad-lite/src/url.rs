//! URL construction for API calls

use crate::error::{EtherpadError, Result};
use crate::params::Params;
use reqwest::Url;

/// Remove exactly one trailing slash, if present.
pub fn clean_url(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Build `{base}/{function}?apikey={key}&{params...}`.
///
/// The API key always comes first, followed by the parameters in insertion
/// order. Values are form-urlencoded.
pub fn generate_url(base_url: &str, function: &str, params: &Params, api_key: &str) -> Result<Url> {
    let endpoint = format!("{}/{}", clean_url(base_url), function);
    let mut url = Url::parse(&endpoint)
        .map_err(|e| EtherpadError::InvalidConfig(format!("invalid URL {}: {}", endpoint, e)))?;

    url.query_pairs_mut()
        .append_pair("apikey", api_key)
        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    Ok(url)
}
