//! Request URL construction for the content search API.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::Result;
use crate::domain::QueryParams;

pub const DEFAULT_BASE_URL: &str = "http://content.guardianapis.com/search";
pub const DEFAULT_API_KEY: &str = "test";

/// Number of stories requested per search. Pagination is not supported.
pub const PAGE_SIZE: u32 = 10;

/// Query parameter names owned by the builder. Pairs with these names are
/// stripped from the base URL so each appears exactly once.
const OWNED_PARAMS: [&str; 6] = ["q", "api-key", "format", "pageSize", "sectionName", "order-by"];

/// Static endpoint settings for the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Search endpoint, e.g. `http://content.guardianapis.com/search`
    pub base_url: String,
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

impl ApiConfig {
    /// Host and port of the endpoint, used for connectivity probing.
    pub fn host_and_port(&self) -> Result<(String, u16)> {
        let url = Url::parse(&self.base_url)?;
        let host = url
            .host_str()
            .ok_or(url::ParseError::EmptyHost)?
            .to_string();
        let port = url
            .port_or_known_default()
            .ok_or(url::ParseError::InvalidPort)?;
        Ok((host, port))
    }
}

/// Build the search URL for the given preferences.
///
/// Section and order values are passed through verbatim; rejecting unknown
/// values is left to the API. The parameter order is stable.
pub fn build_request_url(api: &ApiConfig, params: &QueryParams) -> Result<Url> {
    let mut url = Url::parse(&api.base_url)?;

    let extra: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !OWNED_PARAMS.contains(&name.as_ref()))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", "");
        pairs.append_pair("api-key", &api.api_key);
        for (name, value) in &extra {
            pairs.append_pair(name, value);
        }
        pairs.append_pair("format", "json");
        pairs.append_pair("pageSize", &PAGE_SIZE.to_string());
        pairs.append_pair("sectionName", &params.section);
        pairs.append_pair("order-by", params.order_by.as_str());
    }

    Ok(url)
}
