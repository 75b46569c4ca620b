use url::Url;
use uuid::Uuid;

const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";
const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";

/// Builds the public and owner-facing URLs of the hosted site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLinks {
    base: Url,
}

impl SiteLinks {
    pub fn new(base: &str) -> Result<Self, LinkError> {
        let base = Url::parse(base.trim()).map_err(LinkError::Parse)?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(LinkError::UnsupportedBase(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `<base>/b/<business id>`
    pub fn public_page(&self, business_id: Uuid) -> Url {
        self.with_path(&["b", &business_id.to_string()])
    }

    /// `<base>/dashboard/<business id>?token=<token>`, the magic-link target.
    pub fn dashboard(&self, business_id: Uuid, token: &str) -> Url {
        let mut url = self.with_path(&["dashboard", &business_id.to_string()]);
        url.query_pairs_mut().append_pair("token", token);
        url
    }

    pub fn payment_callback(&self) -> Url {
        self.with_path(&["payment", "success"])
    }

    pub fn facebook_share(&self, page: &Url) -> Result<Url, LinkError> {
        Url::parse_with_params(FACEBOOK_SHARER, &[("u", page.as_str())]).map_err(LinkError::Parse)
    }

    pub fn twitter_share(&self, page: &Url, business_name: &str) -> Result<Url, LinkError> {
        let text = format!("Check out {business_name}'s holiday hours!");
        Url::parse_with_params(
            TWITTER_INTENT,
            &[("url", page.as_str()), ("text", text.as_str())],
        )
        .map_err(LinkError::Parse)
    }

    fn with_path(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("invalid site url: {0}")]
    Parse(#[source] url::ParseError),
    #[error("site url '{0}' must be an http(s) base url")]
    UnsupportedBase(String),
}
