use std::fmt;

use super::media::{MediaId, ServerName};

/// `mxc://<origin>/<media-id>` locator for stored media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUri {
    origin: ServerName,
    media_id: MediaId,
}

impl ContentUri {
    pub const SCHEME: &'static str = "mxc";

    pub fn new(origin: ServerName, media_id: MediaId) -> Self {
        Self { origin, media_id }
    }

    pub fn origin(&self) -> &ServerName {
        &self.origin
    }

    pub fn media_id(&self) -> &MediaId {
        &self.media_id
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", Self::SCHEME, self.origin, self.media_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_origin_and_media_id() {
        let uri = ContentUri::new(ServerName::new("example.com"), MediaId::new("abc123"));
        assert_eq!(uri.to_string(), "mxc://example.com/abc123");
    }
}
