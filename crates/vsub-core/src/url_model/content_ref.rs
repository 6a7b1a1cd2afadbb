//! Content id extraction from `/tv/<id>` and `/movies/<id>` URLs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, VsubError};

/// `/tv/` or `/movies/`, then 2-9 digits and a trailing `v` or `c`.
static CONTENT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(tv|movies)/([0-9]{2,9}[vc])").expect("content path pattern is valid")
});

/// Series vs. movie classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Series,
    Movie,
}

impl ContentKind {
    /// Maps the `type` field of a container response. Anything that is not
    /// `series` is a single downloadable unit.
    pub fn from_api_type(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case("series") {
            ContentKind::Series
        } else {
            ContentKind::Movie
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Series => write!(f, "series"),
            ContentKind::Movie => write!(f, "movie"),
        }
    }
}

/// Identifier and kind parsed once from the user-supplied URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef {
    pub id: String,
    pub kind: ContentKind,
}

impl ContentRef {
    /// Finds the first `/tv/<id>` or `/movies/<id>` segment in `input`.
    ///
    /// The input does not have to be an absolute URL; `viki.com/tv/37350c`
    /// parses the same as the full `https://` form.
    pub fn parse(input: &str) -> Result<Self> {
        let caps = CONTENT_PATH
            .captures(input)
            .ok_or_else(|| VsubError::InvalidUrl {
                input: input.to_string(),
            })?;
        let kind = match &caps[1] {
            "tv" => ContentKind::Series,
            _ => ContentKind::Movie,
        };
        Ok(ContentRef {
            id: caps[2].to_string(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_url() {
        let r = ContentRef::parse("https://www.viki.com/tv/37350c-twinkling-watermelon").unwrap();
        assert_eq!(r.id, "37350c");
        assert_eq!(r.kind, ContentKind::Series);
    }

    #[test]
    fn movie_url() {
        let r = ContentRef::parse("https://www.viki.com/movies/40210c-some-film").unwrap();
        assert_eq!(r.id, "40210c");
        assert_eq!(r.kind, ContentKind::Movie);
    }

    #[test]
    fn video_suffix_and_no_scheme() {
        let r = ContentRef::parse("viki.com/tv/1234567v").unwrap();
        assert_eq!(r.id, "1234567v");
    }

    #[test]
    fn rejects_urls_without_content_segment() {
        for input in [
            "https://www.viki.com/",
            "https://www.viki.com/videos/1234567v",
            "https://www.viki.com/tv/1c",
            "https://www.viki.com/tv/37350x",
            "https://www.viki.com/tv/1234567890c",
            "https://www.viki.com/movies/",
            "not a url",
        ] {
            match ContentRef::parse(input) {
                Err(VsubError::InvalidUrl { input: got }) => assert_eq!(got, input),
                other => panic!("expected InvalidUrl for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn api_type_mapping() {
        assert_eq!(ContentKind::from_api_type("series"), ContentKind::Series);
        assert_eq!(ContentKind::from_api_type("movie"), ContentKind::Movie);
        assert_eq!(ContentKind::from_api_type("film"), ContentKind::Movie);
    }
}
