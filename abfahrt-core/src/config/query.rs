//! Feed request parameters

use core::fmt::Write;

use heapless::String;

/// Departure endpoint path on the feed host
pub const FEED_PATH: &str = "/api/fib/v1/departure";

/// Maximum length of a rendered request path
pub const MAX_PATH_LEN: usize = 192;

/// Which departures to request from the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedQuery<'a> {
    /// Stop identifier (e.g. `de:09184:490` for Garching)
    pub global_id: &'a str,
    /// Maximum number of departures returned
    pub limit: u8,
    /// Only return departures at least this many minutes from now
    pub offset_minutes: u16,
    /// Comma separated transport filter (e.g. `UBAHN`)
    pub transport_types: &'a str,
}

impl FeedQuery<'static> {
    /// U6 northbound at Garching
    pub const GARCHING: Self = Self {
        global_id: "de:09184:490",
        limit: 10,
        offset_minutes: 0,
        transport_types: "UBAHN",
    };
}

impl Default for FeedQuery<'static> {
    fn default() -> Self {
        Self::GARCHING
    }
}

impl FeedQuery<'_> {
    /// Render the request path including the query string
    ///
    /// Fails if the parameters do not fit in `MAX_PATH_LEN`.
    pub fn path(&self) -> Result<String<MAX_PATH_LEN>, core::fmt::Error> {
        let mut path = String::new();
        write!(
            path,
            "{}?globalId={}&limit={}&offsetInMinutes={}&transportTypes={}",
            FEED_PATH, self.global_id, self.limit, self.offset_minutes, self.transport_types
        )?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path() {
        let path = FeedQuery::default().path().unwrap();
        assert_eq!(
            path.as_str(),
            "/api/fib/v1/departure?globalId=de:09184:490&limit=10&offsetInMinutes=0&transportTypes=UBAHN"
        );
    }

    #[test]
    fn test_custom_query() {
        let query = FeedQuery {
            global_id: "de:09162:6",
            limit: 4,
            offset_minutes: 2,
            transport_types: "UBAHN,SBAHN",
        };
        let path = query.path().unwrap();
        assert!(path.ends_with("globalId=de:09162:6&limit=4&offsetInMinutes=2&transportTypes=UBAHN,SBAHN"));
    }

    #[test]
    fn test_path_overflow() {
        // Longer than MAX_PATH_LEN on its own
        const LONG_ID: &str = "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";
        let query = FeedQuery {
            global_id: LONG_ID,
            ..FeedQuery::GARCHING
        };
        assert!(query.path().is_err());
    }
}
