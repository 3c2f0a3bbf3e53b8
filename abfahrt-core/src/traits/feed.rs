//! Feed transport and format traits

use crate::departure::Feed;

/// Errors fetching the raw feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Host name did not resolve
    Dns,
    /// TCP connection refused or timed out
    Connect,
    /// Read or write failed mid-request
    Io,
    /// Server answered with a status other than 200/301
    Status(u16),
    /// Response did not fit the receive buffer
    Truncated,
    /// Response was not valid HTTP
    Malformed,
}

/// Errors decoding the feed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Not well-formed JSON
    Syntax,
    /// Well-formed JSON of the wrong shape
    Data,
    /// Payload ended early
    Eof,
}

/// Feed update failure
///
/// Both kinds are handled the same way: keep the previous feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedError {
    /// Fetching failed
    Transport(TransportError),
    /// Decoding failed
    Parse(ParseError),
}

impl From<TransportError> for FeedError {
    fn from(error: TransportError) -> Self {
        FeedError::Transport(error)
    }
}

impl From<ParseError> for FeedError {
    fn from(error: ParseError) -> Self {
        FeedError::Parse(error)
    }
}

/// Source of raw feed payloads
///
/// `fetch` may take as long as the round trip; the caller awaits it
/// inline and nothing else happens on the display meanwhile.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    /// Fetch the current payload
    ///
    /// The returned bytes borrow the source's receive buffer and stay
    /// valid until the next fetch.
    async fn fetch(&mut self) -> Result<&[u8], FeedError>;
}

/// Decoder from raw payload to a departure feed
pub trait FeedFormat {
    /// Decode `raw` into a feed sorted as the source sent it
    fn parse(&self, raw: &[u8]) -> Result<Feed, FeedError>;
}
