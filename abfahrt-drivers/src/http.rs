//! HTTP/1.0 framing
//!
//! Just enough HTTP for one GET per connection: the request is sent with
//! `Connection: close`, the response is read until the peer closes, and
//! the body is everything after the header block. HTTP/1.0 keeps servers
//! from answering with chunked encoding.

use core::fmt::Write;

use abfahrt_core::traits::TransportError;

/// Status codes whose body is taken as the feed
pub const ACCEPTED_STATUS: [u16; 2] = [200, 301];

const HEADER_END: &[u8] = b"\r\n\r\n";

/// `fmt::Write` over a fixed byte buffer
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(core::fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Build a GET request for `path` on `host` into `buf`
///
/// Returns the request length, or `Truncated` if it does not fit.
pub fn write_request(host: &str, path: &str, buf: &mut [u8]) -> Result<usize, TransportError> {
    let mut writer = SliceWriter { buf, len: 0 };
    write!(
        writer,
        "GET {} HTTP/1.0\r\nHost: {}\r\nAccept: application/json\r\nUser-Agent: abfahrt\r\nConnection: close\r\n\r\n",
        path, host
    )
    .map_err(|_| TransportError::Truncated)?;
    Ok(writer.len)
}

/// Status code from the first response line
pub fn status_code(raw: &[u8]) -> Result<u16, TransportError> {
    let line_end = raw
        .iter()
        .position(|&b| b == b'\r')
        .ok_or(TransportError::Malformed)?;
    let line = core::str::from_utf8(&raw[..line_end]).map_err(|_| TransportError::Malformed)?;

    let mut parts = line.split(' ');
    let version = parts.next().ok_or(TransportError::Malformed)?;
    if !version.starts_with("HTTP/") {
        return Err(TransportError::Malformed);
    }

    parts
        .next()
        .and_then(|code| code.parse().ok())
        .ok_or(TransportError::Malformed)
}

/// Validate a complete response and return its body
pub fn parse_response(raw: &[u8]) -> Result<&[u8], TransportError> {
    let code = status_code(raw)?;

    let header_end = raw
        .windows(HEADER_END.len())
        .position(|w| w == HEADER_END)
        .ok_or(TransportError::Malformed)?;

    if !ACCEPTED_STATUS.contains(&code) {
        return Err(TransportError::Status(code));
    }

    Ok(&raw[header_end + HEADER_END.len()..])
}
