//! HTTP feed source
//!
//! One plain HTTP/1.0 GET per fetch: resolve, connect, send, read until
//! the server closes. The whole response lands in a static buffer and
//! the body slice is handed to the feed format.

use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::Duration;
use embedded_io_async::Write;
use heapless::String;
use log::{debug, warn};

use abfahrt_core::config::MAX_PATH_LEN;
use abfahrt_core::traits::{FeedError, FeedSource, TransportError};
use abfahrt_drivers::http;

/// Response buffer size (headers + JSON body)
pub const RESPONSE_BUF_LEN: usize = 8 * 1024;

/// Socket timeout for connect and each read
const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);

const SOCKET_RX_LEN: usize = 1536;
const SOCKET_TX_LEN: usize = 512;
const REQUEST_LEN: usize = 384;

/// Departure feed over HTTP
pub struct HttpFeedSource {
    stack: Stack<'static>,
    host: &'static str,
    port: u16,
    path: String<MAX_PATH_LEN>,
    response: &'static mut [u8; RESPONSE_BUF_LEN],
}

impl HttpFeedSource {
    pub fn new(
        stack: Stack<'static>,
        host: &'static str,
        port: u16,
        path: String<MAX_PATH_LEN>,
        response: &'static mut [u8; RESPONSE_BUF_LEN],
    ) -> Self {
        Self {
            stack,
            host,
            port,
            path,
            response,
        }
    }

    /// Run one request, returning the number of response bytes read
    async fn request(&mut self) -> Result<usize, TransportError> {
        let addresses = self
            .stack
            .dns_query(self.host, DnsQueryType::A)
            .await
            .map_err(|e| {
                warn!("DNS lookup for {} failed: {:?}", self.host, e);
                TransportError::Dns
            })?;
        let address = addresses.first().copied().ok_or(TransportError::Dns)?;

        let mut rx_buf = [0u8; SOCKET_RX_LEN];
        let mut tx_buf = [0u8; SOCKET_TX_LEN];
        let mut socket = TcpSocket::new(self.stack, &mut rx_buf, &mut tx_buf);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        debug!("Connecting to {}:{}", address, self.port);
        socket
            .connect((address, self.port))
            .await
            .map_err(|_| TransportError::Connect)?;

        let mut request = [0u8; REQUEST_LEN];
        let request_len = http::write_request(self.host, &self.path, &mut request)?;
        socket
            .write_all(&request[..request_len])
            .await
            .map_err(|_| TransportError::Io)?;
        socket.flush().await.map_err(|_| TransportError::Io)?;

        let mut len = 0;
        loop {
            if len == self.response.len() {
                socket.abort();
                return Err(TransportError::Truncated);
            }
            match socket.read(&mut self.response[len..]).await {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(_) => {
                    socket.abort();
                    return Err(TransportError::Io);
                }
            }
        }

        socket.close();
        debug!("Read {} response bytes", len);
        Ok(len)
    }
}

impl FeedSource for HttpFeedSource {
    async fn fetch(&mut self) -> Result<&[u8], FeedError> {
        let len = self.request().await?;
        let body = http::parse_response(&self.response[..len])?;
        Ok(body)
    }
}
