//! SNTP task
//!
//! Sets the wall clock at startup and once an hour after that.

use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration, Timer};
use log::{error, info, warn};

use abfahrt_drivers::sntp::{self, SntpError, NTP_PORT, PACKET_LEN};

use crate::clock::CLOCK;
use crate::station::NTP_SERVER;

/// Local UDP port for requests
const LOCAL_PORT: u16 = 50123;

/// Interval between successful syncs
const RESYNC_INTERVAL: Duration = Duration::from_secs(3600);

/// Interval before retrying a failed sync
const RETRY_INTERVAL: Duration = Duration::from_secs(10);

/// How long to wait for a reply
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
enum SyncError {
    Dns,
    Send,
    Timeout,
    Receive,
    Reply(SntpError),
}

/// SNTP task - keeps `CLOCK` in sync
#[embassy_executor::task]
pub async fn sntp_task(stack: Stack<'static>) {
    info!("SNTP task started");

    let mut rx_meta = [PacketMetadata::EMPTY; 2];
    let mut rx_buf = [0u8; 2 * PACKET_LEN];
    let mut tx_meta = [PacketMetadata::EMPTY; 2];
    let mut tx_buf = [0u8; 2 * PACKET_LEN];
    let mut socket = UdpSocket::new(stack, &mut rx_meta, &mut rx_buf, &mut tx_meta, &mut tx_buf);

    if let Err(e) = socket.bind(LOCAL_PORT) {
        error!("SNTP bind failed: {:?}", e);
        return;
    }

    loop {
        stack.wait_config_up().await;

        let pause = match sync(stack, &socket).await {
            Ok(unix) => {
                let first = !CLOCK.is_synced();
                CLOCK.set(unix);
                info!("Clock synced to {} ({})", unix, if first { "first" } else { "resync" });
                RESYNC_INTERVAL
            }
            Err(e) => {
                warn!("SNTP sync with {} failed: {:?}", NTP_SERVER, e);
                RETRY_INTERVAL
            }
        };

        Timer::after(pause).await;
    }
}

async fn sync(stack: Stack<'static>, socket: &UdpSocket<'_>) -> Result<i64, SyncError> {
    let addresses = stack
        .dns_query(NTP_SERVER, DnsQueryType::A)
        .await
        .map_err(|_| SyncError::Dns)?;
    let server = addresses.first().copied().ok_or(SyncError::Dns)?;

    socket
        .send_to(&sntp::request(), (server, NTP_PORT))
        .await
        .map_err(|_| SyncError::Send)?;

    let mut reply = [0u8; PACKET_LEN];
    let (len, _) = with_timeout(REPLY_TIMEOUT, socket.recv_from(&mut reply))
        .await
        .map_err(|_| SyncError::Timeout)?
        .map_err(|_| SyncError::Receive)?;

    sntp::parse_reply(&reply[..len]).map_err(SyncError::Reply)
}
