//! SNTP packet codec
//!
//! Client side of RFC 4330: a 48-byte mode 3 request, and the transmit
//! timestamp of the server's mode 4 reply. Only whole seconds are kept.

/// NTP server port
pub const NTP_PORT: u16 = 123;

/// Size of an NTP packet without extensions
pub const PACKET_LEN: usize = 48;

/// Seconds from 1900-01-01 (NTP era 0) to 1970-01-01
pub const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

/// Length of one NTP era
const ERA_SECONDS: i64 = 1 << 32;

/// LI = 0, VN = 3, Mode = 3 (client)
const CLIENT_HEADER: u8 = 0x1B;

const MODE_MASK: u8 = 0x07;
const MODE_SERVER: u8 = 4;

/// Offset of the transmit timestamp seconds field
const TRANSMIT_SECONDS: usize = 40;

/// Reply validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SntpError {
    /// Reply shorter than a full packet
    Short,
    /// Reply is not from a server
    Mode(u8),
    /// Kiss-o'-death or unsynchronized server
    Unsynchronized,
}

/// Build a client request
pub fn request() -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    packet[0] = CLIENT_HEADER;
    packet
}

/// Extract unix seconds from a server reply
pub fn parse_reply(reply: &[u8]) -> Result<i64, SntpError> {
    if reply.len() < PACKET_LEN {
        return Err(SntpError::Short);
    }

    let mode = reply[0] & MODE_MASK;
    if mode != MODE_SERVER {
        return Err(SntpError::Mode(mode));
    }

    // Stratum 0 carries a kiss code instead of a time
    if reply[1] == 0 {
        return Err(SntpError::Unsynchronized);
    }

    let mut seconds = [0u8; 4];
    seconds.copy_from_slice(&reply[TRANSMIT_SECONDS..TRANSMIT_SECONDS + 4]);
    let ntp_seconds = u32::from_be_bytes(seconds);
    if ntp_seconds == 0 {
        return Err(SntpError::Unsynchronized);
    }

    Ok(unix_seconds(ntp_seconds))
}

/// Map 32-bit NTP seconds to unix seconds
///
/// Values below the 1970 offset belong to era 1, which starts on
/// 2036-02-07.
fn unix_seconds(ntp_seconds: u32) -> i64 {
    let seconds = ntp_seconds as i64;
    if seconds < NTP_UNIX_OFFSET {
        seconds + ERA_SECONDS - NTP_UNIX_OFFSET
    } else {
        seconds - NTP_UNIX_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(transmit: u32) -> [u8; PACKET_LEN] {
        let mut packet = [0u8; PACKET_LEN];
        packet[0] = 0x24; // LI 0, VN 4, mode 4
        packet[1] = 2;
        packet[TRANSMIT_SECONDS..TRANSMIT_SECONDS + 4].copy_from_slice(&transmit.to_be_bytes());
        packet
    }

    #[test]
    fn test_request_header() {
        let packet = request();
        assert_eq!(packet[0], 0x1B);
        assert!(packet[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_parse_reply() {
        let ntp = (1_717_000_000i64 + NTP_UNIX_OFFSET) as u32;
        assert_eq!(parse_reply(&reply(ntp)), Ok(1_717_000_000));
    }

    #[test]
    fn test_era_rollover() {
        // Last second of era 0
        assert_eq!(parse_reply(&reply(u32::MAX)), Ok(2_085_978_495));
        // 2040-01-01 00:00:00 UTC, early in era 1
        assert_eq!(parse_reply(&reply(123_010_304)), Ok(2_208_988_800));
    }

    #[test]
    fn test_short_reply() {
        assert_eq!(parse_reply(&[0x24; 20]), Err(SntpError::Short));
    }

    #[test]
    fn test_wrong_mode() {
        let mut packet = reply(3_925_988_800);
        packet[0] = 0x1B;
        assert_eq!(parse_reply(&packet), Err(SntpError::Mode(3)));
    }

    #[test]
    fn test_kiss_of_death() {
        let mut packet = reply(3_925_988_800);
        packet[1] = 0;
        assert_eq!(parse_reply(&packet), Err(SntpError::Unsynchronized));
        assert_eq!(parse_reply(&reply(0)), Err(SntpError::Unsynchronized));
    }
}
