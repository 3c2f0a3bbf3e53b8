//! Build script for abfahrt-firmware
//!
//! - Passes the esp-hal linker script to the binary
//! - Validates station.toml and generates `station.rs` constants

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Departure API feed capacity in abfahrt-core
const MAX_LIMIT: i64 = 16;

/// Room left for station id and transport filter in the request path
const MAX_QUERY_TEXT: usize = 110;

fn main() {
    setup_linker();
    let station = validate_config();
    generate_constants(&station);
}

/// Link against the esp-hal memory layout
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated deployment settings
struct Station {
    ssid: String,
    password: String,
    host: String,
    port: u16,
    global_id: String,
    limit: u8,
    transport_types: String,
    ntp_server: String,
}

/// Validate station.toml at compile time
fn validate_config() -> Station {
    println!("cargo:rerun-if-changed=station.toml");

    let config_path = Path::new("station.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: station.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a station.toml with WiFi credentials,     ║\n\
            ║  feed host and stop id in the abfahrt-firmware directory.        ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read station.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in station.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let ssid = required_str(&config, "wifi", "ssid", &mut errors);
    let password = optional_str(&config, "wifi", "password", "", &mut errors);
    let host = required_str(&config, "feed", "host", &mut errors);
    let port = optional_int(&config, "feed", "port", 80, 1, 65535, &mut errors);
    let global_id = required_str(&config, "station", "global_id", &mut errors);
    let limit = optional_int(&config, "station", "limit", 10, 1, MAX_LIMIT, &mut errors);
    let transport_types = optional_str(&config, "station", "transport_types", "UBAHN", &mut errors);
    let ntp_server = optional_str(&config, "ntp", "server", "pool.ntp.org", &mut errors);

    if ssid.len() > 32 {
        errors.push("[wifi] ssid must be at most 32 bytes".to_string());
    }
    if password.len() > 64 {
        errors.push("[wifi] password must be at most 64 bytes".to_string());
    }
    if global_id.len() + transport_types.len() > MAX_QUERY_TEXT {
        errors.push(format!(
            "[station] global_id + transport_types exceed {} bytes",
            MAX_QUERY_TEXT
        ));
    }
    if [&global_id, &transport_types]
        .iter()
        .any(|s| s.contains(|c: char| c == '&' || c == ' ' || c == '#'))
    {
        errors.push("[station] values must not contain '&', '#' or spaces".to_string());
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid station configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=station.toml validated successfully");

    Station {
        ssid,
        password,
        host,
        port: port as u16,
        global_id,
        limit: limit as u8,
        transport_types,
        ntp_server,
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn lookup<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

fn required_str(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> String {
    match lookup(config, section, key) {
        Some(toml::Value::String(s)) if !s.is_empty() => s.clone(),
        Some(toml::Value::String(_)) => {
            errors.push(format!("[{}] {} cannot be empty", section, key));
            String::new()
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be a string", section, key));
            String::new()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            String::new()
        }
    }
}

fn optional_str(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: &str,
    errors: &mut Vec<String>,
) -> String {
    match lookup(config, section, key) {
        Some(toml::Value::String(s)) => s.clone(),
        Some(_) => {
            errors.push(format!("[{}] {} must be a string", section, key));
            String::new()
        }
        None => default.to_string(),
    }
}

fn optional_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match lookup(config, section, key) {
        Some(toml::Value::Integer(n)) if (min..=max).contains(n) => *n,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            default
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            default
        }
        None => default,
    }
}

/// Write `station.rs` into OUT_DIR
fn generate_constants(station: &Station) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    let source = format!(
        "// Generated from station.toml\n\
        pub const WIFI_SSID: &str = {:?};\n\
        pub const WIFI_PASSWORD: &str = {:?};\n\
        pub const FEED_HOST: &str = {:?};\n\
        pub const FEED_PORT: u16 = {};\n\
        pub const STATION_GLOBAL_ID: &str = {:?};\n\
        pub const FEED_LIMIT: u8 = {};\n\
        pub const TRANSPORT_TYPES: &str = {:?};\n\
        pub const NTP_SERVER: &str = {:?};\n",
        station.ssid,
        station.password,
        station.host,
        station.port,
        station.global_id,
        station.limit,
        station.transport_types,
        station.ntp_server,
    );

    fs::write(out_dir.join("station.rs"), source).expect("write station.rs");
}
