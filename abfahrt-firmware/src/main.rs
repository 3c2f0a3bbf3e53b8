//! Abfahrt - Departure Board Firmware
//!
//! Main firmware binary for ESP32-C3 boards driving a 16x2 HD44780 LCD
//! over a PCF8574 I2C backpack. Shows the next two departures at one
//! stop, fetched from the MVG departure API once a minute.
//!
//! Named after the German "Abfahrt" (departure).

#![no_std]
#![no_main]

extern crate alloc;

use embassy_executor::Spawner;
use embassy_net::{Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::Blocking;
use heapless::String;
use log::{error, info, warn};
use static_cell::StaticCell;

use abfahrt_core::config::{FeedQuery, MAX_PATH_LEN, WIFI_INIT_MESSAGE};
use abfahrt_core::marquee::render_message;
use abfahrt_core::traits::DisplaySurface;
use abfahrt_drivers::lcd::Hd44780;

use crate::fetch::{HttpFeedSource, RESPONSE_BUF_LEN};
use crate::link::NetLink;
use crate::station::{FEED_HOST, FEED_LIMIT, FEED_PORT, STATION_GLOBAL_ID, TRANSPORT_TYPES};

mod clock;
mod fetch;
mod link;
mod station;
mod tasks;

esp_bootloader_esp_idf::esp_app_desc!();

/// The LCD as wired on the board
pub type Lcd = Hd44780<I2c<'static, Blocking>, Delay>;

// Heap for esp-radio and JSON decoding: 96KB
const HEAP_SIZE: usize = 96 * 1024;

/// Sockets: DHCP, DNS, TCP feed, UDP SNTP
const SOCKETS: usize = 4;

// Static cells (must live forever for task references)
static RADIO: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<SOCKETS>> = StaticCell::new();
static RESPONSE_BUF: StaticCell<[u8; RESPONSE_BUF_LEN]> = StaticCell::new();

/// Main entry point
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    info!("Abfahrt firmware starting...");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);
    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);
    info!("Peripherals initialized");

    // LCD on I2C0: SDA GPIO8, SCL GPIO9
    let i2c = match I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(100)),
    ) {
        Ok(i2c) => i2c.with_sda(peripherals.GPIO8).with_scl(peripherals.GPIO9),
        Err(e) => {
            error!("I2C config rejected: {:?}", e);
            park().await
        }
    };

    let mut lcd: Lcd = Hd44780::new(i2c, Delay::new());
    if let Err(e) = lcd.init() {
        warn!("LCD init failed: {:?}", e);
    }
    if let Err(e) = lcd.set_blink(true) {
        warn!("LCD blink failed: {:?}", e);
    }
    lcd.write_line(0, &render_message(WIFI_INIT_MESSAGE));
    info!("LCD initialized");

    // WiFi station
    let radio = match esp_radio::init() {
        Ok(radio) => RADIO.init(radio),
        Err(e) => {
            error!("Radio init failed: {:?}", e);
            park().await
        }
    };

    let (controller, interfaces) =
        match esp_radio::wifi::new(radio, peripherals.WIFI, Default::default()) {
            Ok(pair) => pair,
            Err(e) => {
                error!("WiFi init failed: {:?}", e);
                park().await
            }
        };

    let seed = {
        let rng = Rng::new();
        (rng.random() as u64) << 32 | rng.random() as u64
    };
    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );

    spawner.spawn(tasks::connection_task(controller)).unwrap();
    spawner.spawn(tasks::net_task(runner)).unwrap();

    stack.wait_config_up().await;
    log_address(stack);

    // Feed source
    let query = FeedQuery {
        global_id: STATION_GLOBAL_ID,
        limit: FEED_LIMIT,
        offset_minutes: 0,
        transport_types: TRANSPORT_TYPES,
    };
    let path: String<MAX_PATH_LEN> = match query.path() {
        Ok(path) => path,
        Err(_) => {
            error!("Request path for {} too long", STATION_GLOBAL_ID);
            park().await
        }
    };
    info!("Feed: http://{}:{}{}", FEED_HOST, FEED_PORT, path.as_str());

    let source = HttpFeedSource::new(
        stack,
        FEED_HOST,
        FEED_PORT,
        path,
        RESPONSE_BUF.init([0u8; RESPONSE_BUF_LEN]),
    );

    spawner.spawn(tasks::sntp_task(stack)).unwrap();
    spawner
        .spawn(tasks::display_task(lcd, NetLink::new(stack), source))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    park().await
}

fn log_address(stack: Stack<'_>) {
    match stack.config_v4() {
        Some(config) => info!("Got IP: {}", config.address),
        None => warn!("Link up without IPv4 config"),
    }
}

/// Idle forever
async fn park() -> ! {
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
