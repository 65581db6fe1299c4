#![no_std]
#![no_main]

mod peripherals;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    interrupt::{self, InterruptExt, Priority},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use nrf_softdevice::{ble::peripheral, Softdevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::Battery,
    bluetooth::{self, Server},
    button::Button,
    config::system_config,
    display::Display,
    host::PineTime,
    vibrator::Vibrator,
};
use shards_watchface::{
    system::{
        config::WatchConfig,
        events::{Event, EventService},
        host::{BatteryState, Clock, ConnectivityState, VibePattern},
        time::{TimeManager, TimeReference},
    },
    ui::layout::{DeviceModel, DisplayShape},
    Watchface,
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

type Face = Watchface<PineTime, Rgb565>;

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryState> = Signal::new();
static CONNECTION: Signal<ThreadModeRawMutex, bool> = Signal::new();
static INCREASE_BRIGHTNESS: Signal<ThreadModeRawMutex, bool> = Signal::new();
pub(crate) static NOTIFY: Signal<ThreadModeRawMutex, VibePattern> = Signal::new();

static SERVER: StaticCell<Server> = StaticCell::new();

/// Play vibration patterns requested by the watchface
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut vibrator: Vibrator) {
    loop {
        let pattern = NOTIFY.wait().await;
        defmt::debug!("Vibrating: {}", pattern);
        vibrator.play(pattern).await;
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, mut last: BatteryState, server: &'static Server) {
    loop {
        // Re-schedule the timer interrupt in 10s
        Timer::after(Duration::from_secs(10)).await;

        let state = battery.state().await;
        if state != last {
            defmt::info!("Battery status updated: {}", state);
            BATTERY_STATUS.signal(state);
            if server.bas.battery_level_set(&state.charge_percent).is_err() {
                defmt::warn!("Failed to update battery service");
            }
            last = state;
        }
    }
}

/// Update backlight brightness
#[embassy_executor::task(pool_size = 1)]
async fn update_brightness(mut backlight: Backlight) {
    loop {
        if INCREASE_BRIGHTNESS.wait().await {
            backlight.cycle();
        }
    }
}

/// Polls the button state every 10ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button) {
    loop {
        if button.poll().await {
            INCREASE_BRIGHTNESS.signal(true);
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise until a phone connects, then report the connection state
#[embassy_executor::task]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) {
    let config = peripheral::Config::default();
    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &bluetooth::ADV_DATA,
            scan_data: &bluetooth::SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(err) => {
                defmt::warn!("Advertising failed: {}", err);
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };

        defmt::info!("Phone connected");
        CONNECTION.signal(true);

        let reason = nrf_softdevice::ble::gatt_server::run(&conn, server, |_| {}).await;
        defmt::info!("Phone disconnected: {}", reason);
        CONNECTION.signal(false);
    }
}

/// Feed hardware state and clock ticks into the watchface and redraw it
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display, mut face: Face, mut events: EventService) {
    let mut tick = Ticker::every(Duration::from_secs(1));
    loop {
        if let Some(state) = BATTERY_STATUS.try_take() {
            face.host_mut().set_battery(state);
            events.dispatch(&mut face, Event::Battery(state));
        }

        if let Some(connected) = CONNECTION.try_take() {
            let state = ConnectivityState { connected };
            face.host_mut().set_connection(state);
            events.dispatch(&mut face, Event::Connection(state));
        }

        let now = face.host().now();
        if let Some(event) = events.poll_clock(now) {
            events.dispatch(&mut face, event);
        }

        if face.render(&mut display).is_err() {
            defmt::warn!("Failed to draw watchface");
        }

        // Re-schedule the timer interrupt in 1s
        tick.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(system_config());
    defmt::info!("Initializing");

    // Priorities 0, 1 and 4 are reserved for the SoftDevice
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize battery
    let mut battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None));
    let battery_state = battery.state().await;

    // Initialize backlight
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        2,
    ));

    // Initialize button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize vibration motor (active low)
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    if server.bas.battery_level_set(&battery_state.charge_percent).is_err() {
        defmt::warn!("Failed to set initial battery level");
    }

    // Initialize clock
    let config = WatchConfig::DEFAULT;
    let reference = TimeReference::from_timestamp(BUILD_UTC_EPOCH, Instant::now().as_micros())
        .unwrap_or_default();
    let time = TimeManager::new(reference, config.utc_offset_secs);

    // Initialize watchface
    let host = PineTime::new(time, config, battery_state);
    let mut face = Face::new(host, DisplayShape::Rectangular, DeviceModel::LargeRect);
    let mut events = EventService::new();
    face.init(&mut events);

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(update_battery_status(battery, battery_state, server)));
    unwrap!(spawner.spawn(update_brightness(backlight)));
    unwrap!(spawner.spawn(notify(vibrator)));
    unwrap!(spawner.spawn(update_lcd(display, face, events)));
}
