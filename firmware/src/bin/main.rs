#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::bind_interrupts;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_rp::usb::Driver;
use embassy_time::{Duration, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use uart_to_switchpad::usb_output::{
    USB_MANUFACTURER, USB_MAX_POWER_MA, USB_PID, USB_PRODUCT, USB_VID,
};
use uart_to_switchpad::{
    configure_usb_hid, ControllerState, LinkStats, LinkStatsSnapshot, PadReader,
    PadRequestHandler, ReportBridge, SerialLink, UartByteSource, UsbHidOutput, UART_BAUDRATE,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// How often link counters are logged (only when they changed).
const DIAGNOSTICS_INTERVAL: Duration = Duration::from_secs(5);

/// The one piece of shared state: written by the serial task, read by USB.
static CONTROLLER_STATE: ControllerState = ControllerState::new();
static LINK_STATS: LinkStats = LinkStats::new();

/// Serial reception runs here, preempting everything in thread mode.
static EXECUTOR_SERIAL: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_MAIN: StaticCell<Executor> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<PadRequestHandler<'static>> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_SERIAL.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("UART-to-Switchpad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = UART_BAUDRATE;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    // TX half is kept alive for the lifetime of `main`, which never returns
    let (_tx, rx) = uart.split();
    let source = UartByteSource::new(rx);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some(USB_MANUFACTURER);
    usb_config.product = Some(USB_PRODUCT);
    usb_config.max_power = USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;
    // Plain HID device, class declared per interface
    usb_config.device_class = 0x00;
    usb_config.device_sub_class = 0x00;
    usb_config.device_protocol = 0x00;
    usb_config.composite_with_iads = false;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let handler = REQUEST_HANDLER.init(PadRequestHandler::new(&CONTROLLER_STATE));
    let (hid_reader, hid_writer) = configure_usb_hid(&mut builder, hid_state, handler);

    // Build the USB device
    let usb_device = builder.build();

    let usb_output = UsbHidOutput::new(hid_writer);

    // --- Serial link at interrupt priority ---
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let serial_spawner = EXECUTOR_SERIAL.start(interrupt::SWI_IRQ_1);
    serial_spawner.spawn(serial_task(source).unwrap());

    // --- Everything else in thread mode ---
    let executor = EXECUTOR_MAIN.init(Executor::new());
    executor.run(move |spawner| {
        spawner.spawn(usb_task(usb_device).unwrap());
        spawner.spawn(report_task(usb_output).unwrap());
        spawner.spawn(host_report_task(hid_reader).unwrap());
        spawner.spawn(diagnostics_task().unwrap());

        info!("UART-to-Switchpad initialized, waiting for data...");
    })
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Serial task - frames and decodes every received byte into the store.
#[embassy_executor::task]
async fn serial_task(mut source: UartByteSource<'static>) {
    CONTROLLER_STATE.reset();
    let mut link = SerialLink::new(&CONTROLLER_STATE, &LINK_STATS);
    info!("Serial link listening at {} baud", UART_BAUDRATE);
    link.run(&mut source).await
}

/// Report task - synthesizes a fresh report for every IN poll.
#[embassy_executor::task]
async fn report_task(mut output: UsbHidOutput<'static>) {
    // Wait for USB to be ready
    output.wait_ready().await;
    info!("USB HID ready, serving reports...");

    let mut bridge = ReportBridge::new(&CONTROLLER_STATE, output);
    bridge.run().await
}

/// Host report task - reads the OUT endpoint and discards what the host sends.
#[embassy_executor::task]
async fn host_report_task(reader: PadReader<'static>) {
    let mut discard = PadRequestHandler::new(&CONTROLLER_STATE);
    reader.run(false, &mut discard).await
}

/// Diagnostics task - logs link counters when they change.
#[embassy_executor::task]
async fn diagnostics_task() {
    let mut ticker = Ticker::every(DIAGNOSTICS_INTERVAL);
    let mut last = LinkStatsSnapshot::default();

    loop {
        ticker.next().await;
        let stats = LINK_STATS.snapshot();
        if stats == last {
            continue;
        }
        let lossy = stats.lines_dropped > last.lines_dropped
            || stats.bytes_overflowed > last.bytes_overflowed;
        if lossy {
            warn!("Serial link dropping input: {:?}", stats);
        } else {
            info!("Serial link: {:?}", stats);
        }
        last = stats;
    }
}
