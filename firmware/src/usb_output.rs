//! USB HID Switch pad output implementation.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{
    HidBootProtocol, HidReader, HidReaderWriter, HidSubclass, HidWriter, ReportId, RequestHandler,
    State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use switchpad_core::{synthesize, ControllerState, OutputError, ReportSink, SwitchReport};

/// HORI Co., Ltd.
pub const USB_VID: u16 = 0x0F0D;
/// Pokken Tournament Pro Pad.
pub const USB_PID: u16 = 0x0092;
pub const USB_MANUFACTURER: &str = "HORI CO.,LTD.";
pub const USB_PRODUCT: &str = "POKKEN CONTROLLER";
/// Requested bus current, in mA.
pub const USB_MAX_POWER_MA: u16 = 500;

/// Interrupt endpoint polling interval.
pub const HID_POLL_MS: u8 = 5;
/// Interrupt endpoint packet size.
pub const HID_MAX_PACKET_SIZE: u16 = 64;

/// Size of the host-to-device report. Its content is never used.
pub const HOST_REPORT_SIZE: usize = 8;

/// Pokken Tournament Pro Pad report descriptor, widened to 16 buttons.
///
/// Input (8 bytes): 16 buttons, 4-bit hat + 4-bit padding, four 8-bit axes,
/// one vendor byte. Output (8 bytes): vendor defined, required by the host.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (16 buttons) ---
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x35, 0x00, //   Physical Minimum (0)
    0x45, 0x01, //   Physical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x10, //   Report Count (16)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Hat switch (one nibble, 8 = null) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (Degrees)
    0x09, 0x39, //   Usage (Hat Switch)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant) - padding nibble
    //
    // --- Sticks ---
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x46, 0xFF, 0x00, //   Physical Maximum (255)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Vendor byte ---
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined 0xFF00)
    0x09, 0x20, //   Usage (0x20)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Host report (ignored) ---
    0x0A, 0x21, 0x26, //   Usage (0x2621)
    0x95, 0x08, //   Report Count (8)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// HID writer for the input report.
pub type PadWriter<'d> = HidWriter<'d, Driver<'d, USB>, { SwitchReport::SIZE }>;

/// HID reader for the host's output report.
pub type PadReader<'d> = HidReader<'d, Driver<'d, USB>, HOST_REPORT_SIZE>;

/// USB HID Switch pad output.
///
/// Wraps an embassy-usb HID writer; each `send` completes when the host has
/// polled the IN endpoint.
pub struct UsbHidOutput<'d> {
    writer: PadWriter<'d>,
    ready: bool,
}

impl<'d> UsbHidOutput<'d> {
    /// Create a new USB HID output from the given HID writer.
    pub fn new(writer: PadWriter<'d>) -> Self {
        Self {
            writer,
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready = true;
    }
}

impl ReportSink for UsbHidOutput<'_> {
    async fn send(&mut self, report: &SwitchReport) -> Result<(), OutputError> {
        if !self.ready {
            self.wait_ready().await;
        }
        match self.writer.write(&report.as_bytes()).await {
            Ok(()) => Ok(()),
            Err(EndpointError::Disabled) => {
                // Bus reset or unplug; wait for re-enumeration on the next send
                self.ready = false;
                Err(OutputError::Disconnected)
            }
            Err(EndpointError::BufferOverflow) => Err(OutputError::Io),
        }
    }
}

/// HID control-pipe handler.
///
/// GET_REPORT is answered with a report synthesized on the spot; SET_REPORT
/// and output reports are accepted and thrown away.
pub struct PadRequestHandler<'a> {
    state: &'a ControllerState,
}

impl<'a> PadRequestHandler<'a> {
    pub fn new(state: &'a ControllerState) -> Self {
        Self { state }
    }
}

impl RequestHandler for PadRequestHandler<'_> {
    fn get_report(&mut self, _id: ReportId, buf: &mut [u8]) -> Option<usize> {
        let bytes = synthesize(&self.state.snapshot()).as_bytes();
        let out = buf.get_mut(..bytes.len())?;
        out.copy_from_slice(&bytes);
        Some(bytes.len())
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class in the USB builder.
///
/// `handler` serves control-pipe requests. Returns the reader for host
/// reports and the writer for pad reports.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    handler: &'d mut PadRequestHandler<'d>,
) -> (PadReader<'d>, PadWriter<'d>) {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: HID_POLL_MS,
        max_packet_size: HID_MAX_PACKET_SIZE,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidReaderWriter::<_, HOST_REPORT_SIZE, { SwitchReport::SIZE }>::new(builder, state, config)
        .split()
}
