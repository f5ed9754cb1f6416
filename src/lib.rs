#![no_std]
//! Driver for SparkFun [SerLCD] character displays (the 20x4 RGB variant) connected via i2c.
//! It requires an I2C instance implementing [`embedded_hal::i2c::I2c`] and an instance to delay
//! execution with [`embedded_hal::delay::DelayNs`].
//!
//! The SerLCD firmware sits between the bus and the HD44780 controller. It accepts plain text,
//! "setting" commands prefixed with `0x7C` and raw HD44780 instructions prefixed with `0xFE`.
//! Every command has to be followed by a settle delay before the next one is sent, the driver
//! takes care of that.
//!
//! Usage:
//! ```ignore
//! let mut lcd = serlcd_i2c::SerLcd::new(&mut i2c, &mut delay)
//!     .with_address(serlcd_i2c::DEFAULT_ADDRESS)
//!     .with_cursor_on(false)
//!     .init()?;
//!
//! lcd.set_backlight(64, 64, 64)?;
//! lcd.write_str("Hello World!")?;
//! lcd.set_cursor(0, 1)?;
//! ufmt::uwrite!(lcd, "{}:{}", 12, 30)?;
//! ```
//!
//! Enable the `async` feature for a version built on `embedded-hal-async`, and the `defmt`
//! feature to trace every bus write.
//!
//! [SerLCD]: https://github.com/sparkfun/SparkFun_SerLCD_Arduino_Library

/// Traces a bus write when the `defmt` feature is enabled.
macro_rules! trace_write {
    ($address:expr, $bytes:expr) => {
        #[cfg(feature = "defmt")]
        defmt::trace!("serlcd {=u8:#x} <- {=[u8]:x}", $address, $bytes);
    };
}

mod command;
pub mod sync_lcd;
#[cfg(feature = "async")]
pub mod async_lcd;
#[cfg(test)]
mod test_util;

pub use sync_lcd::SerLcd;

/// Factory default I2C address of the SerLCD.
pub const DEFAULT_ADDRESS: u8 = 0x72;
/// Rows of the display, [`sync_lcd::Lcd::set_cursor`] clamps to the last one.
pub const MAX_ROWS: u8 = 4;
/// Columns of the display. Not enforced, columns past the last one wrap into the DDRAM of
/// other rows.
pub const MAX_COLUMNS: u8 = 20;

/// DDRAM address of the first column of each row on a 20x4 display.
const ROW_OFFSETS: [u8; MAX_ROWS as usize] = [0x00, 0x40, 0x14, 0x54];

/// Number of custom glyph slots.
pub const GLYPH_SLOTS: u8 = 8;

/// Flags of the display control register.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayControl {
    Off = 0x00,
    CursorBlink = 0x01,
    CursorOn = 0x02,
    DisplayOn = 0x04,
}

/// Text direction flag of the entry mode register.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorMoveDir {
    Right = 0x00,
    Left = 0x02,
}

/// Autoscroll flag of the entry mode register.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayShift {
    Decrement = 0x00,
    Increment = 0x01,
}

/// First byte of every command, selects how the firmware interprets the rest.
#[repr(u8)]
#[derive(Copy, Clone)]
enum Prefix {
    Setting = 0x7C,
    Special = 0xFE,
}

/// Opcodes understood by the SerLCD firmware after [`Prefix::Setting`].
#[repr(u8)]
#[derive(Copy, Clone)]
enum Setting {
    SaveSplash = 0x0A,
    Contrast = 0x18,
    Address = 0x19,
    CreateChar = 27,
    WriteChar = 35,
    Rgb = 0x2B,
    Clear = 0x2D,
    EnableSystemMessages = 0x2E,
    DisableSystemMessages = 0x2F,
    EnableSplash = 0x30,
    DisableSplash = 0x31,
}

/// HD44780 instructions passed through after [`Prefix::Special`].
#[repr(u8)]
#[derive(Copy, Clone)]
enum Mode {
    ReturnHome = 0x02,
    EntrySet = 0x04,
    DisplayControl = 0x08,
    CursorShift = 0x10,
    DDRAMAddr = 0x80,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum ShiftTarget {
    Cursor = 0x00,
    Display = 0x08,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum ShiftDir {
    Left = 0x00,
    Right = 0x04,
}
