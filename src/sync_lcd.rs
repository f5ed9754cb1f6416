use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use ufmt_write::uWrite;

use crate::command::{
    fill_text, with_flag, Command, CLEAR_EXTRA_MS, TEXT_CHUNK, TEXT_SETTLE,
};
use crate::{
    CursorMoveDir, DisplayControl, DisplayShift, Mode, ShiftDir, ShiftTarget, DEFAULT_ADDRESS,
};

/// API to write to the LCD.
///
/// The display control and entry mode registers can't be read back from the device, so the
/// driver keeps a copy of each and always sends the complete register. The copy is updated
/// before the write; it is not rolled back if the write fails.
pub struct Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    i2c: &'a mut I,
    address: u8,
    delay: &'a mut D,
    display_control: u8,
    entry_mode: u8,
}

/// The blocking SerLCD driver.
pub type SerLcd<'a, I, D> = Lcd<'a, I, D>;

impl<'a, I, D> Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Create new instance with only the I2C and delay instance.
    ///
    /// Nothing is sent before [`Lcd::init`].
    pub fn new(i2c: &'a mut I, delay: &'a mut D) -> Self {
        Self {
            i2c,
            delay,
            address: DEFAULT_ADDRESS,
            display_control: DisplayControl::DisplayOn as u8,
            entry_mode: CursorMoveDir::Left as u8 | DisplayShift::Decrement as u8,
        }
    }

    /// Set I2C address, defaults to [`DEFAULT_ADDRESS`].
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_display_on(mut self, on: bool) -> Self {
        self.display_control = with_flag(self.display_control, DisplayControl::DisplayOn as u8, on);
        self
    }

    pub fn with_cursor_on(mut self, on: bool) -> Self {
        self.display_control = with_flag(self.display_control, DisplayControl::CursorOn as u8, on);
        self
    }

    pub fn with_cursor_blink(mut self, blink: bool) -> Self {
        self.display_control =
            with_flag(self.display_control, DisplayControl::CursorBlink as u8, blink);
        self
    }

    pub fn with_right_to_left(mut self, rtl: bool) -> Self {
        self.entry_mode = with_flag(self.entry_mode, CursorMoveDir::Left as u8, !rtl);
        self
    }

    pub fn with_autoscroll(mut self, on: bool) -> Self {
        self.entry_mode = with_flag(self.entry_mode, DisplayShift::Increment as u8, on);
        self
    }

    /// Initializes the hardware.
    ///
    /// Pushes both cached registers to the display and clears it.
    pub fn init(mut self) -> Result<Self, I::Error> {
        self.send(Command::display_control(self.display_control))?;
        self.send(Command::entry_mode(self.entry_mode))?;
        self.clear()?;
        Ok(self)
    }

    /// Address all commands are sent to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Cached display control register.
    pub fn display_control(&self) -> u8 {
        self.display_control
    }

    /// Cached entry mode register.
    pub fn entry_mode(&self) -> u8 {
        self.entry_mode
    }

    fn write_raw(&mut self, bytes: &[u8], settle_ms: u32) -> Result<(), I::Error> {
        trace_write!(self.address, bytes);
        self.i2c.write(self.address, bytes)?;
        self.delay.delay_ms(settle_ms);
        Ok(())
    }

    fn send(&mut self, command: Command) -> Result<(), I::Error> {
        self.write_raw(command.bytes(), command.settle_ms())
    }

    fn update_display_control(&mut self, flag: u8, on: bool) -> Result<(), I::Error> {
        self.display_control = with_flag(self.display_control, flag, on);
        self.send(Command::display_control(self.display_control))
    }

    fn update_entry_mode(&mut self, flag: u8, on: bool) -> Result<(), I::Error> {
        self.entry_mode = with_flag(self.entry_mode, flag, on);
        self.send(Command::entry_mode(self.entry_mode))
    }

    /// Write string to display.
    ///
    /// Every char is sent as one character code: its code point up to U+00FF, `?` for
    /// anything above. Up to 32 chars go out in one bus write, longer text is split.
    pub fn write_str(&mut self, data: &str) -> Result<(), I::Error> {
        let mut chars = data.chars();
        let mut buf = [0; TEXT_CHUNK];
        loop {
            let len = fill_text(&mut chars, &mut buf);
            if len == 0 {
                return Ok(());
            }
            self.write_raw(&buf[..len], TEXT_SETTLE.ms())?;
        }
    }

    /// Write raw character codes, split like [`Lcd::write_str`]. Writing nothing sends
    /// nothing.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), I::Error> {
        for chunk in data.chunks(TEXT_CHUNK) {
            self.write_raw(chunk, TEXT_SETTLE.ms())?;
        }
        Ok(())
    }

    /// Clear the display
    pub fn clear(&mut self) -> Result<(), I::Error> {
        self.send(Command::clear())?;
        self.delay.delay_ms(CLEAR_EXTRA_MS);
        Ok(())
    }

    /// Return cursor to upper left corner, i.e. (0,0).
    pub fn return_home(&mut self) -> Result<(), I::Error> {
        self.send(Command::return_home())
    }

    /// Set the cursor to (col, row). Coordinates are zero-based.
    ///
    /// Rows past the last one select the last row. Columns are not checked.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I::Error> {
        self.send(Command::set_cursor(col, row))
    }

    /// Store a custom glyph in one of the eight slots, only the lower three bits of `slot`
    /// are used. Each row byte holds five pixels.
    ///
    /// Sent as `[0x7C, 27 + slot, rows...]`, without the leading `0x00` register byte the
    /// SparkFun Python library puts in front.
    pub fn create_char(&mut self, slot: u8, rows: &[u8; 8]) -> Result<(), I::Error> {
        self.send(Command::create_char(slot, rows))
    }

    /// Print the custom glyph stored in `slot`.
    pub fn write_char(&mut self, slot: u8) -> Result<(), I::Error> {
        self.send(Command::write_char(slot))
    }

    pub fn no_display(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::DisplayOn as u8, false)
    }

    /// Turn the display on.
    ///
    /// Sets the display control opcode bit (0x08) in the cached register, not the display on
    /// bit (0x04) that [`Lcd::no_display`] clears. After [`Lcd::no_display`] the display stays
    /// off; [`Lcd::init`] a fresh driver to turn it back on.
    pub fn display(&mut self) -> Result<(), I::Error> {
        self.update_display_control(Mode::DisplayControl as u8, true)
    }

    pub fn no_cursor(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::CursorOn as u8, false)
    }

    pub fn cursor(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::CursorOn as u8, true)
    }

    pub fn no_blink(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::CursorBlink as u8, false)
    }

    pub fn blink(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::CursorBlink as u8, true)
    }

    /// Scrolls the display one char to the left
    pub fn scroll_display_left(&mut self) -> Result<(), I::Error> {
        self.send(Command::shift(ShiftTarget::Display, ShiftDir::Left))
    }

    /// Scrolls the display one char to the right
    pub fn scroll_display_right(&mut self) -> Result<(), I::Error> {
        self.send(Command::shift(ShiftTarget::Display, ShiftDir::Right))
    }

    /// Moves the cursor one char to the left
    pub fn move_cursor_left(&mut self) -> Result<(), I::Error> {
        self.send(Command::shift(ShiftTarget::Cursor, ShiftDir::Left))
    }

    /// Moves the cursor one char to the right
    pub fn move_cursor_right(&mut self) -> Result<(), I::Error> {
        self.send(Command::shift(ShiftTarget::Cursor, ShiftDir::Right))
    }

    /// Text flows left to right.
    pub fn left_to_right(&mut self) -> Result<(), I::Error> {
        self.update_entry_mode(CursorMoveDir::Left as u8, true)
    }

    /// Text flows right to left.
    pub fn right_to_left(&mut self) -> Result<(), I::Error> {
        self.update_entry_mode(CursorMoveDir::Left as u8, false)
    }

    /// Shift the display content with every written char.
    pub fn autoscroll(&mut self) -> Result<(), I::Error> {
        self.update_entry_mode(DisplayShift::Increment as u8, true)
    }

    pub fn no_autoscroll(&mut self) -> Result<(), I::Error> {
        self.update_entry_mode(DisplayShift::Increment as u8, false)
    }

    /// Set the RGB backlight color.
    pub fn set_backlight(&mut self, r: u8, g: u8, b: u8) -> Result<(), I::Error> {
        self.send(Command::backlight(r, g, b))
    }

    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), I::Error> {
        self.send(Command::contrast(contrast))
    }

    /// Move the display to a new I2C address.
    ///
    /// The command is still sent to the current address, everything after it goes to
    /// `address`. The address is kept if the write fails. It is not checked to be 7 bit.
    pub fn set_address(&mut self, address: u8) -> Result<(), I::Error> {
        let command = Command::address(address);
        trace_write!(self.address, command.bytes());
        self.i2c.write(self.address, command.bytes())?;
        self.address = address;
        self.delay.delay_ms(command.settle_ms());
        Ok(())
    }

    /// Show firmware messages such as "Contrast: 5" on screen.
    pub fn enable_system_messages(&mut self) -> Result<(), I::Error> {
        self.send(Command::system_messages(true))
    }

    pub fn disable_system_messages(&mut self) -> Result<(), I::Error> {
        self.send(Command::system_messages(false))
    }

    /// Show the splash screen on power up.
    pub fn enable_splash(&mut self) -> Result<(), I::Error> {
        self.send(Command::splash(true))
    }

    pub fn disable_splash(&mut self) -> Result<(), I::Error> {
        self.send(Command::splash(false))
    }

    /// Store the current screen content as splash screen.
    pub fn save_as_splash(&mut self) -> Result<(), I::Error> {
        self.send(Command::save_splash())
    }
}

impl<'a, I, D> uWrite for Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    type Error = I::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_str(s)
    }
}
