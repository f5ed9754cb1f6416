use embedded_hal_async::{delay::DelayNs, i2c::I2c};

use crate::command::{
    fill_text, with_flag, Command, CLEAR_EXTRA_MS, TEXT_CHUNK, TEXT_SETTLE,
};
use crate::{
    CursorMoveDir, DisplayControl, DisplayShift, Mode, ShiftDir, ShiftTarget, DEFAULT_ADDRESS,
};

/// API to write to the LCD.
///
/// Same commands and timing as [`crate::sync_lcd::Lcd`], waiting through the async delay.
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

/// The async SerLCD driver.
pub type SerLcd<'a, I, D> = Lcd<'a, I, D>;

impl<'a, I, D> Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Create new instance with only the I2C and delay instance.
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
    pub async fn init(mut self) -> Result<Self, I::Error> {
        self.send(Command::display_control(self.display_control)).await?;
        self.send(Command::entry_mode(self.entry_mode)).await?;
        self.clear().await?;
        Ok(self)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn display_control(&self) -> u8 {
        self.display_control
    }

    pub fn entry_mode(&self) -> u8 {
        self.entry_mode
    }

    async fn write_raw(&mut self, bytes: &[u8], settle_ms: u32) -> Result<(), I::Error> {
        trace_write!(self.address, bytes);
        self.i2c.write(self.address, bytes).await?;
        self.delay.delay_ms(settle_ms).await;
        Ok(())
    }

    async fn send(&mut self, command: Command) -> Result<(), I::Error> {
        self.write_raw(command.bytes(), command.settle_ms()).await
    }

    /// Updates the cached display_control register and sends all of it
    async fn update_display_control(&mut self, flag: u8, on: bool) -> Result<(), I::Error> {
        self.display_control = with_flag(self.display_control, flag, on);
        self.send(Command::display_control(self.display_control)).await
    }

    /// Updates the cached entry_mode register and sends all of it
    async fn update_entry_mode(&mut self, flag: u8, on: bool) -> Result<(), I::Error> {
        self.entry_mode = with_flag(self.entry_mode, flag, on);
        self.send(Command::entry_mode(self.entry_mode)).await
    }

    /// Write string to display, one character code per char.
    pub async fn write_str(&mut self, data: &str) -> Result<(), I::Error> {
        let mut chars = data.chars();
        let mut buf = [0; TEXT_CHUNK];
        loop {
            let len = fill_text(&mut chars, &mut buf);
            if len == 0 {
                return Ok(());
            }
            self.write_raw(&buf[..len], TEXT_SETTLE.ms()).await?;
        }
    }

    pub async fn write_bytes(&mut self, data: &[u8]) -> Result<(), I::Error> {
        for chunk in data.chunks(TEXT_CHUNK) {
            self.write_raw(chunk, TEXT_SETTLE.ms()).await?;
        }
        Ok(())
    }

    /// Clear the display
    pub async fn clear(&mut self) -> Result<(), I::Error> {
        self.send(Command::clear()).await?;
        self.delay.delay_ms(CLEAR_EXTRA_MS).await;
        Ok(())
    }

    /// Return cursor to upper left corner, i.e. (0,0).
    pub async fn return_home(&mut self) -> Result<(), I::Error> {
        self.send(Command::return_home()).await
    }

    /// Set the cursor to (col, row). Coordinates are zero-based.
    pub async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I::Error> {
        self.send(Command::set_cursor(col, row)).await
    }

    /// Same bytes as [`crate::sync_lcd::Lcd::create_char`].
    pub async fn create_char(&mut self, slot: u8, rows: &[u8; 8]) -> Result<(), I::Error> {
        self.send(Command::create_char(slot, rows)).await
    }

    pub async fn write_char(&mut self, slot: u8) -> Result<(), I::Error> {
        self.send(Command::write_char(slot)).await
    }

    pub async fn no_display(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::DisplayOn as u8, false).await
    }

    /// Sets the opcode bit, see [`crate::sync_lcd::Lcd::display`].
    pub async fn display(&mut self) -> Result<(), I::Error> {
        self.update_display_control(Mode::DisplayControl as u8, true).await
    }

    pub async fn no_cursor(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::CursorOn as u8, false).await
    }

    pub async fn cursor(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::CursorOn as u8, true).await
    }

    pub async fn no_blink(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::CursorBlink as u8, false).await
    }

    pub async fn blink(&mut self) -> Result<(), I::Error> {
        self.update_display_control(DisplayControl::CursorBlink as u8, true).await
    }

    /// Scrolls the display one char to the left
    pub async fn scroll_display_left(&mut self) -> Result<(), I::Error> {
        self.send(Command::shift(ShiftTarget::Display, ShiftDir::Left)).await
    }

    /// Scrolls the display one char to the right
    pub async fn scroll_display_right(&mut self) -> Result<(), I::Error> {
        self.send(Command::shift(ShiftTarget::Display, ShiftDir::Right)).await
    }

    /// Moves the cursor one char to the left
    pub async fn move_cursor_left(&mut self) -> Result<(), I::Error> {
        self.send(Command::shift(ShiftTarget::Cursor, ShiftDir::Left)).await
    }

    /// Moves the cursor one char to the right
    pub async fn move_cursor_right(&mut self) -> Result<(), I::Error> {
        self.send(Command::shift(ShiftTarget::Cursor, ShiftDir::Right)).await
    }

    pub async fn left_to_right(&mut self) -> Result<(), I::Error> {
        self.update_entry_mode(CursorMoveDir::Left as u8, true).await
    }

    pub async fn right_to_left(&mut self) -> Result<(), I::Error> {
        self.update_entry_mode(CursorMoveDir::Left as u8, false).await
    }

    pub async fn autoscroll(&mut self) -> Result<(), I::Error> {
        self.update_entry_mode(DisplayShift::Increment as u8, true).await
    }

    pub async fn no_autoscroll(&mut self) -> Result<(), I::Error> {
        self.update_entry_mode(DisplayShift::Increment as u8, false).await
    }

    pub async fn set_backlight(&mut self, r: u8, g: u8, b: u8) -> Result<(), I::Error> {
        self.send(Command::backlight(r, g, b)).await
    }

    pub async fn set_contrast(&mut self, contrast: u8) -> Result<(), I::Error> {
        self.send(Command::contrast(contrast)).await
    }

    /// Move the display to a new I2C address, sent to the current one.
    pub async fn set_address(&mut self, address: u8) -> Result<(), I::Error> {
        let command = Command::address(address);
        trace_write!(self.address, command.bytes());
        self.i2c.write(self.address, command.bytes()).await?;
        self.address = address;
        self.delay.delay_ms(command.settle_ms()).await;
        Ok(())
    }

    pub async fn enable_system_messages(&mut self) -> Result<(), I::Error> {
        self.send(Command::system_messages(true)).await
    }

    pub async fn disable_system_messages(&mut self) -> Result<(), I::Error> {
        self.send(Command::system_messages(false)).await
    }

    pub async fn enable_splash(&mut self) -> Result<(), I::Error> {
        self.send(Command::splash(true)).await
    }

    pub async fn disable_splash(&mut self) -> Result<(), I::Error> {
        self.send(Command::splash(false)).await
    }

    pub async fn save_as_splash(&mut self) -> Result<(), I::Error> {
        self.send(Command::save_splash()).await
    }
}
