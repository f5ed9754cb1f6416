//! Encoding of display operations into SerLCD bus writes.
//!
//! Shared by the blocking and the async driver, neither of them builds bytes on its own.

use crate::{Mode, Prefix, Setting, ShiftDir, ShiftTarget, GLYPH_SLOTS, MAX_ROWS, ROW_OFFSETS};

/// Longest command: prefix, glyph opcode and eight glyph rows.
const MAX_COMMAND_LEN: usize = 10;

/// Time the firmware needs to process a command before accepting the next one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Settle {
    Setting,
    Special,
}

impl Settle {
    pub(crate) const fn ms(self) -> u32 {
        match self {
            Settle::Setting => 10,
            Settle::Special => 50,
        }
    }
}

/// Extra wait after [`Command::clear`] on top of its settle time.
pub(crate) const CLEAR_EXTRA_MS: u32 = 10;

/// Settle time after plain text.
pub(crate) const TEXT_SETTLE: Settle = Settle::Setting;

/// Longest text sent in one bus write, the SMBus block limit.
pub(crate) const TEXT_CHUNK: usize = 32;

/// Sent in place of chars that have no single byte code.
pub(crate) const UNMAPPED_CHAR: u8 = b'?';

/// One bus write: a prefix byte followed by its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Command {
    buf: [u8; MAX_COMMAND_LEN],
    len: usize,
    settle: Settle,
}

impl Command {
    fn new(prefix: Prefix, opcode: u8, args: &[u8], settle: Settle) -> Self {
        let len = 2 + args.len();
        let mut buf = [0; MAX_COMMAND_LEN];
        buf[0] = prefix as u8;
        buf[1] = opcode;
        buf[2..len].copy_from_slice(args);
        Self { buf, len, settle }
    }

    fn setting(setting: Setting, args: &[u8]) -> Self {
        Self::new(Prefix::Setting, setting as u8, args, Settle::Setting)
    }

    fn special(instruction: u8) -> Self {
        Self::new(Prefix::Special, instruction, &[], Settle::Special)
    }

    /// Bytes as they go on the wire.
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub(crate) fn settle_ms(&self) -> u32 {
        self.settle.ms()
    }

    pub(crate) fn clear() -> Self {
        Self::setting(Setting::Clear, &[])
    }

    pub(crate) fn contrast(value: u8) -> Self {
        Self::setting(Setting::Contrast, &[value])
    }

    pub(crate) fn address(address: u8) -> Self {
        Self::new(Prefix::Setting, Setting::Address as u8, &[address], Settle::Special)
    }

    pub(crate) fn backlight(r: u8, g: u8, b: u8) -> Self {
        Self::setting(Setting::Rgb, &[r, g, b])
    }

    pub(crate) fn system_messages(enable: bool) -> Self {
        if enable {
            Self::setting(Setting::EnableSystemMessages, &[])
        } else {
            Self::setting(Setting::DisableSystemMessages, &[])
        }
    }

    pub(crate) fn splash(enable: bool) -> Self {
        if enable {
            Self::setting(Setting::EnableSplash, &[])
        } else {
            Self::setting(Setting::DisableSplash, &[])
        }
    }

    pub(crate) fn save_splash() -> Self {
        Self::setting(Setting::SaveSplash, &[])
    }

    pub(crate) fn create_char(slot: u8, rows: &[u8; 8]) -> Self {
        Self::new(
            Prefix::Setting,
            Setting::CreateChar as u8 + glyph_slot(slot),
            rows,
            Settle::Special,
        )
    }

    pub(crate) fn write_char(slot: u8) -> Self {
        Self::new(
            Prefix::Setting,
            Setting::WriteChar as u8 + glyph_slot(slot),
            &[],
            Settle::Setting,
        )
    }

    pub(crate) fn return_home() -> Self {
        Self::special(Mode::ReturnHome as u8)
    }

    pub(crate) fn set_cursor(col: u8, row: u8) -> Self {
        Self::special(Mode::DDRAMAddr as u8 | ddram_address(col, row))
    }

    /// Carries the whole display control register, not just the changed bit.
    pub(crate) fn display_control(flags: u8) -> Self {
        Self::special(Mode::DisplayControl as u8 | flags)
    }

    /// Carries the whole entry mode register, not just the changed bit.
    pub(crate) fn entry_mode(flags: u8) -> Self {
        Self::special(Mode::EntrySet as u8 | flags)
    }

    pub(crate) fn shift(target: ShiftTarget, dir: ShiftDir) -> Self {
        Self::special(Mode::CursorShift as u8 | target as u8 | dir as u8)
    }
}

/// Glyph slots wrap around, slot 8 is slot 0.
pub(crate) fn glyph_slot(slot: u8) -> u8 {
    slot & (GLYPH_SLOTS - 1)
}

/// DDRAM address of (col, row). Rows past the last one are clamped, columns are not checked.
pub(crate) fn ddram_address(col: u8, row: u8) -> u8 {
    let row = row.min(MAX_ROWS - 1);
    col.wrapping_add(ROW_OFFSETS[row as usize])
}

/// Character code of `c`: its code point up to U+00FF, [`UNMAPPED_CHAR`] above.
pub(crate) fn char_code(c: char) -> u8 {
    u8::try_from(c).unwrap_or(UNMAPPED_CHAR)
}

/// Fills `buf` with the codes of the next chars, returns how many were written.
pub(crate) fn fill_text(chars: &mut impl Iterator<Item = char>, buf: &mut [u8]) -> usize {
    let mut len = 0;
    for (slot, c) in buf.iter_mut().zip(chars) {
        *slot = char_code(c);
        len += 1;
    }
    len
}

/// Sets or clears `flag` in a cached register value.
pub(crate) fn with_flag(register: u8, flag: u8, on: bool) -> u8 {
    if on {
        register | flag
    } else {
        register & !flag
    }
}
