//! # Module defining the command set of the SH1106
//!
//! All commands are implemented as an enum, the arguments that only take a few fixed values as
//! enums as well. A command is one opcode byte, optionally followed by one argument byte. Both
//! bytes go over the bus as separate command transfers.
//!
//! The source code is written to resemble the data sheet as close as possible.
//!
//! ## Pages and columns
//! The SH1106 DDRAM is 132 columns wide and 8 pages high, a page being a band of 8 pixel rows.
//! Every byte written in data mode lands in the current page at the current column, after which
//! the column auto-increments. The page does not, so a full screen update addresses every page
//! separately.
//!
//! ## Multiplex ratio and COM pads
//! These two depend on the panel glass. A 32 pixel high panel is driven with a 1/32 multiplex
//! ratio and sequential COM pads, a 64 pixel high one with 1/64 and alternative COM pads.
//!
//! ## DC-DC converter
//! The panel needs about 8V. The SH1106 can generate it with its internal DC-DC converter,
//! which should only be switched while the display is off.

use crate::DisplaySize;

/// Direction in which the COM outputs are scanned. Reversed flips the image vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScanDirection {
    /// COM0 to COM[N-1]
    Normal = 0b0000_0000,
    /// COM[N-1] to COM0
    Reversed = 0b0000_1000,
}

/// Relation between DDRAM column address and segment driver. Reversed mirrors horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Remap {
    /// column 0 is the leftmost segment
    Normal = 0,
    /// column 0 is the rightmost segment
    Reversed = 1,
}

/// Hardware layout of the COM signal pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PadLayout {
    /// used by 32 pixel high panels
    Sequential = 0x02,
    /// used by 64 pixel high panels
    Alternative = 0x12,
}

/// SH1106 command set, see data sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// turn the panel on (true) or put it to sleep (false)
    // translates to: 0xAE OR with on bit
    DisplayOn(bool),

    /// set contrast, 256 steps
    // translates to: 0x81, contrast
    Contrast(u8),

    /// set the page address; 0 =< page =< 7
    // translates to: 0xB0 OR with page
    PageAddress(u8),

    /// set the low nibble of the column address
    // translates to: 0x00 OR with column & 0x0F
    ColumnAddressLow(u8),

    /// set the high nibble of the column address
    // translates to: 0x10 OR with column >> 4
    ColumnAddressHigh(u8),

    /// set the COM output scan direction
    // translates to: 0xC0 OR with ScanDirection
    ComScanDirection(ScanDirection),

    /// set segment re-map
    // translates to: 0xA0 OR with Remap
    SegmentRemap(Remap),

    /// display polarity; inverted shows DDRAM bits that are 0 as lit pixels
    // translates to: 0xA6 OR with inverted bit
    Inverted(bool),

    /// set the multiplex ratio, argument is ratio - 1
    // translates to: 0xA8, ratio
    MultiplexRatio(u8),

    /// set display clock divide ratio (low nibble) and oscillator frequency (high nibble)
    // translates to: 0xD5, config
    ClockDivide(u8),

    /// set pre-charge (low nibble) and discharge (high nibble) period, counted in DCLKs
    // translates to: 0xD9, config
    ChargePeriod(u8),

    /// set the COM pads hardware configuration
    // translates to: 0xDA, PadLayout
    ComPads(PadLayout),

    /// set the VCOM deselect level
    // translates to: 0xDB, level
    VcomDeselect(u8),

    /// switch the internal DC-DC converter on or off
    // translates to: 0xAD, 0x8A OR with on bit
    DcDc(bool),
}

use Command::*;

impl Command {
    /// Returns the opcode byte of this command
    pub fn opcode(self) -> u8 {
        match self {
            DisplayOn(on) => 0b1010_1110 | on as u8,
            Contrast(_) => 0b1000_0001,
            PageAddress(page) => 0b1011_0000 | (page & 0b0000_0111),
            ColumnAddressLow(column) => column & 0b0000_1111,
            ColumnAddressHigh(column) => 0b0001_0000 | (column >> 4),
            ComScanDirection(direction) => 0b1100_0000 | direction as u8,
            SegmentRemap(remap) => 0b1010_0000 | remap as u8,
            Inverted(inverted) => 0b1010_0110 | inverted as u8,
            MultiplexRatio(_) => 0b1010_1000,
            ClockDivide(_) => 0b1101_0101,
            ChargePeriod(_) => 0b1101_1001,
            ComPads(_) => 0b1101_1010,
            VcomDeselect(_) => 0b1101_1011,
            DcDc(_) => 0b1010_1101,
        }
    }

    /// Returns the argument byte that has to follow the opcode, if the command takes one
    pub fn argument(self) -> Option<u8> {
        match self {
            Contrast(contrast) => Some(contrast),
            MultiplexRatio(ratio) => Some(ratio & 0b0011_1111),
            ClockDivide(config) => Some(config),
            ChargePeriod(config) => Some(config),
            ComPads(pads) => Some(pads as u8),
            VcomDeselect(level) => Some(level),
            DcDc(on) => Some(0b1000_1010 | on as u8),
            _ => None,
        }
    }
}

/// Length of the initialization sequence, in commands
pub const INIT_SEQUENCE_LEN: usize = 13;

/// The configuration commands sent by Sh1106.init(), in order.
///
/// Only the multiplex ratio and the COM pads depend on the display size.
pub fn init_sequence(size: DisplaySize) -> [Command; INIT_SEQUENCE_LEN] {
    let (ratio, pads) = match size {
        DisplaySize::Display128x32 => (0x1f, PadLayout::Sequential),
        DisplaySize::Display128x64 => (0x3f, PadLayout::Alternative),
    };
    [
        PageAddress(0),
        ComScanDirection(ScanDirection::Reversed),
        ColumnAddressLow(0),
        ColumnAddressHigh(0),
        SegmentRemap(Remap::Normal),
        Inverted(false),
        ClockDivide(0xf0),
        ChargePeriod(0x22),
        MultiplexRatio(ratio),
        ComPads(pads),
        VcomDeselect(0x20),
        DcDc(true),
        DisplayOn(true),
    ]
}

/// A prelude for convenience, it pulls all enums into scope.
pub mod prelude {
    pub use super::{Command, Command::*, PadLayout, Remap, ScanDirection};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(commands: &[Command]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for command in commands {
            bytes.push(command.opcode());
            bytes.extend(command.argument());
        }
        bytes
    }

    #[test]
    fn opcodes_match_data_sheet() {
        assert_eq!(DisplayOn(true).opcode(), 0xaf);
        assert_eq!(DisplayOn(false).opcode(), 0xae);
        assert_eq!(Inverted(true).opcode(), 0xa7);
        assert_eq!(Inverted(false).opcode(), 0xa6);
        assert_eq!(SegmentRemap(Remap::Reversed).opcode(), 0xa1);
        assert_eq!(ComScanDirection(ScanDirection::Normal).opcode(), 0xc0);
        assert_eq!(PageAddress(7).opcode(), 0xb7);
        assert_eq!(encode(&[Contrast(0x42)]), vec![0x81, 0x42]);
        assert_eq!(encode(&[DcDc(false)]), vec![0xad, 0x8a]);
    }

    #[test]
    fn column_address_is_split_in_nibbles() {
        assert_eq!(ColumnAddressLow(0x00).opcode(), 0x00);
        assert_eq!(ColumnAddressHigh(0x00).opcode(), 0x10);
        assert_eq!(ColumnAddressLow(0x82).opcode(), 0x02);
        assert_eq!(ColumnAddressHigh(0x82).opcode(), 0x18);
    }

    #[test]
    fn init_sequence_for_64_pixel_panel() {
        assert_eq!(
            encode(&init_sequence(DisplaySize::Display128x64)),
            vec![
                0xb0, 0xc8, 0x00, 0x10, 0xa0, 0xa6, 0xd5, 0xf0, 0xd9, 0x22, 0xa8, 0x3f, 0xda,
                0x12, 0xdb, 0x20, 0xad, 0x8b, 0xaf,
            ]
        );
    }

    #[test]
    fn init_sequence_for_32_pixel_panel() {
        let bytes = encode(&init_sequence(DisplaySize::Display128x32));
        assert_eq!(&bytes[10..14], &[0xa8, 0x1f, 0xda, 0x02]);
        assert_eq!(bytes.len(), 19);
    }
}
