//! Character to 14-segment glyph mapping.
//!
//! A glyph is a 16-bit word. Bits 0-13 switch segments (A, B, C, D, E, F, G1, G2, H, J, K, L,
//! M, N from bit 0 upwards). Bits 14-15 are never set by the font; the scan-out packs the
//! digit address into them.

/// Segment bitmask for one character cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph(u16);

/// Bits of a glyph that may light segments.
pub const SEGMENT_MASK: u16 = 0x3FFF;

/// Font for `0`-`9`.
pub static DIGITS: [u16; 10] = [
    0x0C3F, 0x0006, 0x00DB, 0x008F, 0x00E6, 0x2069, 0x00FD, 0x0007, 0x00FF, 0x00EF,
];

/// Font for `A`-`Z`.
pub static UPPERCASE: [u16; 26] = [
    0x00F7, 0x128F, 0x0039, 0x120F, 0x00F9, 0x0071, 0x00BD, 0x00F6, 0x1209, 0x001E, // A-J
    0x2470, 0x0038, 0x0536, 0x2136, 0x003F, 0x00F3, 0x203F, 0x20F3, 0x00ED, 0x1201, // K-T
    0x003E, 0x0C30, 0x2836, 0x2D00, 0x1500, 0x0C09, // U-Z
];

/// Font for `a`-`z`.
pub static LOWERCASE: [u16; 26] = [
    0x1058, 0x2078, 0x00D8, 0x088E, 0x0858, 0x0071, 0x048E, 0x1070, 0x1000, 0x000E, // a-j
    0x3600, 0x0030, 0x10D4, 0x1050, 0x00DC, 0x0170, 0x0486, 0x0050, 0x2088, 0x0078, // k-t
    0x001C, 0x2004, 0x2814, 0x28C0, 0x200C, 0x0848, // u-z
];

/// Font for every printable ASCII punctuation character.
///
/// Common 14-segment fonts light a decimal point for `.`; that bit doubles as a digit address
/// bit here, so `.` uses the lower left diagonal instead.
pub static PUNCTUATION: [(u8, u16); 32] = [
    (b'!', 0x0006),
    (b'"', 0x0220),
    (b'#', 0x12CE),
    (b'$', 0x12ED),
    (b'%', 0x0C24),
    (b'&', 0x235D),
    (b'\'', 0x0400),
    (b'(', 0x2400),
    (b')', 0x0900),
    (b'*', 0x3FC0),
    (b'+', 0x12C0),
    (b',', 0x0800),
    (b'-', 0x00C0),
    (b'.', 0x0800),
    (b'/', 0x0C00),
    (b':', 0x1200),
    (b';', 0x0A00),
    (b'<', 0x2400),
    (b'=', 0x00C8),
    (b'>', 0x0900),
    (b'?', 0x1083),
    (b'@', 0x02BB),
    (b'[', 0x0039),
    (b'\\', 0x2100),
    (b']', 0x000F),
    (b'^', 0x0C03),
    (b'_', 0x0008),
    (b'`', 0x0100),
    (b'{', 0x0949),
    (b'|', 0x1200),
    (b'}', 0x2489),
    (b'~', 0x0520),
];

impl Glyph {
    pub const BLANK: Self = Self(0x0000);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn high_byte(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn low_byte(self) -> u8 {
        self.0 as u8
    }

    /// The word sent to the shift-register chain for this glyph on `digit` (0-3).
    ///
    /// The digit address is added into the top two bits of the high byte, which drive the
    /// digit-select multiplexer at the far end of the chain.
    pub const fn with_digit(self, digit: u8) -> u16 {
        let high = self.high_byte() + ((digit & 0b11) << 6);
        u16::from_be_bytes([high, self.low_byte()])
    }
}

/// Maps an ASCII byte to its glyph. Anything without an entry is blank.
pub fn translate(byte: u8) -> Glyph {
    let bits = match byte {
        b'0'..=b'9' => DIGITS[usize::from(byte - b'0')],
        b'a'..=b'z' => LOWERCASE[usize::from(byte - b'a')],
        b'A'..=b'Z' => UPPERCASE[usize::from(byte - b'A')],
        _ => PUNCTUATION
            .iter()
            .find(|&&(symbol, _)| symbol == byte)
            .map_or(Glyph::BLANK.0, |&(_, bits)| bits),
    };
    Glyph(bits)
}
