use std::fmt;

/// Number of low bits of a logical address used as the in-page offset.
pub const OFFSET_BITS: u32 = 8;
pub const OFFSET_MASK: u16 = (1 << OFFSET_BITS) - 1;

/// A 16-bit logical address: `| page number: u8 | offset: u8 |`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalAddress(u16);

impl LogicalAddress {
    pub const fn new(raw: u16) -> Self {
        LogicalAddress(raw)
    }

    pub const fn from_parts(page_number: u8, offset: u8) -> Self {
        LogicalAddress(((page_number as u16) << OFFSET_BITS) | offset as u16)
    }

    #[inline]
    pub const fn raw(&self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn page_number(&self) -> u8 {
        (self.0 >> OFFSET_BITS) as u8
    }

    #[inline]
    pub const fn offset(&self) -> u8 {
        (self.0 & OFFSET_MASK) as u8
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#06x} (page {:#04x}, offset {:#04x})",
            self.0,
            self.page_number(),
            self.offset()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose() {
        let address = LogicalAddress::new(0x1234);
        assert_eq!(address.page_number(), 0x12);
        assert_eq!(address.offset(), 0x34);

        let address = LogicalAddress::new(1);
        assert_eq!(address.page_number(), 0);
        assert_eq!(address.offset(), 1);

        let address = LogicalAddress::new(256);
        assert_eq!(address.page_number(), 1);
        assert_eq!(address.offset(), 0);
    }

    #[test]
    fn recombine_every_address() {
        for raw in 0..=u16::MAX {
            let address = LogicalAddress::new(raw);
            assert_eq!(address.page_number() as u16, raw >> 8);
            assert_eq!(address.offset() as u16, raw & 0xff);
            assert_eq!(
                LogicalAddress::from_parts(address.page_number(), address.offset()),
                address
            );
        }
    }

    #[test]
    fn display() {
        let address = LogicalAddress::new(0x0201);
        assert_eq!(address.to_string(), "0x0201 (page 0x02, offset 0x01)");
    }
}
