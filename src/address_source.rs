use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, info};
use mmu::LogicalAddress;

use crate::error::VmmgrError;

/// Reads one decimal address per line. Blank lines are skipped and values
/// are truncated to 16 bits, so `65536` reads as `0` and `-1` as `65535`.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Vec<LogicalAddress>, VmmgrError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| VmmgrError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let addresses = parse_lines(BufReader::new(file), path)?;
    info!("Read {} addresses from {}", addresses.len(), path.display());
    Ok(addresses)
}

pub fn parse_str(content: &str) -> Result<Vec<LogicalAddress>, VmmgrError> {
    parse_lines(content.as_bytes(), Path::new("<memory>"))
}

fn parse_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<LogicalAddress>, VmmgrError> {
    let mut addresses = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| VmmgrError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let value = parse_wrapping(text).ok_or_else(|| VmmgrError::InvalidAddress {
            line: index + 1,
            text: text.to_string(),
        })?;
        addresses
            .try_reserve(1)
            .map_err(|_| VmmgrError::AllocationFailure)?;
        addresses.push(LogicalAddress::new(value));
    }
    Ok(addresses)
}

/// Parses an optionally signed decimal integer of any length, reduced
/// modulo 2^16.
fn parse_wrapping(text: &str) -> Option<u16> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() {
        return None;
    }
    let mut value: u16 = 0;
    let mut wrapped = negative;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        let digit = (b - b'0') as u16;
        match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => value = v,
            None => {
                wrapped = true;
                value = value.wrapping_mul(10).wrapping_add(digit);
            }
        }
    }
    if negative {
        value = value.wrapping_neg();
    }
    if wrapped && value.to_string() != text {
        debug!("'{}' truncated to {}", text, value);
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(addresses: &[LogicalAddress]) -> Vec<u16> {
        addresses.iter().map(|address| address.raw()).collect()
    }

    #[test]
    fn one_per_line() {
        let addresses = parse_str("1\n256\n1\n512\n").unwrap();
        assert_eq!(raw(&addresses), vec![1, 256, 1, 512]);
    }

    #[test]
    fn skips_blank_lines_and_whitespace() {
        let addresses = parse_str("\n  16916 \r\n\n62493\n\n").unwrap();
        assert_eq!(raw(&addresses), vec![16916, 62493]);
    }

    #[test]
    fn truncates_to_16_bits() {
        let addresses = parse_str("65535\n65536\n65537\n-1\n+7\n").unwrap();
        assert_eq!(raw(&addresses), vec![65535, 0, 1, 65535, 7]);

        let addresses =
            parse_str("99999999999999999999\n-99999999999999999999\n18446744073709617153\n")
                .unwrap();
        assert_eq!(raw(&addresses), vec![65535, 1, 1]);
    }

    #[test]
    fn empty() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("\n\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage() {
        for text in ["-", "+", "0x10", "1.5", "--1", "1 2"] {
            assert!(parse_str(text).is_err(), "{} should be rejected", text);
        }
        let err = parse_str("1\n2\nthree\n").unwrap_err();
        match err {
            VmmgrError::InvalidAddress { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "three");
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn missing_file() {
        let err = parse("ADDRESSES_does_not_exist.txt").unwrap_err();
        assert!(matches!(err, VmmgrError::Io { .. }));
    }

    #[test]
    fn unreadable_content() {
        let path = "ADDRESSES_not_utf8.txt";
        std::fs::write(path, [b'1', b'\n', 0xff, 0xfe, b'\n']).unwrap();
        let err = parse(path).unwrap_err();
        std::fs::remove_file(path).unwrap();
        assert!(matches!(err, VmmgrError::Io { .. }));
        assert!(err.to_string().starts_with("Failed to read file 'ADDRESSES_not_utf8.txt'"));
    }

    #[test]
    fn many_lines() {
        let content: String = (0..100_000u32).map(|i| format!("{}\n", i)).collect();
        let addresses = parse_str(&content).unwrap();
        assert_eq!(addresses.len(), 100_000);
        assert_eq!(addresses[70_000].raw(), 70_000u32 as u16);
    }
}
