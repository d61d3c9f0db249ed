use std::io::Write;

use disk::Disk;
use log::{info, warn};
use mmu::{DefaultMmu, Statistics, Translation, PAGE_COUNT, PAGE_SIZE};

use crate::{address_source, config::Config, error::VmmgrError};

/// Opens the backing store, streams every address of `config.addresses`
/// through a fresh MMU and writes the trace and summary to `out`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<Statistics, VmmgrError> {
    let disk = Disk::<PAGE_SIZE>::open(&config.backing_store).map_err(|e| match e {
        disk::DiskError::Io(source) => VmmgrError::Io {
            path: config.backing_store.clone(),
            source,
        },
    })?;
    if disk.block_count() < PAGE_COUNT {
        warn!(
            "Backing store {} holds {} of {} pages, missing bytes read as zero",
            disk.path().display(),
            disk.block_count(),
            PAGE_COUNT
        );
    }

    writeln!(out, "[~] Reading file '{}'", config.addresses.display())?;
    let addresses = address_source::parse(&config.addresses)?;
    if addresses.is_empty() {
        return Err(VmmgrError::NoAddresses);
    }
    writeln!(out, "[^] Processing {} addresses", addresses.len())?;

    let mut mmu = DefaultMmu::init();
    for (index, &address) in addresses.iter().enumerate() {
        let translation = mmu.translate(address, &disk)?;
        if !config.quiet {
            writeln!(out, "{}", format_trace(index, &translation))?;
        }
    }

    let statistics = *mmu.statistics();
    writeln!(out, "{}", statistics)?;
    info!(
        "{} frames of {} in use, {} page table hits",
        mmu.allocated_frames(),
        DefaultMmu::frame_count(),
        statistics.page_table_hits()
    );
    out.flush()?;
    Ok(statistics)
}

pub fn format_trace(index: usize, translation: &Translation) -> String {
    let value = translation.value;
    let printable = if value.is_ascii_graphic() || value == b' ' {
        value as char
    } else {
        ' '
    };
    format!(
        "[+] [{:04}] - VAddr: {}, PAddr: {:#06x}, *PAddr: {:#04x} ('{}') {}",
        index,
        translation.address,
        translation.physical_address,
        value,
        printable,
        translation.outcome
    )
}

#[cfg(test)]
mod tests {
    use mmu::{LogicalAddress, Outcome};

    use super::*;

    #[test]
    fn trace_line() {
        let translation = Translation {
            address: LogicalAddress::new(1),
            frame_number: 0,
            physical_address: 1,
            value: 0x41,
            outcome: Outcome::PageFault,
        };
        assert_eq!(
            format_trace(0, &translation),
            "[+] [0000] - VAddr: 0x0001 (page 0x00, offset 0x01), PAddr: 0x0001, *PAddr: 0x41 ('A') page fault"
        );
    }

    #[test]
    fn trace_line_unprintable() {
        let translation = Translation {
            address: LogicalAddress::new(0x0210),
            frame_number: 3,
            physical_address: 0x0310,
            value: 0,
            outcome: Outcome::TlbHit,
        };
        assert_eq!(
            format_trace(42, &translation),
            "[+] [0042] - VAddr: 0x0210 (page 0x02, offset 0x10), PAddr: 0x0310, *PAddr: 0x00 (' ') TLB hit"
        );
    }
}
