use std::fmt;

use crate::Outcome;

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    addresses_processed: u64,
    page_faults: u64,
    tlb_hits: u64,
    page_table_hits: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.addresses_processed += 1;
        match outcome {
            Outcome::TlbHit => self.tlb_hits += 1,
            Outcome::PageTableHit => self.page_table_hits += 1,
            Outcome::PageFault => self.page_faults += 1,
        }
    }

    pub fn addresses_processed(&self) -> u64 {
        self.addresses_processed
    }

    pub fn page_faults(&self) -> u64 {
        self.page_faults
    }

    pub fn tlb_hits(&self) -> u64 {
        self.tlb_hits
    }

    pub fn page_table_hits(&self) -> u64 {
        self.page_table_hits
    }

    fn percentage(&self, count: u64) -> f64 {
        if self.addresses_processed == 0 {
            return 0.0;
        }
        count as f64 * 100.0 / self.addresses_processed as f64
    }

    pub fn fault_rate(&self) -> f64 {
        self.percentage(self.page_faults)
    }

    pub fn tlb_hit_rate(&self) -> f64 {
        self.percentage(self.tlb_hits)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Addresses  : {}", self.addresses_processed)?;
        writeln!(
            f,
            "# Page faults: {} - {:.6}%",
            self.page_faults,
            self.fault_rate()
        )?;
        write!(f, "# TLB hits   : {} - {:.6}%", self.tlb_hits, self.tlb_hit_rate())
    }
}
