//! Fee breakdown for paid services. Amounts are integer paise.

use std::fmt;

use serde::{Deserialize, Serialize};

/// GST rate applied to base + service fee, in percent.
pub const GST_PERCENT: u64 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub base_paise: u64,
    pub service_paise: u64,
    pub gst_paise: u64,
    pub convenience_paise: u64,
}

impl FeeBreakdown {
    /// GST is computed from `base + service` and rounded half-up to the paisa.
    pub fn new(base_paise: u64, service_paise: u64, convenience_paise: u64) -> Self {
        let taxable = base_paise + service_paise;
        Self {
            base_paise,
            service_paise,
            gst_paise: (taxable * GST_PERCENT + 50) / 100,
            convenience_paise,
        }
    }

    /// Standard driving license fee: ₹500 base, ₹30 service, no convenience fee.
    pub fn driving_license() -> Self {
        Self::new(50_000, 3_000, 0)
    }

    pub fn total_paise(&self) -> u64 {
        self.base_paise + self.service_paise + self.gst_paise + self.convenience_paise
    }
}

/// Formats paise as rupees, e.g. `62540` -> `₹625.40`.
pub struct Rupees(pub u64);

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driving_license_totals_625_40() {
        let fee = FeeBreakdown::driving_license();
        assert_eq!(fee.gst_paise, 9_540);
        assert_eq!(fee.total_paise(), 62_540);
        assert_eq!(Rupees(fee.total_paise()).to_string(), "₹625.40");
    }

    #[test]
    fn gst_rounds_half_up() {
        // 18% of 0.25 is 0.045 rupees -> 4.5 paise
        assert_eq!(FeeBreakdown::new(25, 0, 0).gst_paise, 5);
        assert_eq!(FeeBreakdown::new(0, 0, 1_000).total_paise(), 1_000);
    }
}
