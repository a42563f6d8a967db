//! Professional-tax slab table (state-levied, deducted by payroll).
//!
//! Amounts are whole rupees. A slab covers `from..=to` of the taxable income
//! for its term; `to = None` is open-ended.

use serde::Serialize;

use crate::error::DomainError;

/// Period a slab's income range and amount refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxTerm {
    Monthly,
    Yearly,
}

/// One income band of a state's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSlab {
    pub from: u64,
    pub to: Option<u64>,
    pub term: TaxTerm,
    pub amount: u64,
    /// Amount charged instead of `amount` in the final month of the year.
    pub last_month: Option<u64>,
}

impl TaxSlab {
    const fn monthly(from: u64, to: Option<u64>, amount: u64) -> Self {
        Self {
            from,
            to,
            term: TaxTerm::Monthly,
            amount,
            last_month: None,
        }
    }

    const fn yearly(from: u64, to: Option<u64>, amount: u64) -> Self {
        Self {
            from,
            to,
            term: TaxTerm::Yearly,
            amount,
            last_month: None,
        }
    }

    const fn with_last_month(mut self, amount: u64) -> Self {
        self.last_month = Some(amount);
        self
    }

    fn covers(&self, income: u64) -> bool {
        income >= self.from && self.to.is_none_or(|to| income <= to)
    }
}

/// Professional tax due for one pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfessionalTax {
    pub amount: u64,
    pub term: TaxTerm,
}

struct StateSchedule {
    state: &'static str,
    slabs: &'static [TaxSlab],
}

const MONTHLY_15K_20K: &[TaxSlab] = &[
    TaxSlab::monthly(0, Some(15_000), 0),
    TaxSlab::monthly(15_001, Some(20_000), 150),
    TaxSlab::monthly(20_001, None, 200),
];

const MONTHLY_7500_10K_LAST_MONTH: &[TaxSlab] = &[
    TaxSlab::monthly(0, Some(7_500), 0),
    TaxSlab::monthly(7_501, Some(10_000), 175),
    TaxSlab::monthly(10_001, None, 200).with_last_month(300),
];

static SCHEDULES: &[StateSchedule] = &[
    StateSchedule {
        state: "Andhra Pradesh",
        slabs: MONTHLY_15K_20K,
    },
    StateSchedule {
        state: "Bihar",
        slabs: &[
            TaxSlab::yearly(0, Some(300_000), 0),
            TaxSlab::yearly(300_001, Some(500_000), 1_000),
            TaxSlab::yearly(500_001, Some(1_000_000), 2_000),
            TaxSlab::yearly(1_000_001, None, 2_500),
        ],
    },
    StateSchedule {
        state: "Gujarat",
        slabs: &[
            TaxSlab::monthly(0, Some(12_000), 0),
            TaxSlab::monthly(12_001, None, 200),
        ],
    },
    StateSchedule {
        state: "Tamil Nadu",
        slabs: &[
            TaxSlab::monthly(3_500, Some(7_500), 0),
            TaxSlab::monthly(7_501, Some(12_500), 171),
            TaxSlab::monthly(12_501, Some(20_000), 208),
            TaxSlab::monthly(20_001, Some(25_000), 317),
            TaxSlab::monthly(25_001, Some(30_000), 442),
            TaxSlab::monthly(30_001, None, 597),
        ],
    },
    StateSchedule {
        state: "Maharashtra",
        slabs: MONTHLY_7500_10K_LAST_MONTH,
    },
    StateSchedule {
        state: "Karnataka",
        slabs: &[
            TaxSlab::monthly(0, Some(25_000), 0),
            TaxSlab::monthly(25_001, None, 200),
        ],
    },
    StateSchedule {
        state: "Telangana",
        slabs: MONTHLY_15K_20K,
    },
    StateSchedule {
        state: "Punjab",
        slabs: &[
            TaxSlab::monthly(0, Some(20_882), 0),
            TaxSlab::monthly(20_883, None, 200),
        ],
    },
    StateSchedule {
        state: "Rajasthan",
        slabs: MONTHLY_7500_10K_LAST_MONTH,
    },
    StateSchedule {
        state: "Uttar Pradesh",
        slabs: MONTHLY_7500_10K_LAST_MONTH,
    },
    StateSchedule {
        state: "West Bengal",
        slabs: &[
            TaxSlab::monthly(0, Some(10_000), 0),
            TaxSlab::monthly(10_001, Some(15_000), 110),
            TaxSlab::monthly(15_001, Some(25_000), 130),
            TaxSlab::monthly(25_001, Some(40_000), 150),
            TaxSlab::monthly(40_001, None, 200),
        ],
    },
];

fn schedule(state: &str) -> Option<&'static StateSchedule> {
    let state = state.trim();
    SCHEDULES.iter().find(|s| s.state.eq_ignore_ascii_case(state))
}

/// States with a known schedule, in table order.
pub fn states() -> impl Iterator<Item = &'static str> {
    SCHEDULES.iter().map(|s| s.state)
}

/// Slabs for a state (case-insensitive), if the state is known.
pub fn slabs_for(state: &str) -> Option<&'static [TaxSlab]> {
    schedule(state).map(|s| s.slabs)
}

/// Compute professional tax for a monthly gross salary.
///
/// Yearly schedules are matched against `monthly_gross * 12` and return the
/// yearly amount. Income that falls under no slab owes nothing; a state
/// without a schedule yields `None`.
pub fn professional_tax(
    state: &str,
    monthly_gross: f64,
    is_last_month: bool,
) -> Result<Option<ProfessionalTax>, DomainError> {
    if !monthly_gross.is_finite() || monthly_gross < 0.0 {
        return Err(DomainError::validation(format!(
            "monthly gross must be a non-negative amount, got {monthly_gross}"
        )));
    }

    let Some(schedule) = schedule(state) else {
        return Ok(None);
    };

    let monthly = monthly_gross.floor() as u64;
    let term = schedule
        .slabs
        .first()
        .map(|s| s.term)
        .unwrap_or(TaxTerm::Monthly);
    let income = match term {
        TaxTerm::Monthly => monthly,
        TaxTerm::Yearly => monthly.saturating_mul(12),
    };

    let amount = schedule
        .slabs
        .iter()
        .find(|slab| slab.covers(income))
        .map(|slab| match (is_last_month, slab.last_month) {
            (true, Some(last)) => last,
            _ => slab.amount,
        })
        .unwrap_or(0);

    Ok(Some(ProfessionalTax { amount, term }))
}
