use crate::core::models::{Booking, InvoiceAdjustment};
use crate::core::types::AdjustmentKind;
use rust_decimal::Decimal;

/// `max(0, base + Σadd − Σsubtract)`, folded in the order given.
///
/// Amounts are trusted to be positive magnitudes; `InvoiceAdjustment::new`
/// is where that is enforced. Each step saturates at the `Decimal` range
/// instead of overflowing.
pub fn compute_total(base: Decimal, adjustments: &[InvoiceAdjustment]) -> Decimal {
    let raw = adjustments
        .iter()
        .fold(base, |acc, adj| match adj.kind {
            AdjustmentKind::Add => acc.checked_add(adj.amount).unwrap_or(Decimal::MAX),
            AdjustmentKind::Subtract => acc.checked_sub(adj.amount).unwrap_or(Decimal::MIN),
        });
    raw.max(Decimal::ZERO)
}

/// Balance still owed on a booking. The advance payment is applied as a
/// subtraction ahead of the custom adjustments.
pub fn balance_due(booking: &Booking, adjustments: &[InvoiceAdjustment]) -> Decimal {
    let base = booking.total_amount.unwrap_or(Decimal::ZERO);
    let mut ordered = Vec::with_capacity(adjustments.len() + 1);
    if let Some(advance) = booking.advance_payment {
        ordered.push(InvoiceAdjustment {
            id: 0,
            name: "Advance Paid".to_string(),
            amount: advance,
            kind: AdjustmentKind::Subtract,
        });
    }
    ordered.extend(adjustments.iter().cloned());
    compute_total(base, &ordered)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownLine {
    pub label: String,
    /// Two-decimal rendering with a leading sign for adjustments.
    pub amount: String,
}

/// Lines shared by the in-app invoice view and generated documents, so both
/// print the same figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceBreakdown {
    pub lines: Vec<BreakdownLine>,
    pub total: Decimal,
}

impl InvoiceBreakdown {
    pub fn build(base_label: &str, base: Decimal, adjustments: &[InvoiceAdjustment]) -> Self {
        let mut lines = vec![BreakdownLine {
            label: base_label.to_string(),
            amount: money(base),
        }];
        for adj in adjustments {
            lines.push(BreakdownLine {
                label: adj.name.clone(),
                amount: format!("{}{}", adj.kind.sign(), money(adj.amount)),
            });
        }
        let total = compute_total(base, adjustments);
        Self { lines, total }
    }

    pub fn total_display(&self) -> String {
        money(self.total)
    }
}

pub fn money(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}
