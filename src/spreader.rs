use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::schema::{CustomerFlow, Invoice, PaidPlan};
use crate::utils::month_offset;

/// Distributes one invoice's payment across the months of the reporting
/// window.
///
/// A monthly payment lands in the single month its billing period starts
/// in. An annual payment is amortized at one twelfth per month over the
/// twelve covered months; the portion of that coverage falling before the
/// window start is dropped. Once the coverage is exhausted, remaining
/// window months receive zero.
pub fn spread_invoice(
    invoice: &Invoice,
    months_count: usize,
    window_start: NaiveDate,
) -> CustomerFlow {
    let mut months = vec![Decimal::ZERO; months_count];

    let mut paid_amount = invoice.paid_amount;
    let mut period_len: i32 = 1;

    if invoice.paid_plan == PaidPlan::Annually {
        paid_amount /= Decimal::from(12);
        period_len = 12;
    }

    let mut start_month = month_offset(invoice.period_start, window_start);
    if start_month < 0 {
        period_len += start_month;
        start_month = 0;
    }

    for slot in months.iter_mut().skip(start_month as usize) {
        if period_len <= 0 {
            paid_amount = Decimal::ZERO;
        }
        *slot = paid_amount;
        period_len -= 1;
    }

    CustomerFlow {
        customer_id: invoice.customer_id,
        months,
    }
}
