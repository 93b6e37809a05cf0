use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{AnalyticsError, Result};
use crate::schema::{CustomerFlow, Movement, TotalMrr};

/// Merges per-invoice flows into one combined flow per customer by
/// element-wise summing. Output order is not significant.
///
/// An empty input means there was nothing to compute for the window; that
/// is a terminal business condition, not a zero-filled result.
pub fn merge_by_customer(flows: Vec<CustomerFlow>) -> Result<Vec<CustomerFlow>> {
    if flows.is_empty() {
        return Err(AnalyticsError::NoData);
    }

    let mut merged: HashMap<u32, Vec<Decimal>> = HashMap::new();

    for flow in flows {
        match merged.entry(flow.customer_id) {
            Entry::Occupied(mut entry) => {
                for (total, amount) in entry.get_mut().iter_mut().zip(flow.months) {
                    *total += amount;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(flow.months);
            }
        }
    }

    Ok(merged
        .into_iter()
        .map(|(customer_id, months)| CustomerFlow {
            customer_id,
            months,
        })
        .collect())
}

/// Element-wise sums every customer's classified timeline into per-month
/// portfolio totals. Purely additive.
pub fn sum_portfolio(customers: &[Vec<Movement>], months_count: usize) -> Vec<Movement> {
    let mut totals = vec![Movement::default(); months_count];

    for timeline in customers {
        for (total, movement) in totals.iter_mut().zip(timeline) {
            total.new += movement.new;
            total.old += movement.old;
            total.reactivation += movement.reactivation;
            total.expansion += movement.expansion;
            total.contraction += movement.contraction;
            total.churn += movement.churn;
        }
    }

    totals
}

/// Unzips per-month portfolio movement into the six category vectors and
/// derives the grand total per month.
pub fn total_mrr(movements: &[Movement]) -> TotalMrr {
    let mut mrr = TotalMrr::default();

    for movement in movements {
        mrr.new.push(movement.new);
        mrr.old.push(movement.old);
        mrr.reactivation.push(movement.reactivation);
        mrr.expansion.push(movement.expansion);
        mrr.contraction.push(movement.contraction);
        mrr.churn.push(movement.churn);
        mrr.total.push(
            movement.new
                + movement.old
                + movement.reactivation
                + movement.expansion
                + movement.contraction
                + movement.churn,
        );
    }

    mrr
}
