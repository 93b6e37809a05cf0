use rust_decimal::Decimal;

use crate::schema::Movement;

/// Whether a customer has ever been observed with positive revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    NeverActive,
    Active,
}

/// Classifies a single month of one customer's timeline.
///
/// `prev` is `None` for the first month of the window. Rules are evaluated
/// in priority order and the first match wins, so the returned record has
/// at most one non-zero field:
///
/// 1. positive amount, never active before: New
/// 2. equal to previous month (including both zero): Old
/// 3. positive after a zero month, previously active: Reactivation
/// 4. grew from a non-zero base: Expansion
/// 5. shrank but still paying: Contraction (negative)
/// 6. dropped to zero from a positive month: Churn (negative)
///
/// A first month of zero matches nothing and yields an all-zero record.
pub fn classify(
    state: ActivityState,
    prev: Option<Decimal>,
    curr: Decimal,
) -> (Movement, ActivityState) {
    let mut movement = Movement::default();
    let mut next_state = state;

    if curr > Decimal::ZERO && state == ActivityState::NeverActive {
        movement.new = curr;
        next_state = ActivityState::Active;
    } else if let Some(prev) = prev {
        if curr == prev {
            movement.old = curr;
        } else if prev == Decimal::ZERO && curr > Decimal::ZERO && state == ActivityState::Active {
            movement.reactivation = curr;
        } else if curr > prev && prev != Decimal::ZERO {
            movement.expansion = curr - prev;
        } else if curr < prev && curr != Decimal::ZERO {
            movement.contraction = curr - prev;
        } else if curr == Decimal::ZERO && prev > Decimal::ZERO {
            movement.churn = -prev;
        }
    }

    (movement, next_state)
}

/// Walks one customer's monthly amounts and labels every month's movement.
pub fn classify_timeline(months: &[Decimal]) -> Vec<Movement> {
    let mut state = ActivityState::NeverActive;
    let mut prev = None;

    months
        .iter()
        .map(|&curr| {
            let (movement, next_state) = classify(state, prev, curr);
            state = next_state;
            prev = Some(curr);
            movement
        })
        .collect()
}
