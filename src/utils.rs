use chrono::{Datelike, Days, NaiveDate};

/// Calendar month labels covering the window, inclusive of both end months.
/// Labels have the form `"<month>.<year>"` with the month unpadded, e.g.
/// `"10.2021"`. The bounds may arrive in either order.
pub fn month_labels(from: NaiveDate, to: NaiveDate) -> Vec<String> {
    let (from, to) = if from > to { (to, from) } else { (from, to) };

    let count = month_span(from, to);
    let fmonth = from.month() as i32;
    let fyear = from.year();

    let mut labels = Vec::with_capacity(count as usize);

    for i in 0..count {
        let mut years_diff = (fmonth + i) / 12;
        let mut month = (fmonth + i) % 12;
        if month == 0 {
            years_diff -= 1;
            month = 12;
        }
        labels.push(format!("{}.{}", month, fyear + years_diff));
    }

    labels
}

/// Number of calendar months in the window, inclusive of both end months.
/// A zero-length window spans exactly one month.
pub fn month_span(from: NaiveDate, to: NaiveDate) -> i32 {
    let (from, to) = if from > to { (to, from) } else { (from, to) };

    (to.month() as i32 - from.month() as i32) + 12 * (to.year() - from.year()) + 1
}

/// Signed month offset of `date` relative to `origin`.
///
/// The year difference always contributes a non-negative multiple of
/// twelve; only the month component can drive the result negative. Callers
/// that clamp negative offsets depend on this sign convention.
pub fn month_offset(date: NaiveDate, origin: NaiveDate) -> i32 {
    let mut dyear = date.year();
    let mut oyear = origin.year();

    if dyear > oyear {
        std::mem::swap(&mut dyear, &mut oyear);
    }

    (date.month() as i32 - origin.month() as i32) + 12 * (oyear - dyear)
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .checked_sub_days(Days::new(1))
        .unwrap()
}
