// Calendar rules. The shop offers exactly one bookable day at a time.

use crate::modules::booking::core::model::Barber;
use chrono::{Datelike, Days, NaiveDate, Weekday};

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn next_monday(date: NaiveDate) -> NaiveDate {
    let offset = 7 - u64::from(date.weekday().num_days_from_monday());
    date + Days::new(offset)
}

/// The single date a client may book, given today and the barber being booked.
///
/// Tomorrow, pushed to the following Monday when it falls on a weekend or on one of the
/// barber's blocked weekdays. A barber who is also blocked on that Monday gets the first
/// weekday after it they do work; a barber blocked on every weekday falls back to the
/// shop-wide date.
pub fn legal_booking_date(today: NaiveDate, barber: Option<&Barber>) -> NaiveDate {
    let tomorrow = today + Days::new(1);
    let generic = if is_weekend(tomorrow) {
        next_monday(tomorrow)
    } else {
        tomorrow
    };

    let Some(barber) = barber else {
        return generic;
    };
    if barber.works_on(generic.weekday()) {
        return generic;
    }

    let monday = next_monday(generic);
    (0..5)
        .map(|offset| monday + Days::new(offset))
        .find(|date| barber.works_on(date.weekday()))
        .unwrap_or(generic)
}
