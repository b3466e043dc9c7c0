use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayPromotion {
    pub is_birthday_today: bool,
    pub meets_visit_threshold: bool,
}

impl BirthdayPromotion {
    pub fn is_eligible(&self) -> bool {
        self.is_birthday_today && self.meets_visit_threshold
    }
}

/// Compares calendar month and day only. A 29 February birthday is celebrated on
/// 28 February in non-leap years.
pub fn is_birthday_on(birth_date: NaiveDate, today: NaiveDate) -> bool {
    if birth_date.month() == today.month() && birth_date.day() == today.day() {
        return true;
    }
    birth_date.month() == 2
        && birth_date.day() == 29
        && today.month() == 2
        && today.day() == 28
        && !today.leap_year()
}

pub fn evaluate_birthday(
    birth_date: Option<NaiveDate>,
    visit_count: u32,
    today: NaiveDate,
    visit_threshold: u32,
) -> BirthdayPromotion {
    BirthdayPromotion {
        is_birthday_today: birth_date.is_some_and(|birth| is_birthday_on(birth, today)),
        meets_visit_threshold: visit_count >= visit_threshold,
    }
}
