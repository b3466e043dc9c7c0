use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// Staff-entered free birthday cut for an existing client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookBirthdayCut {
    pub client_id: String,
    pub barber_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub notes: String,
}
