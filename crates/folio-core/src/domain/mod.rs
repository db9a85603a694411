//! Domain entities - the core business objects.

mod category;
pub mod link_name;
mod post;
pub mod value;

pub use category::{Category, UNCATEGORISED_ID, UNCATEGORISED_LINK_NAME, UNCATEGORISED_NAME};
pub use link_name::LinkName;
pub use post::{MAX_DESCRIPTION_LENGTH, Post};
pub use value::EntityKind;

use chrono::{DateTime, NaiveTime, Utc};

/// Midnight (UTC) of the current day.
pub(crate) fn today() -> DateTime<Utc> {
    Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
}
