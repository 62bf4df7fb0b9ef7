//! Date helper functions

use chrono::{Datelike, Local};

/// The current calendar year, shown in the page footer
pub fn current_year() -> i32 {
    Local::now().year()
}
