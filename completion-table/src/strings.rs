//! User facing strings (English).

pub const PLUGIN_NAME: &str = "customcertelement_completiontable";
pub const ELEMENT_NAME: &str = "Completion Table";

pub const CONTENT: &str = "Content of the table";
pub const CONTENT_HELP: &str = "Rows of the table. ^:width:Header ^ for header cells, #Group# for group \
rows, | Section name | cell | for section rows and {completion:ID} for an activity's completion.";

pub const DATE_RANGES: &str = "Date Ranges";
pub const DATE_RANGES_HELP: &str = "Specify Text for each date range";
pub const START_DATE: &str = "Start Date";
pub const END_DATE: &str = "End Date";
pub const DATE_STRING: &str = "Date String";
pub const ENABLE: &str = "Enable";

pub const FALLBACK_STRING: &str = "Fall Back String";
pub const FALLBACK_STRING_HELP: &str = "Default String for date range";

pub const ERROR_DATE_STRING: &str = "Date string is invalid";
pub const ERROR_DATE: &str = "Date value is invalid";
pub const ERROR_WIDTH_NEGATIVE: &str = "The width has to be greater than or equal to 0.";

pub fn date_range(number: usize) -> String {
    format!("Date Range {number}")
}

pub fn error_width_too_large(max_width: i64) -> String {
    format!("The width can not be greater than the maximum width of {max_width}.")
}
