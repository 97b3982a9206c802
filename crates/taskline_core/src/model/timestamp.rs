use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Literal pattern every user-supplied timestamp must follow.
pub const TIMESTAMP_PATTERN: &str = "yyyy-MM-dd HHmm";
pub const TIMESTAMP_EXAMPLE: &str = "2024-05-19 1800";

const INPUT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour][minute]");
const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day] [year], [hour repr:12 padding:none]:[minute][period]"
);

/// Parses `yyyy-MM-dd HHmm` strictly. Anything else, including a sign on the
/// year or trailing seconds, is rejected.
pub fn parse_timestamp(text: &str) -> Option<PrimitiveDateTime> {
    if text.len() != TIMESTAMP_PATTERN.len() || !text.is_ascii() {
        return None;
    }
    if text.starts_with(['+', '-']) {
        return None;
    }
    PrimitiveDateTime::parse(text, INPUT_FORMAT).ok()
}

pub fn format_timestamp(value: PrimitiveDateTime) -> String {
    // INPUT_FORMAT only contains components a PrimitiveDateTime always has.
    value
        .format(INPUT_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}

pub fn display_timestamp(value: PrimitiveDateTime) -> String {
    value
        .format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| format_timestamp(value))
}
