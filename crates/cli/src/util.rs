use unicode_width::UnicodeWidthStr;

/// Terminal columns taken by `s` (CJK and emoji count double).
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn fill(width: usize, s: &str) -> String {
    " ".repeat(width.saturating_sub(display_width(s)))
}

/// Left-align `s` in at least `width` columns. Longer text overflows.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    format!("{s}{}", fill(width, s))
}

/// Right-align `s` in at least `width` columns. Longer text overflows.
pub(crate) fn pad_left(s: &str, width: usize) -> String {
    format!("{}{s}", fill(width, s))
}

/// Format an amount as `$1,234.56` / `-$1,234.56`, rounded to cents.
pub(crate) fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let negative = value < 0.0 && cents > 0;

    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}
