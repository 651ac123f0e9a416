pub(crate) mod duration_millis;

/// Formats an integer with commas between every group of three digits, e.g. `1234567` into `1,234,567`.
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(c);
    }

    grouped
}
