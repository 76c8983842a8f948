use super::words::to_words;

/// Group digits in threes with commas: `50000` -> `"50,000"`.
pub fn format_grouped_int(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// The amount row, e.g. `Rs. 50,000/-`
pub fn amount_line(amount: u64) -> String {
    format!("Rs. {}/-", format_grouped_int(amount))
}

/// The legal words row, e.g. `(Rupees Fifty thousand only)`
pub fn words_line(amount: u64) -> String {
    format!("(Rupees {} only)", to_words(amount))
}
