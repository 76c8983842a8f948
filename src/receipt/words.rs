const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Scale names for each group of three digits, lowest first.
const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// Spell out a whole amount in English cardinal words, e.g.
/// `1234567` -> `"One million, two hundred thirty-four thousand, five hundred sixty-seven"`.
///
/// Groups are separated by commas and "and" is never inserted.
pub fn to_words(amount: u64) -> String {
    if amount == 0 {
        return capitalize(ONES[0]);
    }

    let mut groups = Vec::new();
    let mut rest = amount;
    let mut scale = 0;
    while rest > 0 {
        let group = (rest % 1000) as u16;
        if group > 0 {
            let words = hundreds_to_words(group);
            if SCALES[scale].is_empty() {
                groups.push(words);
            } else {
                groups.push(format!("{} {}", words, SCALES[scale]));
            }
        }
        rest /= 1000;
        scale += 1;
    }
    groups.reverse();

    capitalize(&groups.join(", "))
}

/// Words for 1..=999.
fn hundreds_to_words(n: u16) -> String {
    let hundreds = n / 100;
    let tail = n % 100;

    let mut parts = Vec::with_capacity(2);
    if hundreds > 0 {
        parts.push(format!("{} hundred", ONES[hundreds as usize]));
    }
    if tail > 0 {
        parts.push(tens_to_words(tail));
    }
    parts.join(" ")
}

fn tens_to_words(n: u16) -> String {
    let n = n as usize;
    if n < 20 {
        return ONES[n].to_string();
    }
    match n % 10 {
        0 => TENS[n / 10].to_string(),
        unit => format!("{}-{}", TENS[n / 10], ONES[unit]),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
