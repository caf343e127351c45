//! Display formatting for amounts and percentages

/// Currency shown next to an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyUnit {
    Usd,
    Bs,
}

impl CurrencyUnit {
    pub fn prefix(&self) -> &'static str {
        match self {
            CurrencyUnit::Usd => "$",
            CurrencyUnit::Bs => "Bs ",
        }
    }
}

/// Two decimals with thousands separators: `$1,234.56`, `Bs 3,800,000.00`
pub fn format_currency(amount: f64, unit: CurrencyUnit) -> String {
    if !amount.is_finite() {
        return format!("{}{}", unit.prefix(), amount);
    }

    let cents = (amount.abs() * 100.0).round() as u128;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        unit.prefix(),
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Percent value with two decimals: `13.00%`
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Upper-case the first letter of a wire value (`dolares` -> `Dolares`)
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Greedy word wrap at `width` characters
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = line.chars().count() + 1 + word.chars().count();
            if !line.is_empty() && needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

fn group_thousands(mut value: u128) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(",")
}
