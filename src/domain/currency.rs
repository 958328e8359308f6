/// Compact Indian-style amount: crores, lakhs and thousands.
pub fn format_inr(amount: f64) -> String {
    if amount >= 1e7 {
        format!("{:.2}Cr", amount / 1e7)
    } else if amount >= 1e5 {
        format!("{:.2}L", amount / 1e5)
    } else if amount >= 1e3 {
        format!("{:.2}K", amount / 1e3)
    } else {
        format!("₹{amount:.2}")
    }
}

/// Full amount with Indian digit grouping, e.g. `12,34,567.80`.
pub fn format_grouped(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let split = digits.len().saturating_sub(3);
    let (head, tail) = digits.split_at(split);
    groups.push(tail.iter().collect());
    let mut rest = head;
    while !rest.is_empty() {
        let split = rest.len().saturating_sub(2);
        let (next, pair) = rest.split_at(split);
        groups.push(pair.iter().collect());
        rest = next;
    }
    groups.reverse();

    let sign = if negative { "-" } else { "" };
    format!("{sign}{}.{frac_part}", groups.join(","))
}
