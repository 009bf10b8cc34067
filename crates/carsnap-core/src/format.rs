// ── Number and currency rendering ──
//
// en-US conventions: comma thousands separators, `₩` prefix for KRW with no
// fraction digits, leading `-` for negatives.

/// Listing prices are quoted in units of 10,000 KRW.
pub const PRICE_UNIT: i64 = 10_000;

/// Flat amount (in price units) added to every asking price.
pub const PRICE_OFFSET: i64 = 44;

/// Group an integer with commas: `1234567` → `1,234,567`.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render an amount of Korean won: `10440000` → `₩10,440,000`.
pub fn format_krw(amount: i64) -> String {
    if amount < 0 {
        format!("-₩{}", group_thousands(amount).trim_start_matches('-'))
    } else {
        format!("₩{}", group_thousands(amount))
    }
}

/// Display price in won for a raw asking price: `(raw + 44) * 10000`.
pub fn display_price(raw: i64) -> i64 {
    raw.saturating_add(PRICE_OFFSET).saturating_mul(PRICE_UNIT)
}

/// Render a displacement in cc as liters with the shortest exact decimal:
/// `1998` → `1.998`, `2000` → `2`, `1500` → `1.5`.
pub fn format_liters(cc: i64) -> String {
    let sign = if cc < 0 { "-" } else { "" };
    let abs = cc.unsigned_abs();
    let whole = abs / 1000;
    let frac = abs % 1000;
    if frac == 0 {
        format!("{sign}{whole}")
    } else {
        let frac = format!("{frac:03}");
        format!("{sign}{whole}.{}", frac.trim_end_matches('0'))
    }
}
