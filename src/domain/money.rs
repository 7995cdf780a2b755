use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so 10.00 = 1000 cents.
pub type Cents = i64;

/// Net balance of an account in cents. Summing any number of `Cents` amounts
/// into a `Balance` cannot overflow.
pub type Balance = i128;

/// Format cents with exactly two decimal places.
/// Example: 1000 -> "10.00", -495 -> "-4.95"
pub fn format_cents(cents: impl Into<Balance>) -> String {
    let cents: Balance = cents.into();
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse decimal text into cents.
/// Example: "10.00" -> 1000, "3.5" -> 350, ".45" -> 45, "8" -> 800
///
/// More than two fraction digits are rounded half away from zero.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (units_str, fraction_str) = match digits.split_once('.') {
        Some((units, fraction)) => (units, fraction),
        None => (digits, ""),
    };

    if units_str.is_empty() && fraction_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat(input.to_string()));
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !fraction_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat(input.to_string()));
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseCentsError::OutOfRange(input.to_string()))?
    };

    let fraction = fraction_str.as_bytes();
    let digit = |i: usize| fraction.get(i).map_or(0, |b| i64::from(b - b'0'));
    let mut fraction_cents = digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        fraction_cents += 1;
    }

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction_cents))
        .ok_or_else(|| ParseCentsError::OutOfRange(input.to_string()))?;

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCentsError {
    #[error("invalid amount '{0}'")]
    InvalidFormat(String),

    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}
