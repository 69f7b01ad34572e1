//! Display formatting shared by presentation layers.

use crate::types::UsdTotal;

/// Group digits in threes with commas: `28940` becomes `28,940`.
///
/// # Example
///
/// ```
/// assert_eq!(runplane::format::group_thousands(1_234_567), "1,234,567");
/// ```
pub fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Dollar amount with sign and two decimals: `$1.94`.
///
/// Takes a [`UsdTotal`]; a single run's `Usd` converts with `.into()`.
pub fn format_cost(cost: UsdTotal) -> String {
    format!("${}", cost)
}
