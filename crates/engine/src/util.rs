//! Internal helpers for validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::NaiveDate;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine};

/// Validate and canonicalize a category display name: trim the ends and
/// collapse internal whitespace runs.
pub(crate) fn normalize_category_display(value: &str) -> ResultEngine<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Err(EngineError::InvalidName(
            "category name must not be empty".to_string(),
        ));
    }
    Ok(collapsed)
}

/// Lookup key for a category name: NFKD, combining marks stripped, lowercased.
///
/// "Café" and "cafe" resolve to the same category.
pub(crate) fn normalize_category_key(display: &str) -> String {
    display
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Number of days in a calendar month. Also rejects out-of-range months.
pub(crate) fn days_in_month(year: i32, month: u32) -> ResultEngine<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::InvalidDate(format!("invalid period: {year}-{month:02}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| EngineError::InvalidDate(format!("invalid period: {year}-{month:02}")))?;

    Ok(next.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_collapses_whitespace() {
        assert_eq!(
            normalize_category_display("  Eating   out ").unwrap(),
            "Eating out"
        );
        assert!(normalize_category_display("   ").is_err());
    }

    #[test]
    fn lookup_key_folds_case_and_accents() {
        assert_eq!(normalize_category_key("Café"), "cafe");
        assert_eq!(normalize_category_key("SALARY"), "salary");
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert!(days_in_month(2024, 0).is_err());
        assert!(days_in_month(2024, 13).is_err());
    }
}
