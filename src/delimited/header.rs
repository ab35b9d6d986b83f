//! Header column handling and duplicate enumeration

use crate::error::{DelimError, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// What to do when the header names the same column more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// Duplicate column names abort the open
    #[default]
    Strict,
    /// Repeated names get a `_N` suffix (`NAME`, `NAME_1`, `NAME_2`, ...)
    Enumerate,
}

impl From<bool> for HeaderPolicy {
    fn from(enumerate: bool) -> Self {
        if enumerate {
            HeaderPolicy::Enumerate
        } else {
            HeaderPolicy::Strict
        }
    }
}

/// Resolve duplicate column names according to `policy`
///
/// The first occurrence of a name keeps it unchanged. Each later occurrence is
/// renamed to `name_N`, N counting repeats of that name from 1. A suffix that
/// would clash with a name already in the header is skipped.
pub fn resolve_columns(fields: Vec<String>, policy: HeaderPolicy) -> Result<Vec<String>> {
    let mut taken: HashSet<String> = HashSet::with_capacity(fields.len());
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::with_capacity(fields.len());

    for field in fields {
        if !taken.contains(&field) {
            taken.insert(field.clone());
            columns.push(field);
            continue;
        }

        if policy == HeaderPolicy::Strict {
            return Err(DelimError::DuplicateColumn(field));
        }

        let count = repeats.entry(field.clone()).or_insert(0);
        let renamed = loop {
            *count += 1;
            let candidate = format!("{}_{}", field, count);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        debug!(column = %field, renamed = %renamed, "enumerated duplicate column");
        taken.insert(renamed.clone());
        columns.push(renamed);
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unique_header_unchanged() -> Result<()> {
        let cols = resolve_columns(names(&["col1", "col2", "col3"]), HeaderPolicy::Strict)?;
        assert_eq!(cols, vec!["col1", "col2", "col3"]);
        Ok(())
    }

    #[test]
    fn test_enumerate_repeats() -> Result<()> {
        let cols = resolve_columns(
            names(&["NAME", "NAME", "VALUE", "NAME", "VALUE"]),
            HeaderPolicy::Enumerate,
        )?;
        assert_eq!(cols, vec!["NAME", "NAME_1", "VALUE", "NAME_2", "VALUE_1"]);
        Ok(())
    }

    #[test]
    fn test_strict_rejects_duplicate() {
        let err = resolve_columns(names(&["NAME", "NAME", "VALUE"]), HeaderPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, DelimError::DuplicateColumn(ref c) if c == "NAME"));
    }

    #[test]
    fn test_suffix_skips_existing_name() -> Result<()> {
        let cols = resolve_columns(names(&["A", "A_1", "A"]), HeaderPolicy::Enumerate)?;
        assert_eq!(cols, vec!["A", "A_1", "A_2"]);
        Ok(())
    }

    #[test]
    fn test_literal_after_generated_name() -> Result<()> {
        let cols = resolve_columns(names(&["A", "A", "A_1"]), HeaderPolicy::Enumerate)?;
        assert_eq!(cols, vec!["A", "A_1", "A_1_1"]);
        Ok(())
    }

    #[test]
    fn test_policy_from_bool() {
        assert_eq!(HeaderPolicy::from(true), HeaderPolicy::Enumerate);
        assert_eq!(HeaderPolicy::from(false), HeaderPolicy::Strict);
        assert_eq!(HeaderPolicy::default(), HeaderPolicy::Strict);
    }
}
