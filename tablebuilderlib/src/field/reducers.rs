//! Stock reducers for header/footer aggregates.
//!
//! Each reducer receives the column's raw values in record order. `null`
//! values (misses without a default) are skipped.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::aggregate::ReducerFn;
use crate::error::BoxError;

fn numbers(values: &[Value]) -> Result<Vec<(f64, &Value)>, BoxError> {
    values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| match v.as_f64() {
            Some(n) => Ok((n, v)),
            None => Err(BoxError::from(format!("non-numeric value {}", v))),
        })
        .collect()
}

/// Numeric total. Empty input sums to `0`; integers stay integers until a
/// float (or an overflow) is seen.
pub fn sum(values: &[Value]) -> Result<Value, BoxError> {
    let mut int_total: Option<i64> = Some(0);
    let mut float_total = 0.0;
    for (n, value) in numbers(values)? {
        float_total += n;
        int_total = match (int_total, value.as_i64()) {
            (Some(total), Some(i)) => total.checked_add(i),
            _ => None,
        };
    }
    Ok(match int_total {
        Some(total) => Value::from(total),
        None => json!(float_total),
    })
}

/// Number of non-null values.
pub fn count(values: &[Value]) -> Result<Value, BoxError> {
    Ok(Value::from(values.iter().filter(|v| !v.is_null()).count() as u64))
}

/// Arithmetic mean. Fails on empty input.
pub fn mean(values: &[Value]) -> Result<Value, BoxError> {
    let numbers = numbers(values)?;
    if numbers.is_empty() {
        return Err("mean of an empty sequence".into());
    }
    let total: f64 = numbers.iter().map(|(n, _)| n).sum();
    Ok(json!(total / numbers.len() as f64))
}

/// Smallest numeric value. Fails on empty input.
pub fn min(values: &[Value]) -> Result<Value, BoxError> {
    extreme(values, "min", |candidate, best| candidate < best)
}

/// Largest numeric value. Fails on empty input.
pub fn max(values: &[Value]) -> Result<Value, BoxError> {
    extreme(values, "max", |candidate, best| candidate > best)
}

fn extreme(
    values: &[Value],
    name: &str,
    better: impl Fn(f64, f64) -> bool,
) -> Result<Value, BoxError> {
    let mut best: Option<(f64, &Value)> = None;
    for (n, value) in numbers(values)? {
        best = match best {
            Some((b, _)) if !better(n, b) => best,
            _ => Some((n, value)),
        };
    }
    best.map(|(_, value)| value.clone())
        .ok_or_else(|| format!("{} of an empty sequence", name).into())
}

/// Reducers addressable by name (declaration files, CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReducerName {
    Sum,
    Count,
    Mean,
    Min,
    Max,
}

impl ReducerName {
    /// The reducer function for this name
    pub fn reducer(self) -> ReducerFn {
        let f: fn(&[Value]) -> Result<Value, BoxError> = match self {
            ReducerName::Sum => sum,
            ReducerName::Count => count,
            ReducerName::Mean => mean,
            ReducerName::Min => min,
            ReducerName::Max => max,
        };
        Arc::new(f)
    }
}

impl FromStr for ReducerName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" | "total" => Ok(ReducerName::Sum),
            "count" => Ok(ReducerName::Count),
            "mean" | "avg" | "average" => Ok(ReducerName::Mean),
            "min" => Ok(ReducerName::Min),
            "max" => Ok(ReducerName::Max),
            _ => Err(format!("Unknown reducer: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_integers() {
        assert_eq!(sum(&[json!(1), json!(2)]).unwrap(), json!(3));
    }

    #[test]
    fn test_sum_empty_is_zero() {
        assert_eq!(sum(&[]).unwrap(), json!(0));
    }

    #[test]
    fn test_sum_promotes_to_float() {
        assert_eq!(sum(&[json!(1), json!(0.5)]).unwrap(), json!(1.5));
    }

    #[test]
    fn test_sum_skips_null() {
        assert_eq!(sum(&[json!(4), json!(null)]).unwrap(), json!(4));
    }

    #[test]
    fn test_sum_rejects_text() {
        let err = sum(&[json!(1), json!("two")]).unwrap_err();
        assert!(err.to_string().contains("\"two\""));
    }

    #[test]
    fn test_count() {
        assert_eq!(count(&[json!("a"), json!(null), json!(0)]).unwrap(), json!(2));
        assert_eq!(count(&[]).unwrap(), json!(0));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[json!(1), json!(2)]).unwrap(), json!(1.5));
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_min_max_keep_original_value() {
        let values = [json!(3), json!(-1.5), json!(10)];
        assert_eq!(min(&values).unwrap(), json!(-1.5));
        assert_eq!(max(&values).unwrap(), json!(10));
        assert!(max(&[]).is_err());
    }

    #[test]
    fn test_reducer_name_from_str() {
        assert_eq!("sum".parse::<ReducerName>().unwrap(), ReducerName::Sum);
        assert_eq!("AVG".parse::<ReducerName>().unwrap(), ReducerName::Mean);
        assert!("median".parse::<ReducerName>().is_err());
    }

    #[test]
    fn test_reducer_name_dispatch() {
        let reducer = ReducerName::Max.reducer();
        assert_eq!(reducer(&[json!(1), json!(7)]).unwrap(), json!(7));
    }
}
