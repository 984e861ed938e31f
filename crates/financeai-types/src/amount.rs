//! Rupee amounts in request bodies
//!
//! Calculator forms send plain JSON numbers, fractional ones included.
//! Amounts are kept as whole rupees, rounded half away from zero.

use serde::{de, Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
    Whole(i64),
    Fraction(f64),
}

impl Amount {
    fn into_rupees<E: de::Error>(self) -> Result<i64, E> {
        match self {
            Amount::Whole(value) => Ok(value),
            Amount::Fraction(value) => {
                let rounded = value.round();
                // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
                if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64
                {
                    Ok(rounded as i64)
                } else {
                    Err(E::custom(format!("amount out of range: {}", value)))
                }
            }
        }
    }
}

/// `deserialize_with` for a single amount
pub fn rupees<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Amount::deserialize(deserializer)?.into_rupees()
}

/// `deserialize_with` for a category → amount map
pub fn breakdown<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, i64>, D::Error> {
    BTreeMap::<String, Amount>::deserialize(deserializer)?
        .into_iter()
        .map(|(category, amount)| Ok((category, amount.into_rupees()?)))
        .collect()
}
