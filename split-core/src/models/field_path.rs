use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::LineCollection;

/// Error returned when text does not name an editable field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown field '{0}'")]
pub struct FieldPathError(pub String);

/// Addresses one editable leaf value of a [`BillForm`](super::BillForm).
///
/// The textual form is `billAmount`, `billWithoutTaxes`, `taxes[i].amount`
/// or `charges[i].amount`, with zero-based line indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FieldPath {
    BillAmount,
    BillWithoutTaxes,
    Tax(usize),
    Charge(usize),
}

impl FieldPath {
    /// The path of the amount on line `index` of `collection`.
    pub fn line(
        collection: LineCollection,
        index: usize,
    ) -> Self {
        match collection {
            LineCollection::Taxes => Self::Tax(index),
            LineCollection::Charges => Self::Charge(index),
        }
    }

    /// Returns the collection and index for line paths.
    pub fn as_line(&self) -> Option<(LineCollection, usize)> {
        match *self {
            Self::Tax(index) => Some((LineCollection::Taxes, index)),
            Self::Charge(index) => Some((LineCollection::Charges, index)),
            Self::BillAmount | Self::BillWithoutTaxes => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::BillAmount => f.write_str("billAmount"),
            Self::BillWithoutTaxes => f.write_str("billWithoutTaxes"),
            Self::Tax(index) => write!(f, "taxes[{index}].amount"),
            Self::Charge(index) => write!(f, "charges[{index}].amount"),
        }
    }
}

/// Parses `name[index]` with an optional `.amount` suffix.
fn parse_line_path(s: &str) -> Option<(LineCollection, usize)> {
    let s = s.strip_suffix(".amount").unwrap_or(s);
    let (name, rest) = s.split_once('[')?;
    let index = rest.strip_suffix(']')?.trim().parse().ok()?;
    Some((LineCollection::parse(name)?, index))
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "billAmount" | "bill_amount" => Ok(Self::BillAmount),
            "billWithoutTaxes" | "bill_without_taxes" => Ok(Self::BillWithoutTaxes),
            _ => parse_line_path(trimmed)
                .map(|(collection, index)| Self::line(collection, index))
                .ok_or_else(|| FieldPathError(s.to_string())),
        }
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for FieldPath {
    type Error = FieldPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_scalar_fields_in_both_spellings() {
        assert_eq!("billAmount".parse(), Ok(FieldPath::BillAmount));
        assert_eq!("bill_amount".parse(), Ok(FieldPath::BillAmount));
        assert_eq!("billWithoutTaxes".parse(), Ok(FieldPath::BillWithoutTaxes));
        assert_eq!(
            " bill_without_taxes ".parse(),
            Ok(FieldPath::BillWithoutTaxes)
        );
    }

    #[test]
    fn parses_line_fields_with_and_without_amount_suffix() {
        assert_eq!("taxes[0].amount".parse(), Ok(FieldPath::Tax(0)));
        assert_eq!("charges[12].amount".parse(), Ok(FieldPath::Charge(12)));
        assert_eq!("charges[3]".parse(), Ok(FieldPath::Charge(3)));
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", "tips[0].amount", "taxes[x].amount", "taxes[-1]", "taxes0"] {
            assert_eq!(
                bad.parse::<FieldPath>(),
                Err(FieldPathError(bad.to_string())),
                "input: {bad:?}"
            );
        }
    }

    #[test]
    fn display_matches_parse_input() {
        let paths = [
            FieldPath::BillAmount,
            FieldPath::BillWithoutTaxes,
            FieldPath::Tax(2),
            FieldPath::Charge(0),
        ];

        for path in paths {
            assert_eq!(path.to_string().parse(), Ok(path));
        }
    }

    #[test]
    fn as_line_reports_collection_and_index() {
        assert_eq!(
            FieldPath::Tax(4).as_line(),
            Some((LineCollection::Taxes, 4))
        );
        assert_eq!(FieldPath::BillAmount.as_line(), None);
    }
}
