//! Raw sample rows, as relayed by a data-entry surface.
//!
//! A [`Sample`] holds the **unparsed** text of one table row. Nothing is converted to a number
//! until [`Sample::parse`] (or [`crate::PolynomialFitter::validate`]) is called, and a field that
//! does not parse is reported with its row and column instead of silently becoming `0.0`.
//!
//! ```
//! # use lsqpoly::{Sample, sample::SampleField, error::Error};
//! let row = Sample::new("1.5", "abc").with_comment("bad reading");
//! let err = row.parse::<f64>(4).unwrap_err();
//! assert_eq!(
//!     err,
//!     Error::InvalidNumber { row: 4, field: SampleField::Y, text: "abc".into() }
//! );
//! ```
use std::borrow::Cow;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Identifies one numeric column of a sample row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SampleField {
    /// The independent variable
    X,

    /// The dependent variable
    Y,
}
impl std::fmt::Display for SampleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleField::X => write!(f, "x"),
            SampleField::Y => write!(f, "y"),
        }
    }
}

/// One row of raw sample data: `x` and `y` as text, plus a free-form comment.
///
/// The comment is carried along for the caller's benefit and never takes part in a fit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sample<'a> {
    /// Text of the independent variable
    pub x: Cow<'a, str>,

    /// Text of the dependent variable
    pub y: Cow<'a, str>,

    /// Free-text annotation
    pub comment: Cow<'a, str>,
}
impl<'a> Sample<'a> {
    /// Creates a new sample from the raw `x` and `y` text, with an empty comment.
    pub fn new(x: impl Into<Cow<'a, str>>, y: impl Into<Cow<'a, str>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            comment: Cow::Borrowed(""),
        }
    }

    /// Attaches a comment to this sample.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<Cow<'a, str>>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Returns the raw text of the given field.
    #[must_use]
    pub fn field(&self, field: SampleField) -> &str {
        match field {
            SampleField::X => &self.x,
            SampleField::Y => &self.y,
        }
    }

    /// Parses one field of this sample.
    ///
    /// `row` is only used to label the error.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNumber`] if the text is not a finite real number.
    pub fn parse_field<T: Value>(&self, row: usize, field: SampleField) -> Result<T> {
        let text = self.field(field);
        T::parse_text(text).ok_or_else(|| Error::InvalidNumber {
            row,
            field,
            text: text.to_string(),
        })
    }

    /// Parses this sample into an `(x, y)` point. `x` is checked before `y`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNumber`] naming `row` and the first field that failed.
    pub fn parse<T: Value>(&self, row: usize) -> Result<(T, T)> {
        let x = self.parse_field(row, SampleField::X)?;
        let y = self.parse_field(row, SampleField::Y)?;
        Ok((x, y))
    }

    /// Returns an owned version of this sample.
    #[must_use]
    pub fn into_owned(self) -> Sample<'static> {
        Sample {
            x: Cow::Owned(self.x.into_owned()),
            y: Cow::Owned(self.y.into_owned()),
            comment: Cow::Owned(self.comment.into_owned()),
        }
    }
}

impl<'a> From<(&'a str, &'a str)> for Sample<'a> {
    fn from((x, y): (&'a str, &'a str)) -> Self {
        Self::new(x, y)
    }
}

impl<'a> From<(&'a str, &'a str, &'a str)> for Sample<'a> {
    fn from((x, y, comment): (&'a str, &'a str, &'a str)) -> Self {
        Self::new(x, y).with_comment(comment)
    }
}

/// Parses every sample, in row order.
///
/// Stops at the first field that fails, so the reported row is the lowest invalid one.
///
/// # Errors
/// Returns [`Error::InvalidNumber`] for the first unparsable field.
pub fn parse_all<T: Value>(samples: &[Sample<'_>]) -> Result<Vec<(T, T)>> {
    samples
        .iter()
        .enumerate()
        .map(|(row, sample)| sample.parse(row))
        .collect()
}

/// Checks that already-numeric points are finite.
///
/// This is the numeric counterpart to [`parse_all`], used when the caller has no raw text.
///
/// # Errors
/// Returns [`Error::InvalidNumber`] for the first non-finite coordinate, with the value formatted as text.
pub fn check_finite<T: Value>(points: &[(T, T)]) -> Result<()> {
    for (row, &(x, y)) in points.iter().enumerate() {
        for (field, v) in [(SampleField::X, x), (SampleField::Y, y)] {
            if !num_traits::float::FloatCore::is_finite(v) {
                return Err(Error::InvalidNumber {
                    row,
                    field,
                    text: format!("{v}"),
                });
            }
        }
    }

    Ok(())
}
