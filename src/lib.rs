//! Unreduced integer fractions.
//!
//! A [`Fraction`] keeps the exact numerator and denominator it was given:
//! nothing is ever simplified, so `2/4` and `1/2` compare equal but are
//! classified differently by [`Fraction::is_unit`] and
//! [`Fraction::is_adjacent_to`].

mod error;
mod fraction;

pub use error::{Error, Result};
pub use fraction::{Fraction, MixedNumber, Properties};
