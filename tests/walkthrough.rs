//! The classic walkthrough over 8/3, 1/9, 7/4 and 6/4.

use tp7::{Error, Fraction, Properties};

fn fractions() -> [Fraction; 4] {
    [
        Fraction::new(8, 3).unwrap(),
        Fraction::new(1, 9).unwrap(),
        Fraction::new(7, 4).unwrap(),
        Fraction::new(6, 4).unwrap(),
    ]
}

#[test]
fn renders_raw_terms() {
    let [f1, f2, f3, _] = fractions();
    assert_eq!(format!("{f1} {f2} {f3}"), "8/3 1/9 7/4");
}

#[test]
fn mixed_number() {
    let [f1, ..] = fractions();
    assert_eq!(f1.as_mixed_number(), "Le nombre mixte est 2 et 2/3");
}

#[test]
fn operators() {
    let [f1, f2, f3, f4] = fractions();
    assert_eq!((f1 + f2).to_string(), "75/27");
    assert_eq!((f1 - f2).to_string(), "69/27");
    assert_eq!((f1 * f4).to_string(), "48/12");
    assert_eq!((f1 / f2).to_string(), "72/3");
    assert_eq!(f2.try_pow(f3).unwrap().to_string(), "1/46");
    assert!(f1 != f2);
}

#[test]
fn conversion_and_predicates() {
    let [f1, f2, f3, f4] = fractions();
    assert_eq!(f4.to_f64(), 1.5);
    assert_eq!(f64::from(f4), 1.5);
    assert!(!f1.is_zero());
    assert!(!f1.is_integer());
    assert!(!f1.is_proper());
    assert!(!f1.is_unit());
    assert!(f2.is_unit());
    assert!(!f1.is_adjacent_to(&f3));
    assert_eq!(f1.properties(), Properties::empty());
}

#[test]
fn division_by_zero() {
    assert_eq!(Fraction::new(3, 0).unwrap_err(), Error::DivisionByZero);
    let [f1, ..] = fractions();
    let zero = Fraction::new(0, 5).unwrap();
    assert_eq!(f1.try_div(zero).unwrap_err(), Error::DivisionByZero);
    assert_eq!(Error::DivisionByZero.to_string(), "attempt to divide by zero");
}

#[test]
fn mutation_keeps_denominator_non_zero() {
    let [mut f1, ..] = fractions();
    f1.set_numerator(5);
    assert!(f1.set_denominator(0).is_err());
    f1.set_denominator(-2).unwrap();
    assert_eq!(f1.to_string(), "5/-2");
    assert_eq!(f1.as_mixed_number(), "Le nombre mixte est -3 et -1/-2");
}
