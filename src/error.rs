use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    #[error("attempt to divide by zero")]
    DivisionByZero,

    #[error("attempt to {0} with overflow")]
    Overflow(&'static str),

    /// Negative base raised to a non-integral exponent.
    #[error("power has no real value")]
    NotReal,
}

pub type Result<T> = std::result::Result<T, Error>;
