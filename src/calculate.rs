//! Integer arithmetic helpers backing the `library calc` command.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculateError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("overflow")]
    Overflow,
}

pub fn addition(a: i64, b: i64) -> Result<i64, CalculateError> {
    a.checked_add(b).ok_or(CalculateError::Overflow)
}

pub fn subtraction(a: i64, b: i64) -> Result<i64, CalculateError> {
    a.checked_sub(b).ok_or(CalculateError::Overflow)
}

pub fn multiplication(a: i64, b: i64) -> Result<i64, CalculateError> {
    a.checked_mul(b).ok_or(CalculateError::Overflow)
}

/// Truncating integer division
pub fn division(a: i64, b: i64) -> Result<i64, CalculateError> {
    if b == 0 {
        return Err(CalculateError::DivisionByZero);
    }
    // only i64::MIN / -1 is left to fail here
    a.checked_div(b).ok_or(CalculateError::Overflow)
}
