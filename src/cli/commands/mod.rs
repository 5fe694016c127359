pub mod calc;
pub mod token;
