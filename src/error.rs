//! Construction errors that are not related to text parsing

use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("Expected {expected} bytes but got {actual}")]
///Byte slice length does not match address width
pub struct LengthError {
    ///Address width in bytes
    pub expected: usize,
    ///Length of the provided slice
    pub actual: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("Buffer has {remaining} bytes remaining but address requires {needed}")]
///Buffer does not hold enough bytes to read address
///
///Buffer is left untouched when this error is returned
pub struct ReadError {
    ///Address width in bytes
    pub needed: usize,
    ///Bytes that were available in the buffer
    pub remaining: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("Prefix '{prefix}' is greater than {max}")]
///Prefix length exceeds number of bits in the address
pub struct PrefixLenError {
    ///Requested prefix
    pub prefix: u8,
    ///Number of bits within address
    pub max: u8,
}
