use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompressionError {
    #[error("Unexpected end of stream")]
    UnexpectedEof,

    #[error("Input buffer too short for expected data")]
    InputTooShort,
}
