use std::fmt;
use std::io;

/// Flat error enumeration covering every fallible operation in the crate.
/// There is no `Ok` variant: a successful result is `Result::Ok(_)`.
#[derive(Debug)]
pub enum EmulatorError {
    OutOfMemory,
    OutOfBounds { address: u16, size: u32 },
    BadFile(String),
    BadOption(String),
    InvalidOperation(String),
    GraphicsInit(String),
    GraphicsOp(String),
    Io(io::Error),
}

impl fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EmulatorError::OutOfMemory => write!(f, "out of memory"),
            EmulatorError::OutOfBounds { address, size } => {
                write!(f, "address {:#06x} is out of bounds for a {}-byte segment", address, size)
            }
            EmulatorError::BadFile(message) => write!(f, "bad file: {}", message),
            EmulatorError::BadOption(message) => write!(f, "bad option: {}", message),
            EmulatorError::InvalidOperation(message) => write!(f, "invalid operation: {}", message),
            EmulatorError::GraphicsInit(message) => write!(f, "graphics init failed: {}", message),
            EmulatorError::GraphicsOp(message) => write!(f, "graphics operation failed: {}", message),
            EmulatorError::Io(error) => write!(f, "io error: {}", error),
        }
    }
}

impl std::error::Error for EmulatorError {}

impl From<io::Error> for EmulatorError {
    fn from(error: io::Error) -> Self {
        EmulatorError::Io(error)
    }
}

pub type Result<T> = std::result::Result<T, EmulatorError>;
