use std::error;
use std::fmt;
use std::io;
use std::result;

pub type Result<T> = result::Result<T, SassError>;

#[derive(Debug, Clone, PartialEq)]
pub struct SassError {
    pub message: String,
    pub kind: ErrorKind,
    pub offset: usize,
}

impl SassError {
    pub fn new<S: Into<String>>(kind: ErrorKind, offset: usize, message: S) -> SassError {
        SassError {
            message: message.into(),
            kind,
            offset,
        }
    }

    /// Fatal errors abort the whole compilation; everything else is
    /// recorded and compilation carries on with the next declaration or item.
    pub fn is_fatal(&self) -> bool {
        match self.kind {
            ErrorKind::IoError |
            ErrorKind::InvalidOutputStyle |
            ErrorKind::TokenizerError |
            ErrorKind::NestingTooDeep => true,
            _ => false,
        }
    }
}

impl fmt::Display for SassError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} at {}: {}", self.kind, self.offset, self.message)
    }
}

impl error::Error for SassError {}

impl From<io::Error> for SassError {
    fn from(err: io::Error) -> SassError {
        SassError {
            offset: 0,
            message: err.to_string(),
            kind: ErrorKind::IoError,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorKind {
    IoError,
    InvalidOutputStyle,
    TokenizerError,
    UnexpectedEof,
    SyntaxError,
    UnresolvedVariable,
    IncompatibleUnits,
    Arithmetic,
    NotANumber,
    UnknownMixin,
    NestingTooDeep,
}
