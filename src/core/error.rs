use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    MissingParam,
    EmptyParam,
    InvalidParamType,
    InvalidNumber,
    InvalidRange,
    InvalidRoman,
    Io,
}

impl ErrorKind {
    /// Stable machine-readable code carried in HTTP error envelopes.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Internal => "INTERNAL_ERROR",
            ErrorKind::Usage => "USAGE",
            ErrorKind::MissingParam => "MISSING_PARAM",
            ErrorKind::EmptyParam => "EMPTY_PARAM",
            ErrorKind::InvalidParamType => "INVALID_PARAM_TYPE",
            ErrorKind::InvalidNumber => "INVALID_NUMBER",
            ErrorKind::InvalidRange => "INVALID_RANGE",
            ErrorKind::InvalidRoman => "INVALID_ROMAN",
            ErrorKind::Io => "IO_ERROR",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    detail: Option<String>,
    hint: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            detail: None,
            hint: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.code())?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::MissingParam => 3,
        ErrorKind::EmptyParam => 4,
        ErrorKind::InvalidParamType => 5,
        ErrorKind::InvalidNumber => 6,
        ErrorKind::InvalidRange => 7,
        ErrorKind::InvalidRoman => 8,
        ErrorKind::Io => 9,
    }
}
