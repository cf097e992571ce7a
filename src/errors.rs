use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// Everything that can go wrong while building chains or walking them.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkovError {
    /// A transition row has negative/non-finite weights, duplicate labels, or does not
    /// sum to 1.0 within tolerance.
    InvalidDistribution(String),
    /// A label was asked for that has no row in its transition table.
    UnknownState(String),
    /// Step count or jump distance out of range.
    InvalidParameter(String),
}

impl Display for MarkovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkovError::InvalidDistribution(msg) => write!(f, "Invalid distribution: {}", msg),
            MarkovError::UnknownState(label) => {
                write!(f, "Unknown state: no transition row for {}", label)
            }
            MarkovError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl Error for MarkovError {}

#[derive(Debug)]
pub enum RenderError {
    EmptyPath,
    UnparseableColor(String),
    SvgWriteError(String),
}

impl Error for RenderError {}

impl Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::EmptyPath => write!(f, "Nothing to render: path has no records"),
            RenderError::UnparseableColor(label) => {
                write!(f, "Color label {:?} is not a CSS color", label)
            }
            RenderError::SvgWriteError(msg) => write!(f, "Svg write error: {}", msg),
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(error: io::Error) -> Self {
        RenderError::SvgWriteError(error.to_string())
    }
}
