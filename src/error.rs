use thiserror::Error;

/// Precondition violations raised by the grid model and the experiment runner.
///
/// Every check runs before any state is touched, so an `Err` never leaves
/// a half-opened site or a half-merged forest behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {name} must be positive, got {value}")]
    InvalidArgument { name: &'static str, value: i64 },

    #[error("grid size {n} is too large to index")]
    GridTooLarge { n: u64 },

    #[error("site ({row}, {col}) is outside the {n}x{n} grid")]
    OutOfBounds { row: usize, col: usize, n: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
