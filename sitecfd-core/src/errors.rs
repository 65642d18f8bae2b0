use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Malformed input in {file} at line {line}: {reason}")]
    MalformedInput {
        file: String,
        line: u64,
        reason: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InputError {
    pub fn malformed(file: &str, line: u64, reason: impl Into<String>) -> Self {
        InputError::MalformedInput {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }
}

pub type InputResult<T> = std::result::Result<T, InputError>;
