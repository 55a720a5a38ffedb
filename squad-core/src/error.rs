use thiserror::Error;

#[derive(Error, Debug)]
pub enum SquadError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SquadError {
    /// Config fault for an environment variable that is set but unusable.
    pub fn invalid_env(key: &str, value: &str, expected: &str) -> Self {
        SquadError::Config(format!("{key}={value:?} is invalid: expected {expected}"))
    }
}

pub type Result<T> = std::result::Result<T, SquadError>;
