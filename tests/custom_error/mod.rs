use std::error::Error;

#[derive(Debug)]
pub struct SourceFailure;

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "source failed while producing")
    }
}

impl Error for SourceFailure {}
