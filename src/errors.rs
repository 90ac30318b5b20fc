use std::fmt;

use crate::geometry::Pos;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    InvalidSize, // Grid dimension must be at least 1
    OutOfBounds(Pos), // Position does not belong to the grid
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    MissingEndpoints, // Start or end has not been placed
    SameEndpoints, // Start and end are the same cell
    InvalidState(String),
}


impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidSize => write!(f, "grid size must be positive"),
            GridError::OutOfBounds(pos) => write!(f, "{pos} is outside the grid"),
        }
    }
}

impl std::error::Error for GridError {}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::MissingEndpoints => write!(f, "start and end must both be set"),
            SearchError::SameEndpoints => write!(f, "start and end are the same cell"),
            SearchError::InvalidState(msg) => write!(f, "invalid grid state: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}


impl From<GridError> for SearchError {
    fn from(error: GridError) -> Self {
        SearchError::InvalidState(error.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_becomes_invalid_state() {
        let error: SearchError = GridError::OutOfBounds(Pos::new(3, 4)).into();
        assert_eq!(error, SearchError::InvalidState("(3, 4) is outside the grid".to_string()));
        assert_eq!(error.to_string(), "invalid grid state: (3, 4) is outside the grid");
    }
}
