//! Common type definitions.
//!
//! - [`AccountId`]: system-assigned account identifier (`BIGSERIAL`)
//! - [`StudentId`]: the whole-number student identifier carried on every account
//! - [`Operation`]: the store operations, used to label logs and errors

use std::fmt;

// Type aliases for IDs
pub type AccountId = i64;
pub type StudentId = i64;

/// Operations the account store performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
    Authenticate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => write!(f, "list"),
            Operation::Read => write!(f, "read"),
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::Authenticate => write!(f, "authenticate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "create");
        assert_eq!(Operation::Authenticate.to_string(), "authenticate");
    }
}
