//! Record generators for the directory seed data.
//!
//! - [`OuGenerator`]: Expand the taxonomy into the OU tree
//! - [`GroupGenerator`]: Create one security group per city and department
//! - [`UserGenerator`]: Assemble user accounts from an identity source

pub mod group;
pub mod ou;
pub mod user;

use thiserror::Error;

use crate::identity::IdentityError;
use crate::taxonomy::TaxonomyError;

pub use group::{GeneratedGroup, GroupCategory, GroupGenerator, GroupScope};
pub use ou::{GeneratedOu, OuGenerator, OuType};
pub use user::{EMPLOYEE_ID_BASE, GeneratedUser, UserGenConfig, UserGenerator};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),
    #[error("Duplicate account name: {0}")]
    DuplicateAccount(String),
    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),
    #[error("Employee ID overflow at index {0}")]
    EmployeeIdOverflow(usize),
}
