pub mod post_update;
pub mod runner;
pub mod validator;

pub use runner::CommandRunner;
pub use validator::{SkipReason, UpdateValidator, ValidationOptions, ValidationOutcome};
