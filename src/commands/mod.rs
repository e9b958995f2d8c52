pub mod post_update;
pub mod validate;

pub use post_update::run_post_update;
pub use validate::run_validate;
