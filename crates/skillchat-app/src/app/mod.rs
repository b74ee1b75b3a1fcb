pub mod oneshot;
pub mod repl;

pub use oneshot::{run_ask_mode, run_skills_mode};
pub use repl::run_repl_mode;
