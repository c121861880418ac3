// NOTE: Command Surface
//
// `since` is the report and the reason this tool exists. `import`,
// `rebuild` and `versions` stand in for the host pipeline that would
// otherwise feed the store: they load parsed documentation, force the
// change index to be regenerated, and show what the store knows about.
//
// Every command except `import` needs an existing store and refuses to
// run without one.

mod args;
mod commands;
pub mod config;
pub mod context;
mod handlers;
pub mod logging;
mod output;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
pub use output::{error_lines, print_error};
