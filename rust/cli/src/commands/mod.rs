//! Command handler modules for the Parlor CLI.
//!
//! Each subcommand lives in its own file with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, never taken from the process
//! - Errors propagated via `CliError`

pub mod cfg;
pub mod compare;
pub mod deal;
pub mod equity;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use compare::handle_compare_command;
pub use deal::handle_deal_command;
pub use equity::handle_equity_command;
pub use sim::handle_sim_command;
