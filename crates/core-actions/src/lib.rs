//! Search commands, the interactive search controller, and file IO glue.
//!
//! Everything runs on the thread that delivers the triggering command or key
//! event and completes before the next one. The caller owns one
//! [`SearchSession`] next to its `EditorModel` and passes both into
//! [`execute_command`] for command lines and [`handle_event`] for keys while
//! a prompt is open.

pub mod dispatcher;
pub mod error;
pub mod interactive;
pub mod io_ops;
pub mod session;

pub use dispatcher::command_parser::{
    Arity, COMMANDS, CommandKind, CommandParser, CommandSpec, ParsedCommand,
};
pub use dispatcher::{DispatchResult, execute_command};
pub use error::CommandError;
pub use interactive::{ControllerState, Transition, handle_event};
pub use session::{PATTERN_NOT_FOUND, SearchSession, SearchSettings};
