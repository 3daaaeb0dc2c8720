//! Shared interaction framework for `stcli` commands.
//!
//! Every command composes a handful of primitives from this crate:
//!
//! - [`resolve::string_translate_to_id`] — turn a user-supplied string that
//!   may be a 1-based list index or a literal id into a concrete id.
//! - [`select::select_from_list`] — present a list of remote resources and
//!   let the user pick one (or skip prompting entirely when an id was given
//!   on the command line).
//! - [`io::input_and_output_item`] — the create/update pipeline: acquire
//!   input from a file, stdin, or an interactive session, run an action
//!   against the API, and format the result.
//! - [`io::output_item_or_list`] — the list/get pipeline.
//! - [`history::get_history`] — bounded accumulation over the paged device
//!   history endpoint, with an interactive page-at-a-time variant.
//!
//! Items flow through the framework as `serde_json::Value` projections so
//! configuration can name key and display fields the way the platform's
//! JSON does.

pub mod error;
pub mod format;
pub mod history;
pub mod input;
pub mod io;
pub mod prompt;
pub mod resolve;
pub mod select;
pub mod sort;
pub mod table;

pub use error::CoreError;
pub use format::{IoFormat, OutputFlags};
pub use input::{InputFlags, InputProcessor};
pub use prompt::{DialoguerPrompter, Prompter};
pub use select::{ChooseOptions, SelectConfig, SelectOptions};
pub use table::TableFieldDefinition;
