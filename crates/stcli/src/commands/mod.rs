//! Command handlers, one module per resource.

pub mod apps;
pub mod capabilities;
pub mod config_cmd;
pub mod devices;
pub mod locations;
pub mod rooms;
pub mod rules;
pub mod schema;
pub mod util;
pub mod virtualdevices;

use stcli_api::ApiClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    client: &ApiClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Apps(args) => apps::handle(client, args, global).await,
        Command::Devices(args) => devices::handle(client, args, global).await,
        Command::Locations(args) => locations::handle(client, args, global).await,
        Command::Rooms(args) => rooms::handle(client, args, global).await,
        Command::Rules(args) => rules::handle(client, args, global).await,
        Command::Capabilities(args) => capabilities::handle(client, args, global).await,
        Command::Schema(args) => schema::handle(client, args, global).await,
        Command::Virtualdevices(args) => virtualdevices::handle(client, args, global).await,
        Command::Config(_) | Command::Completions(_) => {
            unreachable!("handled before dispatch")
        }
    }
}
