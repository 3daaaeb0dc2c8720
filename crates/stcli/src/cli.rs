//! Clap derive structures for the `stcli` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stcli_core::{InputFlags, OutputFlags};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// stcli -- command-line interface for the SmartThings platform
#[derive(Debug, Parser)]
#[command(
    name = "stcli",
    version,
    about = "Manage SmartThings devices, locations, apps, and automations",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "STCLI_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Personal access token
    #[arg(long, env = "SMARTTHINGS_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "STCLI_URL", global = true)]
    pub url: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Output JSON
    #[arg(long, short = 'j', global = true, conflicts_with = "yaml")]
    pub json: bool,

    /// Output YAML
    #[arg(long, short = 'y', global = true)]
    pub yaml: bool,

    /// Increase verbosity (-v, -vv, -vvv); device listings also gain
    /// location and room name columns
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalOpts {
    pub fn output_flags(&self) -> OutputFlags {
        OutputFlags {
            output: self.output.clone(),
            json: self.json,
            yaml: self.yaml,
        }
    }
}

// ── Shared Input Arguments ───────────────────────────────────────────

/// Input flags shared by create/update commands.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Read the request body from this file instead of stdin
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Parse and echo the input without calling the API
    #[arg(long, short = 'd')]
    pub dry_run: bool,
}

impl InputArgs {
    pub fn flags(&self) -> InputFlags {
        InputFlags {
            input: self.input.clone(),
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage SmartApps
    Apps(AppsArgs),

    /// Manage devices
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Manage locations
    #[command(alias = "loc")]
    Locations(LocationsArgs),

    /// Manage rooms within a location
    Rooms(RoomsArgs),

    /// Manage rules
    Rules(RulesArgs),

    /// Manage custom capabilities
    #[command(alias = "caps")]
    Capabilities(CapabilitiesArgs),

    /// Manage ST Schema connectors
    Schema(SchemaArgs),

    /// Manage virtual devices
    #[command(alias = "vd")]
    Virtualdevices(VirtualDevicesArgs),

    /// Show CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct AppsArgs {
    /// App id or index in the sorted list
    pub id: Option<String>,

    #[command(subcommand)]
    pub command: Option<AppsCommand>,
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// Create an app from JSON or YAML input
    Create {
        #[command(flatten)]
        input: InputArgs,

        /// Authorize the platform to invoke the app's Lambda functions
        #[arg(long)]
        authorize: bool,
    },

    /// Update an app from JSON or YAML input
    Update {
        /// App id or index
        id: Option<String>,

        #[command(flatten)]
        input: InputArgs,

        /// Authorize the platform to invoke the app's Lambda functions
        #[arg(long)]
        authorize: bool,
    },

    /// Delete an app
    Delete {
        /// App id or index
        id: Option<String>,
    },

    /// Authorize the platform to invoke a Lambda function
    Authorize {
        /// Lambda function ARN
        arn: String,

        /// Override the principal account id
        #[arg(long)]
        principal: Option<String>,

        /// Override the permission statement id
        #[arg(long = "statement-id")]
        statement_id: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct DevicesArgs {
    /// Device id or index in the sorted list
    pub id: Option<String>,

    /// Restrict to devices in this location
    #[arg(long, short = 'l', value_name = "UUID")]
    pub location_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<DevicesCommand>,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// Delete a device
    Delete {
        /// Device id or index
        id: Option<String>,
    },

    /// Show device event history
    History {
        /// Device id or index
        id: Option<String>,

        /// Restrict to devices in this location
        #[arg(long, short = 'l', value_name = "UUID")]
        location_id: Option<String>,

        /// Maximum number of events to fetch
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Only events after this time (epoch milliseconds)
        #[arg(long)]
        after: Option<i64>,

        /// Only events before this time (epoch milliseconds)
        #[arg(long)]
        before: Option<i64>,

        /// Render times in UTC instead of local time
        #[arg(long)]
        utc: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOCATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct LocationsArgs {
    /// Location id or index in the sorted list
    pub id: Option<String>,

    #[command(subcommand)]
    pub command: Option<LocationsCommand>,
}

#[derive(Debug, Subcommand)]
pub enum LocationsCommand {
    /// Create a location from JSON or YAML input
    Create {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Update a location from JSON or YAML input
    Update {
        /// Location id or index
        id: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Delete a location
    Delete {
        /// Location id or index
        id: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROOMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct RoomsArgs {
    /// Room id or index in the sorted list
    pub id: Option<String>,

    /// Location the rooms belong to
    #[arg(long, short = 'l', value_name = "UUID")]
    pub location_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<RoomsCommand>,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// Create a room from JSON or YAML input
    Create {
        /// Location the room belongs to
        #[arg(long, short = 'l', value_name = "UUID")]
        location_id: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Update a room from JSON or YAML input
    Update {
        /// Room id or index
        id: Option<String>,

        /// Location the room belongs to
        #[arg(long, short = 'l', value_name = "UUID")]
        location_id: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Delete a room
    Delete {
        /// Room id or index
        id: Option<String>,

        /// Location the room belongs to
        #[arg(long, short = 'l', value_name = "UUID")]
        location_id: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RULES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct RulesArgs {
    /// Rule id or index in the sorted list
    pub id: Option<String>,

    /// Restrict to rules in this location
    #[arg(long, short = 'l', value_name = "UUID")]
    pub location_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<RulesCommand>,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// Create a rule from JSON or YAML input
    Create {
        /// Location the rule belongs to
        #[arg(long, short = 'l', value_name = "UUID")]
        location_id: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Update a rule from JSON or YAML input
    Update {
        /// Rule id or index
        id: Option<String>,

        /// Location the rule belongs to
        #[arg(long, short = 'l', value_name = "UUID")]
        location_id: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Delete a rule
    Delete {
        /// Rule id or index
        id: Option<String>,

        /// Location the rule belongs to
        #[arg(long, short = 'l', value_name = "UUID")]
        location_id: Option<String>,
    },

    /// Execute a rule's actions
    Execute {
        /// Rule id or index
        id: Option<String>,

        /// Location the rule belongs to
        #[arg(long, short = 'l', value_name = "UUID")]
        location_id: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CAPABILITIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct CapabilitiesArgs {
    /// Capability id or index in the sorted list
    pub id: Option<String>,

    /// Capability version
    #[arg(id = "capability_version", value_name = "VERSION", default_value = "1")]
    pub version: u32,

    /// Restrict to this capability namespace
    #[arg(long)]
    pub namespace: Option<String>,

    #[command(subcommand)]
    pub command: Option<CapabilitiesCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CapabilitiesCommand {
    /// Create a custom capability from JSON or YAML input
    Create {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Update a custom capability from JSON or YAML input
    Update {
        /// Capability id or index
        id: Option<String>,

        /// Capability version
        #[arg(id = "capability_version", value_name = "VERSION", default_value = "1")]
        version: u32,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Delete a custom capability
    Delete {
        /// Capability id or index
        id: Option<String>,

        /// Capability version
        #[arg(id = "capability_version", value_name = "VERSION", default_value = "1")]
        version: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SCHEMA CONNECTORS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct SchemaArgs {
    /// Connector id or index in the sorted list
    pub id: Option<String>,

    #[command(subcommand)]
    pub command: Option<SchemaCommand>,
}

#[derive(Debug, Subcommand)]
pub enum SchemaCommand {
    /// Create a schema connector from JSON or YAML input
    Create {
        #[command(flatten)]
        input: InputArgs,

        /// Authorize the platform to invoke the connector's Lambda functions
        #[arg(long)]
        authorize: bool,
    },

    /// Update a schema connector from JSON or YAML input
    Update {
        /// Connector id or index
        id: Option<String>,

        #[command(flatten)]
        input: InputArgs,

        /// Authorize the platform to invoke the connector's Lambda functions
        #[arg(long)]
        authorize: bool,
    },

    /// Delete a schema connector
    Delete {
        /// Connector id or index
        id: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VIRTUAL DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct VirtualDevicesArgs {
    /// Device id or index in the sorted list
    pub id: Option<String>,

    /// Restrict to devices in this location
    #[arg(long, short = 'l', value_name = "UUID")]
    pub location_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<VirtualDevicesCommand>,
}

#[derive(Debug, Subcommand)]
pub enum VirtualDevicesCommand {
    /// Create a virtual device from JSON or YAML input
    Create {
        /// Create from a device profile prototype instead of a standard one
        #[arg(long)]
        prototype: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Delete a virtual device
    Delete {
        /// Device id or index
        id: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG & COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration (tokens redacted)
    Show,

    /// List configured profile names
    Profiles,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
