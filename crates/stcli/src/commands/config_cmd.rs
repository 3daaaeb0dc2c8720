//! Config subcommand handlers. Read-only: the CLI never writes its own
//! configuration file.

use std::fmt::Write as _;

use stcli_core::format::write_output;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;

/// Format config for display, masking tokens.
fn format_config_redacted(cfg: &Config, active: &str) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out, "# active profile: {active}");

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let profile = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        if profile.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(ref url) = profile.url {
            let _ = writeln!(out, "url = \"{url}\"");
        }
    }

    out
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let active = config::active_profile_name(global, &cfg);

    match args.command.as_ref().unwrap_or(&ConfigCommand::Show) {
        ConfigCommand::Show => {
            write_output(
                &format_config_redacted(&cfg, &active),
                global.output.as_deref(),
            )?;
            Ok(())
        }

        ConfigCommand::Profiles => {
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();
            write_output(&names.join("\n"), global.output.as_deref())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;

    #[test]
    fn tokens_are_redacted() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "home".into(),
            Profile {
                token: Some("very-secret".into()),
                url: None,
            },
        );
        let rendered = format_config_redacted(&cfg, "home");
        assert!(rendered.contains("token = \"****\""));
        assert!(!rendered.contains("very-secret"));
    }
}
