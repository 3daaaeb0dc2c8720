//! Output format selection and rendering.
//!
//! The format for a given write is chosen from flags first, then the output
//! filename's extension, then a caller-supplied default (usually the format
//! the input arrived in), and finally whether stdout is a terminal.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::CoreError;
use crate::table::{self, TableFieldDefinition};

/// Serialization mode for a single read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoFormat {
    /// Human-readable table output.
    Common,
    Json,
    Yaml,
}

/// Output-related command-line flags shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct OutputFlags {
    /// `--output`: write to this file instead of stdout.
    pub output: Option<PathBuf>,
    /// `--json`
    pub json: bool,
    /// `--yaml`
    pub yaml: bool,
}

/// Determine the IO format implied by a filename extension.
pub fn format_from_filename(filename: &Path) -> IoFormat {
    match filename.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            IoFormat::Yaml
        }
        _ => IoFormat::Json,
    }
}

/// Choose the output format for a write.
///
/// Flags get highest priority, then the output filename's extension, then
/// `default_format`; with none of those, table output for terminals and
/// JSON otherwise.
pub fn calculate_output_format(flags: &OutputFlags, default_format: Option<IoFormat>) -> IoFormat {
    if flags.json {
        return IoFormat::Json;
    }
    if flags.yaml {
        return IoFormat::Yaml;
    }
    if let Some(ref output) = flags.output {
        return format_from_filename(output);
    }
    if let Some(format) = default_format {
        return format;
    }
    if io::stdout().is_terminal() {
        IoFormat::Common
    } else {
        IoFormat::Json
    }
}

/// Pretty-printed JSON.
pub fn json_formatter<T: Serialize + ?Sized>(data: &T) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// YAML output.
pub fn yaml_formatter<T: Serialize + ?Sized>(data: &T) -> Result<String, CoreError> {
    Ok(serde_yaml::to_string(data).map_err(CoreError::from)?)
}

/// Write rendered output to the given file, or stdout when `output` is
/// `None`, ensuring console output ends with a newline.
pub fn write_output(data: &str, output: Option<&Path>) -> Result<(), CoreError> {
    match output {
        Some(path) => std::fs::write(path, data)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data.as_bytes())?;
            if !data.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Render a single item in the given format and write it out.
pub fn format_and_write_item(
    flags: &OutputFlags,
    table_field_definitions: &[TableFieldDefinition],
    item: &Value,
    default_format: Option<IoFormat>,
) -> Result<(), CoreError> {
    let rendered = match calculate_output_format(flags, default_format) {
        IoFormat::Common => table::item_table(item, table_field_definitions),
        IoFormat::Json => json_formatter(item)?,
        IoFormat::Yaml => yaml_formatter(item)?,
    };
    write_output(&rendered, flags.output.as_deref())
}

/// Render raw input back to the user (dry-run echo), using the format the
/// input arrived in as the default.
pub fn format_and_write_raw(
    flags: &OutputFlags,
    item: &Value,
    input_format: IoFormat,
) -> Result<(), CoreError> {
    let rendered = match calculate_output_format(flags, Some(input_format)) {
        // Raw echo has no table config; fall back to JSON for table mode.
        IoFormat::Common | IoFormat::Json => json_formatter(item)?,
        IoFormat::Yaml => yaml_formatter(item)?,
    };
    write_output(&rendered, flags.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_filename_by_extension() {
        assert_eq!(format_from_filename(Path::new("out.yaml")), IoFormat::Yaml);
        assert_eq!(format_from_filename(Path::new("out.YML")), IoFormat::Yaml);
        assert_eq!(format_from_filename(Path::new("out.json")), IoFormat::Json);
        assert_eq!(format_from_filename(Path::new("out")), IoFormat::Json);
    }

    #[test]
    fn flags_take_priority_over_default() {
        let flags = OutputFlags {
            json: true,
            ..OutputFlags::default()
        };
        assert_eq!(
            calculate_output_format(&flags, Some(IoFormat::Yaml)),
            IoFormat::Json
        );

        let flags = OutputFlags {
            yaml: true,
            ..OutputFlags::default()
        };
        assert_eq!(calculate_output_format(&flags, None), IoFormat::Yaml);
    }

    #[test]
    fn output_filename_extension_drives_format() {
        let flags = OutputFlags {
            output: Some(PathBuf::from("result.yaml")),
            ..OutputFlags::default()
        };
        assert_eq!(calculate_output_format(&flags, None), IoFormat::Yaml);
    }

    #[test]
    fn default_format_used_when_no_flags() {
        let flags = OutputFlags::default();
        assert_eq!(
            calculate_output_format(&flags, Some(IoFormat::Yaml)),
            IoFormat::Yaml
        );
    }
}
