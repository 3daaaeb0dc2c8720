//! Input acquisition for create/update commands.
//!
//! Input comes from the `--input` file when given, from stdin when piped,
//! or from an optional command-specific interactive session. JSON and YAML
//! are both accepted regardless of source.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::CoreError;
use crate::format::{IoFormat, format_from_filename};

/// Input-related command-line flags.
#[derive(Debug, Clone, Default)]
pub struct InputFlags {
    /// `--input`: read the request body from this file.
    pub input: Option<PathBuf>,
}

/// A source a command can draw its input item from.
pub trait InputProcessor {
    /// Format the input nominally arrives in; used as the default output
    /// format so piped JSON yields JSON back.
    fn io_format(&self) -> IoFormat;

    /// Whether this source can actually provide input for this invocation.
    fn has_input(&self) -> bool;

    /// Read and parse the input item.
    fn read(&mut self) -> impl Future<Output = Result<Value, CoreError>> + Send;
}

/// Parse text that may be JSON or YAML.
fn parse_json_or_yaml(raw: &str) -> Result<Value, CoreError> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Ok(value);
    }
    serde_yaml::from_str(raw).map_err(CoreError::from)
}

/// Reads from the file named by `--input`.
#[derive(Debug)]
pub struct FileInput {
    path: PathBuf,
}

impl FileInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InputProcessor for FileInput {
    fn io_format(&self) -> IoFormat {
        format_from_filename(&self.path)
    }

    fn has_input(&self) -> bool {
        true
    }

    async fn read(&mut self) -> Result<Value, CoreError> {
        let raw = std::fs::read_to_string(&self.path)?;
        parse_json_or_yaml(&raw)
    }
}

/// Reads from stdin when it is not a terminal.
#[derive(Debug, Default)]
pub struct StdinInput;

impl InputProcessor for StdinInput {
    fn io_format(&self) -> IoFormat {
        IoFormat::Json
    }

    fn has_input(&self) -> bool {
        !std::io::stdin().is_terminal()
    }

    async fn read(&mut self) -> Result<Value, CoreError> {
        let mut raw = String::new();
        std::io::stdin().lock().read_to_string(&mut raw)?;
        parse_piped(&raw)
    }
}

/// A pipe that produced nothing counts as missing input, not a null body.
fn parse_piped(raw: &str) -> Result<Value, CoreError> {
    if raw.trim().is_empty() {
        return Err(CoreError::MissingInput);
    }
    parse_json_or_yaml(raw)
}

/// Wraps a command-specific interactive session as an input source of last
/// resort.
pub struct UserInput<F> {
    session: F,
}

impl<F> UserInput<F> {
    pub fn new(session: F) -> Self {
        Self { session }
    }
}

impl<F, Fut> InputProcessor for UserInput<F>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<Value, CoreError>> + Send,
{
    fn io_format(&self) -> IoFormat {
        IoFormat::Common
    }

    fn has_input(&self) -> bool {
        true
    }

    async fn read(&mut self) -> Result<Value, CoreError> {
        (self.session)().await
    }
}

fn typed<T: DeserializeOwned>(value: Value) -> Result<T, CoreError> {
    Ok(serde_json::from_value(value)?)
}

async fn read_from<T, P>(processor: &mut P) -> Result<(T, IoFormat), CoreError>
where
    T: DeserializeOwned,
    P: InputProcessor,
{
    // Read first; a processor may not know its format until it has seen
    // the input.
    let value = processor.read().await?;
    let format = processor.io_format();
    Ok((typed(value)?, format))
}

/// Acquire the command's input item from the file flag or piped stdin.
pub async fn input_item<T: DeserializeOwned>(
    flags: &InputFlags,
) -> Result<(T, IoFormat), CoreError> {
    if let Some(path) = &flags.input {
        return read_from(&mut FileInput::new(path.clone())).await;
    }
    let mut stdin = StdinInput;
    if stdin.has_input() {
        return read_from(&mut stdin).await;
    }
    Err(CoreError::MissingInput)
}

/// Like [`input_item`] but falls back to `alternate` (typically an
/// interactive session) when neither file nor stdin has input.
pub async fn input_item_with<T, A>(
    flags: &InputFlags,
    alternate: &mut A,
) -> Result<(T, IoFormat), CoreError>
where
    T: DeserializeOwned,
    A: InputProcessor,
{
    if let Some(path) = &flags.input {
        return read_from(&mut FileInput::new(path.clone())).await;
    }
    let mut stdin = StdinInput;
    if stdin.has_input() {
        return read_from(&mut stdin).await;
    }
    if alternate.has_input() {
        return read_from(alternate).await;
    }
    Err(CoreError::MissingInput)
}

/// Path for tests and callers that already have a file path in hand.
pub fn file_input_format(path: &Path) -> IoFormat {
    format_from_filename(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Body {
        name: String,
        count: i64,
    }

    #[test]
    fn parses_json_and_yaml() {
        let json = parse_json_or_yaml(r#"{"name": "x", "count": 2}"#).unwrap();
        assert_eq!(json["count"], 2);
        let yaml = parse_json_or_yaml("name: x\ncount: 2\n").unwrap();
        assert_eq!(yaml["name"], "x");
        assert!(parse_json_or_yaml(": not valid : either :").is_err());
    }

    #[test]
    fn empty_pipe_is_missing_input() {
        for raw in ["", "   \n\t"] {
            let err = parse_piped(raw).unwrap_err();
            assert_eq!(
                err.to_string(),
                "input is required either via file specified with --input option or from stdin"
            );
        }
        assert_eq!(parse_piped(r#"{"name": "x"}"#).unwrap()["name"], "x");
    }

    #[tokio::test]
    async fn file_input_reads_and_reports_format() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "name: lamp\ncount: 1").unwrap();

        let flags = InputFlags {
            input: Some(file.path().to_path_buf()),
        };
        let (body, format): (Body, _) = input_item(&flags).await.unwrap();
        assert_eq!(
            body,
            Body {
                name: "lamp".into(),
                count: 1
            }
        );
        assert_eq!(format, IoFormat::Yaml);
    }

    #[tokio::test]
    async fn json_file_reports_json_format() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"name": "lamp", "count": 1}}"#).unwrap();

        let mut processor = FileInput::new(file.path());
        assert_eq!(processor.io_format(), IoFormat::Json);
        assert!(processor.has_input());
        let value = processor.read().await.unwrap();
        assert_eq!(value["name"], "lamp");
    }

    #[tokio::test]
    async fn alternate_used_only_as_last_resort() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"name": "from-file", "count": 1}}"#).unwrap();

        let flags = InputFlags {
            input: Some(file.path().to_path_buf()),
        };
        let mut alternate = UserInput::new(|| async {
            panic!("alternate should not run");
            #[allow(unreachable_code)]
            Ok(Value::Null)
        });
        let (body, _): (Body, _) = input_item_with(&flags, &mut alternate).await.unwrap();
        assert_eq!(body.name, "from-file");
    }

    #[tokio::test]
    async fn user_input_session_runs_when_nothing_else_has_input() {
        let mut alternate = UserInput::new(|| async {
            Ok(serde_json::json!({"name": "interactive", "count": 7}))
        });
        assert_eq!(alternate.io_format(), IoFormat::Common);
        let value = alternate.read().await.unwrap();
        assert_eq!(value["count"], 7);
    }
}
