//! Command pipelines tying input, actions, and output together.

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::CoreError;
use crate::format::{
    self, IoFormat, OutputFlags, format_and_write_item, format_and_write_raw, write_output,
};
use crate::input::{self, InputFlags, InputProcessor};
use crate::resolve::{sorted_values, string_translate_to_id};
use crate::select::{SelectConfig, effective_list_fields};
use crate::table::{TableFieldDefinition, list_table};

/// Format and write a single item.
pub fn output_item<T: Serialize>(
    flags: &OutputFlags,
    table_fields: &[TableFieldDefinition],
    item: &T,
) -> Result<(), CoreError> {
    let value = serde_json::to_value(item)?;
    format_and_write_item(flags, table_fields, &value, None)
}

/// Sort, format, and write a list, returning the sorted projections so
/// callers can resolve indexes against exactly what the user saw.
///
/// `for_user_query` marks listings that exist to support a selection
/// prompt; those always render as an indexed table on stdout no matter
/// what output flags were given.
pub fn output_list<T: Serialize>(
    flags: &OutputFlags,
    config: &SelectConfig,
    items: &[T],
    include_index: bool,
    for_user_query: bool,
) -> Result<Vec<Value>, CoreError> {
    let sorted = sorted_values(items, &config.sort_key_name)?;

    if sorted.is_empty() {
        write_output(
            &format!("no {} found", config.plural_name()),
            if for_user_query {
                None
            } else {
                flags.output.as_deref()
            },
        )?;
        return Ok(sorted);
    }

    let fields = effective_list_fields(config);
    if for_user_query {
        write_output(&list_table(&sorted, &fields, true), None)?;
        return Ok(sorted);
    }

    let rendered = match format::calculate_output_format(flags, None) {
        IoFormat::Common => list_table(&sorted, &fields, include_index),
        IoFormat::Json => format::json_formatter(&sorted)?,
        IoFormat::Yaml => format::yaml_formatter(&sorted)?,
    };
    write_output(&rendered, flags.output.as_deref())?;
    Ok(sorted)
}

/// The list/get pipeline: with an id-or-index argument, fetch and display
/// that one item; without one, display the whole list.
pub async fn output_item_or_list<T, U, L, LFut, G, GFut>(
    flags: &OutputFlags,
    config: &SelectConfig,
    id_or_index: Option<&str>,
    include_index: bool,
    list_items: L,
    get_item: G,
) -> Result<(), CoreError>
where
    T: Serialize,
    U: Serialize,
    L: FnOnce() -> LFut,
    LFut: Future<Output = Result<Vec<T>, CoreError>>,
    G: FnOnce(String) -> GFut,
    GFut: Future<Output = Result<U, CoreError>>,
{
    if let Some(arg) = id_or_index {
        let id = string_translate_to_id(
            Some(arg),
            &config.primary_key_name,
            &config.sort_key_name,
            list_items,
        )
        .await?
        .ok_or_else(|| CoreError::NotFound(config.item_name.clone()))?;
        let item = get_item(id).await?;
        output_item(flags, &effective_list_fields(config), &item)
    } else {
        let items = list_items().await?;
        output_list(flags, config, &items, include_index, false)?;
        Ok(())
    }
}

/// The create/update pipeline: acquire input, run the action, and show the
/// result using the input's format as the output default.
///
/// With `dry_run` the parsed input is echoed back instead and the action is
/// never invoked.
pub async fn input_and_output_item<I, O, F, Fut>(
    input_flags: &InputFlags,
    output_flags: &OutputFlags,
    dry_run: bool,
    table_fields: &[TableFieldDefinition],
    action: F,
) -> Result<(), CoreError>
where
    I: DeserializeOwned + Serialize,
    O: Serialize,
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<O, CoreError>>,
{
    let (item, input_format): (I, IoFormat) = input::input_item(input_flags).await?;
    run_action(output_flags, dry_run, table_fields, item, input_format, action).await
}

/// Like [`input_and_output_item`] but with a command-specific interactive
/// fallback when neither the input file nor stdin provides data.
pub async fn input_and_output_item_with<I, O, A, F, Fut>(
    input_flags: &InputFlags,
    output_flags: &OutputFlags,
    dry_run: bool,
    table_fields: &[TableFieldDefinition],
    alternate: &mut A,
    action: F,
) -> Result<(), CoreError>
where
    I: DeserializeOwned + Serialize,
    O: Serialize,
    A: InputProcessor,
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<O, CoreError>>,
{
    let (item, input_format): (I, IoFormat) =
        input::input_item_with(input_flags, alternate).await?;
    run_action(output_flags, dry_run, table_fields, item, input_format, action).await
}

async fn run_action<I, O, F, Fut>(
    output_flags: &OutputFlags,
    dry_run: bool,
    table_fields: &[TableFieldDefinition],
    item: I,
    input_format: IoFormat,
    action: F,
) -> Result<(), CoreError>
where
    I: Serialize,
    O: Serialize,
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<O, CoreError>>,
{
    if dry_run {
        let echoed = serde_json::to_value(&item)?;
        return format_and_write_raw(output_flags, &echoed, input_format);
    }

    let result = action(item).await?;
    let value = serde_json::to_value(&result)?;
    format_and_write_item(output_flags, table_fields, &value, Some(input_format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::io::Write;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Debug, Serialize, Deserialize)]
    struct Body {
        name: String,
    }

    #[derive(Serialize)]
    struct Item {
        #[serde(rename = "locationId")]
        location_id: String,
        name: String,
    }

    fn config() -> SelectConfig {
        SelectConfig {
            item_name: "location".into(),
            plural_item_name: None,
            primary_key_name: "locationId".into(),
            sort_key_name: "name".into(),
            list_table_field_definitions: vec![],
        }
    }

    #[tokio::test]
    async fn dry_run_never_invokes_the_action() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"name": "lamp"}}"#).unwrap();
        let input_flags = InputFlags {
            input: Some(file.path().to_path_buf()),
        };
        let output = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let output_flags = OutputFlags {
            output: Some(output.path().to_path_buf()),
            ..OutputFlags::default()
        };

        static CALLED: AtomicBool = AtomicBool::new(false);
        input_and_output_item(&input_flags, &output_flags, true, &[], |body: Body| async {
            CALLED.store(true, Ordering::SeqCst);
            Ok(body)
        })
        .await
        .unwrap();

        assert!(!CALLED.load(Ordering::SeqCst));
        let echoed = std::fs::read_to_string(output.path()).unwrap();
        assert!(echoed.contains("lamp"));
    }

    #[tokio::test]
    async fn action_result_is_written_in_input_format() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "name: lamp").unwrap();
        let input_flags = InputFlags {
            input: Some(file.path().to_path_buf()),
        };
        // No output extension, so the yaml input format carries through.
        let output = tempfile::Builder::new().tempfile().unwrap();
        let output_flags = OutputFlags {
            output: Some(output.path().to_path_buf()),
            ..OutputFlags::default()
        };

        input_and_output_item(&input_flags, &output_flags, false, &[], |body: Body| async move {
            Ok(Body {
                name: format!("created {}", body.name),
            })
        })
        .await
        .unwrap();

        let written = std::fs::read_to_string(output.path()).unwrap();
        assert!(written.contains("name: created lamp"));
    }

    #[tokio::test]
    async fn missing_input_error_message() {
        let input_flags = InputFlags::default();
        let output_flags = OutputFlags::default();
        // Stdin is a terminal under `cargo test`, so there is no input.
        if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
            return;
        }
        let err = input_and_output_item(
            &input_flags,
            &output_flags,
            false,
            &[],
            |body: Body| async { Ok(body) },
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "input is required either via file specified with --input option or from stdin"
        );
    }

    #[test]
    fn empty_list_message_uses_plural_name() {
        let output = tempfile::Builder::new().tempfile().unwrap();
        let flags = OutputFlags {
            output: Some(output.path().to_path_buf()),
            ..OutputFlags::default()
        };
        let sorted = output_list::<Item>(&flags, &config(), &[], false, false).unwrap();
        assert!(sorted.is_empty());
        let written = std::fs::read_to_string(output.path()).unwrap();
        assert_eq!(written, "no locations found");
    }

    #[test]
    fn list_output_returns_sorted_projections() {
        let output = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let flags = OutputFlags {
            output: Some(output.path().to_path_buf()),
            ..OutputFlags::default()
        };
        let items = vec![
            Item {
                location_id: "l-2".into(),
                name: "Office".into(),
            },
            Item {
                location_id: "l-1".into(),
                name: "home".into(),
            },
        ];
        let sorted = output_list(&flags, &config(), &items, false, false).unwrap();
        assert_eq!(sorted[0]["locationId"], "l-1");
        assert_eq!(sorted[1]["locationId"], "l-2");
    }

    #[tokio::test]
    async fn item_or_list_fetches_one_item_for_an_id() {
        let output = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let flags = OutputFlags {
            output: Some(output.path().to_path_buf()),
            ..OutputFlags::default()
        };
        output_item_or_list(
            &flags,
            &config(),
            Some("l-1"),
            false,
            || async {
                panic!("list should not be fetched for a literal id");
                #[allow(unreachable_code)]
                Ok(Vec::<Item>::new())
            },
            |id| async move {
                Ok(Item {
                    location_id: id,
                    name: "home".into(),
                })
            },
        )
        .await
        .unwrap();
        let written = std::fs::read_to_string(output.path()).unwrap();
        assert!(written.contains("l-1"));
    }
}
