//! Interactive selection of an item from a listed resource.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::CoreError;
use crate::format::write_output;
use crate::prompt::Prompter;
use crate::resolve::{convert_to_id, sorted_values, string_key_value};
use crate::table::{TableFieldDefinition, list_table};

/// Per-resource naming and table configuration used by selection and
/// listing commands.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Singular name used in prompts and errors, e.g. `"device"`.
    pub item_name: String,
    /// Plural name; defaults to `item_name` + "s" when `None`.
    pub plural_item_name: Option<String>,
    /// Field holding the item's id.
    pub primary_key_name: String,
    /// Field the list is sorted and displayed by.
    pub sort_key_name: String,
    pub list_table_field_definitions: Vec<TableFieldDefinition>,
}

impl SelectConfig {
    pub fn plural_name(&self) -> String {
        match &self.plural_item_name {
            Some(name) => name.clone(),
            None => format!("{}s", self.item_name),
        }
    }
}

/// Knobs for the per-resource `choose_*` helpers layered on top of
/// [`select_from_list`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChooseOptions {
    /// Interpret an index-shaped command argument as a list index rather
    /// than a literal id.
    pub allow_index: bool,
    /// Skip prompting when the list has exactly one item.
    pub auto_choose: bool,
}

/// Options for a single selection.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    /// Id already resolved from the command line; returned as-is without
    /// fetching or prompting.
    pub preselected_id: Option<String>,
    /// Skip prompting when the list has exactly one item.
    pub auto_choose: bool,
    /// Override for the default `Select a {item}.` prompt.
    pub prompt_message: Option<String>,
}

/// "a" or "an" depending on the word's leading vowel sound.
pub fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next() {
        Some(c) if "aeioAEIO".contains(c) => "an",
        _ => "a",
    }
}

/// Resolve an item id, prompting the user against the listed items when the
/// command line didn't already pin one down.
///
/// A preselected id short-circuits everything else. Otherwise the list is
/// fetched once, shown as an indexed table, and the user is asked until
/// they give a valid id or index (or cancel).
pub async fn select_from_list<T, P, F, Fut>(
    prompter: &mut P,
    config: &SelectConfig,
    options: &SelectOptions,
    list_items: F,
) -> Result<String, CoreError>
where
    T: Serialize,
    P: Prompter + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, CoreError>>,
{
    if let Some(preselected) = &options.preselected_id {
        return Ok(preselected.clone());
    }

    let items = list_items().await?;
    let sorted = sorted_values(&items, &config.sort_key_name)?;

    if sorted.is_empty() {
        // The notice still prints; only the selection itself fails.
        write_output(&format!("no {} found", config.plural_name()), None)?;
        return Err(CoreError::NotFound(config.item_name.clone()));
    }

    if options.auto_choose && sorted.len() == 1 {
        return string_key_value(&sorted[0], &config.primary_key_name);
    }

    write_list_for_selection(config, &sorted)?;
    prompt_for_id(prompter, config, options, &sorted)
}

fn write_list_for_selection(config: &SelectConfig, sorted: &[Value]) -> Result<(), CoreError> {
    let fields = effective_list_fields(config);
    write_output(&list_table(sorted, &fields, true), None)
}

/// Fields for list display, falling back to the sort and primary keys when
/// the config supplies none.
pub fn effective_list_fields(config: &SelectConfig) -> Vec<TableFieldDefinition> {
    if !config.list_table_field_definitions.is_empty() {
        return config.list_table_field_definitions.clone();
    }
    if config.sort_key_name != config.primary_key_name {
        vec![
            TableFieldDefinition::new(config.sort_key_name.clone()),
            TableFieldDefinition::new(config.primary_key_name.clone()),
        ]
    } else {
        vec![TableFieldDefinition::new(config.primary_key_name.clone())]
    }
}

fn prompt_for_id<P: Prompter + ?Sized>(
    prompter: &mut P,
    config: &SelectConfig,
    options: &SelectOptions,
    sorted: &[Value],
) -> Result<String, CoreError> {
    let message = match &options.prompt_message {
        Some(message) => message.clone(),
        None => format!(
            "Select {} {}.",
            indefinite_article(&config.item_name),
            config.item_name
        ),
    };

    loop {
        let Some(answer) = prompter.input(&message)? else {
            return Err(CoreError::Cancelled);
        };
        let answer = answer.trim();
        if !answer.is_empty() {
            if let Some(id) = convert_to_id_lenient(answer, &config.primary_key_name, sorted)? {
                return Ok(id);
            }
        }
        write_output(
            &format!("Invalid id or index \"{answer}\". Please enter an index or valid id."),
            None,
        )?;
    }
}

/// Like [`convert_to_id`] but treats an out-of-range index as "not a match"
/// so the prompt loop can retry instead of aborting.
fn convert_to_id_lenient(
    id_or_index: &str,
    primary_key: &str,
    sorted: &[Value],
) -> Result<Option<String>, CoreError> {
    match convert_to_id(id_or_index, primary_key, sorted) {
        Ok(resolved) => Ok(resolved),
        Err(CoreError::InvalidIndex { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::test_support::{Answer, ScriptedPrompter};
    use serde::Serialize;

    #[derive(Serialize, Clone)]
    struct Item {
        #[serde(rename = "deviceId")]
        device_id: String,
        name: String,
    }

    fn config() -> SelectConfig {
        SelectConfig {
            item_name: "device".into(),
            plural_item_name: None,
            primary_key_name: "deviceId".into(),
            sort_key_name: "name".into(),
            list_table_field_definitions: vec![],
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                device_id: "id-b".into(),
                name: "bedroom".into(),
            },
            Item {
                device_id: "id-a".into(),
                name: "attic".into(),
            },
        ]
    }

    #[test]
    fn article_selection() {
        assert_eq!(indefinite_article("app"), "an");
        assert_eq!(indefinite_article("device"), "a");
        assert_eq!(indefinite_article("Installed app"), "a");
        assert_eq!(indefinite_article("organization"), "an");
    }

    #[test]
    fn plural_name_defaults_to_s_suffix() {
        assert_eq!(config().plural_name(), "devices");
        let named = SelectConfig {
            plural_item_name: Some("device profiles".into()),
            ..config()
        };
        assert_eq!(named.plural_name(), "device profiles");
    }

    #[test]
    fn list_fields_fall_back_to_sort_and_primary_keys() {
        let fields = effective_list_fields(&config());
        let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "deviceId"]);

        let same_key = SelectConfig {
            sort_key_name: "deviceId".into(),
            ..config()
        };
        let fields = effective_list_fields(&same_key);
        let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["deviceId"]);
    }

    #[tokio::test]
    async fn preselected_id_skips_listing_and_prompting() {
        let mut prompter = ScriptedPrompter::default();
        let options = SelectOptions {
            preselected_id: Some("id-z".into()),
            ..SelectOptions::default()
        };
        let id = select_from_list(&mut prompter, &config(), &options, || async {
            panic!("list should not be fetched");
            #[allow(unreachable_code)]
            Ok(Vec::<Item>::new())
        })
        .await
        .unwrap();
        assert_eq!(id, "id-z");
        assert!(prompter.messages.is_empty());
    }

    #[tokio::test]
    async fn auto_choose_single_item() {
        let mut prompter = ScriptedPrompter::default();
        let options = SelectOptions {
            auto_choose: true,
            ..SelectOptions::default()
        };
        let single = vec![items().remove(0)];
        let id = select_from_list(&mut prompter, &config(), &options, || async { Ok(single) })
            .await
            .unwrap();
        assert_eq!(id, "id-b");
        assert!(prompter.messages.is_empty());
    }

    #[tokio::test]
    async fn empty_list_is_not_found() {
        let mut prompter = ScriptedPrompter::default();
        let err = select_from_list::<Item, _, _, _>(
            &mut prompter,
            &config(),
            &SelectOptions::default(),
            || async { Ok(vec![]) },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "could not find device");
    }

    #[tokio::test]
    async fn reprompts_until_valid() {
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Input(Some("bogus".into())),
            Answer::Input(Some("99".into())),
            Answer::Input(Some("2".into())),
        ]);
        let id = select_from_list(
            &mut prompter,
            &config(),
            &SelectOptions::default(),
            || async { Ok(items()) },
        )
        .await
        .unwrap();
        assert_eq!(id, "id-b");
        assert_eq!(prompter.messages.len(), 3);
        assert_eq!(prompter.messages[0], "Select a device.");
    }

    #[tokio::test]
    async fn cancel_maps_to_cancelled() {
        let mut prompter = ScriptedPrompter::new(vec![Answer::Input(None)]);
        let err = select_from_list(
            &mut prompter,
            &config(),
            &SelectOptions::default(),
            || async { Ok(items()) },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CoreError::Cancelled));
    }
}
