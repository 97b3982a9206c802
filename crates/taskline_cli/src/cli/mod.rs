use clap::Parser;
use std::path::PathBuf;
use taskline_core::config::ConfigOverrides;

/// Track tasks with short text commands.
///
/// Without a command an interactive session reads one command per line
/// until `bye` or end of input.
///
/// Commands:
///   todo <words...> [//high|//medium|//low]
///   deadline <words...> /by <yyyy-MM-dd HHmm> [//priority]
///   event <words...> /from <yyyy-MM-dd HHmm> /to <yyyy-MM-dd HHmm> [//priority]
///   list | find <query...> | mark <n> | unmark <n> | delete <n> | bye
#[derive(Parser, Debug)]
#[command(author, version, verbatim_doc_comment)]
pub struct Cli {
    /// Task file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Create an empty task file if none exists yet
    #[arg(long)]
    pub init: bool,

    /// Output JSON (one-shot mode)
    #[arg(long, conflicts_with = "table")]
    pub json: bool,

    /// Output the task list as a table (one-shot mode)
    #[arg(long)]
    pub table: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE")]
    pub config_override: Vec<String>,

    /// Run a single command, e.g. `taskline todo read book //high`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// One `--config-override` entry, `aliases.<name>=<expansion>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub alias: String,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    match field.to_ascii_lowercase().as_str() {
        "" => Err("override key cannot be empty".to_string()),
        "aliases" | "alias" => {
            let alias = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "aliases override requires an alias name".to_string())?;
            Ok(ParsedConfigOverride {
                alias: alias.to_string(),
                value: value_raw.trim().to_string(),
            })
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

/// Folds every `--config-override` value into one [`ConfigOverrides`].
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        overrides.aliases.insert(parsed.alias, parsed.value);
    }
    Ok(overrides)
}
