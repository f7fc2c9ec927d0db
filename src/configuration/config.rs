#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;
use toml_edit::Item;
use toml_edit::Table;

use crate::domain::models::HiddenModelRule;
use crate::domain::models::HiddenModels;
use crate::domain::models::MatchType;
use crate::domain::models::Placement;
use crate::domain::models::RegexScript;
use crate::domain::services::ParseOptions;
use crate::domain::services::ReasoningParser;

const HIDDEN_MODELS_KEY: &str = "hidden-models";
const REGEX_SCRIPTS_KEY: &str = "regex-scripts";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AddToPrompts,
    AutoParse,
    MaxAdditions,
    Prefix,
    Separator,
    Strict,
    Suffix,
    TrimSpaces,
}

impl ConfigKey {
    pub fn parse(text: &str) -> Option<ConfigKey> {
        return ConfigKey::iter().find(|e| return e.to_string() == text);
    }

    fn description(&self) -> &'static str {
        match self {
            ConfigKey::AddToPrompts => {
                return "Add stored reasoning back into prompts sent to the model.";
            }
            ConfigKey::AutoParse => {
                return "Extract reasoning from replies that open with the prefix while streaming.";
            }
            ConfigKey::MaxAdditions => {
                return "Maximum number of messages that get their reasoning added to a prompt.";
            }
            ConfigKey::Prefix => return "Text that opens a reasoning block.",
            ConfigKey::Separator => {
                return "Inserted between a reasoning block and message content in prompts.";
            }
            ConfigKey::Strict => {
                return "Only extract reasoning when the prefix is at the start of a reply.";
            }
            ConfigKey::Suffix => return "Text that closes a reasoning block.",
            ConfigKey::TrimSpaces => {
                return "Trim surrounding whitespace from extracted reasoning and content.";
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub add_to_prompts: bool,
    pub auto_parse: bool,
    pub max_additions: usize,
    pub prefix: String,
    pub separator: String,
    pub strict: bool,
    pub suffix: String,
    pub trim_spaces: bool,
    pub hidden_models: HiddenModels,
    pub regex_scripts: Vec<RegexScript>,
}

impl Default for Config {
    fn default() -> Config {
        return Config {
            add_to_prompts: false,
            auto_parse: false,
            max_additions: 1,
            prefix: "<think>\n".to_string(),
            separator: "\n\n".to_string(),
            strict: false,
            suffix: "\n</think>".to_string(),
            trim_spaces: true,
            hidden_models: HiddenModels::default(),
            regex_scripts: vec![],
        };
    }
}

fn invalid_value(key: &str, expected: &str) -> anyhow::Error {
    return anyhow::anyhow!(format!(
        "config.toml has an invalid value for key '{key}': expected {expected}"
    ));
}

fn item_bool(key: &str, item: &Item) -> Result<bool> {
    return item
        .as_bool()
        .ok_or_else(|| return invalid_value(key, "a boolean"));
}

fn item_str<'a>(key: &str, item: &'a Item) -> Result<&'a str> {
    return item
        .as_str()
        .ok_or_else(|| return invalid_value(key, "a string"));
}

fn item_usize(key: &str, item: &Item) -> Result<usize> {
    let val = item
        .as_integer()
        .ok_or_else(|| return invalid_value(key, "an integer"))?;

    return usize::try_from(val).map_err(|_| return invalid_value(key, "a non-negative integer"));
}

fn table_str<'a>(table: &'a Table, key: &str) -> Option<&'a str> {
    return table.get(key).and_then(|e| return e.as_str());
}

fn parse_hidden_models(item: &Item) -> Result<HiddenModels> {
    let tables = item
        .as_array_of_tables()
        .ok_or_else(|| return invalid_value(HIDDEN_MODELS_KEY, "an array of tables"))?;

    let mut rules = vec![];
    for table in tables.iter() {
        let name = table_str(table, "name").unwrap_or("");
        if name.is_empty() {
            return Err(invalid_value(HIDDEN_MODELS_KEY, "a model name"));
        }

        let match_str = table_str(table, "match").unwrap_or("exact");
        let match_type = match MatchType::parse(match_str) {
            Some(match_type) => match_type,
            None => bail!(format!(
                "config.toml has an invalid match '{match_str}' for hidden model '{name}'\nPossible values are: exact, prefix"
            )),
        };

        rules.push(HiddenModelRule::new(
            table_str(table, "backend").unwrap_or(""),
            name,
            match_type,
        ));
    }

    return Ok(HiddenModels::new(rules));
}

fn parse_regex_scripts(item: &Item) -> Result<Vec<RegexScript>> {
    let tables = item
        .as_array_of_tables()
        .ok_or_else(|| return invalid_value(REGEX_SCRIPTS_KEY, "an array of tables"))?;

    let mut scripts = vec![];
    for table in tables.iter() {
        let name = table_str(table, "name").unwrap_or("");
        let find = table_str(table, "find").unwrap_or("");
        if find.is_empty() {
            bail!(format!(
                "config.toml has a regex script '{name}' without a 'find' pattern"
            ));
        }

        let mut placements = vec![];
        if let Some(values) = table.get("placement").and_then(|e| return e.as_array()) {
            for value in values.iter() {
                let placement_str = value.as_str().unwrap_or("");
                match Placement::parse(placement_str) {
                    Some(placement) => placements.push(placement),
                    None => bail!(format!(
                        "config.toml has an invalid placement '{placement_str}' for regex script '{name}'\nPossible values are: {}",
                        Placement::iter()
                            .map(|e| return e.to_string())
                            .collect::<Vec<String>>()
                            .join(", ")
                    )),
                }
            }
        }

        let mut script = RegexScript::new(
            name,
            find,
            table_str(table, "replace").unwrap_or(""),
            placements,
        );
        script.disabled = table
            .get("disabled")
            .and_then(|e| return e.as_bool())
            .unwrap_or(false);

        scripts.push(script);
    }

    return Ok(scripts);
}

fn toml_string(val: &str) -> String {
    return toml_edit::Value::from(val).to_string();
}

impl Config {
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::AddToPrompts => return self.add_to_prompts.to_string(),
            ConfigKey::AutoParse => return self.auto_parse.to_string(),
            ConfigKey::MaxAdditions => return self.max_additions.to_string(),
            ConfigKey::Prefix => return self.prefix.to_string(),
            ConfigKey::Separator => return self.separator.to_string(),
            ConfigKey::Strict => return self.strict.to_string(),
            ConfigKey::Suffix => return self.suffix.to_string(),
            ConfigKey::TrimSpaces => return self.trim_spaces.to_string(),
        }
    }

    fn set(&mut self, key: ConfigKey, item: &Item) -> Result<()> {
        let name = key.to_string();
        match key {
            ConfigKey::AddToPrompts => self.add_to_prompts = item_bool(&name, item)?,
            ConfigKey::AutoParse => self.auto_parse = item_bool(&name, item)?,
            ConfigKey::MaxAdditions => self.max_additions = item_usize(&name, item)?,
            ConfigKey::Prefix => self.prefix = item_str(&name, item)?.to_string(),
            ConfigKey::Separator => self.separator = item_str(&name, item)?.to_string(),
            ConfigKey::Strict => self.strict = item_bool(&name, item)?,
            ConfigKey::Suffix => self.suffix = item_str(&name, item)?.to_string(),
            ConfigKey::TrimSpaces => self.trim_spaces = item_bool(&name, item)?,
        }

        return Ok(());
    }

    /// Builds a config from TOML. Keys that are not present keep their default.
    pub fn from_toml(toml_str: &str) -> Result<Config> {
        let doc = toml_str.parse::<toml_edit::Document>()?;
        let mut config = Config::default();

        for key in ConfigKey::iter() {
            if let Some(item) = doc.get(&key.to_string()) {
                config.set(key, item)?;
            }
        }

        if let Some(item) = doc.get(HIDDEN_MODELS_KEY) {
            config.hidden_models = parse_hidden_models(item)?;
        }

        if let Some(item) = doc.get(REGEX_SCRIPTS_KEY) {
            config.regex_scripts = parse_regex_scripts(item)?;
        }

        tracing::debug!(
            auto_parse = config.auto_parse,
            add_to_prompts = config.add_to_prompts,
            max_additions = config.max_additions,
            strict = config.strict,
            trim_spaces = config.trim_spaces,
            hidden_models = config.hidden_models.rules().len(),
            regex_scripts = config.regex_scripts.len(),
            "config"
        );

        return Ok(config);
    }

    /// Loads the config file at `config_path`, falling back to defaults when
    /// the file does not exist.
    pub async fn load(config_path: &path::Path) -> Result<Config> {
        if !config_path.exists() {
            tracing::debug!(
                path = %config_path.display(),
                "config file not found, using defaults"
            );
            return Ok(Config::default());
        }

        let toml_str = fs::read_to_string(config_path).await?;
        return Config::from_toml(&toml_str);
    }

    pub fn serialize_default() -> String {
        let config = Config::default();
        let mut sections = ConfigKey::iter()
            .map(|key| {
                let val = match key {
                    ConfigKey::Prefix | ConfigKey::Separator | ConfigKey::Suffix => {
                        toml_string(&config.get(key))
                    }
                    _ => config.get(key),
                };

                return format!("# {}\n{key} = {val}", key.description());
            })
            .collect::<Vec<String>>();

        sections.push(
            r#"# Regex scripts run over text before it is displayed. Placements: user-input, ai-output, reasoning.
# [[regex-scripts]]
# name = "Strip citations"
# find = "\\[\\d+\\]"
# replace = ""
# placement = ["reasoning"]"#
                .to_string(),
        );

        let hidden_models = config
            .hidden_models
            .rules()
            .iter()
            .map(|rule| {
                return format!(
                    "[[{HIDDEN_MODELS_KEY}]]\nbackend = {}\nname = {}\nmatch = {}",
                    toml_string(&rule.backend),
                    toml_string(&rule.name),
                    toml_string(&rule.match_type.to_string())
                );
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        sections.push(format!(
            "# Models that reason without returning their reasoning. Match is one of: exact, prefix.\n{hidden_models}"
        ));

        return sections.join("\n\n") + "\n";
    }

    /// Parser using the configured prefix, suffix and trimming rules.
    pub fn parser(&self) -> ReasoningParser {
        return ReasoningParser::new(
            &self.prefix,
            &self.suffix,
            ParseOptions {
                trim_spaces: self.trim_spaces,
                strict: self.strict,
            },
        );
    }
}
