//! Row encoding
//!
//! Turns a [`ParameterRow`] into a [`CaseDescriptor`]: the CLI invocation,
//! the configuration overrides and the content-addressed identifier.
//!
//! Columns are dispatched by name, in lexicographic order:
//!
//! | Column              | Effect                                        |
//! |---------------------|-----------------------------------------------|
//! | `_CNAME`            | command name, always argument 0               |
//! | `_PLAN`             | `--plan <value>`                              |
//! | `_INFRA`            | `-i <value>`                                  |
//! | `--*`               | flag; `--enable-*` joined with `=`            |
//! | anything else       | config override `NAME: value`                 |

use crate::identifier::CaseId;
use crate::row::ParameterRow;
use std::fmt::{self, Display, Formatter};

/// Column holding the invoked command name
pub const COMMAND_COLUMN: &str = "_CNAME";
/// Column holding the plan name
pub const PLAN_COLUMN: &str = "_PLAN";
/// Column holding the infrastructure provider
pub const INFRA_COLUMN: &str = "_INFRA";
/// Prefix marking a flag column
pub const FLAG_PREFIX: &str = "--";
/// Prefix of flags rendered as a single `name=value` token
pub const JOINED_FLAG_PREFIX: &str = "--enable-";
/// Flag value meaning "omit this flag"
pub const FLAG_SENTINEL: &str = "NOTPROVIDED";
/// Config value meaning "omit this override"
pub const CONFIG_SENTINEL: &str = "NA";

/// Tag column that cannot be expressed in the matrix format
const CUSTOM_TAGS_COLUMN: &str = "AZURE_CUSTOM_TAGS";
const CUSTOM_TAGS_MARKER: &str = "tagKey1=";
const CUSTOM_TAGS_VALUE: &str = "tagKey1=tagValue1, tagKey2=tagValue2";

/// Escape tokens accepted in config values
const ESCAPES: [(&str, &str); 2] = [("<comma>", ","), ("<qq>", "\"")];

/// How a column contributes to a case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// `_CNAME`
    Command,
    /// `_PLAN`
    Plan,
    /// `_INFRA`
    Infra,
    /// Name starts with `--`
    Flag,
    /// Everything else
    Config,
}

impl ColumnRule {
    /// Classify a column by name
    #[must_use]
    pub fn classify(name: &str) -> Self {
        match name {
            COMMAND_COLUMN => Self::Command,
            PLAN_COLUMN => Self::Plan,
            INFRA_COLUMN => Self::Infra,
            n if n.starts_with(FLAG_PREFIX) => Self::Flag,
            _ => Self::Config,
        }
    }
}

/// One entry of a case's command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArgument {
    /// The invoked command itself
    Program(String),
    /// `name value`, two tokens
    Pair { name: String, value: String },
    /// `name=value`, one token
    Assignment { name: String, value: String },
}

impl CommandArgument {
    /// Individual command line tokens
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::Program(program) => vec![program.clone()],
            Self::Pair { name, value } => vec![name.clone(), value.clone()],
            Self::Assignment { .. } => vec![self.to_string()],
        }
    }
}

impl Display for CommandArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Program(program) => f.write_str(program),
            Self::Pair { name, value } => write!(f, "{name} {value}"),
            Self::Assignment { name, value } => write!(f, "{name}={value}"),
        }
    }
}

/// A `key: value` configuration override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOverride {
    pub key: String,
    pub value: String,
}

impl Display for ConfigOverride {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Encoded form of one matrix row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDescriptor {
    /// 1-based row position, for the human-readable label only
    pub sequence: u32,
    pub arguments: Vec<CommandArgument>,
    pub overrides: Vec<ConfigOverride>,
    pub id: CaseId,
}

impl CaseDescriptor {
    /// Arguments joined by single spaces
    #[must_use]
    pub fn command_line(&self) -> String {
        self.arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every command line token, in order
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.arguments
            .iter()
            .flat_map(CommandArgument::tokens)
            .collect()
    }
}

/// Stateless row encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct RowEncoder;

impl RowEncoder {
    /// Create encoder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode a row
    #[must_use]
    pub fn encode(&self, sequence: u32, row: &ParameterRow) -> CaseDescriptor {
        let mut arguments = Vec::new();
        let mut overrides = Vec::new();

        for (name, value) in row.sorted_columns() {
            match ColumnRule::classify(name) {
                ColumnRule::Command => {
                    arguments.insert(0, CommandArgument::Program(value.to_owned()));
                }
                ColumnRule::Plan => arguments.push(CommandArgument::Pair {
                    name: "--plan".to_owned(),
                    value: value.to_owned(),
                }),
                ColumnRule::Infra => arguments.push(CommandArgument::Pair {
                    name: "-i".to_owned(),
                    value: value.to_owned(),
                }),
                ColumnRule::Flag => arguments.extend(encode_flag(name, value)),
                ColumnRule::Config => overrides.extend(encode_config(name, value)),
            }
        }

        CaseDescriptor {
            sequence,
            arguments,
            overrides,
            id: CaseId::for_row(row),
        }
    }
}

fn encode_flag(name: &str, value: &str) -> Option<CommandArgument> {
    if value == FLAG_SENTINEL {
        return None;
    }
    let name = name.to_lowercase();
    let value = value.to_owned();
    Some(if name.starts_with(JOINED_FLAG_PREFIX) {
        CommandArgument::Assignment { name, value }
    } else {
        CommandArgument::Pair { name, value }
    })
}

fn encode_config(name: &str, value: &str) -> Option<ConfigOverride> {
    if name == CUSTOM_TAGS_COLUMN && value.starts_with(CUSTOM_TAGS_MARKER) {
        return Some(ConfigOverride {
            key: name.to_owned(),
            value: CUSTOM_TAGS_VALUE.to_owned(),
        });
    }
    if value == CONFIG_SENTINEL {
        return None;
    }
    Some(ConfigOverride {
        key: name.to_owned(),
        value: unescape(value),
    })
}

/// Replace `<comma>` and `<qq>` escape tokens
#[must_use]
pub fn unescape(value: &str) -> String {
    ESCAPES
        .iter()
        .fold(value.to_owned(), |acc, &(token, literal)| acc.replace(token, literal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encode(pairs: &[(&str, &str)]) -> CaseDescriptor {
        let row = ParameterRow::new(pairs.iter().copied()).unwrap();
        RowEncoder::new().encode(1, &row)
    }

    fn args(case: &CaseDescriptor) -> Vec<String> {
        case.arguments.iter().map(ToString::to_string).collect()
    }

    fn overrides(case: &CaseDescriptor) -> Vec<String> {
        case.overrides.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn classify_columns() {
        assert_eq!(ColumnRule::classify("_CNAME"), ColumnRule::Command);
        assert_eq!(ColumnRule::classify("_PLAN"), ColumnRule::Plan);
        assert_eq!(ColumnRule::classify("_INFRA"), ColumnRule::Infra);
        assert_eq!(ColumnRule::classify("--size"), ColumnRule::Flag);
        assert_eq!(ColumnRule::classify("-i"), ColumnRule::Config);
        assert_eq!(ColumnRule::classify("_OTHER"), ColumnRule::Config);
    }

    #[test]
    fn command_name_goes_first_wherever_it_sorts() {
        let case = encode(&[("--size", "medium"), ("_INFRA", "vsphere"), ("_CNAME", "tkg")]);
        assert_eq!(args(&case), vec!["tkg", "--size medium", "-i vsphere"]);
        assert_eq!(case.command_line(), "tkg --size medium -i vsphere");
    }

    #[test]
    fn enable_flags_are_joined() {
        let case = encode(&[("--enable-ceip", "true"), ("--size", "medium")]);
        assert_eq!(args(&case), vec!["--enable-ceip=true", "--size medium"]);
        assert_eq!(case.tokens(), vec!["--enable-ceip=true", "--size", "medium"]);
    }

    #[test]
    fn flag_names_are_lowercased() {
        let case = encode(&[("--Enable-Audit", "yes"), ("--VM-Size", "large")]);
        assert_eq!(args(&case), vec!["--enable-audit=yes", "--vm-size large"]);
    }

    #[test]
    fn not_provided_flag_is_skipped() {
        let case = encode(&[("_CNAME", "tkg"), ("--size", "NOTPROVIDED")]);
        assert_eq!(args(&case), vec!["tkg"]);
    }

    #[test]
    fn config_sentinel_and_escapes() {
        let case = encode(&[
            ("CLUSTER_CIDR", "NA"),
            ("NAMES", "foo<comma>bar"),
            ("QUOTED", "<qq>x<qq>"),
        ]);
        assert_eq!(overrides(&case), vec!["NAMES: foo,bar", "QUOTED: \"x\""]);
    }

    #[test]
    fn flag_values_are_not_unescaped() {
        let case = encode(&[("--names", "a<comma>b")]);
        assert_eq!(args(&case), vec!["--names a<comma>b"]);
    }

    #[test]
    fn custom_tags_workaround() {
        let case = encode(&[
            ("_CNAME", "tkg"),
            ("_PLAN", "dev"),
            ("AZURE_CUSTOM_TAGS", "tagKey1=x"),
        ]);
        assert_eq!(args(&case), vec!["tkg", "--plan dev"]);
        assert_eq!(
            overrides(&case),
            vec!["AZURE_CUSTOM_TAGS: tagKey1=tagValue1, tagKey2=tagValue2"]
        );
    }

    #[test]
    fn custom_tags_without_marker_is_plain_config() {
        let case = encode(&[("AZURE_CUSTOM_TAGS", "NA")]);
        assert!(case.overrides.is_empty());

        let case = encode(&[("AZURE_CUSTOM_TAGS", "env=dev")]);
        assert_eq!(overrides(&case), vec!["AZURE_CUSTOM_TAGS: env=dev"]);
    }

    #[test]
    fn overrides_follow_lexicographic_order() {
        let case = encode(&[("ZETA", "1"), ("ALPHA", "2"), ("MID", "3")]);
        assert_eq!(overrides(&case), vec!["ALPHA: 2", "MID: 3", "ZETA: 1"]);
    }

    #[test]
    fn identifier_uses_raw_values() {
        let escaped = encode(&[("NAMES", "a<comma>b")]);
        let literal = encode(&[("NAMES", "a,b")]);
        assert_ne!(escaped.id, literal.id);
        assert_eq!(escaped.overrides, literal.overrides);
    }

    #[test]
    fn unescape_replaces_every_occurrence() {
        assert_eq!(unescape("a<comma>b<comma>c"), "a,b,c");
        assert_eq!(unescape("plain"), "plain");
    }

    proptest::proptest! {
        #[test]
        fn sentinel_columns_never_emit(
            flags in proptest::collection::btree_set("--[a-z-]{1,10}", 0..5),
            configs in proptest::collection::btree_set("[A-Z][A-Z_]{0,10}", 0..5),
        ) {
            let mut pairs: Vec<(String, String)> = flags
                .into_iter()
                .map(|f| (f, FLAG_SENTINEL.to_owned()))
                .collect();
            pairs.extend(configs.into_iter().map(|c| (c, CONFIG_SENTINEL.to_owned())));
            pairs.push((COMMAND_COLUMN.to_owned(), "tkg".to_owned()));
            let row = ParameterRow::new(pairs).unwrap();
            let case = RowEncoder::new().encode(1, &row);
            proptest::prop_assert_eq!(case.command_line(), "tkg");
            proptest::prop_assert!(case.overrides.is_empty());
        }
    }
}
