use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter attached to a rule token. `None` means the token stands alone
/// (e.g. `nullable`), otherwise the parameter follows the token after a `:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleParam {
    None,
    Int(i64),
    Text(String),
}

impl RuleParam {
    pub fn text(value: impl Into<String>) -> Self {
        RuleParam::Text(value.into())
    }
}

impl fmt::Display for RuleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleParam::None => Ok(()),
            RuleParam::Int(value) => write!(f, "{value}"),
            RuleParam::Text(value) => write!(f, "{value}"),
        }
    }
}

/// Insertion-ordered mapping from rule name to parameter.
///
/// Keys are unique; inserting an existing key overwrites the parameter in
/// place so the token keeps its original serialization position. Order
/// matters for serialization only, not for rule semantics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleMap {
    entries: Vec<(String, RuleParam)>,
}

impl RuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, param: RuleParam) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = param;
        } else {
            self.entries.push((key, param));
        }
    }

    pub fn get(&self, key: &str) -> Option<&RuleParam> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, param)| param)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleParam)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a pipe-delimited rule string (`required|max:50`) into a map.
    /// Parameters that look like integers are kept as integers so that
    /// merges and corrections can compare them numerically.
    pub fn parse(rules: &str) -> Self {
        let mut map = RuleMap::new();
        for token in rules.split('|') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.split_once(':') {
                Some((key, param)) => {
                    let param = match param.parse::<i64>() {
                        Ok(value) => RuleParam::Int(value),
                        Err(_) => RuleParam::text(param),
                    };
                    map.insert(key, param);
                }
                None => map.insert(token, RuleParam::None),
            }
        }
        map
    }

    /// Serialize to the `token1|token2:param1,param2|token3` convention.
    pub fn to_rule_string(&self) -> String {
        let mut out = String::new();
        for (key, param) in &self.entries {
            if !out.is_empty() {
                out.push('|');
            }
            out.push_str(key);
            if !matches!(param, RuleParam::None) {
                out.push(':');
                out.push_str(&param.to_string());
            }
        }
        out
    }
}

impl FromIterator<(String, RuleParam)> for RuleMap {
    fn from_iter<I: IntoIterator<Item = (String, RuleParam)>>(iter: I) -> Self {
        let mut map = RuleMap::new();
        for (key, param) in iter {
            map.insert(key, param);
        }
        map
    }
}

/// Column name to serialized rule string, for one table.
pub type TableRules = BTreeMap<String, String>;

/// Table name to that table's rules, for the all-tables pass.
pub type DatabaseRules = BTreeMap<String, TableRules>;

/// Result shape of a generation call: a single column, one table, or the
/// whole database, mirroring how narrow the request was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rules {
    Column(String),
    Table(TableRules),
    Database(DatabaseRules),
}

impl Rules {
    /// Rewrite every serialized rule string in place.
    pub fn map_strings(self, f: impl Fn(&str) -> String) -> Self {
        match self {
            Rules::Column(rules) => Rules::Column(f(&rules)),
            Rules::Table(table) => Rules::Table(
                table
                    .into_iter()
                    .map(|(column, rules)| (column, f(&rules)))
                    .collect(),
            ),
            Rules::Database(database) => Rules::Database(
                database
                    .into_iter()
                    .map(|(table, rules)| {
                        let rewritten = rules
                            .into_iter()
                            .map(|(column, value)| (column, f(&value)))
                            .collect();
                        (table, rewritten)
                    })
                    .collect(),
            ),
        }
    }
}
