//! Uniqueness-exception injection for edit forms.
//!
//! When validating an existing record, every `unique` rule must exclude
//! that record's own row from the uniqueness check. The rewrite operates on
//! the serialized rule string so caller-supplied strings survive untouched
//! apart from the spliced-in id.

/// Identifier of the record being edited, plus the column it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeId {
    pub id: String,
    pub id_column: String,
}

impl ExcludeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            id_column: "id".to_string(),
        }
    }

    #[must_use]
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }
}

/// Rewrite a rule string so its `unique` rule skips the given record.
///
/// If `unique` is the last rule the id and id-column are appended; if a
/// later delimiter exists they are spliced in immediately before it,
/// leaving every following token unchanged. Without a `unique` rule the
/// string is returned as-is.
pub fn inject_exclude_id(rules: &str, exclude: &ExcludeId) -> String {
    let Some(start) = find_unique_token(rules) else {
        return rules.to_string();
    };
    let suffix = format!(",{},{}", exclude.id, exclude.id_column);
    match rules[start..].find('|') {
        None => format!("{rules}{suffix}"),
        Some(relative) => {
            let pipe = start + relative;
            format!("{}{suffix}{}", &rules[..pipe], &rules[pipe..])
        }
    }
}

/// Byte offset of the `unique` rule's token, matched at a token boundary so
/// rule names that merely contain "unique" are never rewritten.
fn find_unique_token(rules: &str) -> Option<usize> {
    let mut offset = 0;
    for token in rules.split('|') {
        let name = token.split_once(':').map_or(token, |(name, _)| name);
        if name == "unique" {
            return Some(offset);
        }
        offset += token.len() + 1;
    }
    None
}
