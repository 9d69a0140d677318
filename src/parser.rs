use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Parameter name to the 1-based positions it occupies, in order of appearance.
pub type ParameterMap = HashMap<String, Vec<usize>>;

/// Positional marker substituted for every named placeholder.
pub const MARKER: char = '?';

// Quoted strings are matched whole (an unterminated one runs to the end) so that the
// placeholder alternative can never match inside them.
const TOKEN_PATTERN: &str = concat!(
    r#"'[^']*'?|"[^"]*"?"#,
    r"|:(?P<name>[\p{L}\p{Nl}\p{Sc}\p{Pc}][\p{L}\p{Nl}\p{Sc}\p{Pc}\p{Nd}\p{Mn}\p{Mc}\p{Cf}]*)",
);

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("placeholder pattern is valid"))
}

/// A query rewritten from named placeholders to positional ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    sql: String,
    params: ParameterMap,
    count: usize,
}

impl ParsedQuery {
    /// The rewritten SQL, with `?` in place of each named placeholder.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &ParameterMap {
        &self.params
    }

    /// Positions bound by `name`, or `None` when the query does not use it.
    pub fn indices(&self, name: &str) -> Option<&[usize]> {
        self.params.get(name).map(Vec::as_slice)
    }

    /// Total number of placeholder occurrences.
    pub fn placeholder_count(&self) -> usize {
        self.count
    }

    pub fn into_parts(self) -> (String, ParameterMap) {
        (self.sql, self.params)
    }
}

/// Converts named placeholders (`:name`) to positional placeholders (`?`).
///
/// Text inside single or double quotes is copied untouched, and a `:` that is not followed
/// by an identifier character is kept as is. Every occurrence of a placeholder takes the
/// next position, so a name used twice maps to two positions.
///
/// # Examples
///
/// ```
/// use sqlx_named_statement::parser::parse;
///
/// let parsed = parse("SELECT ':skip' FROM users WHERE id = :id OR parent = :id");
/// assert_eq!(parsed.sql(), "SELECT ':skip' FROM users WHERE id = ? OR parent = ?");
/// assert_eq!(parsed.indices("id"), Some(&[1, 2][..]));
/// assert_eq!(parsed.indices("skip"), None);
/// ```
pub fn parse(query: &str) -> ParsedQuery {
    let (mut sql, last, params, count) = token_regex().captures_iter(query).fold(
        (String::with_capacity(query.len()), 0, ParameterMap::new(), 0),
        |(mut sql, last, mut params, count), caps: Captures<'_>| match caps.name("name") {
            None => (sql, last, params, count),
            Some(name) => {
                let index = count + 1;
                sql.push_str(&query[last..name.start() - 1]);
                sql.push(MARKER);
                params
                    .entry(name.as_str().to_owned())
                    .or_insert_with(Vec::new)
                    .push(index);
                (sql, name.end(), params, index)
            }
        },
    );
    sql.push_str(&query[last..]);
    log::trace!("parsed {} placeholder(s) into `{}`", count, sql);
    ParsedQuery { sql, params, count }
}
