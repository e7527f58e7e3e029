//! Query abstract syntax tree.
//!
//! Represents parsed queries before compilation to search engine queries.

use std::fmt;

/// Whether a clause must, may, or must not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// The clause contributes to the score but is not required.
    #[default]
    Optional,
    /// Documents must match the clause (`+term`).
    Required,
    /// Documents must not match the clause (`-term`).
    Prohibited,
}

/// The wildcard shape of a clause term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    /// No `*` in the term.
    None,
    /// A single trailing `*`: a prefix match.
    Trailing,
    /// `*` anywhere else: a general pattern match.
    Pattern,
}

/// A single query clause: one term plus its modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// The term text as typed, `*` wildcards included.
    pub term: String,
    /// Field restriction (e.g. `title`), or `None` for all fields.
    pub field: Option<String>,
    /// Presence requirement.
    pub presence: Presence,
    /// Maximum edit distance for fuzzy matching (0 = exact).
    pub edit_distance: u8,
    /// Score multiplier for this clause.
    pub boost: Option<f32>,
}

impl Clause {
    /// Creates an optional, unboosted, exact clause over all fields.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            field: None,
            presence: Presence::Optional,
            edit_distance: 0,
            boost: None,
        }
    }

    /// Classifies the wildcard usage in this clause's term.
    pub fn wildcard(&self) -> Wildcard {
        match self.term.find('*') {
            None => Wildcard::None,
            Some(pos) if pos == self.term.len() - 1 && pos > 0 => Wildcard::Trailing,
            Some(_) => Wildcard::Pattern,
        }
    }

    /// Formats the clause back into query syntax.
    fn to_query_string(&self) -> String {
        let mut out = String::new();
        match self.presence {
            Presence::Optional => {}
            Presence::Required => out.push('+'),
            Presence::Prohibited => out.push('-'),
        }
        if let Some(field) = &self.field {
            out.push_str(field);
            out.push(':');
        }
        out.push_str(&self.term);
        if self.edit_distance > 0 {
            out.push_str(&format!("~{}", self.edit_distance));
        }
        if let Some(boost) = self.boost {
            out.push_str(&format!("^{boost}"));
        }
        out
    }
}

/// A parsed query: an ordered list of clauses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Clauses in the order they appeared.
    pub clauses: Vec<Clause>,
}

impl Query {
    /// Returns true if the query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Formats the query back into query syntax.
    pub fn to_query_string(&self) -> String {
        self.clauses
            .iter()
            .map(Clause::to_query_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            let field = clause.field.as_deref().unwrap_or("*");
            write!(f, "{:?} {field}:{:?}", clause.presence, clause.term)?;
            match clause.wildcard() {
                Wildcard::None => {}
                Wildcard::Trailing => write!(f, " prefix")?,
                Wildcard::Pattern => write!(f, " pattern")?,
            }
            if clause.edit_distance > 0 {
                write!(f, " fuzzy({})", clause.edit_distance)?;
            }
            if let Some(boost) = clause.boost {
                write!(f, " boost({boost})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
