//! Dependency-parsing collaborator
//!
//! Phrase counting only needs the (governor, relation, dependent) triples of
//! a parsed sentence. Any backend able to produce them can be plugged in
//! through [`DependencyParser`]; the bundled one drives an external program
//! that speaks CoNLL-U.

pub mod command;
pub mod conllu;

pub use command::CommandParser;
pub use conllu::{ConlluError, ConlluSentence, ConlluWord};

use crate::error::Result;

/// Text of the virtual root node's governor
pub const ROOT_TEXT: &str = "ROOT";

/// One dependency relation between two words of a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Text of the head word
    pub governor: String,
    /// Relation label, e.g. `amod`
    pub relation: String,
    /// Text of the dependent word
    pub dependent: String,
}

impl Dependency {
    /// Create a dependency triple
    pub fn new(
        governor: impl Into<String>,
        relation: impl Into<String>,
        dependent: impl Into<String>,
    ) -> Self {
        Self {
            governor: governor.into(),
            relation: relation.into(),
            dependent: dependent.into(),
        }
    }
}

/// Produces dependency relations for a sentence
pub trait DependencyParser: Send + Sync {
    /// Parse one lowercased sentence
    fn parse(&self, sentence: &str) -> Result<Vec<Dependency>>;
}

impl<P: DependencyParser + ?Sized> DependencyParser for Box<P> {
    fn parse(&self, sentence: &str) -> Result<Vec<Dependency>> {
        (**self).parse(sentence)
    }
}

/// Phrases `"<governor> <dependent>"` for every relation labelled exactly `relation`
pub fn adjectival_pairs<'d>(
    dependencies: &'d [Dependency],
    relation: &'d str,
) -> impl Iterator<Item = String> + 'd {
    dependencies
        .iter()
        .filter(move |dep| dep.relation == relation)
        .map(|dep| format!("{} {}", dep.governor, dep.dependent))
}
