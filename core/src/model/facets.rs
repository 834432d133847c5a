//! Source-set-dependent facets shared by every declaration.

use super::source_set::{SourceSetDependent, SourceSetId};
use docmodel_types::SymbolRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    Private,
    /// Java package-private.
    Package,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
            Visibility::Package => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Final,
    Open,
    Abstract,
    Sealed,
}

/// Raw documentation text. Conversion to rendered content happens later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Documentation(pub Arc<str>);

impl Documentation {
    pub fn new(text: &str) -> Self {
        Self(Arc::from(text))
    }

    /// First paragraph of the text.
    pub fn summary(&self) -> &str {
        self.0.split("\n\n").next().unwrap_or("").trim()
    }
}

/// An annotation applied to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationUse {
    pub reference: SymbolRef,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

/// Fields every declaration carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclInfo {
    pub name: Arc<str>,
    pub symbol: SymbolRef,
    #[serde(default)]
    pub source_sets: BTreeSet<SourceSetId>,
    #[serde(default)]
    pub visibility: SourceSetDependent<Visibility>,
    #[serde(default)]
    pub modality: SourceSetDependent<Modality>,
    #[serde(default)]
    pub documentation: SourceSetDependent<Documentation>,
    #[serde(default)]
    pub annotations: SourceSetDependent<Vec<AnnotationUse>>,
    /// Source set holding the `expect` declaration, if this is an actual.
    #[serde(default)]
    pub expect_presence: Option<SourceSetId>,
}

impl DeclInfo {
    pub fn new(name: &str, symbol: SymbolRef) -> Self {
        Self {
            name: Arc::from(name),
            symbol,
            source_sets: BTreeSet::new(),
            visibility: BTreeMap::new(),
            modality: BTreeMap::new(),
            documentation: BTreeMap::new(),
            annotations: BTreeMap::new(),
            expect_presence: None,
        }
    }

    /// Record presence in a source set, public by default.
    pub fn in_source_set(mut self, id: &SourceSetId) -> Self {
        self.source_sets.insert(id.clone());
        self.visibility.entry(id.clone()).or_insert(Visibility::Public);
        self
    }

    pub fn with_visibility(mut self, id: &SourceSetId, visibility: Visibility) -> Self {
        self.source_sets.insert(id.clone());
        self.visibility.insert(id.clone(), visibility);
        self
    }

    pub fn with_modality(mut self, id: &SourceSetId, modality: Modality) -> Self {
        self.modality.insert(id.clone(), modality);
        self
    }

    pub fn with_doc(mut self, id: &SourceSetId, text: &str) -> Self {
        self.documentation.insert(id.clone(), Documentation::new(text));
        self
    }

    pub fn with_annotation(mut self, id: &SourceSetId, annotation: AnnotationUse) -> Self {
        self.annotations.entry(id.clone()).or_default().push(annotation);
        self
    }

    /// Visibility in any source set, preferring the most visible one.
    pub fn effective_visibility(&self) -> Option<Visibility> {
        const ORDER: [Visibility; 5] = [
            Visibility::Public,
            Visibility::Protected,
            Visibility::Internal,
            Visibility::Package,
            Visibility::Private,
        ];
        ORDER
            .into_iter()
            .find(|v| self.visibility.values().any(|seen| seen == v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_visibility_prefers_widest() {
        let jvm = SourceSetId::new("jvmMain");
        let js = SourceSetId::new("jsMain");
        let info = DeclInfo::new("f", SymbolRef::package("p"))
            .with_visibility(&jvm, Visibility::Internal)
            .with_visibility(&js, Visibility::Public);
        assert_eq!(info.effective_visibility(), Some(Visibility::Public));
        assert_eq!(info.source_sets.len(), 2);
    }

    #[test]
    fn test_doc_summary() {
        let doc = Documentation::new("Adds two numbers.\n\nLonger text.");
        assert_eq!(doc.summary(), "Adds two numbers.");
    }
}
