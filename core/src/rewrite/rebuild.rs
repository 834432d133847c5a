//! Copy-on-write rebuilding of a single node.

use crate::model::SourceSetDependent;
use docmodel_types::Folded;
use std::sync::Arc;

/// Accumulates replaced fields of one node.
///
/// The node is cloned once, when the first field is replaced. Every
/// replacement then moves into that copy through the node's own `with_*`
/// rebuild operation. When nothing was replaced, `finish` hands back the
/// original `Arc`.
pub(crate) struct Rebuild<'a, N> {
    original: &'a Arc<N>,
    rebuilt: Option<N>,
}

impl<'a, N: Clone> Rebuild<'a, N> {
    pub(crate) fn new(original: &'a Arc<N>) -> Self {
        Self {
            original,
            rebuilt: None,
        }
    }

    pub(crate) fn set<T>(mut self, replacement: Option<T>, with: impl FnOnce(N, T) -> N) -> Self {
        if let Some(value) = replacement {
            let node = match self.rebuilt.take() {
                Some(node) => node,
                None => N::clone(self.original),
            };
            self.rebuilt = Some(with(node, value));
        }
        self
    }

    pub(crate) fn finish(self) -> Folded<Arc<N>> {
        match self.rebuilt {
            None => Folded::unchanged(self.original.clone()),
            Some(node) => Folded::changed(Arc::new(node)),
        }
    }
}

/// Fold an optional child. `None` means unchanged.
pub(crate) fn fold_opt<T: Clone, E>(
    item: &Option<T>,
    f: impl FnOnce(&T) -> Result<Folded<T>, E>,
) -> Result<Option<Option<T>>, E> {
    match item {
        None => Ok(None),
        Some(value) => Ok(f(value)?.into_changed().map(Some)),
    }
}

/// Fold every value of a per-source-set map. `None` means unchanged.
pub(crate) fn fold_dependent<T: Clone, E>(
    map: &SourceSetDependent<T>,
    mut f: impl FnMut(&T) -> Result<Folded<T>, E>,
) -> Result<Option<SourceSetDependent<T>>, E> {
    let mut rebuilt: Option<SourceSetDependent<T>> = None;
    for (id, value) in map {
        let folded = f(value)?;
        if folded.changed {
            rebuilt
                .get_or_insert_with(|| map.clone())
                .insert(id.clone(), folded.value);
        }
    }
    Ok(rebuilt)
}
