//! Industry, ISIC and HS code trees: flattening, searching and the
//! per-locale read-only cache the pickers and the orchestrator share.

use std::{collections::HashMap, fmt, sync::Arc};

use insight_contracts::{ApiError, SearchApi};
use insight_model::{Locale, TaxonomyKind, TaxonomyNode};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::text::normalize;

#[derive(Debug, Clone, Error)]
pub enum TaxonomyError {
    #[error("failed to fetch {kind} taxonomy")]
    Fetch {
        kind: TaxonomyKind,
        #[source]
        source: ApiError,
    },
}

impl TaxonomyError {
    pub fn kind(&self) -> TaxonomyKind {
        match self {
            TaxonomyError::Fetch { kind, .. } => *kind,
        }
    }
}

/// Depth-first, source-ordered list of the leaves under `tree`.
pub fn flatten(tree: &[TaxonomyNode]) -> Vec<TaxonomyNode> {
    fn collect(nodes: &[TaxonomyNode], out: &mut Vec<TaxonomyNode>) {
        for node in nodes {
            if node.is_leaf() {
                out.push(node.clone());
            } else {
                collect(&node.children, out);
            }
        }
    }

    let mut leaves = Vec::new();
    collect(tree, &mut leaves);
    leaves
}

/// Split HS leaves into those under `isic_code` and the rest, keeping order
/// within each bucket. Without an ISIC code everything is "other".
pub fn partition_by_parent<'a, I>(
    leaves: I,
    isic_code: Option<&str>,
) -> (Vec<&'a TaxonomyNode>, Vec<&'a TaxonomyNode>)
where
    I: IntoIterator<Item = &'a TaxonomyNode>,
{
    leaves.into_iter().partition(|leaf| {
        isic_code.is_some_and(|isic| leaf.parent_code.as_deref() == Some(isic))
    })
}

#[derive(Debug, Clone)]
struct IndexedLeaf {
    node: TaxonomyNode,
    code: String,
    primary: String,
    secondary: String,
}

impl IndexedLeaf {
    fn matches(&self, query: &str) -> bool {
        self.code.contains(query) || self.primary.contains(query) || self.secondary.contains(query)
    }
}

/// Leaves with their code and both names pre-normalized, so each keystroke
/// costs one normalization of the query rather than one per leaf.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyIndex {
    entries: Vec<IndexedLeaf>,
}

impl TaxonomyIndex {
    pub fn build(leaves: Vec<TaxonomyNode>) -> Self {
        let entries = leaves
            .into_iter()
            .map(|node| IndexedLeaf {
                code: normalize(&node.code),
                primary: normalize(&node.names.primary),
                secondary: normalize(&node.names.secondary),
                node,
            })
            .collect();
        Self { entries }
    }

    /// Index the leaves of a full tree.
    pub fn from_tree(tree: &[TaxonomyNode]) -> Self {
        Self::build(flatten(tree))
    }

    /// Leaves whose code or either name contains the normalized query. An
    /// empty query returns every leaf in order.
    pub fn search(&self, query: &str) -> Vec<&TaxonomyNode> {
        let query = normalize(query);
        self.entries
            .iter()
            .filter(|entry| query.is_empty() || entry.matches(&query))
            .map(|entry| &entry.node)
            .collect()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &TaxonomyNode> {
        self.entries.iter().map(|entry| &entry.node)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&TaxonomyNode> {
        self.leaves().find(|leaf| leaf.code == code)
    }

    pub fn find_by_key(&self, key: u64) -> Option<&TaxonomyNode> {
        self.leaves().find(|leaf| leaf.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three taxonomies for one locale.
#[derive(Debug, Clone)]
pub struct TaxonomySet {
    pub locale: Locale,
    industries: Arc<TaxonomyIndex>,
    isic_codes: Arc<TaxonomyIndex>,
    hs_codes: Arc<TaxonomyIndex>,
    errors: Vec<TaxonomyError>,
}

impl TaxonomySet {
    pub fn index(&self, kind: TaxonomyKind) -> &Arc<TaxonomyIndex> {
        match kind {
            TaxonomyKind::Industry => &self.industries,
            TaxonomyKind::IsicCode => &self.isic_codes,
            TaxonomyKind::HsCode => &self.hs_codes,
        }
    }

    /// Fetch failures that degraded a kind to an empty index.
    pub fn errors(&self) -> &[TaxonomyError] {
        &self.errors
    }

    /// The HS leaf `hs_code` exists and sits under `isic_code`.
    pub fn contains_hs_under(&self, hs_code: &str, isic_code: &str) -> bool {
        self.hs_codes
            .find_by_code(hs_code)
            .is_some_and(|leaf| leaf.parent_code.as_deref() == Some(isic_code))
    }
}

/// Session-wide taxonomy cache. Each locale is fetched once by
/// [`TaxonomyCache::initialize`] and never mutated afterwards.
pub struct TaxonomyCache {
    api: Arc<dyn SearchApi>,
    loaded: RwLock<HashMap<Locale, Arc<TaxonomySet>>>,
    latest: RwLock<Option<Arc<TaxonomySet>>>,
}

impl fmt::Debug for TaxonomyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaxonomyCache")
            .field("locales", &self.loaded.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TaxonomyCache {
    pub fn new(api: Arc<dyn SearchApi>) -> Self {
        Self {
            api,
            loaded: RwLock::new(HashMap::new()),
            latest: RwLock::new(None),
        }
    }

    /// Fetch and index all three trees for `locale`, or return the set
    /// already loaded for it. A failing kind degrades to an empty index and
    /// never blocks the others.
    pub async fn initialize(&self, locale: Locale) -> Arc<TaxonomySet> {
        if let Some(existing) = self.get(locale) {
            *self.latest.write() = Some(Arc::clone(&existing));
            return existing;
        }

        let (industries, isic_codes, hs_codes) = tokio::join!(
            self.load(TaxonomyKind::Industry, locale),
            self.load(TaxonomyKind::IsicCode, locale),
            self.load(TaxonomyKind::HsCode, locale),
        );

        let mut errors = Vec::new();
        let mut index = |loaded: Result<TaxonomyIndex, TaxonomyError>| match loaded {
            Ok(index) => Arc::new(index),
            Err(err) => {
                errors.push(err);
                Arc::new(TaxonomyIndex::default())
            }
        };
        let industries = index(industries);
        let isic_codes = index(isic_codes);
        let hs_codes = index(hs_codes);

        let set = Arc::new(TaxonomySet {
            locale,
            industries,
            isic_codes,
            hs_codes,
            errors,
        });

        info!(
            %locale,
            industries = set.industries.len(),
            isic_codes = set.isic_codes.len(),
            hs_codes = set.hs_codes.len(),
            failed = set.errors.len(),
            "taxonomies loaded"
        );

        self.loaded.write().insert(locale, Arc::clone(&set));
        *self.latest.write() = Some(Arc::clone(&set));
        set
    }

    async fn load(
        &self,
        kind: TaxonomyKind,
        locale: Locale,
    ) -> Result<TaxonomyIndex, TaxonomyError> {
        match self.api.fetch_taxonomy(kind, locale).await {
            Ok(tree) => {
                let index = TaxonomyIndex::from_tree(&tree);
                debug!(%kind, %locale, leaves = index.len(), "taxonomy indexed");
                Ok(index)
            }
            Err(source) => {
                warn!(%kind, %locale, error = %source, "taxonomy fetch failed; picker will be empty");
                Err(TaxonomyError::Fetch { kind, source })
            }
        }
    }

    pub fn get(&self, locale: Locale) -> Option<Arc<TaxonomySet>> {
        self.loaded.read().get(&locale).cloned()
    }

    /// The set from the most recent [`TaxonomyCache::initialize`].
    pub fn latest(&self) -> Option<Arc<TaxonomySet>> {
        self.latest.read().clone()
    }

    /// Whether the most recently loaded HS tree places `hs_code` under
    /// `isic_code`. False when nothing is loaded.
    pub fn contains_hs_under(&self, hs_code: &str, isic_code: &str) -> bool {
        self.latest()
            .is_some_and(|set| set.contains_hs_under(hs_code, isic_code))
    }
}
