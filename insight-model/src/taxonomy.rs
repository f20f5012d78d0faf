use std::fmt;

use crate::ParamValue;

/// The three classification trees the search page can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaxonomyKind {
    Industry,
    IsicCode,
    HsCode,
}

impl TaxonomyKind {
    pub fn all() -> &'static [TaxonomyKind] {
        &[
            TaxonomyKind::Industry,
            TaxonomyKind::IsicCode,
            TaxonomyKind::HsCode,
        ]
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaxonomyKind::Industry => "industry",
            TaxonomyKind::IsicCode => "isic_code",
            TaxonomyKind::HsCode => "hs_code",
        };
        f.write_str(name)
    }
}

/// Display locale used when fetching taxonomy trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl ParamValue for Locale {
    fn all() -> &'static [Self] {
        &[Locale::En, Locale::Ar]
    }

    fn as_param(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaxonomyNames {
    pub primary: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondary: String,
}

/// One node of an industry / ISIC / HS tree. Only leaves are selectable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaxonomyNode {
    pub key: u64,
    pub code: String,
    pub names: TaxonomyNames,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<TaxonomyNode>,
    /// For HS codes, the ISIC code this node is scoped under.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub parent_code: Option<String>,
}

impl TaxonomyNode {
    pub fn leaf(key: u64, code: impl Into<String>, primary: impl Into<String>) -> Self {
        Self {
            key,
            code: code.into(),
            names: TaxonomyNames {
                primary: primary.into(),
                secondary: String::new(),
            },
            children: Vec::new(),
            parent_code: None,
        }
    }

    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.names.secondary = secondary.into();
        self
    }

    pub fn with_parent(mut self, parent_code: impl Into<String>) -> Self {
        self.parent_code = Some(parent_code.into());
        self
    }

    pub fn with_children(mut self, children: Vec<TaxonomyNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Name to show for `locale`; the secondary name is the Arabic one and
    /// falls back to the primary name when missing.
    pub fn display_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar if !self.names.secondary.is_empty() => &self.names.secondary,
            _ => &self.names.primary,
        }
    }
}
