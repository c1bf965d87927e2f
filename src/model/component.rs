use std::fmt;

use serde::{Deserialize, Serialize};

/// Component families a finder option may reference.
///
/// Only `Grid`, `XAxis`, `YAxis` and `Geo` produce brush targets; the
/// remaining families are resolvable but carry no coordinate system here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentFamily {
    Grid,
    XAxis,
    YAxis,
    Geo,
    Graph,
    Polar,
    RadiusAxis,
    AngleAxis,
    Bmap,
}

impl ComponentFamily {
    pub const ALL: [Self; 9] = [
        Self::Grid,
        Self::XAxis,
        Self::YAxis,
        Self::Geo,
        Self::Graph,
        Self::Polar,
        Self::RadiusAxis,
        Self::AngleAxis,
        Self::Bmap,
    ];

    /// Option key prefix, e.g. `xAxis` in `xAxisIndex`.
    #[must_use]
    pub const fn main_type(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::XAxis => "xAxis",
            Self::YAxis => "yAxis",
            Self::Geo => "geo",
            Self::Graph => "graph",
            Self::Polar => "polar",
            Self::RadiusAxis => "radiusAxis",
            Self::AngleAxis => "angleAxis",
            Self::Bmap => "bmap",
        }
    }

    #[must_use]
    pub fn from_main_type(main_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.main_type() == main_type)
    }
}

impl fmt::Display for ComponentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.main_type())
    }
}

/// Identity of one component: its family plus index within that family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentKey {
    pub family: ComponentFamily,
    pub index: usize,
}

impl ComponentKey {
    #[must_use]
    pub const fn new(family: ComponentFamily, index: usize) -> Self {
        Self { family, index }
    }
}

/// Addressing data shared by every component: index, id and optional name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMeta {
    pub index: usize,
    pub id: String,
    pub name: Option<String>,
}

/// A registered component: addressing data plus the family-specific model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component<T> {
    pub meta: ComponentMeta,
    pub model: T,
}

/// Optional id/name given when registering a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentOption {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ComponentOption {
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
