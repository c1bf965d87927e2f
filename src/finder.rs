//! Declarative component references (`xAxisIndex`, `gridId`, `geoName`, ...)
//! and their resolution against a [`GlobalModel`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use tracing::debug;

use crate::model::{ComponentFamily, ComponentMeta, GlobalModel};

pub type ComponentIndices = SmallVec<[usize; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexQuery {
    All,
    Indices(ComponentIndices),
}

/// How one family is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentQuery {
    Index(IndexQuery),
    Id(Vec<String>),
    Name(Vec<String>),
}

impl ComponentQuery {
    fn matches(&self, meta: &ComponentMeta) -> bool {
        match self {
            Self::Index(IndexQuery::All) => true,
            Self::Index(IndexQuery::Indices(indices)) => indices.contains(&meta.index),
            Self::Id(ids) => ids.iter().any(|id| *id == meta.id),
            Self::Name(names) => meta
                .name
                .as_ref()
                .is_some_and(|name| names.iter().any(|candidate| candidate == name)),
        }
    }
}

/// Ordered set of component references, at most one query per family.
///
/// Loaded from JSON objects whose keys are `<mainType>Index`, `<mainType>Id`
/// or `<mainType>Name`. Keys outside the brushable families, `null` values
/// and `"none"` indices are dropped. A later key for the same family replaces
/// an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct FinderOption {
    queries: IndexMap<ComponentFamily, ComponentQuery>,
}

impl FinderOption {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    #[must_use]
    pub fn query(&self, family: ComponentFamily) -> Option<&ComponentQuery> {
        self.queries.get(&family)
    }

    pub fn queries(&self) -> impl Iterator<Item = (ComponentFamily, &ComponentQuery)> {
        self.queries.iter().map(|(family, query)| (*family, query))
    }

    #[must_use]
    pub fn with_query(mut self, family: ComponentFamily, query: ComponentQuery) -> Self {
        self.queries.insert(family, query);
        self
    }

    #[must_use]
    pub fn with_index(self, family: ComponentFamily, index: usize) -> Self {
        self.with_indices(family, [index])
    }

    #[must_use]
    pub fn with_indices(
        self,
        family: ComponentFamily,
        indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.with_query(
            family,
            ComponentQuery::Index(IndexQuery::Indices(indices.into_iter().collect())),
        )
    }

    #[must_use]
    pub fn with_all(self, family: ComponentFamily) -> Self {
        self.with_query(family, ComponentQuery::Index(IndexQuery::All))
    }

    #[must_use]
    pub fn with_id(self, family: ComponentFamily, id: impl Into<String>) -> Self {
        self.with_query(family, ComponentQuery::Id(vec![id.into()]))
    }

    #[must_use]
    pub fn with_name(self, family: ComponentFamily, name: impl Into<String>) -> Self {
        self.with_query(family, ComponentQuery::Name(vec![name.into()]))
    }

    /// Parses finder keys out of an arbitrary JSON object, ignoring
    /// everything else in it.
    #[must_use]
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        let mut option = Self::new();
        for (key, value) in map {
            let Some((family, kind)) = split_finder_key(key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            let query = match kind {
                QueryKind::Index => match parse_index_query(value) {
                    Some(query) => ComponentQuery::Index(query),
                    None => continue,
                },
                QueryKind::Id => ComponentQuery::Id(parse_string_list(key, value)),
                QueryKind::Name => ComponentQuery::Name(parse_string_list(key, value)),
            };
            option.queries.insert(family, query);
        }
        option
    }
}

impl From<Map<String, Value>> for FinderOption {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_json_map(&map)
    }
}

impl From<FinderOption> for Map<String, Value> {
    fn from(option: FinderOption) -> Self {
        let mut map = Map::new();
        for (family, query) in option.queries {
            let main_type = family.main_type();
            let (suffix, value) = match query {
                ComponentQuery::Index(IndexQuery::All) => ("Index", Value::from("all")),
                ComponentQuery::Index(IndexQuery::Indices(indices)) => {
                    ("Index", Value::from(indices.into_vec()))
                }
                ComponentQuery::Id(ids) => ("Id", Value::from(ids)),
                ComponentQuery::Name(names) => ("Name", Value::from(names)),
            };
            map.insert(format!("{main_type}{suffix}"), value);
        }
        map
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryKind {
    Index,
    Id,
    Name,
}

fn split_finder_key(key: &str) -> Option<(ComponentFamily, QueryKind)> {
    let (main_type, kind) = if let Some(main_type) = key.strip_suffix("Index") {
        (main_type, QueryKind::Index)
    } else if let Some(main_type) = key.strip_suffix("Id") {
        (main_type, QueryKind::Id)
    } else if let Some(main_type) = key.strip_suffix("Name") {
        (main_type, QueryKind::Name)
    } else {
        return None;
    };
    ComponentFamily::from_main_type(main_type).map(|family| (family, kind))
}

/// `None` means the key is dropped (`"none"`).
fn parse_index_query(value: &Value) -> Option<IndexQuery> {
    match value {
        Value::String(keyword) if keyword == "all" => Some(IndexQuery::All),
        Value::String(keyword) if keyword == "none" => None,
        Value::Array(items) => Some(IndexQuery::Indices(
            items.iter().filter_map(as_component_index).collect(),
        )),
        other => match as_component_index(other) {
            Some(index) => Some(IndexQuery::Indices(SmallVec::from_slice(&[index]))),
            None => {
                debug!(value = %other, "finder index matches nothing");
                Some(IndexQuery::Indices(SmallVec::new()))
            }
        },
    }
}

fn as_component_index(value: &Value) -> Option<usize> {
    let number = value.as_f64()?;
    if number >= 0.0 && number.fract() == 0.0 && number <= usize::MAX as f64 {
        Some(number as usize)
    } else {
        None
    }
}

fn parse_string_list(key: &str, value: &Value) -> Vec<String> {
    let as_string = |item: &Value| match item {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    };
    match value {
        Value::Array(items) => items.iter().filter_map(as_string).collect(),
        other => {
            let parsed: Vec<String> = as_string(other).into_iter().collect();
            if parsed.is_empty() {
                debug!(key, "finder reference matches nothing");
            }
            parsed
        }
    }
}

/// Result of resolving a [`FinderOption`]: component indices per
/// referenced family. Explicit index lists resolve in the order given;
/// `"all"`, id and name queries resolve in component order.
///
/// A referenced family whose query matched nothing is present with an empty
/// list; unreferenced families are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundComponents {
    found: IndexMap<ComponentFamily, ComponentIndices>,
}

impl FoundComponents {
    #[must_use]
    pub fn resolve(model: &GlobalModel, option: &FinderOption) -> Self {
        let mut found = IndexMap::new();
        for (family, query) in option.queries() {
            let metas = model.metas(family);
            let indices: ComponentIndices = match query {
                // Explicit index lists keep the order they were written in.
                ComponentQuery::Index(IndexQuery::Indices(requested)) => requested
                    .iter()
                    .filter_map(|index| metas.get(*index).map(|meta| meta.index))
                    .collect(),
                _ => metas
                    .into_iter()
                    .filter(|meta| query.matches(meta))
                    .map(|meta| meta.index)
                    .collect(),
            };
            found.insert(family, indices);
        }
        Self { found }
    }

    /// Every resolved component of `family`; `None` when not referenced.
    #[must_use]
    pub fn models(&self, family: ComponentFamily) -> Option<&[usize]> {
        self.found.get(&family).map(|indices| indices.as_slice())
    }

    /// The first resolved component of `family`.
    #[must_use]
    pub fn model(&self, family: ComponentFamily) -> Option<usize> {
        self.models(family)
            .and_then(|indices| indices.first().copied())
    }

    /// `true` when `family` was referenced and `index` was resolved for it.
    #[must_use]
    pub fn contains(&self, family: ComponentFamily, index: usize) -> bool {
        self.models(family)
            .is_some_and(|indices| indices.contains(&index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.found.values().all(|indices| indices.is_empty())
    }
}
