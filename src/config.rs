use serde::{Deserialize, Serialize};

use crate::brush::TargetFamily;
use crate::error::{BrushError, BrushResult};

/// Construction settings of a [`crate::brush::BrushTargetManager`].
///
/// Serializable so hosts can keep it next to their brush options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetManagerSettings {
    /// Families to build panels for; `None` builds every family. Build order
    /// stays fixed regardless of the order listed here.
    #[serde(default)]
    pub include: Option<Vec<TargetFamily>>,
}

impl TargetManagerSettings {
    #[must_use]
    pub fn including(families: impl IntoIterator<Item = TargetFamily>) -> Self {
        Self {
            include: Some(families.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn includes(&self, family: TargetFamily) -> bool {
        self.include
            .as_ref()
            .is_none_or(|families| families.contains(&family))
    }

    /// Enabled families in build order.
    pub fn enabled_families(&self) -> impl Iterator<Item = TargetFamily> + '_ {
        TargetFamily::ORDER
            .into_iter()
            .filter(|family| self.includes(*family))
    }

    pub fn validate(self) -> BrushResult<Self> {
        if let Some(families) = &self.include {
            for (position, family) in families.iter().enumerate() {
                if families[..position].contains(family) {
                    return Err(BrushError::InvalidData(format!(
                        "target family `{}` is listed more than once",
                        family.panel_prefix()
                    )));
                }
            }
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> BrushResult<Self> {
        let settings: Self = serde_json::from_str(input).map_err(|e| {
            BrushError::InvalidData(format!("failed to parse target manager settings: {e}"))
        })?;
        settings.validate()
    }
}
