//! Stage identifiers, store keys and the stage descriptor chain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A key under which a producing stage persists its last successful output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoreKey {
    /// Output of the goal parser.
    #[serde(rename = "FR01_OUT")]
    Fr01Out,
    /// Output of the task decomposer.
    #[serde(rename = "FR02_OUT")]
    Fr02Out,
    /// Output of the sprint planner.
    #[serde(rename = "FR03_OUT")]
    Fr03Out,
}

impl StoreKey {
    /// All store keys in chain order.
    pub const ALL: [Self; 3] = [Self::Fr01Out, Self::Fr02Out, Self::Fr03Out];

    /// Returns the persisted identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fr01Out => "FR01_OUT",
            Self::Fr02Out => "FR02_OUT",
            Self::Fr03Out => "FR03_OUT",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown store key: {s}"))
    }
}

/// One stage of the FR01..FR05 chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StageId {
    /// Parse a free-text goal.
    Fr01,
    /// Decompose the parsed goal into tasks.
    Fr02,
    /// Pack tasks into sprints.
    Fr03,
    /// Suggest changes to a task of the plan.
    Fr04,
    /// Predict task success from a flat feature form.
    Fr05,
}

/// The precondition a stage checks before issuing any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    /// The upstream key that must be present.
    pub key: StoreKey,
    /// Message shown when it is absent.
    pub message: &'static str,
}

/// Static description of a stage: where it posts, what it needs, what it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    /// The stage.
    pub id: StageId,
    /// Endpoint path relative to the API base.
    pub endpoint: &'static str,
    /// Upstream requirement, if any.
    pub requires: Option<Gate>,
    /// Key the successful output is persisted under, if any.
    pub writes: Option<StoreKey>,
}

static CHAIN: [StageDescriptor; 5] = [
    StageDescriptor {
        id: StageId::Fr01,
        endpoint: "/fr01/parse",
        requires: None,
        writes: Some(StoreKey::Fr01Out),
    },
    StageDescriptor {
        id: StageId::Fr02,
        endpoint: "/fr02/decompose",
        requires: Some(Gate {
            key: StoreKey::Fr01Out,
            message: "No FR01 output found. Run FR01 first.",
        }),
        writes: Some(StoreKey::Fr02Out),
    },
    StageDescriptor {
        id: StageId::Fr03,
        endpoint: "/fr03/plan",
        requires: Some(Gate {
            key: StoreKey::Fr02Out,
            message: "No FR02 output found. Run FR02 first.",
        }),
        writes: Some(StoreKey::Fr03Out),
    },
    StageDescriptor {
        id: StageId::Fr04,
        endpoint: "/fr04/suggest",
        requires: Some(Gate {
            key: StoreKey::Fr03Out,
            message: "No FR03 plan found. Run FR03 first.",
        }),
        writes: None,
    },
    StageDescriptor {
        id: StageId::Fr05,
        endpoint: "/fr05/predict",
        requires: None,
        writes: None,
    },
];

impl StageId {
    /// All stages in chain order.
    pub const ALL: [Self; 5] = [Self::Fr01, Self::Fr02, Self::Fr03, Self::Fr04, Self::Fr05];

    /// Returns the static descriptor for this stage.
    #[must_use]
    pub fn descriptor(self) -> &'static StageDescriptor {
        &CHAIN[self as usize]
    }

    /// Returns the endpoint path.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        self.descriptor().endpoint
    }

    /// Returns the stage label, e.g. `FR03`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fr01 => "FR01",
            Self::Fr02 => "FR02",
            Self::Fr03 => "FR03",
            Self::Fr04 => "FR04",
            Self::Fr05 => "FR05",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_is_in_chain_order() {
        for id in StageId::ALL {
            assert_eq!(id.descriptor().id, id);
        }
    }

    #[test]
    fn test_only_first_three_stages_persist() {
        let writers: Vec<_> = StageId::ALL
            .iter()
            .filter_map(|id| id.descriptor().writes)
            .collect();
        assert_eq!(writers, StoreKey::ALL.to_vec());
    }

    #[test]
    fn test_each_gate_reads_previous_stage_output() {
        assert_eq!(StageId::Fr01.descriptor().requires, None);
        assert_eq!(StageId::Fr02.descriptor().requires.unwrap().key, StoreKey::Fr01Out);
        assert_eq!(StageId::Fr03.descriptor().requires.unwrap().key, StoreKey::Fr02Out);
        assert_eq!(StageId::Fr04.descriptor().requires.unwrap().key, StoreKey::Fr03Out);
        assert_eq!(StageId::Fr05.descriptor().requires, None);
    }

    #[test]
    fn test_store_key_serialize() {
        let json = serde_json::to_string(&StoreKey::Fr02Out).unwrap();
        assert_eq!(json, r#""FR02_OUT""#);
        assert_eq!("FR03_OUT".parse::<StoreKey>().unwrap(), StoreKey::Fr03Out);
        assert!("FR04_OUT".parse::<StoreKey>().is_err());
    }

    #[test]
    fn test_stage_id_display() {
        assert_eq!(StageId::Fr04.to_string(), "FR04");
        assert_eq!(serde_json::to_string(&StageId::Fr05).unwrap(), r#""FR05""#);
    }
}
