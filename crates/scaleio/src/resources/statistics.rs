//! Statistics documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A statistics document returned by a `Statistics` relation.
///
/// The set of counters depends on the record kind and the gateway release,
/// so they are kept as raw JSON keyed by counter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(flatten)]
    pub counters: BTreeMap<String, Value>,
}

impl Statistics {
    /// Raw value of a counter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.counters.get(name)
    }

    /// Integer value of a counter, if present and numeric.
    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_kept_by_name() {
        let stats: Statistics = serde_json::from_str(
            r#"{"numOfVolumes":4,"capacityInUseInKb":8388608,"primaryReadBwc":{"numOccured":0}}"#,
        )
        .unwrap();
        assert_eq!(stats.get_u64("numOfVolumes"), Some(4));
        assert_eq!(stats.get_u64("capacityInUseInKb"), Some(8_388_608));
        assert!(stats.get("primaryReadBwc").unwrap().is_object());
        assert!(stats.get("missing").is_none());
    }
}
