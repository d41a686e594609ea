//! Structural diff between the agent's final dataset and the ground truth.
//!
//! Walks both JSON trees in lockstep and records differing leaves, capped at
//! a limit. Paths use `a.b[0].c` notation; object keys are visited in sorted
//! order so the output is deterministic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder for a key present on only one side.
pub const MISSING: &str = "<missing>";

/// One difference between the two trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataDiff {
    /// Differing values (or a key missing on one side).
    Value {
        path: String,
        agent: String,
        gt: String,
    },
    /// Arrays of different length; elements are still compared pairwise.
    Length {
        path: String,
        agent_len: usize,
        gt_len: usize,
    },
}

impl DataDiff {
    pub fn path(&self) -> &str {
        match self {
            DataDiff::Value { path, .. } | DataDiff::Length { path, .. } => path,
        }
    }
}

/// Collect up to `limit` differences between `agent` and `gt`.
pub fn collect_diffs(agent: &Value, gt: &Value, limit: usize) -> Vec<DataDiff> {
    let mut diffs = Vec::new();
    walk(agent, gt, "", &mut diffs, limit);
    diffs
}

fn walk(agent: &Value, gt: &Value, path: &str, diffs: &mut Vec<DataDiff>, limit: usize) {
    if diffs.len() >= limit {
        return;
    }
    match (agent, gt) {
        (Value::Object(a), Value::Object(g)) => {
            let mut keys: Vec<&String> = a.keys().chain(g.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                if diffs.len() >= limit {
                    break;
                }
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match (a.get(key), g.get(key)) {
                    (None, Some(gv)) => diffs.push(DataDiff::Value {
                        path: child,
                        agent: MISSING.to_string(),
                        gt: render(gv),
                    }),
                    (Some(av), None) => diffs.push(DataDiff::Value {
                        path: child,
                        agent: render(av),
                        gt: MISSING.to_string(),
                    }),
                    (Some(av), Some(gv)) => walk(av, gv, &child, diffs, limit),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(a), Value::Array(g)) => {
            if a.len() != g.len() {
                diffs.push(DataDiff::Length {
                    path: path.to_string(),
                    agent_len: a.len(),
                    gt_len: g.len(),
                });
            }
            for (i, (av, gv)) in a.iter().zip(g).enumerate() {
                if diffs.len() >= limit {
                    break;
                }
                walk(av, gv, &format!("{path}[{i}]"), diffs, limit);
            }
        }
        (Value::Number(a), Value::Number(g)) => {
            if a.as_f64() != g.as_f64() {
                diffs.push(leaf(path, agent, gt));
            }
        }
        _ => {
            if agent != gt {
                diffs.push(leaf(path, agent, gt));
            }
        }
    }
}

fn leaf(path: &str, agent: &Value, gt: &Value) -> DataDiff {
    DataDiff::Value {
        path: path.to_string(),
        agent: render(agent),
        gt: render(gt),
    }
}

/// Strings render bare; everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identical_trees_have_no_diffs() {
        let tree = json!({"reservations": {"4WQ150": {"status": "cancelled", "flights": [1, 2]}}});
        assert!(collect_diffs(&tree, &tree.clone(), 50).is_empty());
    }

    #[test]
    fn test_single_leaf_change() {
        let agent = json!({"users": {"u1": {"payment_methods": {"gift_card_7": {"amount": 50.0}}}}});
        let gt = json!({"users": {"u1": {"payment_methods": {"gift_card_7": {"amount": 0.0}}}}});
        assert_eq!(
            collect_diffs(&agent, &gt, 50),
            vec![DataDiff::Value {
                path: "users.u1.payment_methods.gift_card_7.amount".into(),
                agent: "50.0".into(),
                gt: "0.0".into(),
            }]
        );
    }

    #[test]
    fn test_missing_keys_and_lengths() {
        let agent = json!({"a": [1, 2, 3], "only_agent": "x"});
        let gt = json!({"a": [1, 5], "only_gt": true});
        let diffs = collect_diffs(&agent, &gt, 50);
        assert_eq!(
            diffs,
            vec![
                DataDiff::Length {
                    path: "a".into(),
                    agent_len: 3,
                    gt_len: 2
                },
                DataDiff::Value {
                    path: "a[1]".into(),
                    agent: "2".into(),
                    gt: "5".into()
                },
                DataDiff::Value {
                    path: "only_agent".into(),
                    agent: "x".into(),
                    gt: MISSING.into()
                },
                DataDiff::Value {
                    path: "only_gt".into(),
                    agent: MISSING.into(),
                    gt: "true".into()
                },
            ]
        );
    }

    #[test]
    fn test_type_mismatch_is_one_record() {
        let diffs = collect_diffs(&json!({"x": {"y": 1}}), &json!({"x": "cancelled"}), 50);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path(), "x");
    }

    #[test]
    fn test_integer_and_float_compare_equal() {
        assert!(collect_diffs(&json!({"price": 150}), &json!({"price": 150.0}), 50).is_empty());
    }

    #[test]
    fn test_limit_caps_output() {
        let agent = json!({"a": 1, "b": 2, "c": 3, "d": 4});
        let gt = json!({"a": 0, "b": 0, "c": 0, "d": 0});
        assert_eq!(collect_diffs(&agent, &gt, 2).len(), 2);
    }
}
