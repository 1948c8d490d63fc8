use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::FieldValue;
use super::{lenient, object};

/// Aggregated output of one `ansible-playbook` run using the `json` stdout callback.
///
/// Host-keyed maps are `BTreeMap`s so iteration (and therefore rendering and stats
/// classification) follows lexicographic host order. Every structural section must
/// be a JSON object; an array in its place is a decode error, not a positional fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybookResults {
    #[serde(default)]
    pub custom_stats: BTreeMap<String, Value>,

    #[serde(default)]
    pub global_custom_stats: BTreeMap<String, Value>,

    #[serde(default, deserialize_with = "object::list")]
    pub plays: Vec<Play>,

    #[serde(default, deserialize_with = "object::by_host")]
    pub stats: BTreeMap<String, HostStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Play {
    #[serde(
        default,
        deserialize_with = "object::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub play: Option<PlayItem>,

    #[serde(default, deserialize_with = "object::list")]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayItem {
    #[serde(
        default,
        deserialize_with = "object::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<Duration>,

    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

/// Start/end timestamps exactly as ansible printed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    #[serde(default)]
    pub start: String,

    #[serde(default)]
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Missing for host-only entries, which ansible emits when tasks are filtered.
    #[serde(
        default,
        deserialize_with = "object::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub task: Option<TaskItem>,

    #[serde(default)]
    pub hosts: BTreeMap<String, TaskHostOutcome>,
}

impl Task {
    pub fn name(&self) -> &str {
        self.task.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    #[serde(
        default,
        deserialize_with = "object::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<Duration>,

    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

/// Result of one task on one host.
///
/// Only the fields this crate looks at are typed. Module specific keys (`rc`,
/// `delta`, `invocation`, `_ansible_no_log`, ...) land in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskHostOutcome {
    #[serde(default, deserialize_with = "lenient::string_field")]
    pub action: String,

    #[serde(default, deserialize_with = "lenient::bool_field")]
    pub changed: bool,

    #[serde(default, deserialize_with = "lenient::bool_field")]
    pub failed: bool,

    #[serde(default, deserialize_with = "lenient::bool_field")]
    pub failed_when_result: bool,

    #[serde(default, deserialize_with = "lenient::bool_field")]
    pub skipped: bool,

    #[serde(
        default,
        deserialize_with = "lenient::string_field",
        skip_serializing_if = "String::is_empty"
    )]
    pub skip_reason: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout_lines: Option<FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr_lines: Option<FieldValue>,

    /// Facts gathered or set by the task. A JSON object in practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_facts: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskHostOutcome {
    pub fn message(&self) -> String {
        self.msg.as_ref().map(FieldValue::to_text).unwrap_or_default()
    }
}

/// Per-host counters from the `stats` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStats {
    #[serde(default)]
    pub changed: u64,

    #[serde(default)]
    pub failures: u64,

    #[serde(default)]
    pub ignored: u64,

    #[serde(default)]
    pub ok: u64,

    #[serde(default)]
    pub rescued: u64,

    #[serde(default)]
    pub skipped: u64,

    #[serde(default)]
    pub unreachable: u64,
}

impl HostStats {
    pub fn is_clean(&self) -> bool {
        self.failures == 0 && self.unreachable == 0
    }

    /// Field-wise saturating sum.
    pub fn accumulate(&mut self, other: &HostStats) {
        self.changed = self.changed.saturating_add(other.changed);
        self.failures = self.failures.saturating_add(other.failures);
        self.ignored = self.ignored.saturating_add(other.ignored);
        self.ok = self.ok.saturating_add(other.ok);
        self.rescued = self.rescued.saturating_add(other.rescued);
        self.skipped = self.skipped.saturating_add(other.skipped);
        self.unreachable = self.unreachable.saturating_add(other.unreachable);
    }
}

/// One failed host outcome, borrowed from the results tree.
#[derive(Debug, Clone, Copy)]
pub struct FailedOutcome<'a> {
    pub play: &'a Play,
    pub task: &'a Task,
    pub host: &'a str,
    pub outcome: &'a TaskHostOutcome,
}

impl PlaybookResults {
    pub fn is_empty(&self) -> bool {
        self.plays.is_empty() && self.stats.is_empty()
    }

    /// Every host that shows up in `stats` or in any task, sorted.
    pub fn hosts(&self) -> Vec<&str> {
        let mut set: BTreeSet<&str> = self.stats.keys().map(String::as_str).collect();
        for play in &self.plays {
            for task in &play.tasks {
                set.extend(task.hosts.keys().map(String::as_str));
            }
        }
        set.into_iter().collect()
    }

    pub fn task_count(&self) -> usize {
        self.plays.iter().map(|p| p.tasks.len()).sum()
    }

    /// Host outcomes with `failed: true`, in play/task/host order.
    pub fn failed_outcomes(&self) -> impl Iterator<Item = FailedOutcome<'_>> {
        self.plays.iter().flat_map(|play| {
            play.tasks.iter().flat_map(move |task| {
                task.hosts
                    .iter()
                    .filter(|(_, outcome)| outcome.failed)
                    .map(move |(host, outcome)| FailedOutcome {
                        play,
                        task,
                        host: host.as_str(),
                        outcome,
                    })
            })
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
