use super::Todo;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which todos the filtered view shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Everything.
    #[default]
    All,
    /// Not yet completed.
    Active,
    /// Completed.
    Completed,
}

impl Filter {
    /// Whether `todo` passes this filter.
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    /// The matching subsequence of `todos`, in order.
    pub fn apply(self, todos: &[Todo]) -> Vec<Todo> {
        match self {
            Self::All => todos.to_vec(),
            _ => todos.iter().filter(|t| self.matches(t)).cloned().collect(),
        }
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseError::new("filter", other)),
        }
    }
}

/// Aggregate counts over a todo collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of todos.
    pub total: usize,
    /// Number not completed.
    pub active: usize,
    /// Number completed.
    pub completed: usize,
}

impl Stats {
    /// Count `todos`.
    pub fn of(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total: todos.len(),
            active: todos.len() - completed,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todos(flags: &[bool]) -> Vec<Todo> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &completed)| {
                let mut todo = Todo::new(format!("task {i}"));
                todo.completed = completed;
                todo
            })
            .collect()
    }

    #[test]
    fn all_passes_through() {
        let list = todos(&[true, false, true]);
        assert_eq!(Filter::All.apply(&list), list);
    }

    #[test]
    fn active_and_completed_keep_order() {
        let list = todos(&[true, false, true, false]);

        let active: Vec<_> = Filter::Active.apply(&list).into_iter().map(|t| t.text).collect();
        assert_eq!(active, vec!["task 1", "task 3"]);

        let done: Vec<_> = Filter::Completed
            .apply(&list)
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(done, vec!["task 0", "task 2"]);
    }

    #[test]
    fn stats_count_both_states() {
        let stats = Stats::of(&todos(&[true, false, false]));
        assert_eq!(
            stats,
            Stats {
                total: 3,
                active: 2,
                completed: 1
            }
        );
    }

    #[test]
    fn filter_round_trips_through_str() {
        for filter in [Filter::All, Filter::Active, Filter::Completed] {
            assert_eq!(filter.to_string().parse::<Filter>().unwrap(), filter);
        }
        assert!("done".parse::<Filter>().is_err());
    }
}
