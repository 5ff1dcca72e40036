use crate::error::{DiningError, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Flip,
    Combine,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Flip => write!(f, "Flip"),
            Phase::Combine => write!(f, "Combine"),
        }
    }
}

/// Waits for exactly `expected` cryptographer tasks of one phase.
///
/// Every task is joined before returning, so a failed phase never leaves
/// stragglers running into the next one. Outputs keep spawn order.
#[derive(Debug)]
pub struct PhaseBarrier {
    phase: Phase,
    expected: usize,
}

impl PhaseBarrier {
    pub fn new(phase: Phase, expected: usize) -> Self {
        Self { phase, expected }
    }

    pub async fn wait<T>(&self, tasks: Vec<JoinHandle<Result<T>>>) -> Result<Vec<T>> {
        let launched = tasks.len();
        let mut completed = Vec::with_capacity(launched);
        let mut first_error = None;

        for joined in join_all(tasks).await {
            match joined {
                Ok(Ok(output)) => completed.push(output),
                Ok(Err(e)) => {
                    tracing::error!("{} phase task failed: {}", self.phase, e);
                    first_error = first_error.or(Some(e));
                }
                Err(e) => {
                    tracing::error!("{} phase task aborted: {}", self.phase, e);
                    first_error = first_error.or(Some(DiningError::from(e)));
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        if completed.len() != self.expected {
            return Err(DiningError::PhaseIncomplete {
                phase: self.phase,
                completed: completed.len(),
                expected: self.expected,
            });
        }

        tracing::debug!("{} phase barrier cleared ({} tasks)", self.phase, launched);
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_waits_for_all_tasks_in_order() {
        let tasks: Vec<JoinHandle<Result<usize>>> = (0..5)
            .map(|i| tokio::spawn(async move { Ok(i) }))
            .collect();

        let outputs = PhaseBarrier::new(Phase::Flip, 5).wait(tasks).await.unwrap();
        assert_eq!(outputs, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_missing_tasks_are_reported() {
        let tasks: Vec<JoinHandle<Result<usize>>> = (0..2)
            .map(|i| tokio::spawn(async move { Ok(i) }))
            .collect();

        let result = PhaseBarrier::new(Phase::Combine, 3).wait(tasks).await;
        assert!(matches!(
            result,
            Err(DiningError::PhaseIncomplete {
                phase: Phase::Combine,
                completed: 2,
                expected: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_task_error_is_propagated() {
        let tasks: Vec<JoinHandle<Result<usize>>> = vec![
            tokio::spawn(async { Ok(0) }),
            tokio::spawn(async { Err(DiningError::NotFlipped { position: 1 }) }),
        ];

        let result = PhaseBarrier::new(Phase::Combine, 2).wait(tasks).await;
        assert!(matches!(result, Err(DiningError::NotFlipped { position: 1 })));
    }

    #[tokio::test]
    async fn test_panicked_task_is_reported() {
        let tasks: Vec<JoinHandle<Result<usize>>> = vec![
            tokio::spawn(async { Ok(0) }),
            tokio::spawn(async { panic!("cryptographer left the table") }),
        ];

        let result = PhaseBarrier::new(Phase::Flip, 2).wait(tasks).await;
        assert!(matches!(result, Err(DiningError::TaskFailed(_))));
    }
}
