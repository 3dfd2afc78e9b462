//! Optimistic application stage board
//!
//! A move shows the new stage immediately, then persists it. When the
//! backend rejects the change, exactly the moved record is put back.

use applymate_domain::{Application, ApplyMateError, Result, Stage, StageCount};
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::ports::ApplicationGateway;

/// Applications grouped by pipeline stage
///
/// The list is guarded by a lock that is never held across an await, so
/// [`StageBoard::snapshot`] reflects the speculative state while a move is
/// still in flight.
#[derive(Debug, Default)]
pub struct StageBoard {
    applications: RwLock<Vec<Application>>,
}

impl StageBoard {
    /// Board holding `applications` in the given order
    pub fn new(applications: Vec<Application>) -> Self {
        Self { applications: RwLock::new(applications) }
    }

    /// Replace the board contents with the backend's current list
    ///
    /// # Errors
    /// Propagates the gateway error; the board is left unchanged.
    pub async fn load(&self, gateway: &dyn ApplicationGateway) -> Result<usize> {
        let applications = gateway.list_applications(None).await?;
        let count = applications.len();
        *self.applications.write() = applications;
        debug!(count, "Stage board loaded");
        Ok(count)
    }

    /// Put a newly created application at the front of the board
    pub fn insert(&self, application: Application) {
        self.applications.write().insert(0, application);
    }

    /// Drop every card
    pub fn clear(&self) {
        self.applications.write().clear();
    }

    /// Copy of every card in board order
    pub fn snapshot(&self) -> Vec<Application> {
        self.applications.read().clone()
    }

    /// Card with the given application id
    pub fn get(&self, id: i64) -> Option<Application> {
        self.applications.read().iter().find(|app| app.id == id).cloned()
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.applications.read().len()
    }

    /// Whether the board has no cards
    pub fn is_empty(&self) -> bool {
        self.applications.read().is_empty()
    }

    /// One column per stage, in pipeline order; empty columns included
    pub fn grouped(&self) -> Vec<(Stage, Vec<Application>)> {
        let applications = self.applications.read();
        Stage::ALL
            .into_iter()
            .map(|stage| {
                let column = applications.iter().filter(|app| app.stage == stage).cloned().collect();
                (stage, column)
            })
            .collect()
    }

    /// Dashboard counts for every stage
    pub fn stage_counts(&self) -> Vec<StageCount> {
        let applications = self.applications.read();
        Stage::ALL
            .into_iter()
            .map(|stage| StageCount {
                stage,
                count: applications.iter().filter(|app| app.stage == stage).count(),
            })
            .collect()
    }

    /// Move an application to `to`, persisting through `gateway`
    ///
    /// Returns the settled record. Moving a card onto its own column is a
    /// no-op that never reaches the backend.
    ///
    /// # Errors
    /// - `NotFound` when no application has this id
    /// - the gateway error after the record has been reverted
    pub async fn move_application(
        &self,
        gateway: &dyn ApplicationGateway,
        id: i64,
        to: Stage,
    ) -> Result<Application> {
        let from = {
            let mut applications = self.applications.write();
            let app = applications
                .iter_mut()
                .find(|app| app.id == id)
                .ok_or_else(|| ApplyMateError::NotFound(format!("application {id}")))?;

            if app.stage == to {
                return Ok(app.clone());
            }
            let from = app.stage;
            app.stage = to;
            from
        };

        debug!(id, from = %from, to = %to, "Applying optimistic stage move");

        match gateway.update_stage(id, to).await {
            Ok(server_copy) => {
                let mut applications = self.applications.write();
                if let Some(app) = applications.iter_mut().find(|app| app.id == id) {
                    *app = server_copy.clone();
                }
                Ok(server_copy)
            }
            Err(err) => {
                self.revert(id, from, to);
                warn!(id, from = %from, to = %to, error = %err, "Stage move rejected, reverted");
                Err(err)
            }
        }
    }

    fn revert(&self, id: i64, from: Stage, speculative: Stage) {
        let mut applications = self.applications.write();
        if let Some(app) = applications.iter_mut().find(|app| app.id == id) {
            // A later move already superseded ours.
            if app.stage == speculative {
                app.stage = from;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;

    fn application(id: i64, stage: Stage) -> Application {
        Application { id, job: 1, stage, ..Application::default() }
    }

    /// Gateway that records calls and captures the board state mid-flight
    struct MockGateway {
        board: Mutex<Option<Arc<StageBoard>>>,
        fail_with: Option<ApplyMateError>,
        observed: Mutex<Vec<Application>>,
        calls: Mutex<Vec<(i64, Stage)>>,
    }

    impl MockGateway {
        fn new(fail_with: Option<ApplyMateError>) -> Self {
            Self {
                board: Mutex::new(None),
                fail_with,
                observed: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn watch(&self, board: Arc<StageBoard>) {
            *self.board.lock() = Some(board);
        }
    }

    #[async_trait]
    impl ApplicationGateway for MockGateway {
        async fn list_applications(&self, _job_id: Option<i64>) -> Result<Vec<Application>> {
            Ok(vec![application(1, Stage::Saved), application(2, Stage::Offer)])
        }

        async fn update_stage(&self, id: i64, stage: Stage) -> Result<Application> {
            self.calls.lock().push((id, stage));
            if let Some(board) = self.board.lock().as_ref() {
                *self.observed.lock() = board.snapshot();
            }
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(Application { notes: "from server".into(), ..application(id, stage) }),
            }
        }
    }

    #[tokio::test]
    async fn failed_move_reverts_only_the_moved_record() {
        let board = Arc::new(StageBoard::new(vec![
            application(7, Stage::Saved),
            application(8, Stage::Applied),
        ]));
        let gateway = MockGateway::new(Some(ApplyMateError::Http {
            status: 500,
            detail: "boom".into(),
        }));
        gateway.watch(Arc::clone(&board));

        let err = board.move_application(&gateway, 7, Stage::Interview).await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP 500: boom");
        let observed = gateway.observed.lock().clone();
        assert_eq!(observed[0].stage, Stage::Interview, "move must be visible before settling");
        assert_eq!(board.get(7).unwrap().stage, Stage::Saved);
        assert_eq!(board.get(8).unwrap().stage, Stage::Applied);
    }

    #[tokio::test]
    async fn successful_move_keeps_server_copy() {
        let board = StageBoard::new(vec![application(7, Stage::Saved)]);
        let gateway = MockGateway::new(None);

        let settled = board.move_application(&gateway, 7, Stage::Offer).await.unwrap();

        assert_eq!(settled.stage, Stage::Offer);
        assert_eq!(board.get(7).unwrap().notes, "from server");
        assert_eq!(gateway.calls.lock().as_slice(), &[(7, Stage::Offer)]);
    }

    #[tokio::test]
    async fn same_stage_move_skips_backend() {
        let board = StageBoard::new(vec![application(3, Stage::Applied)]);
        let gateway = MockGateway::new(None);

        let app = board.move_application(&gateway, 3, Stage::Applied).await.unwrap();

        assert_eq!(app.stage, Stage::Applied);
        assert!(gateway.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn unknown_application_is_not_found() {
        let board = StageBoard::new(vec![application(3, Stage::Applied)]);
        let gateway = MockGateway::new(None);

        let err = board.move_application(&gateway, 99, Stage::Offer).await.unwrap_err();

        assert!(matches!(err, ApplyMateError::NotFound(_)));
        assert!(gateway.calls.lock().is_empty());
    }

    #[test]
    fn revert_skips_records_moved_again() {
        let board = StageBoard::new(vec![application(5, Stage::Offer)]);

        board.revert(5, Stage::Saved, Stage::Interview);

        assert_eq!(board.get(5).unwrap().stage, Stage::Offer);
    }

    #[tokio::test]
    async fn load_replaces_contents() {
        let board = StageBoard::new(vec![application(9, Stage::Rejected)]);
        let gateway = MockGateway::new(None);

        assert_eq!(board.load(&gateway).await.unwrap(), 2);
        assert!(board.get(9).is_none());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn grouping_and_counts_cover_every_stage() {
        let board = StageBoard::new(vec![
            application(1, Stage::Saved),
            application(2, Stage::Interview),
            application(3, Stage::Saved),
        ]);
        board.insert(application(4, Stage::Oa));

        let grouped = board.grouped();
        assert_eq!(grouped.len(), 6);
        assert_eq!(grouped[0].0, Stage::Saved);
        assert_eq!(grouped[0].1.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(grouped[2].1[0].id, 4);

        let counts = board.stage_counts();
        assert_eq!(counts[0], StageCount { stage: Stage::Saved, count: 2 });
        assert_eq!(counts[3], StageCount { stage: Stage::Interview, count: 1 });
        assert_eq!(counts[4].count, 0);
        assert_eq!(board.snapshot()[0].id, 4);
    }
}
