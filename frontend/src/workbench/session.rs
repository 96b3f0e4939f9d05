use common::error::ApiError;

use super::Workbench;
use super::dispatcher::{self, FollowUp, OperationKind, OperationRequest};
use super::schema::RefreshOutcome;
use crate::api::{DatasetFile, DatasetService};

/// A `Workbench` paired with a service, for hosts that can await in place.
///
/// Each call runs one full operation: validate, send, accept the result, and
/// refresh the schema when the operation asks for it.
pub struct Session<S> {
    service: S,
    workbench: Workbench,
}

impl<S: DatasetService> Session<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            workbench: Workbench::new(),
        }
    }

    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    pub fn workbench_mut(&mut self) -> &mut Workbench {
        &mut self.workbench
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn upload(&mut self, file: Option<DatasetFile>) -> Result<FollowUp, ApiError> {
        let request = self.workbench.prepare_upload(file);
        self.drop_dismissals();
        self.run(request?).await
    }

    /// Runs `kind` with the current selections and form inputs. A returned
    /// `FollowUp::Refresh` has already been carried out.
    pub async fn submit(&mut self, kind: OperationKind) -> Result<FollowUp, ApiError> {
        let request = self.workbench.prepare(kind);
        self.drop_dismissals();
        self.run(request?).await
    }

    pub async fn refresh(&mut self) -> RefreshOutcome {
        let ticket = self.workbench.begin_refresh();
        let result = self.service.preview().await;
        let outcome = self.workbench.finish_refresh(ticket, result);
        self.drop_dismissals();
        outcome
    }

    async fn run(&mut self, request: OperationRequest) -> Result<FollowUp, ApiError> {
        let kind = request.kind();
        let reply = dispatcher::execute(&self.service, &request).await;
        let completed = self.workbench.complete(kind, reply);
        self.drop_dismissals();
        let follow_up = completed?;
        if follow_up == FollowUp::Refresh {
            self.refresh().await;
        }
        Ok(follow_up)
    }

    /// A session runs no timers, so a message stays until its scope shows the
    /// next one.
    fn drop_dismissals(&mut self) {
        self.workbench.take_dismissals();
    }
}
