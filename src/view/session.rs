use std::collections::VecDeque;

use crate::client::Directory;
use crate::types::{Endpoint, UserId};

use super::model::{Action, Effect, MutationKind, Notice, ViewState};

/// Drives a [`ViewState`] against a [`Directory`].
///
/// Every dispatched action runs to completion: effects are performed one at
/// a time and their results are fed back until the state asks for nothing
/// more.
pub struct Session<D> {
    directory: D,
    state: ViewState,
}

impl<D: Directory> Session<D> {
    pub fn new(directory: D, endpoint: Option<Endpoint>) -> Self {
        Self {
            directory,
            state: ViewState::new(endpoint),
        }
    }

    #[cfg(test)]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    pub async fn dispatch(&mut self, action: Action) {
        let mut pending = VecDeque::from([action]);
        while let Some(action) = pending.pop_front() {
            for effect in self.state.update(action) {
                pending.push_back(self.perform(effect).await);
            }
        }
    }

    async fn perform(&self, effect: Effect) -> Action {
        match effect {
            Effect::FetchList {
                generation,
                endpoint,
            } => Action::ListLoaded {
                generation,
                result: self.directory.list(&endpoint).await,
            },
            Effect::Mutate { endpoint, kind } => {
                let result = match &kind {
                    MutationKind::Create { name } => self.directory.create(&endpoint, name).await,
                    MutationKind::Update { id, name } => {
                        self.directory.update(&endpoint, id, name).await
                    }
                    MutationKind::Delete { id } => self.directory.delete(&endpoint, id).await,
                };
                Action::MutationSettled { kind, result }
            }
        }
    }

    pub async fn refresh(&mut self) {
        self.dispatch(Action::Refresh).await;
    }

    pub async fn select_endpoint(&mut self, endpoint: Option<Endpoint>) {
        self.dispatch(Action::SelectEndpoint(endpoint)).await;
    }

    /// Fill the create form and submit it.
    pub async fn submit_create(&mut self, name: &str) {
        self.dispatch(Action::CreateInputChanged(name.to_string()))
            .await;
        self.dispatch(Action::SubmitCreate).await;
    }

    /// Edit a row, replace its draft and save, as an operator would inline.
    pub async fn rename(&mut self, id: UserId, name: &str) {
        self.dispatch(Action::EditClicked(id.clone())).await;
        self.dispatch(Action::DraftChanged(id.clone(), name.to_string()))
            .await;
        self.dispatch(Action::SaveClicked(id)).await;
    }

    pub async fn delete(&mut self, id: UserId) {
        self.dispatch(Action::DeleteClicked(id)).await;
    }
}
