//! Pure list-view state machine.
//!
//! [`ViewState::update`] takes one [`Action`] and returns the directory calls
//! it wants performed as [`Effect`]s. Results of those calls come back in as
//! actions ([`Action::ListLoaded`], [`Action::MutationSettled`]), so nothing
//! here touches the network or the terminal.

use std::fmt;

use crate::error::FetchError;
use crate::types::{Endpoint, User, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    Viewing,
    Editing { draft: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub user: User,
    pub mode: RowMode,
}

impl Row {
    fn viewing(user: User) -> Self {
        Self {
            user,
            mode: RowMode::Viewing,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, RowMode::Editing { .. })
    }

    /// Name as currently shown: the draft while editing, the record otherwise.
    pub fn shown_name(&self) -> &str {
        match &self.mode {
            RowMode::Viewing => &self.user.name,
            RowMode::Editing { draft } => draft,
        }
    }
}

/// Synthetic single row standing in for the table when there is nothing to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    NoEndpoint,
    Loading,
    NoUsers,
    LoadFailed(String),
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEndpoint => write!(f, "No endpoint selected"),
            Self::Loading => write!(f, "Loading users..."),
            Self::NoUsers => write!(f, "No users found"),
            Self::LoadFailed(cause) => write!(f, "Failed to load users: {cause}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Placeholder(Placeholder),
    Rows(Vec<Row>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Transient operator-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Create { name: String },
    Update { id: UserId, name: String },
    Delete { id: UserId },
}

impl MutationKind {
    fn done(&self) -> String {
        match self {
            Self::Create { name } => format!("Created user '{name}'"),
            Self::Update { id, name } => format!("Renamed user {id} to '{name}'"),
            Self::Delete { id } => format!("Deleted user {id}"),
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { name } => write!(f, "create user '{name}'"),
            Self::Update { id, name } => write!(f, "rename user {id} to '{name}'"),
            Self::Delete { id } => write!(f, "delete user {id}"),
        }
    }
}

#[derive(Debug)]
pub enum Action {
    SelectEndpoint(Option<Endpoint>),
    Refresh,
    ListLoaded {
        generation: u64,
        result: Result<Vec<User>, FetchError>,
    },
    CreateInputChanged(String),
    SubmitCreate,
    EditClicked(UserId),
    DraftChanged(UserId, String),
    SaveClicked(UserId),
    CancelClicked(UserId),
    DeleteClicked(UserId),
    MutationSettled {
        kind: MutationKind,
        result: Result<(), FetchError>,
    },
}

/// A directory call requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchList { generation: u64, endpoint: Endpoint },
    Mutate { endpoint: Endpoint, kind: MutationKind },
}

#[derive(Debug, Clone)]
pub struct ViewState {
    endpoint: Option<Endpoint>,
    generation: u64,
    body: Body,
    create_input: String,
    notices: Vec<Notice>,
}

impl ViewState {
    pub fn new(endpoint: Option<Endpoint>) -> Self {
        let body = match endpoint {
            Some(_) => Body::Placeholder(Placeholder::Loading),
            None => Body::Placeholder(Placeholder::NoEndpoint),
        };
        Self {
            endpoint,
            generation: 0,
            body,
            create_input: String::new(),
            notices: Vec::new(),
        }
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Tag of the most recent refresh. Only list results carrying this tag
    /// are applied.
    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn rows(&self) -> &[Row] {
        match &self.body {
            Body::Rows(rows) => rows,
            Body::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        match &self.body {
            Body::Placeholder(p) => Some(p),
            Body::Rows(_) => None,
        }
    }

    #[cfg(test)]
    pub fn create_input(&self) -> &str {
        &self.create_input
    }

    #[cfg(test)]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Look up a displayed row by the id an operator typed.
    pub fn find_row(&self, typed: &str) -> Option<&Row> {
        self.rows().iter().find(|row| row.user.id.matches(typed))
    }

    fn row_mut(&mut self, id: &UserId) -> Option<&mut Row> {
        match &mut self.body {
            Body::Rows(rows) => rows.iter_mut().find(|row| row.user.id == *id),
            Body::Placeholder(_) => None,
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message));
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SelectEndpoint(endpoint) => {
                self.endpoint = endpoint;
                self.refresh()
            }
            Action::Refresh => self.refresh(),
            Action::ListLoaded { generation, result } => {
                self.apply_list(generation, result);
                Vec::new()
            }
            Action::CreateInputChanged(text) => {
                self.create_input = text;
                Vec::new()
            }
            Action::SubmitCreate => self.submit_create(),
            Action::EditClicked(id) => {
                if let Some(row) = self.row_mut(&id) {
                    if !row.is_editing() {
                        row.mode = RowMode::Editing {
                            draft: row.user.name.clone(),
                        };
                    }
                }
                Vec::new()
            }
            Action::DraftChanged(id, text) => {
                if let Some(Row {
                    mode: RowMode::Editing { draft },
                    ..
                }) = self.row_mut(&id)
                {
                    *draft = text;
                }
                Vec::new()
            }
            Action::CancelClicked(id) => {
                if let Some(row) = self.row_mut(&id) {
                    row.mode = RowMode::Viewing;
                }
                Vec::new()
            }
            Action::SaveClicked(id) => self.save(&id),
            Action::DeleteClicked(id) => self.mutate(MutationKind::Delete { id }),
            Action::MutationSettled { kind, result } => {
                match result {
                    Ok(()) => self.notify(NoticeLevel::Info, kind.done()),
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to {kind}");
                        self.notify(NoticeLevel::Error, format!("Could not {kind}: {e}"));
                    }
                }
                let effects = self.refresh();
                if matches!(kind, MutationKind::Create { .. }) {
                    self.create_input.clear();
                }
                effects
            }
        }
    }

    fn refresh(&mut self) -> Vec<Effect> {
        self.generation += 1;
        match &self.endpoint {
            None => {
                self.body = Body::Placeholder(Placeholder::NoEndpoint);
                Vec::new()
            }
            Some(endpoint) => vec![Effect::FetchList {
                generation: self.generation,
                endpoint: endpoint.clone(),
            }],
        }
    }

    fn apply_list(&mut self, generation: u64, result: Result<Vec<User>, FetchError>) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "dropping stale list result"
            );
            return;
        }

        self.body = match result {
            Ok(users) if users.is_empty() => Body::Placeholder(Placeholder::NoUsers),
            Ok(users) => Body::Rows(users.into_iter().map(Row::viewing).collect()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load users");
                Body::Placeholder(Placeholder::LoadFailed(e.to_string()))
            }
        };
    }

    fn submit_create(&mut self) -> Vec<Effect> {
        if self.endpoint.is_none() {
            self.notify(
                NoticeLevel::Warning,
                "Select an endpoint before adding a user",
            );
            return Vec::new();
        }

        let name = self.create_input.trim().to_string();
        if name.is_empty() {
            self.notify(NoticeLevel::Warning, "Enter a name before adding a user");
            return Vec::new();
        }

        self.mutate(MutationKind::Create { name })
    }

    fn save(&mut self, id: &UserId) -> Vec<Effect> {
        let Some(row) = self.row_mut(id) else {
            return Vec::new();
        };
        let RowMode::Editing { draft } = std::mem::replace(&mut row.mode, RowMode::Viewing) else {
            return Vec::new();
        };

        let name = draft.trim();
        if name.is_empty() || name == row.user.name {
            return Vec::new();
        }

        let kind = MutationKind::Update {
            id: id.clone(),
            name: name.to_string(),
        };
        self.mutate(kind)
    }

    fn mutate(&mut self, kind: MutationKind) -> Vec<Effect> {
        match &self.endpoint {
            Some(endpoint) => vec![Effect::Mutate {
                endpoint: endpoint.clone(),
                kind,
            }],
            None => {
                self.notify(
                    NoticeLevel::Warning,
                    format!("Cannot {kind}: no endpoint selected"),
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeleteStyle;

    fn endpoint() -> Endpoint {
        Endpoint::new("test", "http://directory.test/users", DeleteStyle::Form)
    }

    fn other_endpoint() -> Endpoint {
        Endpoint::new("other", "http://other.test/users", DeleteStyle::Query)
    }

    fn loaded(users: Vec<User>) -> ViewState {
        let mut state = ViewState::new(Some(endpoint()));
        let effects = state.update(Action::Refresh);
        assert_eq!(effects.len(), 1);
        let generation = state.generation();
        state.update(Action::ListLoaded {
            generation,
            result: Ok(users),
        });
        state
    }

    fn ann_and_bo() -> ViewState {
        loaded(vec![User::new(1, "Ann"), User::new(2, "Bo")])
    }

    #[test]
    fn test_rows_match_source_records_in_order() {
        let users = vec![
            User::new(3, "Cy"),
            User::new("x", "Dee"),
            User::new(1, "Ann"),
        ];
        let state = loaded(users.clone());
        assert_eq!(state.rows().len(), users.len());
        for (row, user) in state.rows().iter().zip(&users) {
            assert_eq!(&row.user, user);
            assert_eq!(row.mode, RowMode::Viewing);
        }
    }

    #[test]
    fn test_empty_and_failed_placeholders_differ() {
        let empty = loaded(Vec::new());
        assert_eq!(empty.placeholder(), Some(&Placeholder::NoUsers));

        let mut failed = ViewState::new(Some(endpoint()));
        failed.update(Action::Refresh);
        let generation = failed.generation();
        failed.update(Action::ListLoaded {
            generation,
            result: Err(FetchError::MalformedResponse("boom".into())),
        });
        let failed_placeholder = failed.placeholder().unwrap();
        assert!(matches!(failed_placeholder, Placeholder::LoadFailed(_)));
        assert_ne!(
            failed_placeholder.to_string(),
            Placeholder::NoUsers.to_string()
        );
    }

    #[test]
    fn test_failed_load_replaces_prior_rows() {
        let mut state = ann_and_bo();
        state.update(Action::Refresh);
        let generation = state.generation();
        state.update(Action::ListLoaded {
            generation,
            result: Err(FetchError::Server {
                status: 500,
                message: "down".into(),
            }),
        });
        assert!(state.rows().is_empty());
        assert!(state.placeholder().unwrap().to_string().contains("down"));
    }

    #[test]
    fn test_no_endpoint_refresh_issues_no_calls() {
        let mut state = ViewState::new(None);
        let effects = state.update(Action::Refresh);
        assert!(effects.is_empty());
        assert_eq!(state.placeholder(), Some(&Placeholder::NoEndpoint));
    }

    #[test]
    fn test_clearing_endpoint_shows_placeholder() {
        let mut state = ann_and_bo();
        let effects = state.update(Action::SelectEndpoint(None));
        assert!(effects.is_empty());
        assert_eq!(state.placeholder(), Some(&Placeholder::NoEndpoint));
    }

    #[test]
    fn test_endpoint_change_refreshes_against_new_endpoint() {
        let mut state = ann_and_bo();
        let effects = state.update(Action::SelectEndpoint(Some(other_endpoint())));
        assert_eq!(
            effects,
            vec![Effect::FetchList {
                generation: state.generation(),
                endpoint: other_endpoint(),
            }]
        );
    }

    #[test]
    fn test_stale_list_result_is_dropped() {
        let mut state = ViewState::new(Some(endpoint()));
        state.update(Action::Refresh);
        let first = state.generation();
        state.update(Action::SelectEndpoint(Some(other_endpoint())));
        let second = state.generation();
        assert!(second > first);

        state.update(Action::ListLoaded {
            generation: second,
            result: Ok(vec![User::new(9, "New")]),
        });
        state.update(Action::ListLoaded {
            generation: first,
            result: Ok(vec![User::new(1, "Old")]),
        });

        assert_eq!(state.rows().len(), 1);
        assert_eq!(state.rows()[0].user.name, "New");
    }

    #[test]
    fn test_edit_then_cancel_restores_name() {
        let mut state = ann_and_bo();
        let id = UserId::from(1);
        assert!(state.update(Action::EditClicked(id.clone())).is_empty());
        assert_eq!(
            state.rows()[0].mode,
            RowMode::Editing {
                draft: "Ann".into()
            }
        );
        state.update(Action::DraftChanged(id.clone(), "Annie".into()));
        assert_eq!(state.rows()[0].shown_name(), "Annie");

        assert!(state.update(Action::CancelClicked(id)).is_empty());
        assert_eq!(state.rows()[0].mode, RowMode::Viewing);
        assert_eq!(state.rows()[0].shown_name(), "Ann");
    }

    #[test]
    fn test_save_unchanged_draft_is_local() {
        let mut state = ann_and_bo();
        let id = UserId::from(2);
        state.update(Action::EditClicked(id.clone()));
        state.update(Action::DraftChanged(id.clone(), "Bo".into()));
        assert!(state.update(Action::SaveClicked(id)).is_empty());
        assert_eq!(state.rows()[1].mode, RowMode::Viewing);
    }

    #[test]
    fn test_save_blank_draft_reverts_silently() {
        let mut state = ann_and_bo();
        let id = UserId::from(2);
        state.update(Action::EditClicked(id.clone()));
        state.update(Action::DraftChanged(id.clone(), "   ".into()));
        assert!(state.update(Action::SaveClicked(id)).is_empty());
        assert_eq!(state.rows()[1].shown_name(), "Bo");
        assert!(state.notices().is_empty());
    }

    #[test]
    fn test_save_changed_draft_requests_trimmed_update() {
        let mut state = ann_and_bo();
        let id = UserId::from(2);
        state.update(Action::EditClicked(id.clone()));
        state.update(Action::DraftChanged(id.clone(), "  Bob ".into()));
        let effects = state.update(Action::SaveClicked(id.clone()));
        assert_eq!(
            effects,
            vec![Effect::Mutate {
                endpoint: endpoint(),
                kind: MutationKind::Update {
                    id,
                    name: "Bob".into()
                },
            }]
        );
        assert_eq!(state.rows()[1].mode, RowMode::Viewing);
    }

    #[test]
    fn test_save_without_editing_does_nothing() {
        let mut state = ann_and_bo();
        assert!(state.update(Action::SaveClicked(UserId::from(1))).is_empty());
    }

    #[test]
    fn test_refresh_resets_edits_on_every_row() {
        let mut state = ann_and_bo();
        state.update(Action::EditClicked(UserId::from(1)));
        state.update(Action::EditClicked(UserId::from(2)));

        let effects = state.update(Action::MutationSettled {
            kind: MutationKind::Delete {
                id: UserId::from(3),
            },
            result: Ok(()),
        });
        assert_eq!(effects.len(), 1);
        let generation = state.generation();
        state.update(Action::ListLoaded {
            generation,
            result: Ok(vec![User::new(1, "Ann"), User::new(2, "Bo")]),
        });
        assert!(state.rows().iter().all(|row| !row.is_editing()));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut state = ann_and_bo();
        state.update(Action::CreateInputChanged("   ".into()));
        assert!(state.update(Action::SubmitCreate).is_empty());
        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_create_rejects_missing_endpoint() {
        let mut state = ViewState::new(None);
        state.update(Action::CreateInputChanged("Ann".into()));
        assert!(state.update(Action::SubmitCreate).is_empty());
        assert_eq!(state.take_notices().len(), 1);
        assert_eq!(state.create_input(), "Ann");
    }

    #[test]
    fn test_create_clears_input_after_success() {
        let mut state = ann_and_bo();
        state.update(Action::CreateInputChanged(" Cy ".into()));
        let effects = state.update(Action::SubmitCreate);
        assert_eq!(
            effects,
            vec![Effect::Mutate {
                endpoint: endpoint(),
                kind: MutationKind::Create { name: "Cy".into() },
            }]
        );

        let effects = state.update(Action::MutationSettled {
            kind: MutationKind::Create { name: "Cy".into() },
            result: Ok(()),
        });
        assert!(matches!(effects.as_slice(), [Effect::FetchList { .. }]));
        assert_eq!(state.create_input(), "");
        let notices = state.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(notices[0].message, "Created user 'Cy'");
    }

    #[test]
    fn test_failed_mutation_is_surfaced_and_still_refreshes() {
        let mut state = ann_and_bo();
        let effects = state.update(Action::MutationSettled {
            kind: MutationKind::Delete {
                id: UserId::from(2),
            },
            result: Err(FetchError::Server {
                status: 404,
                message: "gone".into(),
            }),
        });
        assert!(matches!(effects.as_slice(), [Effect::FetchList { .. }]));
        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.contains("delete user 2"));
    }

    #[test]
    fn test_find_row_by_typed_id() {
        let state = ann_and_bo();
        assert_eq!(state.find_row("2").unwrap().user.name, "Bo");
        assert!(state.find_row("7").is_none());
    }
}
