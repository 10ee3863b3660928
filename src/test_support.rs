//! In-memory directory shared by the view and command tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::Directory;
use crate::error::FetchError;
use crate::types::{DeleteStyle, Endpoint, User, UserId};
use crate::view::Session;

pub const URL: &str = "http://directory.test/users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(String),
    Create(String),
    Update(UserId, String),
    Delete(UserId),
}

/// Directory that keeps users in memory and records every call it receives.
#[derive(Default)]
pub struct FakeDirectory {
    users: Mutex<Vec<User>>,
    calls: Mutex<Vec<Call>>,
    fail_list: bool,
    fail_mutations: bool,
}

impl FakeDirectory {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    /// Every list call fails as if the body were not JSON.
    pub fn failing_list(self) -> Self {
        Self {
            fail_list: true,
            ..self
        }
    }

    /// Every mutation is rejected with a server error.
    pub fn failing_mutations(self) -> Self {
        Self {
            fail_mutations: true,
            ..self
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn forget_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_result(&self) -> Result<(), FetchError> {
        if self.fail_mutations {
            Err(FetchError::Server {
                status: 500,
                message: "mutation rejected".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn list(&self, endpoint: &Endpoint) -> Result<Vec<User>, FetchError> {
        self.record(Call::List(endpoint.url.clone()));
        if self.fail_list {
            return Err(FetchError::MalformedResponse("not json".into()));
        }
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create(&self, _endpoint: &Endpoint, name: &str) -> Result<(), FetchError> {
        self.record(Call::Create(name.to_string()));
        self.mutation_result()?;
        let mut users = self.users.lock().unwrap();
        let next = i64::try_from(users.len()).unwrap() + 1;
        users.push(User::new(next, name));
        Ok(())
    }

    async fn update(&self, _endpoint: &Endpoint, id: &UserId, name: &str) -> Result<(), FetchError> {
        self.record(Call::Update(id.clone(), name.to_string()));
        self.mutation_result()?;
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == *id) {
            user.name = name.to_string();
        }
        Ok(())
    }

    async fn delete(&self, _endpoint: &Endpoint, id: &UserId) -> Result<(), FetchError> {
        self.record(Call::Delete(id.clone()));
        self.mutation_result()?;
        self.users.lock().unwrap().retain(|u| u.id != *id);
        Ok(())
    }
}

pub fn endpoint() -> Endpoint {
    Endpoint::new("test", URL, DeleteStyle::Form)
}

pub fn ann_and_bo() -> FakeDirectory {
    FakeDirectory::with_users(vec![User::new(1, "Ann"), User::new(2, "Bo")])
}

/// Session on [`endpoint`] with its first list already loaded and the call
/// log emptied.
pub async fn loaded(directory: FakeDirectory) -> Session<FakeDirectory> {
    let mut session = Session::new(directory, Some(endpoint()));
    session.refresh().await;
    session.directory().forget_calls();
    session
}

pub fn calls(session: &Session<FakeDirectory>) -> Vec<Call> {
    session.directory().calls()
}
