use crate::client::Directory;
use crate::error::{DirectoryError, Result};
use crate::output;
use crate::types::UserId;
use crate::view::{Placeholder, Session};

/// Print whatever the last action left behind: notices first, then the list.
fn show<D: Directory>(session: &mut Session<D>) {
    output::print_notices(&session.take_notices());
    output::print_view(session.state());
}

/// Load the list and find the row an operator referred to by id.
async fn locate<D: Directory>(session: &mut Session<D>, typed: &str) -> Result<Option<UserId>> {
    if session.state().endpoint().is_none() {
        return Err(DirectoryError::NoEndpoint);
    }

    session.refresh().await;
    if let Some(row) = session.state().find_row(typed) {
        return Ok(Some(row.user.id.clone()));
    }

    // A failed load already explains itself through the placeholder.
    if matches!(session.state().placeholder(), Some(Placeholder::LoadFailed(_))) {
        show(session);
        return Ok(None);
    }
    Err(DirectoryError::UserNotFound(typed.to_string()))
}

pub async fn list<D: Directory>(session: &mut Session<D>) -> Result<()> {
    session.refresh().await;
    show(session);
    Ok(())
}

pub async fn create<D: Directory>(session: &mut Session<D>, name: &str) -> Result<()> {
    session.submit_create(name).await;
    show(session);
    Ok(())
}

pub async fn rename<D: Directory>(session: &mut Session<D>, id: &str, name: &str) -> Result<()> {
    if let Some(id) = locate(session, id).await? {
        session.rename(id, name).await;
        show(session);
    }
    Ok(())
}

pub async fn delete<D: Directory>(session: &mut Session<D>, id: &str) -> Result<()> {
    if let Some(id) = locate(session, id).await? {
        session.delete(id).await;
        show(session);
    }
    Ok(())
}
