use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::object::Cell;
use tabled::settings::{Modify, Span, Style};

use crate::types::UserId;

use super::model::{Body, Row, ViewState};

const COLUMNS: [&str; 3] = ["ID", "Name", "Actions"];

fn actions(row: &Row) -> &'static str {
    if row.is_editing() {
        "Save | Cancel"
    } else {
        "Edit | Delete"
    }
}

fn name_cell(row: &Row) -> String {
    if row.is_editing() {
        format!("[{}]", row.shown_name())
    } else {
        row.shown_name().to_string()
    }
}

/// Render the view as a table. Placeholders occupy a single row spanning
/// every column.
pub fn table(state: &ViewState) -> String {
    let mut builder = Builder::default();
    builder.push_record(COLUMNS);

    let spans_placeholder = match state.body() {
        Body::Placeholder(placeholder) => {
            builder.push_record([placeholder.to_string(), String::new(), String::new()]);
            true
        }
        Body::Rows(rows) => {
            for row in rows {
                builder.push_record([
                    row.user.id.to_string(),
                    name_cell(row),
                    actions(row).to_string(),
                ]);
            }
            false
        }
    };

    let mut table = builder.build();
    table.with(Style::rounded());
    if spans_placeholder {
        table.with(Modify::new(Cell::new(1, 0)).with(Span::column(3)));
    }
    table.to_string()
}

#[derive(Serialize)]
struct JsonRow<'a> {
    id: &'a UserId,
    name: &'a str,
    editing: bool,
}

#[derive(Serialize)]
struct JsonView<'a> {
    endpoint: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    users: Vec<JsonRow<'a>>,
}

/// Machine-readable form of the same view.
pub fn json(state: &ViewState) -> serde_json::Value {
    let view = JsonView {
        endpoint: state.endpoint().map(|e| e.url.as_str()),
        placeholder: state.placeholder().map(ToString::to_string),
        users: state
            .rows()
            .iter()
            .map(|row| JsonRow {
                id: &row.user.id,
                name: row.shown_name(),
                editing: row.is_editing(),
            })
            .collect(),
    };
    serde_json::to_value(view).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::types::{DeleteStyle, Endpoint, User};
    use crate::view::model::Action;

    fn loaded(result: Result<Vec<User>, FetchError>) -> ViewState {
        let mut state = ViewState::new(Some(Endpoint::new(
            "test",
            "http://directory.test/users",
            DeleteStyle::Form,
        )));
        state.update(Action::Refresh);
        let generation = state.generation();
        state.update(Action::ListLoaded { generation, result });
        state
    }

    #[test]
    fn test_table_lists_users() {
        let state = loaded(Ok(vec![User::new(1, "Ann"), User::new(2, "Bo")]));
        let rendered = table(&state);
        assert!(rendered.contains("ID"));
        assert!(rendered.contains("Ann"));
        assert!(rendered.contains("Bo"));
        assert!(rendered.contains("Edit | Delete"));
        assert!(rendered.find("Ann").unwrap() < rendered.find("Bo").unwrap());
    }

    #[test]
    fn test_table_shows_placeholders() {
        assert!(table(&loaded(Ok(Vec::new()))).contains("No users found"));
        let failed = table(&loaded(Err(FetchError::MalformedResponse("bad".into()))));
        assert!(failed.contains("Failed to load users"));
        assert!(table(&ViewState::new(None)).contains("No endpoint selected"));
    }

    #[test]
    fn test_table_marks_editing_rows() {
        let mut state = loaded(Ok(vec![User::new(1, "Ann")]));
        state.update(Action::EditClicked(UserId::from(1)));
        let rendered = table(&state);
        assert!(rendered.contains("[Ann]"));
        assert!(rendered.contains("Save | Cancel"));
    }

    #[test]
    fn test_json_view() {
        let state = loaded(Ok(vec![User::new(1, "Ann"), User::new("b", "Bo")]));
        let value = json(&state);
        assert_eq!(value["endpoint"], "http://directory.test/users");
        assert_eq!(value["users"][0]["id"], 1);
        assert_eq!(value["users"][1]["id"], "b");
        assert_eq!(value["users"][1]["name"], "Bo");
        assert!(value.get("placeholder").is_none());

        let empty = json(&loaded(Ok(Vec::new())));
        assert_eq!(empty["placeholder"], "No users found");
        assert_eq!(empty["users"].as_array().unwrap().len(), 0);
    }
}
