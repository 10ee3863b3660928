use tabled::Tabled;

use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::types::Endpoint;

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Delete")]
    delete_style: String,
    #[tabled(rename = "Default")]
    default: String,
}

impl EndpointRow {
    fn new(endpoint: &Endpoint, default: Option<&str>) -> Self {
        Self {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            delete_style: endpoint.delete_style.to_string(),
            default: if default == Some(endpoint.name.as_str()) {
                "*".to_string()
            } else {
                String::new()
            },
        }
    }
}

pub fn list(config: &Config) -> Result<()> {
    if config.endpoints.is_empty() {
        output::print_message("No endpoints configured. Run 'userdir init' to add one.");
        return Ok(());
    }

    let default = config.default_endpoint.as_deref();
    output::print_table(&config.endpoints, |endpoint| {
        EndpointRow::new(endpoint, default)
    });

    Ok(())
}
