use std::io::{self, Write};

use crate::config::Config;
use crate::error::{DirectoryError, Result};
use crate::types::{DeleteStyle, Endpoint};

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("User Directory Configuration");
    println!("============================\n");

    let url = prompt("Directory URL (e.g. https://directory.example.com/users): ")?;
    if url.is_empty() {
        return Err(DirectoryError::NoEndpoint);
    }
    // Validate the same way an ad-hoc --endpoint would be.
    let url = Config::default()
        .resolve_endpoint(&url, DeleteStyle::Form)?
        .url;

    let name = prompt("Endpoint name [primary]: ")?;
    let name = if name.is_empty() {
        "primary".to_string()
    } else {
        name
    };

    let delete_style = match prompt("Does it take delete ids as a query parameter? [y/N] ")? {
        answer if answer.eq_ignore_ascii_case("y") => DeleteStyle::Query,
        _ => DeleteStyle::Form,
    };

    let config = Config {
        default_endpoint: Some(name.clone()),
        endpoints: vec![Endpoint::new(name, url, delete_style)],
    };
    let contents = toml::to_string_pretty(&config).map_err(|e| DirectoryError::ConfigWrite {
        path: config_path.clone(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DirectoryError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, contents).map_err(|e| DirectoryError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'userdir' commands!");

    Ok(())
}
