use std::path::PathBuf;

use axum::http::Method;
use clap::Parser;
use serde_json::{json, Value};

use content_redirect::config::{load_config, AppConfig};
use content_redirect::handlers::{ContentSelectionRedirect, HandlerInput, RewriteRedirect};
use content_redirect::negotiation::PreferenceList;
use content_redirect::routing::BaseUrl;

#[derive(Parser)]
#[command(name = "negotiate")]
#[command(about = "Show where a request would be redirected", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request method.
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Accept header value.
    #[arg(short, long)]
    accept: Option<String>,

    /// Request path, optionally with a query string.
    path: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    let base_url = BaseUrl::parse(&config.base_url)?;
    let method: Method = cli.method.to_uppercase().parse()?;
    let (path, query) = match cli.path.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (cli.path.clone(), None),
    };

    let target = base_url.target_for(&path);
    let Some(relative_path) = base_url.relative(&target) else {
        let outside = json!({ "error": format!("{target} is outside {}", base_url.as_str()), "status": 404 });
        println!("{}", serde_json::to_string_pretty(&outside)?);
        return Ok(());
    };
    let input = HandlerInput {
        method,
        relative_path,
        query,
        preferences: PreferenceList::from_accept_header(cli.accept.as_deref()),
        path,
    };

    println!("{}", serde_json::to_string_pretty(&decide(&config, base_url, &input)?)?);
    Ok(())
}

fn decide(config: &AppConfig, base_url: BaseUrl, input: &HandlerInput) -> Result<Value, Box<dyn std::error::Error>> {
    if !config.redirects.rules.is_empty() {
        let rewrite = RewriteRedirect::from_config(&config.redirects, base_url.clone())?;
        if let Ok(location) = rewrite.location(input) {
            return Ok(json!({
                "handler": "rewrite_redirect",
                "status": rewrite.status(),
                "location": location,
            }));
        }
    }

    if !config.content_selection.enabled {
        return Ok(json!({ "error": "Content selection is disabled", "status": 404 }));
    }

    let selection = ContentSelectionRedirect::from_config(&config.content_selection, base_url)?;
    Ok(match selection.evaluate(input) {
        Ok(decision) => {
            let mut value = serde_json::to_value(&decision)?;
            value["handler"] = json!("content_selection_redirect");
            value
        }
        Err(e) => json!({ "error": e.to_string(), "status": e.status_code().as_u16() }),
    })
}
