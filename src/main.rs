use clap::Parser;
use pageforge::cli::commands::{
    cmd_catalog, cmd_data, cmd_export, cmd_locator, cmd_methods, cmd_page, cmd_render,
    cmd_suggest, cmd_testcase,
};
use pageforge::cli::config::{Cli, Commands, load_config};
use pageforge::store::persistence::JsonStorage;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.data_dir.clone());
    let storage = JsonStorage::new(&data_dir);
    let trace_file = config.storage.trace_file.clone();
    let trace_file = trace_file.as_deref();

    // Resolve Ollama settings: CLI > config > defaults
    let ollama_endpoint = cli
        .ollama_endpoint
        .as_deref()
        .or(config.ollama.endpoint.as_deref())
        .unwrap_or("http://localhost:11434/api/generate")
        .to_string();
    let ollama_model = cli
        .ollama_model
        .as_deref()
        .or(config.ollama.model.as_deref())
        .unwrap_or("qwen2.5:1.5b")
        .to_string();

    match cli.command {
        Commands::Page { action } => {
            cmd_page(action, &storage, trace_file, cli.verbose)?;
        }
        Commands::Locator { action } => {
            cmd_locator(action, &storage, trace_file, cli.verbose)?;
        }
        Commands::Methods { action } => {
            cmd_methods(
                action,
                &storage,
                trace_file,
                cli.verbose,
                &ollama_endpoint,
                &ollama_model,
            )?;
        }
        Commands::Data { action } => {
            cmd_data(action, &storage, trace_file, cli.verbose)?;
        }
        Commands::Testcase { action } => {
            cmd_testcase(action, &storage, trace_file, cli.verbose)?;
        }
        Commands::Render { page, output } => {
            cmd_render(&page, output.as_deref(), &storage)?;
        }
        Commands::Export { output_dir } => {
            cmd_export(&output_dir, &storage, cli.verbose)?;
        }
        Commands::Catalog { page } => {
            cmd_catalog(page.as_deref(), &storage)?;
        }
        Commands::Suggest {
            page,
            html,
            html_file,
            url,
            apply_as,
        } => {
            cmd_suggest(
                &page,
                html,
                html_file,
                url,
                apply_as,
                &storage,
                trace_file,
                cli.verbose,
                &ollama_endpoint,
                &ollama_model,
            )?;
        }
    }

    Ok(())
}
