use crate::ai::backend::OllamaBackend;
use crate::ai::flows::{
    GenerateMethodsRequest, SuggestLocatorRequest, generate_methods, suggest_locator,
};
use crate::cli::config::{
    DataAction, LocatorAction, MethodsAction, PageAction, TestCaseAction,
};
use crate::codegen::catalog::{build_catalog, parse_catalog_key, scan_methods};
use crate::codegen::identifier::to_camel_case;
use crate::codegen::java::{class_name, render_page_class};
use crate::error::StudioError;
use crate::model::locator::LocatorKind;
use crate::store::persistence::JsonStorage;
use crate::store::store::{LocatorUpdate, PageStore, StepRef, TestDataUpdate};
use crate::trace::logger::MutationTrace;

// ============================================================================
// Shared helpers
// ============================================================================

fn open_store(storage: &JsonStorage, trace_file: Option<&str>) -> PageStore {
    let mut store = storage.load_store();
    if let Some(path) = trace_file {
        store.subscribe(Box::new(MutationTrace::new(path)));
    }
    store
}

fn commit(store: &mut PageStore, storage: &JsonStorage, verbose: u8) -> Result<(), StudioError> {
    let written = store.commit(storage)?;
    if verbose > 0 && !written.is_empty() {
        eprintln!("Saved: {}", written.join(", "));
    }
    Ok(())
}

/// Resolve method text given inline or as a file path.
fn read_text_input(text: Option<String>, file: Option<String>) -> Result<String, StudioError> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path).map_err(|e| StudioError::Storage {
            path,
            source: e,
        }),
        (None, None) => Err(StudioError::InvalidInput(
            "provide --text or --file".to_string(),
        )),
    }
}

// ============================================================================
// page subcommand
// ============================================================================

pub fn cmd_page(
    action: PageAction,
    storage: &JsonStorage,
    trace_file: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(storage, trace_file);

    match action {
        PageAction::Add { name } => {
            let page_id = store.add_page(&name)?;
            commit(&mut store, storage, verbose)?;
            println!("Created page \"{}\" ({})", name, page_id);
        }
        PageAction::Rename { page, name } => {
            store.update_page_name(&page, &name)?;
            commit(&mut store, storage, verbose)?;
            println!("Renamed page '{}' to \"{}\"", page, name);
        }
        PageAction::Remove { page } => {
            store.delete_page(&page)?;
            commit(&mut store, storage, verbose)?;
            println!("Deleted page '{}'", page);
        }
        PageAction::List => {
            for page in store.pages() {
                println!(
                    "{}  {} ({} locators)",
                    page.id,
                    page.name,
                    page.locators.len()
                );
            }
        }
        PageAction::Show { page } => {
            let page = store
                .page(&page)
                .ok_or_else(|| StudioError::PageNotFound(page))?;

            println!("=== {} ({}) ===", page.name, page.id);
            if let Some(url) = &page.page_url {
                println!("URL: {}", url);
            }

            println!("Locators:");
            for locator in &page.locators {
                println!(
                    "  [{}] {} ({} = \"{}\") -> {}",
                    locator.id,
                    locator.name,
                    locator.kind.as_str(),
                    locator.value,
                    to_camel_case(&locator.name)
                );
            }
            if page.locators.is_empty() {
                println!("  (none)");
            }

            let methods = page
                .generated_methods
                .as_deref()
                .map(scan_methods)
                .unwrap_or_default();
            println!("Methods in catalog: {}", methods.len());
            for method in &methods {
                println!("  - {}", method);
            }
        }
        PageAction::SetSource { page, file } => {
            let html = std::fs::read_to_string(&file).map_err(|e| StudioError::Storage {
                path: file,
                source: e,
            })?;
            store.update_page_source(&page, &html)?;
            commit(&mut store, storage, verbose)?;
            println!("Stored page source for '{}'", page);
        }
        PageAction::SetUrl { page, url } => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(
                    StudioError::InvalidInput(format!("'{}' is not a valid URL", url)).into(),
                );
            }
            store.update_page_url(&page, &url)?;
            commit(&mut store, storage, verbose)?;
            println!("Stored page URL for '{}'", page);
        }
    }

    Ok(())
}

// ============================================================================
// locator subcommand
// ============================================================================

pub fn cmd_locator(
    action: LocatorAction,
    storage: &JsonStorage,
    trace_file: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(storage, trace_file);

    match action {
        LocatorAction::Add {
            page,
            name,
            kind,
            value,
        } => {
            let kind = LocatorKind::parse_loose(&kind);
            let locator_id = store.add_locator(&page, &name, kind, &value)?;
            commit(&mut store, storage, verbose)?;
            println!(
                "Added locator \"{}\" ({}) as field {}",
                name,
                locator_id,
                to_camel_case(&name)
            );
        }
        LocatorAction::Update {
            page,
            locator,
            name,
            kind,
            value,
        } => {
            let update = LocatorUpdate {
                name,
                kind: kind.as_deref().map(LocatorKind::parse_loose),
                value,
            };
            store.update_locator(&page, &locator, update)?;
            commit(&mut store, storage, verbose)?;
            println!("Updated locator '{}' on page '{}'", locator, page);
        }
        LocatorAction::Remove { page, locator } => {
            store.delete_locator(&page, &locator)?;
            commit(&mut store, storage, verbose)?;
            println!("Deleted locator '{}' from page '{}'", locator, page);
        }
    }

    Ok(())
}

// ============================================================================
// methods subcommand
// ============================================================================

pub fn cmd_methods(
    action: MethodsAction,
    storage: &JsonStorage,
    trace_file: Option<&str>,
    verbose: u8,
    ollama_endpoint: &str,
    ollama_model: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(storage, trace_file);

    match action {
        MethodsAction::Show { page } => {
            let page = store
                .page(&page)
                .ok_or_else(|| StudioError::PageNotFound(page))?;
            match page.generated_methods.as_deref() {
                Some(methods) if !methods.is_empty() => println!("{}", methods),
                _ => println!("(no methods yet)"),
            }
        }
        MethodsAction::Set { page, file, text } => {
            let methods = read_text_input(text, file)?;
            store.update_page_methods(&page, &methods)?;
            commit(&mut store, storage, verbose)?;
            println!("Replaced methods on page '{}'", page);
        }
        MethodsAction::Append { page, file, text } => {
            let methods = read_text_input(text, file)?;
            store.append_page_methods(&page, &methods)?;
            commit(&mut store, storage, verbose)?;
            println!("Appended methods to page '{}'", page);
        }
        MethodsAction::Generate { page, description } => {
            let (page_name, locators) = {
                let page = store
                    .page(&page)
                    .ok_or_else(|| StudioError::PageNotFound(page.clone()))?;
                (page.name.clone(), page.locators.clone())
            };

            let backend = OllamaBackend::new(ollama_endpoint, ollama_model);
            let request = GenerateMethodsRequest {
                page_name,
                locators,
                description,
            };

            match generate_methods(&backend, &request) {
                Ok(methods) => {
                    store.append_page_methods(&page, &methods)?;
                    commit(&mut store, storage, verbose)?;
                    println!("Added generated methods to page '{}'", page);
                }
                Err(e) => {
                    eprintln!("AI method generation failed: {}", e);
                }
            }
        }
    }

    Ok(())
}

// ============================================================================
// render / export subcommands
// ============================================================================

pub fn cmd_render(
    page_id: &str,
    output: Option<&str>,
    storage: &JsonStorage,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = storage.load_store();
    let page = store
        .page(page_id)
        .ok_or_else(|| StudioError::PageNotFound(page_id.to_string()))?;

    let code = render_page_class(page, page.generated_methods.as_deref());

    match output {
        Some(path) => {
            std::fs::write(path, &code)?;
            println!("Wrote {}", path);
        }
        None => println!("{}", code),
    }

    Ok(())
}

pub fn cmd_export(
    output_dir: &str,
    storage: &JsonStorage,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = storage.load_store();

    std::fs::create_dir_all(output_dir)?;

    for page in store.pages() {
        let code = render_page_class(page, page.generated_methods.as_deref());
        let filename = format!("{}.java", class_name(&page.name));
        let path = std::path::Path::new(output_dir).join(&filename);
        std::fs::write(&path, &code)?;
        if verbose > 0 {
            eprintln!("  Wrote: {}", path.display());
        }
    }

    println!(
        "Exported {} page classes to {}/",
        store.pages().len(),
        output_dir
    );
    Ok(())
}

// ============================================================================
// catalog subcommand
// ============================================================================

pub fn cmd_catalog(
    page_filter: Option<&str>,
    storage: &JsonStorage,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = storage.load_store();
    let entries = build_catalog(store.pages());

    let mut shown = 0;
    for entry in &entries {
        if page_filter.is_some_and(|p| p != entry.page_id) {
            continue;
        }
        println!("{}  [{}]", entry.label(), entry.key());
        shown += 1;
    }

    println!("{} methods available", shown);
    Ok(())
}

// ============================================================================
// suggest subcommand
// ============================================================================

pub fn cmd_suggest(
    page_id: &str,
    html: Option<String>,
    html_file: Option<String>,
    url: Option<String>,
    apply_as: Option<String>,
    storage: &JsonStorage,
    trace_file: Option<&str>,
    verbose: u8,
    ollama_endpoint: &str,
    ollama_model: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(storage, trace_file);

    let (page_source, page_url) = {
        let page = store
            .page(page_id)
            .ok_or_else(|| StudioError::PageNotFound(page_id.to_string()))?;
        (page.page_source.clone(), page.page_url.clone())
    };

    let html = match read_text_input(html, html_file) {
        Ok(html) => html,
        Err(StudioError::InvalidInput(_)) => {
            return Err(
                StudioError::InvalidInput("provide --html or --html-file".to_string()).into(),
            );
        }
        Err(e) => return Err(e.into()),
    };

    let page_source = page_source.ok_or_else(|| {
        StudioError::InvalidInput(format!(
            "page '{}' has no stored source; run 'page set-source' first",
            page_id
        ))
    })?;

    let url = match url.or(page_url) {
        Some(url) => url,
        None => {
            return Err(StudioError::InvalidInput(format!(
                "page '{}' has no stored URL; pass --url or run 'page set-url'",
                page_id
            ))
            .into());
        }
    };

    let backend = OllamaBackend::new(ollama_endpoint, ollama_model);
    let request = SuggestLocatorRequest {
        html,
        page_source,
        url,
    };

    let suggestion = match suggest_locator(&backend, &request) {
        Ok(suggestion) => suggestion,
        Err(e) => {
            eprintln!("AI suggestion failed: {}", e);
            return Ok(());
        }
    };

    println!("Locator:    {}", suggestion.locator);
    println!("Type:       {}", suggestion.locator_type);
    println!("Confidence: {:.2}", suggestion.confidence);
    println!("Reason:     {}", suggestion.explanation);

    if let Some(name) = apply_as {
        let kind = LocatorKind::parse_loose(&suggestion.locator_type);
        let locator_id = store.add_locator(page_id, &name, kind, &suggestion.locator)?;
        commit(&mut store, storage, verbose)?;
        println!(
            "Added locator \"{}\" ({}) as field {}",
            name,
            locator_id,
            to_camel_case(&name)
        );
    }

    Ok(())
}

// ============================================================================
// data subcommand
// ============================================================================

pub fn cmd_data(
    action: DataAction,
    storage: &JsonStorage,
    trace_file: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(storage, trace_file);

    match action {
        DataAction::Add { key, value, scope } => {
            let id = store.add_test_data(&key, &value, &scope)?;
            commit(&mut store, storage, verbose)?;
            println!("Added test data \"{}\" ({})", key, id);
        }
        DataAction::Update {
            id,
            key,
            value,
            scope,
        } => {
            store.update_test_data(&id, TestDataUpdate { key, value, scope })?;
            commit(&mut store, storage, verbose)?;
            println!("Updated test data '{}'", id);
        }
        DataAction::Remove { id } => {
            store.delete_test_data(&id)?;
            commit(&mut store, storage, verbose)?;
            println!("Deleted test data '{}'", id);
        }
        DataAction::List => {
            for entry in store.test_data() {
                println!(
                    "{}  {} = {} [{}]",
                    entry.id, entry.key, entry.value, entry.scope
                );
            }
        }
    }

    Ok(())
}

// ============================================================================
// testcase subcommand
// ============================================================================

/// Resolve raw step arguments into denormalized step references.
///
/// Accepts full catalog keys (`pageId::pageName::methodName`) as-is, with
/// no integrity check (dangling references are tolerated), or the short
/// form `pageId::methodName`, which requires the page to exist so its name
/// can be cached into the step.
fn resolve_steps(raw: &[String], store: &PageStore) -> Result<Vec<StepRef>, StudioError> {
    let mut steps = Vec::new();

    for arg in raw {
        if let Some((page_id, page_name, method_name)) = parse_catalog_key(arg) {
            steps.push(StepRef {
                page_id,
                page_name,
                method_name,
            });
            continue;
        }

        let mut parts = arg.splitn(2, "::");
        match (parts.next(), parts.next()) {
            (Some(page_id), Some(method_name)) => {
                let page = store
                    .page(page_id)
                    .ok_or_else(|| StudioError::PageNotFound(page_id.to_string()))?;
                steps.push(StepRef {
                    page_id: page_id.to_string(),
                    page_name: page.name.clone(),
                    method_name: method_name.to_string(),
                });
            }
            _ => {
                return Err(StudioError::InvalidInput(format!(
                    "step '{}' is not of the form pageId::pageName::methodName or pageId::methodName",
                    arg
                )));
            }
        }
    }

    Ok(steps)
}

pub fn cmd_testcase(
    action: TestCaseAction,
    storage: &JsonStorage,
    trace_file: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(storage, trace_file);

    match action {
        TestCaseAction::Create { name, steps } => {
            let steps = resolve_steps(&steps, &store)?;
            let id = store.add_test_case(&name, steps)?;
            commit(&mut store, storage, verbose)?;
            println!("Created test case \"{}\" ({})", name, id);
        }
        TestCaseAction::Update { id, name, steps } => {
            let name = match name {
                Some(name) => name,
                None => store
                    .test_case(&id)
                    .ok_or_else(|| StudioError::TestCaseNotFound(id.clone()))?
                    .name
                    .clone(),
            };
            let steps = resolve_steps(&steps, &store)?;
            store.update_test_case(&id, &name, steps)?;
            commit(&mut store, storage, verbose)?;
            println!("Updated test case '{}'", id);
        }
        TestCaseAction::Remove { id } => {
            store.delete_test_case(&id)?;
            commit(&mut store, storage, verbose)?;
            println!("Deleted test case '{}'", id);
        }
        TestCaseAction::List => {
            for case in store.test_cases() {
                let step_word = if case.steps.len() == 1 { "step" } else { "steps" };
                println!("{}  {} ({} {})", case.id, case.name, case.steps.len(), step_word);
            }
        }
        TestCaseAction::Show { id } => {
            let case = store
                .test_case(&id)
                .ok_or_else(|| StudioError::TestCaseNotFound(id))?;

            println!("=== {} ({}) ===", case.name, case.id);
            for (index, step) in case.steps.iter().enumerate() {
                println!(
                    "  {}. {}: {}",
                    index + 1,
                    step.page_name,
                    step.method_name
                );
            }
            if let Some(code) = &case.generated_code {
                println!("--- generated code ---");
                println!("{}", code);
            }
        }
        TestCaseAction::SaveCode { id, file, text } => {
            let code = read_text_input(text, file)?;
            store.save_test_case_code(&id, &code)?;
            commit(&mut store, storage, verbose)?;
            println!("Saved code for test case '{}'", id);
        }
    }

    Ok(())
}
