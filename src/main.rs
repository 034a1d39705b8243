use candidate_search::config::{get_config, init_config};
use candidate_search::context::SessionContext;
use candidate_search::error::Error;
use candidate_search::services::session_service::{Presenter, SearchSessionState, SessionPhase};
use candidate_search::AppState;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Prints every session transition to the console.
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn present(&self, state: &SearchSessionState) {
        match state.phase {
            SessionPhase::Idle => println!("Cleared."),
            SessionPhase::Searching => println!("Searching..."),
            SessionPhase::Error => {
                println!(
                    "Error: {}",
                    state.error.as_deref().unwrap_or("unknown error")
                );
            }
            SessionPhase::Results => render_results(state),
        }
    }
}

fn render_results(state: &SearchSessionState) {
    let Some(page) = &state.page else {
        return;
    };
    if page.items.is_empty() {
        println!("No candidates found.");
        return;
    }
    for candidate in &page.items {
        let email = candidate.email.as_deref().unwrap_or("—");
        println!("  {} <{}>", candidate.display_name(), email);
        if let Some(preview) = candidate.headline_preview() {
            println!("    {}", preview);
        }
        let skills = candidate.skill_names();
        if !skills.is_empty() {
            println!("    Skills: {}", skills.join(", "));
        }
        if let Some(job_title) = &candidate.job_title {
            let company = candidate
                .company
                .as_deref()
                .map(|c| format!(" @ {}", c))
                .unwrap_or_default();
            println!("    Applied for: {}{}", job_title, company);
        }
    }
    println!(
        "Page {} of {} ({} total){}{}",
        page.page_number,
        page.total_pages,
        page.total_count,
        if state.can_go_previous() { " [/prev]" } else { "" },
        if state.can_go_next() { " [/next]" } else { "" },
    );
}

fn print_help() {
    println!("Commands:");
    println!("  <text>          search the candidate directory");
    println!("  /applied <text> search candidates who applied to your jobs");
    println!("  /browse         list the directory unfiltered");
    println!("  /next /prev     page through the current results");
    println!("  /clear          reset the current view");
    println!("  /quit           exit");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let ctx = match &config.auth_token {
        Some(token) => SessionContext::authenticated(token.clone()),
        None => SessionContext::anonymous(),
    };
    if !ctx.is_authenticated() {
        println!("No AUTH_TOKEN set; searches will ask you to log in.");
    }

    let presenter: Arc<dyn Presenter> = Arc::new(ConsolePresenter);
    let state = AppState::new(ctx);
    let directory = state.directory.with_presenter(presenter.clone());
    let applied = state.applied.with_presenter(presenter);

    info!("candidate search console, API at {}", config.api_base_url);
    print_help();

    // The "current view": /next, /prev and /clear act on whichever surface
    // was used last.
    let mut current = &directory;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let outcome = if input.is_empty() {
            continue;
        } else if input == "/quit" {
            break;
        } else if input == "/help" {
            print_help();
            continue;
        } else if input == "/clear" {
            current.clear();
            continue;
        } else if input == "/browse" {
            current = &directory;
            current.browse().await
        } else if input == "/next" {
            current.next_page().await
        } else if input == "/prev" {
            current.previous_page().await
        } else if let Some(query) = input.strip_prefix("/applied") {
            current = &applied;
            current.submit(query).await
        } else {
            current = &directory;
            current.submit(input).await
        };

        if let Err(Error::Unauthorized) = outcome {
            // The redirect-to-login collaborator, console edition.
            println!("Not authenticated. Set AUTH_TOKEN and restart.");
        }
    }

    Ok(())
}
