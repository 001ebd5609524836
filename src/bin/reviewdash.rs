//! Interactive dashboard for the AI code-review backend.
//!
//! This binary is a terminal stand-in for the browser dashboard: one REPL
//! with three modes (chat, repository review, file analysis) sharing a single
//! result/error display.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a local backend
//! reviewdash
//!
//! # Absolute backend URL
//! reviewdash --base-url https://review.example.com
//!
//! # Relative prefix resolved against an origin
//! reviewdash --base-url /api --origin https://dashboard.example.com
//!
//! # Settings from a YAML file, without colors
//! reviewdash --config dashboard.yaml --no-color
//! ```
//!
//! # Commands
//!
//! - `/mode chat|repo|files` - Switch mode
//! - `/url <url>` - Set the repository URL
//! - `/add <path>...` - Select files for analysis
//! - `/submit` - Submit the active mode's input
//! - `/status` - Show session state
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use reviewdash::dashboard::{
    DashboardArgs, DashboardCommand, DashboardConfig, PlainTextRenderer, Renderer,
    fill_active_buffer, help_text, parse_command,
};
use reviewdash::{FileHandle, ReviewClient, Session, SubmitOutcome};

/// Main entry point for the reviewdash application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (args, _) = DashboardArgs::from_command_line_relaxed("reviewdash [OPTIONS]");
    let config = DashboardConfig::from_args(args)?;

    let client = ReviewClient::new(&config.client)?;
    println!("AI Code Review Dashboard (backend: {})", client.base_url());
    println!("Type /help for commands, /quit to exit\n");

    let mut session = Session::new(client);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;
    renderer.print_mode(session.state().active_mode());

    loop {
        let prompt = format!("{}> ", session.state().active_mode());
        let readline = rl.readline(&prompt);

        match readline {
            Ok(raw) => {
                let line = raw.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(raw.as_str());

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        DashboardCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        DashboardCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        DashboardCommand::Mode(mode) => {
                            session.set_mode(mode);
                            renderer.print_mode(mode);
                        }
                        DashboardCommand::RepositoryUrl(url) => {
                            session.set_repository_url(url.clone());
                            renderer.print_info(&format!("Repository URL set to {}", url));
                        }
                        DashboardCommand::AddFiles(paths) => {
                            for path in paths {
                                session.add_file(FileHandle::from_path(path));
                            }
                            print_files(&session);
                        }
                        DashboardCommand::ListFiles => print_files(&session),
                        DashboardCommand::ClearFiles => {
                            session.clear_files();
                            renderer.print_info("File selection cleared.");
                        }
                        DashboardCommand::Submit => {
                            submit(&mut session, &mut renderer).await;
                        }
                        DashboardCommand::Status => print_status(&session),
                        DashboardCommand::Health => match session.backend().health().await {
                            Ok(status) => renderer.print_info(&format!("Backend status: {status}")),
                            Err(err) => renderer.print_error(err.message()),
                        },
                        DashboardCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                fill_active_buffer(&mut session, &raw);
                submit(&mut session, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

async fn submit(session: &mut Session<ReviewClient>, renderer: &mut dyn Renderer) {
    let pending = match session.begin_submit() {
        Ok(pending) => pending,
        // Guard failures are silent.
        Err(_) => return,
    };
    renderer.render_state(session.state());
    let completion = pending.run().await;
    if session.complete(completion) != SubmitOutcome::Discarded {
        renderer.render_state(session.state());
    }
}

fn print_files(session: &Session<ReviewClient>) {
    let files = session.state().selected_files();
    if files.is_empty() {
        println!("    Selected files: (none)");
    } else {
        println!("    Selected files:");
        for file in files {
            match file.path() {
                Some(path) => println!("      - {} ({})", file.name(), path.display()),
                None => println!("      - {}", file.name()),
            }
        }
    }
}

fn print_status(session: &Session<ReviewClient>) {
    let state = session.state();
    let stats = session.stats();
    println!("    Session Status:");
    println!("      Backend: {}", session.backend().base_url());
    println!("      Mode: {}", state.active_mode().label());
    println!("      Request: {}", state.request_status());
    println!("      Chat input: {}", describe(state.chat_input()));
    println!("      Repository URL: {}", describe(state.repository_url()));
    println!("      Selected files: {}", state.selected_files().len());
    println!(
        "      Submissions: {} ({} succeeded, {} failed, {} ignored, {} discarded)",
        stats.submissions, stats.succeeded, stats.failed, stats.ignored, stats.discarded
    );
}

fn describe(value: &str) -> &str {
    if value.trim().is_empty() {
        "(empty)"
    } else {
        value
    }
}
