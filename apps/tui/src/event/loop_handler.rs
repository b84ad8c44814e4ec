use chrono::Local;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::future::Future;
use std::io::Stdout;
use std::pin::Pin;
use std::time::Duration;
use stock_league_core::{ApiClient, CardBoard, CompanyRecord, Transport};
use stock_league_tui::cli::Source;

use crate::app::{handle_input, load_board, App, Command, LoadedBoard};
use crate::ui;
use crate::ui::cards::image_text;

type PendingLoad<'a> = Pin<Box<dyn Future<Output = LoadedBoard> + 'a>>;

fn start_load<'a, T>(client: &'a ApiClient<T>, source: Source, probe: bool) -> PendingLoad<'a>
where
    T: Transport + 'a,
{
    Box::pin(load_board(client, source, probe))
}

/// Run the application in headless mode (no UI)
pub async fn run_headless<T: Transport>(
    client: &ApiClient<T>,
    source: Source,
    json: bool,
    probe: bool,
) -> Result<()> {
    let loaded = load_board(client, source, probe).await;
    let companies = loaded.companies?;

    if json {
        return render_headless_json(&companies);
    }

    let mut board = CardBoard::new();
    board.render(&companies);
    for index in loaded.failed_images {
        board.fail_image(index);
    }

    let title = source.title();
    println!("\n{title}");
    println!("{}", "=".repeat(title.len()));
    for line in headless_lines(&mut board) {
        println!("{line}");
    }

    Ok(())
}

/// Every card with its breakdown expanded, separated by blank lines.
fn headless_lines(board: &mut CardBoard) -> Vec<String> {
    let mut lines = Vec::new();

    for index in 0..board.len() {
        board.toggle(index);
        let Some(card) = board.get(index) else {
            continue;
        };

        let text = card.visible_text();
        let header = 2 + usize::from(card.card().subtitle.is_some());
        lines.push(String::new());
        for (position, line) in text.into_iter().enumerate() {
            if position == 0 {
                lines.push(format!("- {line}"));
            } else if position < header {
                lines.push(format!("  {line}"));
            } else if position == header {
                lines.push(format!("  Image: {}", image_text(card)));
                lines.push(format!("  {line}"));
            } else {
                lines.push(format!("    {line}"));
            }
        }
    }

    lines
}

fn render_headless_json(companies: &[CompanyRecord]) -> Result<()> {
    let report = HeadlessReport {
        loaded_at: Local::now().to_rfc3339(),
        count: companies.len(),
        companies,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct HeadlessReport<'a> {
    loaded_at: String,
    count: usize,
    companies: &'a [CompanyRecord],
}

/// Run the main application event loop
pub async fn run<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &ApiClient<T>,
    probe: bool,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.begin_load();
    let mut pending = Some(start_load(client, app.source, probe));

    loop {
        app.tick();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        // While loading, the sleep branch paces the loop instead of the key poll.
        let finished = match pending.as_mut() {
            Some(load) => tokio::select! {
                loaded = load => Some(loaded),
                () = tokio::time::sleep(Duration::from_millis(EVENT_POLL_TIMEOUT)) => None,
            },
            None => None,
        };
        if let Some(loaded) = finished {
            pending = None;
            app.finish_load(loaded);
        }

        let timeout = if pending.is_some() {
            Duration::ZERO
        } else {
            Duration::from_millis(EVENT_POLL_TIMEOUT)
        };

        if matches!(event::poll(timeout), Ok(true)) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key.code) == Some(Command::Reload) && app.begin_load() {
                        tracing::debug!(source = ?app.source, "reloading companies");
                        pending = Some(start_load(client, app.source, probe));
                    }
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::headless_lines;
    use stock_league_core::{CardBoard, CompanyRecord};

    #[test]
    fn headless_output_expands_every_card() {
        let mut board = CardBoard::new();
        board.render(&[
            CompanyRecord {
                industry: Some("Technology".to_string()),
                ..CompanyRecord::new(1, "Apple", "AAPL")
            },
            CompanyRecord::new(2, "Uber", "UBER"),
        ]);

        let lines = headless_lines(&mut board);

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "- Apple");
        assert_eq!(lines[2], "  Technology");
        assert_eq!(lines[3], "  Earnings: N/A");
        assert_eq!(lines[4], "  Image: placeholder (AAPL)");
        assert_eq!(lines[5], "  Score: 0");
        assert_eq!(lines[6], "    EPS Result: N/A");
        assert!(lines.contains(&"- Uber".to_string()));
        assert_eq!(
            lines.iter().filter(|line| line.contains("Tags: None")).count(),
            2
        );
    }
}
