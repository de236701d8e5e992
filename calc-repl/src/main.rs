mod config;

use calc_graph::{CurveSeries, GraphSink, Sampler};
use calc_logic::{DeleteMode, Logic, MemoryHistory, TextDisplay};
use config::ReplConfig;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// The number of points `:graph` prints.
const PREVIEW_POINTS: usize = 5;

/// Keeps the latest series published by the sampler.
#[derive(Debug, Default)]
struct LatestSeries(Mutex<Option<CurveSeries>>);

impl GraphSink for LatestSeries {
    fn replace_series(&self, series: CurveSeries) {
        match self.0.lock() {
            Ok(mut latest) => *latest = Some(series),
            Err(_) => warn!("graph lock poisoned, series dropped"),
        }
    }
}

impl LatestSeries {
    /// Prints the title, size, and first few points of the latest series.
    fn print(&self) {
        let Ok(latest) = self.0.lock() else {
            return;
        };

        match latest.as_ref() {
            Some(series) => {
                println!("{} ({} points)", series.title, series.len());
                for point in series.points.iter().take(PREVIEW_POINTS) {
                    println!("  ({}, {})", point.0, point.1);
                }
                if series.len() > PREVIEW_POINTS {
                    println!("  ...");
                }
            },
            None => println!("nothing graphed yet"),
        }
    }
}

type ReplLogic = Logic<TextDisplay, MemoryHistory>;

const HELP: &str = "\
:up      show the previous history entry
:down    show the next history entry
:del     press delete
:clear   press clear
:enter   press enter
:resume  restore the display from the history
:graph   show the latest graphed equation
:insert  insert text without evaluating it
:help    show this message
anything else is typed into the display and evaluated";

/// Types the given input into the display and evaluates it, replacing a result or error shown on
/// the display unless the input starts with an operator that continues it.
fn type_and_evaluate(logic: &mut ReplLogic, input: &str) {
    let first = input.chars().next().map(String::from).unwrap_or_default();
    if !logic.text().is_empty() && !logic.accept_insert(&first) {
        logic.clear(false);
    }
    logic.insert(input);

    let text = logic.text().to_string();
    logic.on_enter();
    if let Some(err) = logic.last_error() {
        if let Err(io_err) = err.report_to_stderr("input", &text) {
            debug!(error = %io_err, "failed to print report");
        }
    }
}

/// Runs a single line of input. Returns false if the line was not understood.
fn run_line(logic: &mut ReplLogic, graph: &LatestSeries, input: &str) -> bool {
    match input.trim() {
        ":up" => logic.on_up(),
        ":down" => logic.on_down(),
        ":del" => logic.on_delete(),
        ":clear" => logic.on_clear(),
        ":enter" => logic.on_enter(),
        ":resume" => logic.resume_with_history(),
        ":graph" => {
            graph.print();
            return true;
        },
        ":help" => {
            println!("{}", HELP);
            return true;
        },
        command => match command.strip_prefix(":insert ") {
            Some(delta) => logic.insert(delta),
            None if command.starts_with(':') => return false,
            None => type_and_evaluate(logic, command),
        },
    }
    true
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    args.next();

    let config = match args.next() {
        Some(path) => match ReplConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                err.report_to_stderr(&path);
                std::process::exit(1);
            },
        },
        None => ReplConfig::default(),
    };

    let graph = Arc::new(LatestSeries::default());
    let mut logic = Logic::new(
        TextDisplay::new(),
        MemoryHistory::new(),
        config.locale.clone(),
        config.eval,
    );
    logic.set_sampler(Sampler::new(graph.clone(), config.locale, config.sampler));
    logic.set_listener(|mode: DeleteMode| debug!(?mode, "delete mode"));

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        },
    };

    fn process_line(
        rl: &mut DefaultEditor,
        logic: &mut ReplLogic,
        graph: &LatestSeries,
    ) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        if run_line(logic, graph, &input) {
            println!("{}", logic.text());
        } else {
            eprintln!("unknown command {}, try :help", input.trim());
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &mut logic, &graph) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
}
