use anyhow::{Context, Result, bail};
use livemark_config::Config;
use livemark_engine::{
    Delivery, EditDescriptor, HtmlOptions, Pipeline, PipelineOptions, RenderUpdate, Session,
    parsing::snapshot,
    render::render_document,
};
use log::info;
use std::{
    env,
    io::{self, BufRead},
    path::{Path, PathBuf},
    process,
    time::Duration,
};

const USAGE: &str = "Usage: livemark-cli <file.md> [html | tree | tasks | toggle <line> | edits]
       livemark-cli --init-config";

enum Command {
    Html,
    Tree,
    Tasks,
    /// 1-based line of the task's marker.
    Toggle(usize),
    /// Replay `line<TAB>text` edits from stdin through the edit pipeline.
    Edits,
}

fn parse_args(args: &[String]) -> Result<(PathBuf, Command)> {
    let Some(path) = args.get(1) else {
        bail!("missing file argument");
    };
    let command = match args.get(2).map(String::as_str) {
        None | Some("html") => Command::Html,
        Some("tree") => Command::Tree,
        Some("tasks") => Command::Tasks,
        Some("toggle") => {
            let line = args
                .get(3)
                .context("toggle needs a line number")?
                .parse()
                .context("line number must be a positive integer")?;
            Command::Toggle(line)
        }
        Some("edits") => Command::Edits,
        Some(other) => bail!("unknown command '{other}'"),
    };
    Ok((PathBuf::from(path), command))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.get(1).map(String::as_str) == Some("--init-config") {
        return init_config();
    }
    let (path, command) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let session = open(&text)?;

    match command {
        Command::Html => print_html(&session, &config),
        Command::Tree => print!("{}", snapshot::format_tree(&session.tree())),
        Command::Tasks => print_tasks(&session),
        Command::Toggle(line) => toggle(session, &path, line)?,
        Command::Edits => replay_edits(session, &config)?,
    }
    Ok(())
}

fn init_config() -> Result<()> {
    let config_path = Config::config_path();
    if Config::init()? {
        println!("Wrote default config to {}", config_path.display());
    } else {
        println!("Config already exists at {}", config_path.display());
    }
    Ok(())
}

/// Ingests the whole file as one full-buffer edit.
fn open(text: &str) -> Result<Session> {
    let mut session = Session::new();
    let edit = EditDescriptor::replace_all(session.buffer().line_count(), text);
    let update = session.apply_edit(edit)?;
    info!(
        "opened {} lines into {} blocks",
        update.tree.line_count,
        update.tree.blocks.len()
    );
    for diagnostic in &update.tree.diagnostics {
        info!("{diagnostic}");
    }
    Ok(session)
}

fn html_options(config: &Config) -> HtmlOptions {
    HtmlOptions {
        hard_breaks: config.preview.hard_breaks,
        highlight: config.preview.highlight_code,
    }
}

fn print_html(session: &Session, config: &Config) {
    if let Some(stylesheet) = &config.preview.stylesheet {
        println!("<link rel=\"stylesheet\" href=\"{}\" />", stylesheet.display());
    }
    print!("{}", render_document(&session.tree(), &html_options(config)));
}

fn print_tasks(session: &Session) {
    for task in session.task_items() {
        let mark = if task.checked { 'x' } else { ' ' };
        println!("{:>4} [{mark}] {}", task.id.line() + 1, task.label);
    }
}

fn toggle(mut session: Session, path: &Path, line: usize) -> Result<()> {
    let task = session
        .task_items()
        .into_iter()
        .find(|task| task.id.line() + 1 == line)
        .with_context(|| format!("no task item on line {line}"))?;
    let update = session.apply_toggle(&task.id)?;
    std::fs::write(path, session.buffer().text())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("toggled line {line}: {} ops", update.diff.ops.len());
    println!("{}", session.buffer().line(task.id.line()));
    Ok(())
}

fn replay_edits(session: Session, config: &Config) -> Result<()> {
    let pipeline = Pipeline::with_session(
        session,
        PipelineOptions {
            debounce: Duration::from_millis(config.debounce_ms),
            capacity: config.queue_capacity,
        },
    );
    let deliveries = pipeline.deliveries().clone();

    for (n, input) in io::stdin().lock().lines().enumerate() {
        let input = input.context("failed to read stdin")?;
        let Some((line, text)) = input.split_once('\t') else {
            bail!("stdin line {}: expected <line><TAB><text>", n + 1);
        };
        let line: usize = line
            .trim()
            .parse()
            .with_context(|| format!("stdin line {}: bad line number", n + 1))?;
        if line == 0 {
            bail!("stdin line {}: line numbers start at 1", n + 1);
        }
        pipeline.edit(EditDescriptor::replace_line(line - 1, text))?;
    }

    if pipeline.shutdown().is_none() {
        bail!("edit pipeline worker panicked");
    }
    for delivery in deliveries.try_iter() {
        match delivery {
            Delivery::Update(update) => print_update(&update),
            Delivery::Rejected { request, error } => println!("rejected {request:?}: {error}"),
        }
    }
    Ok(())
}

fn print_update(update: &RenderUpdate) {
    let reparsed = update
        .reparsed
        .map_or_else(|| "nothing".to_string(), |range| format!("lines {range}"));
    println!(
        "generation {}: {} ops, shift {:+} from {}, reparsed {reparsed}",
        update.generation,
        update.diff.ops.len(),
        update.diff.shift.delta,
        update.diff.shift.from
    );
}
