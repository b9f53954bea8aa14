//! Interactive session: one screen per mode, driven by typed commands.

use anyhow::{Context, Result};
use colored::Colorize;
use pawmatch_application::{ClipboardSink, CopyFeedback, SessionUseCase};
use pawmatch_core::{AppMode, AppState, SwipeDirection, SwipeGesture};
use pawmatch_interaction::GeminiNameGateway;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::sync::Arc;

use super::view;

/// Cards visible at once while swiping, the top one included.
const STACK_DEPTH: usize = 3;

/// "Copies" a code by printing it for the user to select.
struct TerminalClipboard;

impl ClipboardSink for TerminalClipboard {
    fn write_text(&self, text: &str) -> pawmatch_core::Result<()> {
        view::code_block("Copia este código y compártelo:", text);
        Ok(())
    }
}

/// What the user asked for on the current screen.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Host,
    Join,
    Back,
    Reset,
    Quit,
    Help,
    Copy,
    Start,
    Like,
    Dislike,
    /// Simulated pointer drag through the given offsets, then release.
    Drag(Vec<f64>),
    Skip,
    Matches,
    /// Anything else: a species choice or a pasted code, depending on the screen.
    Text(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let mut words = trimmed.split_whitespace();
    let head = words.next().unwrap_or("").to_lowercase();

    match head.as_str() {
        "host" | "crear" => Command::Host,
        "join" | "unirse" => Command::Join,
        "back" | "volver" => Command::Back,
        "reset" | "salir" => Command::Reset,
        "quit" | "exit" => Command::Quit,
        "help" | "ayuda" | "?" => Command::Help,
        "copy" | "copiar" => Command::Copy,
        "start" | "empezar" => Command::Start,
        "y" | "si" | "sí" | "like" => Command::Like,
        "n" | "no" | "nope" => Command::Dislike,
        "skip" | "terminar" => Command::Skip,
        "matches" | "coincidencias" => Command::Matches,
        "drag" => {
            let offsets: Vec<f64> = words.filter_map(|w| w.parse().ok()).collect();
            if offsets.is_empty() {
                Command::Text(trimmed.to_string())
            } else {
                Command::Drag(offsets)
            }
        }
        _ => Command::Text(trimmed.to_string()),
    }
}

pub async fn run(model: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let mut gateway = GeminiNameGateway::try_from_config(config.as_deref())
        .context("Failed to configure the Gemini name generator")?;
    if let Some(model) = model {
        gateway = gateway.with_model(model);
    }
    tracing::info!(model = gateway.model(), "starting interactive session");

    let usecase = SessionUseCase::new(Arc::new(gateway));
    let feedback = CopyFeedback::default();
    let mut editor = DefaultEditor::new()?;

    let mut shown = None;
    loop {
        let state = usecase.snapshot().await;
        if shown.as_ref() != Some(&state) {
            render(&state, &usecase).await;
            shown = Some(state.clone());
        }

        let prompt = match feedback.current().await {
            Some(message) => format!("{} {} > ", state.mode, message.green()),
            None => format!("{} > ", state.mode),
        };

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line.as_str());

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => {
                help(state.mode);
                continue;
            }
            command => {
                if let Err(err) = handle(command, &state, &usecase, &feedback).await {
                    view::error(&err.user_message());
                }
            }
        }
    }

    println!("{}", "¡Hasta pronto!".bright_magenta());
    Ok(())
}

async fn handle(
    command: Command,
    state: &AppState,
    usecase: &SessionUseCase,
    feedback: &CopyFeedback,
) -> pawmatch_core::Result<()> {
    match (state.mode, command) {
        (_, Command::Reset) => {
            usecase.reset().await;
        }

        (AppMode::Landing, Command::Host) => {
            usecase.choose_host().await?;
        }
        (AppMode::Landing, Command::Join) => {
            usecase.choose_join().await?;
        }
        (_, Command::Back) => {
            usecase.back().await?;
        }

        (AppMode::SpeciesSelection, Command::Text(choice)) => {
            let Some(species) = view::parse_species(&choice) else {
                view::error(&format!("Especie desconocida: {choice}"));
                return Ok(());
            };
            println!("{}", "Invocando nombres...".italic());
            let state = usecase.generate(species).await?;
            view::info(&format!("{} nombres listos", state.candidates.len()));
        }

        (AppMode::ShareSession, Command::Copy) => {
            let token = usecase.session_token().await?;
            feedback.copy(&TerminalClipboard, &token).await?;
        }
        (AppMode::ShareSession, Command::Start) => {
            usecase.start_swiping().await?;
        }

        (AppMode::JoinSession, Command::Text(token)) => {
            usecase.submit_session_token(token).await?;
        }

        (AppMode::Swiping, Command::Like) => {
            usecase.swipe(SwipeDirection::Right).await?;
        }
        (AppMode::Swiping, Command::Dislike) => {
            usecase.swipe(SwipeDirection::Left).await?;
        }
        (AppMode::Swiping, Command::Drag(offsets)) => {
            let mut gesture = SwipeGesture::new();
            gesture.begin(0.0);
            for offset in offsets {
                gesture.move_to(offset);
                view::drag_feedback(&gesture.visuals());
            }
            match gesture.release() {
                Some(direction) => {
                    usecase.swipe(direction).await?;
                }
                None => println!("{}", "La tarjeta vuelve a su sitio.".dimmed()),
            }
        }
        (AppMode::Swiping, Command::Skip) => {
            usecase.skip_remaining().await?;
        }

        (AppMode::ShareResults, Command::Copy) => {
            let token = usecase.vote_token().await?;
            feedback.copy(&TerminalClipboard, &token).await?;
        }
        (AppMode::ShareResults, Command::Matches) => {
            let matches = usecase.matches().await;
            view::matches(&matches, state.friends_added());
        }
        (AppMode::ShareResults, Command::Text(token)) => {
            let token = token
                .strip_prefix("add ")
                .map(str::to_string)
                .unwrap_or(token);
            usecase.import_votes(token).await?;
            view::info("¡Votos añadidos! Puedes añadir más amigos o ver las coincidencias.");
        }

        (mode, _) => help(mode),
    }
    Ok(())
}

async fn render(state: &AppState, usecase: &SessionUseCase) {
    match state.mode {
        AppMode::Landing => {
            view::title();
            println!("Donde las mejores decisiones se toman en conjunto.");
            println!("  {}  crear partida y ser anfitrión", "host".bold());
            println!("  {}  unirse con un código de invitación", "join".bold());
        }
        AppMode::SpeciesSelection => {
            println!("\n{}", "¿Qué tipo de mascota vamos a nombrar?".bold());
            view::species_menu();
        }
        AppMode::Generating => {
            println!("{}", "Invocando nombres...".italic());
        }
        AppMode::ShareSession => {
            println!(
                "\n{} {} nombres para {} {}",
                "¡Listo!".bright_green().bold(),
                state.candidates.len(),
                state.species.emoji(),
                state.species.label()
            );
            println!("  {}  mostrar el código para tus amigos", "copy".bold());
            println!("  {}  empezar a votar", "start".bold());
        }
        AppMode::JoinSession => {
            println!("\n{}", "Pega aquí el código que te envió el anfitrión:".bold());
        }
        AppMode::Swiping => {
            if let Some(candidate) = state.current_candidate() {
                view::card(candidate, state.cursor + 1, state.candidates.len());
                view::card_stack(state.upcoming(STACK_DEPTH), state.remaining());
                println!(
                    "  {} / {} / {} / {}",
                    "y".green(),
                    "n".red(),
                    "drag <px>...".dimmed(),
                    "skip".dimmed()
                );
            }
        }
        AppMode::ShareResults => {
            println!(
                "\n{} {} me gusta",
                "Tus votos:".bold(),
                state.local_user.likes.len()
            );
            let matches = usecase.matches().await;
            view::matches(&matches, state.friends_added());
            println!(
                "  {}  mostrar tu código de votos · pega el código de un amigo para añadirlo",
                "copy".bold()
            );
        }
    }
}

fn help(mode: AppMode) {
    let commands = match mode {
        AppMode::Landing => "host | join | quit",
        AppMode::SpeciesSelection => "<número o especie> | back | reset",
        AppMode::Generating => "reset",
        AppMode::ShareSession => "copy | start | reset",
        AppMode::JoinSession => "<código> | back | reset",
        AppMode::Swiping => "y | n | drag <px>... | skip | reset",
        AppMode::ShareResults => "copy | matches | <código de votos> | reset",
    };
    println!("{} {}", "Comandos:".dimmed(), commands);
}
