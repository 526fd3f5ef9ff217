use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use arboard::Clipboard;
use crossterm::cursor::MoveTo;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{ConceptExample, Prompt};
use crate::parser::{parse_concept_examples, parse_prompts};

const DEFAULT_PROMPTS: &str = "role,title,prompt,author\n\
Writer,Cold email,\"Write a short email to ${recipient:a potential client} introducing ${product:our design studio}. Keep it under ${length:120} words.\",\n\
Writer,Blog outline,\"Outline a blog post about ${topic:remote work} for ${audience:engineering managers}.\",\n\
Developer,Code review,\"Act as a senior ${language:Rust} engineer. Review the following code for correctness, readability and performance.\",\n\
Developer,Explain error,Explain what this error message means and how to fix it.,\n";

pub(crate) fn app_dir() -> Result<PathBuf, AppError> {
    let home = dirs::home_dir().ok_or(AppError::NoHomeDir)?;
    Ok(home.join(".config").join("plib"))
}

pub(crate) fn catalog_path(config: &Config) -> Result<PathBuf, AppError> {
    match &config.catalog {
        Some(path) => Ok(path.clone()),
        None => Ok(app_dir()?.join("prompts.csv")),
    }
}

pub(crate) fn concepts_path(config: &Config) -> Result<PathBuf, AppError> {
    match &config.concepts {
        Some(path) => Ok(path.clone()),
        None => Ok(app_dir()?.join("concept_examples.csv")),
    }
}

/// Creates the catalog with a few starter prompts when it does not exist yet.
pub(crate) fn ensure_catalog_file(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| AppError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, DEFAULT_PROMPTS).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "created starter catalog");
    Ok(())
}

pub(crate) fn load_prompts(path: &Path) -> Result<Vec<Prompt>, AppError> {
    ensure_catalog_file(path)?;
    let content = fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let prompts = parse_prompts(&content)?;
    if prompts.is_empty() {
        return Err(AppError::EmptyCatalog(path.to_path_buf()));
    }
    info!(path = %path.display(), count = prompts.len(), "loaded prompt catalog");
    Ok(prompts)
}

/// A missing concept file leaves the builder without examples.
pub(crate) fn load_concept_examples(path: &Path) -> Result<Vec<ConceptExample>, AppError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no concept examples file");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(AppError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let examples = parse_concept_examples(&content)?;
    info!(path = %path.display(), count = examples.len(), "loaded concept examples");
    Ok(examples)
}

pub(crate) fn run_editor_command(editor: &str, path: &Path) -> Result<(), AppError> {
    let mut parts = editor.split_whitespace();
    let command = parts.next().ok_or(AppError::NoEditor)?;
    let args: Vec<&str> = parts.collect();

    disable_raw_mode().map_err(AppError::Terminal)?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).map_err(AppError::Terminal)?;

    let status_result = Command::new(command).args(&args).arg(path).status();

    let restore_result = execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        Clear(ClearType::All),
        MoveTo(0, 0)
    )
    .and_then(|_| enable_raw_mode())
    .map_err(AppError::Terminal);

    let status = status_result.map_err(AppError::EditorLaunch)?;
    restore_result?;
    if !status.success() {
        return Err(AppError::EditorStatus(status));
    }
    debug!(editor = command, path = %path.display(), "editor exited");
    Ok(())
}

pub(crate) fn set_clipboard(text: &str) -> Result<(), AppError> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    debug!(chars = text.chars().count(), "copied to clipboard");
    Ok(())
}
