use super::history::history_lines;
use super::pad::{open_image, recognize, status_report};
use super::AppContext;
use crate::models::point::Point;
use crate::services::classifier::Classifier;
use crate::services::pad::{reduce, PadEvent, PadState};
use regex::Regex;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  down X Y       press the pen at (X, Y)
  move X Y       drag the pen to (X, Y)
  up             lift the pen
  clear          wipe the pad
  load PATH      place an image file on the pad
  recognize      classify the pad
  save PATH      export the pad as PNG
  grid           show the 28x28 grid sent to the classifier
  history        list recent recognitions
  help           show this text
  quit           leave the session";

/// One line of session input
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Down(Point),
    Move(Point),
    Up,
    Clear,
    Load(PathBuf),
    Recognize,
    Save(PathBuf),
    Grid,
    History,
    Help,
    Quit,
}

/// Parse a session line; blank lines and `#` comments yield `None`
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    // "down 10 20" or "move 10,20"
    let pointer = Regex::new(r"^(down|move)\s+(-?\d+(?:\.\d+)?)(?:\s*,\s*|\s+)(-?\d+(?:\.\d+)?)$")
        .map_err(|e| format!("Regex error: {}", e))?;

    if let Some(caps) = pointer.captures(line) {
        let x = caps[2]
            .parse::<f32>()
            .map_err(|e| format!("Invalid x '{}': {}", &caps[2], e))?;
        let y = caps[3]
            .parse::<f32>()
            .map_err(|e| format!("Invalid y '{}': {}", &caps[3], e))?;
        let point = Point::new(x, y);

        return Ok(Some(if &caps[1] == "down" {
            SessionCommand::Down(point)
        } else {
            SessionCommand::Move(point)
        }));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (word, rest.is_empty()) {
        ("up", true) => SessionCommand::Up,
        ("clear", true) => SessionCommand::Clear,
        ("recognize", true) => SessionCommand::Recognize,
        ("grid", true) => SessionCommand::Grid,
        ("history", true) => SessionCommand::History,
        ("help", true) => SessionCommand::Help,
        ("quit" | "exit", true) => SessionCommand::Quit,
        ("load", false) => SessionCommand::Load(PathBuf::from(rest)),
        ("save", false) => SessionCommand::Save(PathBuf::from(rest)),
        ("down" | "move", _) => return Err(format!("Usage: {} X Y", word)),
        ("load" | "save", true) => return Err(format!("Usage: {} PATH", word)),
        _ => return Err(format!("Unknown command: '{}' (try 'help')", line)),
    };

    Ok(Some(command))
}

/// Drive the pad from line-oriented input until EOF or `quit`
///
/// Bad lines are reported on `output` and skipped.
pub async fn run_session<C, R, W>(
    ctx: &AppContext<C>,
    mut state: PadState,
    input: R,
    output: &mut W,
) -> Result<PadState, String>
where
    C: Classifier,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                write_line(output, &e)?;
                continue;
            }
        };

        state = match command {
            SessionCommand::Down(p) => reduce(state, PadEvent::PointerDown(p)),
            SessionCommand::Move(p) => reduce(state, PadEvent::PointerMove(p)),
            SessionCommand::Up => reduce(state, PadEvent::PointerUp),
            SessionCommand::Clear => reduce(state, PadEvent::Clear),
            SessionCommand::Load(path) => match open_image(&path) {
                Ok(image) => reduce(state, PadEvent::ImageLoaded(image)),
                Err(e) => {
                    write_line(output, &e)?;
                    state
                }
            },
            SessionCommand::Recognize => {
                let next = recognize(ctx, state).await?;
                write_line(output, &status_report(&next.status))?;
                next
            }
            SessionCommand::Save(path) => {
                match state.surface.save_png(&path) {
                    Ok(()) => write_line(output, &format!("Saved pad to {:?}", path))?,
                    Err(e) => write_line(output, &e)?,
                }
                state
            }
            SessionCommand::Grid => {
                let grid = ctx.recognizer.grid_for(&state.surface.to_dynamic_image());
                write_line(output, &grid.to_ascii())?;
                state
            }
            SessionCommand::History => {
                write_line(output, &history_lines(&state.history).join("\n"))?;
                state
            }
            SessionCommand::Help => {
                write_line(output, HELP)?;
                state
            }
            SessionCommand::Quit => break,
        };
    }

    Ok(state)
}

fn write_line<W: Write>(output: &mut W, text: &str) -> Result<(), String> {
    writeln!(output, "{}", text).map_err(|e| format!("Failed to write output: {}", e))
}
