use anyhow::{Context, Result, bail};
use lifesweeper_core::{Coord, Difficulty};
use lifesweeper_session::*;
use std::io::{self, BufRead, Write};

use crate::render::render;
use crate::store::FileRecords;

const HELP: &str = "\
commands:
  o X Y   open a cell, or chord an open number
  f X Y   toggle a flag
  u       undo
  h       hint
  p       pause or resume
  r [D]   new game, optionally on difficulty D
  a       toggle auto-assist
  s       single assist step
  v       toggle probability overlay
  q       quit";

#[derive(Copy, Clone, Debug, PartialEq)]
enum Input {
    Act(Action),
    ToggleOverlay,
    Help,
    Quit,
}

fn coord(word: Option<&str>) -> Result<Coord> {
    let word = word.context("Missing coordinate")?;
    word.parse().with_context(|| format!("Bad coordinate {word:?}"))
}

fn parse(line: &str) -> Result<Input> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        bail!("Empty command, try ?");
    };

    let input = match command {
        "o" => Input::Act(Action::Open((coord(words.next())?, coord(words.next())?))),
        "f" => Input::Act(Action::ToggleFlag((coord(words.next())?, coord(words.next())?))),
        "u" => Input::Act(Action::Undo),
        "h" => Input::Act(Action::Hint),
        "p" => Input::Act(Action::TogglePause),
        "r" => {
            let difficulty = words.next().map(str::parse::<Difficulty>).transpose()?;
            Input::Act(Action::Reset(difficulty))
        }
        "a" => Input::Act(Action::ToggleAutoAssist),
        "s" => Input::Act(Action::AssistStep),
        "v" => Input::ToggleOverlay,
        "?" | "help" => Input::Help,
        "q" | "quit" => Input::Quit,
        other => bail!("Unknown command {other:?}, try ?"),
    };
    if words.next().is_some() {
        bail!("Too many arguments for {command:?}");
    }
    Ok(input)
}

fn describe(event: &SessionEvent) -> Option<String> {
    Some(match event {
        SessionEvent::Exploded { coords, lives_left } => format!("Boom at {coords:?}, {lives_left} lives left"),
        SessionEvent::Won(summary) => format!("You win in {:.1}s", summary.time_seconds),
        SessionEvent::Lost(_) => "Game over".into(),
        SessionEvent::HintShown(hint) => {
            format!("Try {:?}, {}% safe", hint.coords, hint.confidence())
        }
        SessionEvent::AssistToggled(on) => format!("Auto-assist {}", if *on { "on" } else { "off" }),
        SessionEvent::AssistMoved(ai_move) => format!("Assist: {:?} {:?}", ai_move.kind, ai_move.coords),
        _ => return None,
    })
}

/// Line-driven game on stdin; timers advance whenever a line arrives.
pub fn run(config: SessionConfig, records: Option<FileRecords>) -> Result<()> {
    let mut session = Session::new(config, SystemClock)?;
    if let Some(records) = records {
        session.observe(records);
    }
    let mut driver = Driver::new();

    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}\n")?;
    write!(out, "{}", render(session.state(), session.overlay().as_ref()))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        let mut events = driver.poll(&mut session);

        match parse(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => writeln!(out, "{HELP}")?,
            Ok(Input::ToggleOverlay) => {
                let show = !session.state().preferences.show_probabilities;
                events.extend(session.set_show_probabilities(show));
            }
            Ok(Input::Act(action)) => events.extend(session.dispatch(action)),
            Err(err) => writeln!(out, "{err:#}")?,
        }

        for message in events.iter().filter_map(describe) {
            writeln!(out, "{message}")?;
        }
        write!(out, "{}", render(session.state(), session.overlay().as_ref()))?;
        out.flush()?;
    }
    Ok(())
}
