//! Impostor in a terminal.
//!
//! One line per command. Type `help` for the commands of the current
//! phase. The roster is remembered in `IMPOSTOR_NAMES` (default
//! `impostor-names.json`); a custom catalog can be given in
//! `IMPOSTOR_CATALOG`.

use impostor::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), ImpostorError> {
    impostor::init_tracing_with("warn,pass_and_play=info");

    let mut builder = GameHost::builder().history_file(
        std::env::var("IMPOSTOR_NAMES").unwrap_or_else(|_| "impostor-names.json".into()),
    );
    if let Ok(path) = std::env::var("IMPOSTOR_CATALOG") {
        builder = builder.catalog_file(path);
    }
    let host = builder.build()?;
    let handle = host.handle().clone();

    let notices = handle.subscribe().await?;
    tokio::spawn(announce(notices));

    print_snapshot(&handle.snapshot().await?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };

        let snapshot = handle.snapshot().await?;
        let command = match parse(line.trim(), &snapshot) {
            Command::Quit => break,
            Command::Help => {
                print_help(snapshot.phase());
                continue;
            }
            Command::Show => {
                print_snapshot(&snapshot);
                continue;
            }
            Command::Unknown(reason) => {
                println!("?? {reason}");
                continue;
            }
            Command::Event(event) => event,
        };

        match handle.dispatch(command).await {
            Ok(_) => print_snapshot(&handle.snapshot().await?),
            Err(GameError::Setup(e)) => println!("cannot start: {e}"),
            Err(e) => println!("!! {e}"),
        }
    }

    host.shutdown().await
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

enum Command {
    Event(GameEvent),
    Show,
    Help,
    Quit,
    Unknown(String),
}

fn parse(line: &str, snapshot: &GameSnapshot) -> Command {
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let edit = |edit| Command::Event(GameEvent::EditDraft(edit));
    match (word, snapshot) {
        ("quit" | "q", _) => Command::Quit,
        ("help" | "h", _) => Command::Help,
        ("" | "show", _) => Command::Show,

        ("add", GameSnapshot::Configuring { .. }) => edit(DraftEdit::AddSlot),
        ("remove", GameSnapshot::Configuring { .. }) => match slot(rest) {
            Some(index) => edit(DraftEdit::RemoveSlot(index)),
            None => Command::Unknown("usage: remove <slot>".into()),
        },
        ("name", GameSnapshot::Configuring { .. }) => {
            let (index, name) = rest.split_once(' ').unwrap_or((rest, ""));
            match slot(index) {
                Some(index) => edit(DraftEdit::SetName {
                    index,
                    name: name.to_string(),
                }),
                None => Command::Unknown("usage: name <slot> <name>".into()),
            }
        }
        ("category", GameSnapshot::Configuring { .. }) => match rest.parse::<CategoryChoice>() {
            Ok(choice) => edit(DraftEdit::SetCategory(choice)),
            Err(never) => match never {},
        },
        ("impostors", GameSnapshot::Configuring { .. }) => match rest.parse() {
            Ok(count) => edit(DraftEdit::SetImpostorCount(count)),
            Err(_) => Command::Unknown("usage: impostors <1|2>".into()),
        },
        ("minutes", GameSnapshot::Configuring { .. }) => match rest.parse() {
            Ok(minutes) => edit(DraftEdit::SetDuration(minutes)),
            Err(_) => Command::Unknown("usage: minutes <3|5|7|10>".into()),
        },
        ("start", GameSnapshot::Configuring { draft, .. }) => {
            Command::Event(GameEvent::StartGame(draft.clone()))
        }

        ("reveal", _) => Command::Event(GameEvent::ShowRole),
        ("next" | "hide", _) => Command::Event(GameEvent::AdvanceReveal),
        ("pause", _) => Command::Event(GameEvent::Pause),
        ("resume", _) => Command::Event(GameEvent::Resume),
        ("end", _) => Command::Event(GameEvent::EndGame),
        ("again", _) => Command::Event(GameEvent::PlayAgain),

        (other, _) => Command::Unknown(format!("unknown command {other:?}, try help")),
    }
}

/// Slots are numbered from 1 on screen.
fn slot(text: &str) -> Option<usize> {
    text.parse::<usize>().ok()?.checked_sub(1)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Prints what the countdown does while nobody is typing.
async fn announce(mut notices: NoticeReceiver) {
    while let Some(notice) = notices.recv().await {
        match notice {
            Notice::CountdownTick { remaining_secs } if remaining_secs % 60 == 0 => {
                println!("   {} left", format_clock(remaining_secs));
            }
            Notice::CountdownTick { remaining_secs } if remaining_secs == 10 => {
                println!("   ten seconds!");
            }
            Notice::CountdownExpired => println!("   time's up! press enter"),
            _ => {}
        }
    }
}

fn print_snapshot(snapshot: &GameSnapshot) {
    match snapshot {
        GameSnapshot::Configuring {
            draft,
            categories,
            last_error,
        } => {
            println!("== New game ==");
            for (i, name) in draft.roster.slots().iter().enumerate() {
                let shown = if name.is_empty() { "(empty)" } else { name.as_str() };
                println!("  {}. {shown}", i + 1);
            }
            println!(
                "  category: {}   impostors: {}   minutes: {}",
                draft.config.category, draft.config.impostor_count, draft.config.duration_minutes
            );
            println!("  categories: {}", categories.join(", "));
            if let Some(error) = last_error {
                println!("  last attempt: {error}");
            }
        }
        GameSnapshot::RoleReveal {
            progress,
            total,
            current_name,
            card,
        } => match card {
            None => println!(
                "== Pass the device to {current_name} ({}/{total}), type reveal ==",
                progress + 1
            ),
            Some(card) => {
                match card.role {
                    Role::Impostor => println!("  {}, you are the IMPOSTOR.", card.name),
                    Role::Citizen => println!(
                        "  {}, the word is {} ({}).",
                        card.name,
                        card.secret_word.as_deref().unwrap_or_default(),
                        card.category.as_deref().unwrap_or_default()
                    ),
                }
                println!("  type next to hide and pass on");
            }
        },
        GameSnapshot::Discussion(view) => {
            println!(
                "== Discuss! {} {}{}==",
                view.clock,
                if view.paused { "(paused) " } else { "" },
                if view.low_time { "HURRY " } else { "" }
            );
            println!("  category: {}", view.category);
            println!("  players: {}", view.players.join(", "));
        }
        GameSnapshot::Reveal(summary) => {
            println!("== The word was {} ({}) ==", summary.secret_word, summary.category);
            let names = |players: &[Player]| {
                players
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            println!("  impostors: {}", names(&summary.impostors));
            println!("  citizens: {}", names(&summary.citizens));
            println!("  type again for a new game");
        }
    }
}

fn print_help(phase: Phase) {
    let commands = match phase {
        Phase::Configuring => {
            "name <slot> <name>, add, remove <slot>, category <name|random>, \
             impostors <n>, minutes <n>, start"
        }
        Phase::RoleReveal => "reveal, next",
        Phase::Discussion => "pause, resume, end",
        Phase::Reveal => "again",
    };
    println!("  {commands}, show, quit");
}
