//! Commands accepted by the interactive front end.
//!
//! Parsing is purely syntactic: square names are passed through as typed so
//! that the engine can report them back verbatim, and dimensions are not
//! range-checked here.

use itertools::Itertools;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Help,
    Exit,
    /// Dimensions are prompted for unless given inline.
    Restart {
        size: Option<(usize, usize)>,
    },
    Board,
    Select {
        square: String,
    },
    Move {
        from: String,
        to: String,
    },
    /// Known command with wrong arguments.
    Usage(&'static str),
    Empty,
    Unknown(String),
}

pub(super) const SELECT_USAGE: &str = "Usage: select <square>";
pub(super) const MOVE_USAGE: &str = "Usage: move <from> <to>";
pub(super) const RESTART_USAGE: &str = "Usage: restart [<width> <height>]";

pub(super) const HELP: &str = "Commands:
  help                 show this help
  exit                 quit the game
  restart [W H]        pick size & restart
  board                show the board
  select <sq>          choose a piece (e.g. select A1)
  move <from> <to>     move a piece (e.g. move A1 B3)";

fn parse_restart(arguments: &[&str]) -> Command {
    match arguments {
        [] => Command::Restart { size: None },
        [width, height] => match (width.parse(), height.parse()) {
            (Ok(width), Ok(height)) => Command::Restart {
                size: Some((width, height)),
            },
            _ => Command::Usage(RESTART_USAGE),
        },
        _ => Command::Usage(RESTART_USAGE),
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((keyword, arguments)) = parts.split_first() else {
            return Self::Empty;
        };

        match keyword.to_lowercase().as_str() {
            "help" => Self::Help,
            "exit" | "quit" => Self::Exit,
            "restart" => parse_restart(arguments),
            "board" => Self::Board,
            "select" => match arguments.iter().collect_tuple() {
                Some((square,)) => Self::Select {
                    square: (*square).to_string(),
                },
                None => Self::Usage(SELECT_USAGE),
            },
            "move" => match arguments.iter().collect_tuple() {
                Some((from, to)) => Self::Move {
                    from: (*from).to_string(),
                    to: (*to).to_string(),
                },
                None => Self::Usage(MOVE_USAGE),
            },
            unknown => Self::Unknown(unknown.to_string()),
        }
    }
}
