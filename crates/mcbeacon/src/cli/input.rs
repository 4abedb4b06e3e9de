use std::io::{self, BufRead};
use std::thread;

use mcbeacon_config::LogType;
use mcbeacon_status::WidgetCommand;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cli::format as fmt;

pub fn help_text() -> String {
    let mut help = format!("{}\n", fmt::header("Available Commands"));
    for command in WidgetCommand::ALL {
        help.push_str(&format!(
            "  {:<10} {}\n",
            fmt::label(command.name()),
            fmt::secondary(command.description())
        ));
    }
    help.push_str(&format!(
        "  {:<10} {}",
        fmt::label("help"),
        fmt::secondary("Show this list")
    ));
    help
}

/// Reads commands line by line from stdin on a dedicated thread and forwards
/// them to the status loop. A blocked read never holds up runtime shutdown.
pub fn spawn_command_reader(tx: mpsc::Sender<WidgetCommand>) -> io::Result<()> {
    thread::Builder::new()
        .name("mcbeacon-stdin".to_string())
        .spawn(move || forward_commands(io::stdin().lock(), tx))?;
    Ok(())
}

fn forward_commands<R: BufRead>(reader: R, tx: mpsc::Sender<WidgetCommand>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(log_type = LogType::Cli.as_str(), "Failed to read stdin: {}", e);
                return;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("help") {
            println!("{}", help_text());
            continue;
        }

        match line.parse::<WidgetCommand>() {
            Ok(command) => {
                if tx.blocking_send(command).is_err() {
                    return;
                }
            }
            Err(e) => println!("{} (type `help`)", fmt::warning(&e)),
        }
    }

    debug!(log_type = LogType::Cli.as_str(), "stdin closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_forwards_parsed_commands() {
        let input = Cursor::new("start\n\nbogus\nhelp\nseed\nquit\n");
        let (tx, mut rx) = mpsc::channel(8);

        forward_commands(input, tx);

        assert_eq!(rx.try_recv(), Ok(WidgetCommand::Start));
        assert_eq!(rx.try_recv(), Ok(WidgetCommand::Seed));
        assert_eq!(rx.try_recv(), Ok(WidgetCommand::Quit));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        for command in WidgetCommand::ALL {
            assert!(help.contains(command.name()));
        }
    }
}
