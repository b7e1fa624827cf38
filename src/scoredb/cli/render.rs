use colored::Colorize;
use scoredb::commands::{CmdMessage, MessageLevel, Reporter};
use scoredb::config::{ConfigKey, ScoreDbConfig};
use scoredb::model::ExcerptId;
use std::io::{self, Write};

pub(super) fn print_message(message: &CmdMessage) {
    match message.level {
        MessageLevel::Info => println!("{}", message.content.dimmed()),
        MessageLevel::Success => println!("{}", message.content.green()),
        MessageLevel::Warning => println!("{}", message.content.yellow()),
        MessageLevel::Error => println!("{}", message.content.red()),
    }
}

/// Prints each message as soon as a command reports it.
pub(super) struct Terminal;

impl Reporter for Terminal {
    fn report(&mut self, message: CmdMessage) {
        print_message(&message);
    }

    fn progress(&mut self, message: CmdMessage) {
        print!("{} ", message.content.dimmed());
        let _ = io::stdout().flush();
    }
}

pub(super) fn render_id_list(ids: &[ExcerptId]) -> String {
    let mut output = String::new();
    for id in ids {
        output.push_str(id.as_str());
        output.push('\n');
    }
    output.push('\n');
    output.push_str(&format!("Total excerpts: {}\n", ids.len()));
    output
}

pub(super) fn render_config(config: &ScoreDbConfig) -> String {
    let mut output = String::new();
    for key in ConfigKey::ALL {
        output.push_str(&format!("{} = {}\n", key.name(), config.get(key)));
    }
    output.push_str(&format!("documents = {}\n", config.documents.join(", ")));
    output
}
