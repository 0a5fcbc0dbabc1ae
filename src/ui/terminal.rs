use super::commands::{Command, COMMAND_BOX};
use crate::client::{Chat, Client};
use crate::conversation::HistoryMode;
use crate::models::Result;
use colored::*;
use rustyline::{config::Configurer, error::ReadlineError, DefaultEditor};
use std::io::{self, Write};
use std::path::PathBuf;
use terminal_size::{terminal_size, Width};
use textwrap::{wrap, Options};

const HISTORY_FILE: &str = ".chatgpt_history";

pub struct TerminalUI {
    client: Client,
    editor: DefaultEditor,
    history_file: PathBuf,
    width: usize,
}

impl TerminalUI {
    pub fn new(client: Client) -> Result<Self> {
        let width = match terminal_size() {
            Some((Width(w), _)) => (w as usize).saturating_sub(2).max(20),
            None => 80,
        };

        let mut editor = DefaultEditor::new()?;
        editor.set_max_history_size(100)?;

        let history_file = dirs::home_dir()
            .map(|mut path| {
                path.push(HISTORY_FILE);
                path
            })
            .unwrap_or_else(|| HISTORY_FILE.into());

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self {
            client,
            editor,
            history_file,
            width,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.show_welcome_message()?;

        loop {
            let prompt = format!("{}", "> ".blue().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    match Command::from(line.as_str()) {
                        Command::Exit => {
                            let _ = self.editor.save_history(&self.history_file);
                            break;
                        }
                        Command::Clear => {
                            clearscreen::clear()?;
                            self.show_command_box();
                        }
                        Command::New => {
                            self.client.reset_history();
                            println!("{}", "Starting a fresh conversation...".green());
                        }
                        Command::Message(input) => {
                            if !input.is_empty() {
                                self.editor.add_history_entry(&input)?;
                                self.handle_message(&input).await?;
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Use 'exit' to quit");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("Error: {}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn show_welcome_message(&self) -> Result<()> {
        clearscreen::clear()?;
        let mut banner = format!("Chatting with {}", self.client.model());
        let constraints = self.client.conversation().constraint_count();
        if constraints > 0 {
            banner.push_str(&format!(" ({} constraint(s) applied)", constraints));
        }
        if self.client.history() == HistoryMode::Reset {
            banner.push_str(", every message starts from a clean history");
        }
        println!("{}", banner.cyan());
        println!();
        self.show_command_box();
        Ok(())
    }

    fn show_command_box(&self) {
        println!("{}", COMMAND_BOX.green());
        println!();
    }

    fn wrapped(&self, text: &str) -> String {
        let options = Options::new(self.width)
            .initial_indent("  ")
            .subsequent_indent("  ");
        text.lines()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, &options).into_iter().map(|l| l.into_owned()).collect()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn handle_message(&mut self, input: &str) -> Result<()> {
        print!("{}", "Thinking...".yellow());
        io::stdout().flush()?;

        let outcome = self.client.chat(input).await;
        print!("\r{}\r", " ".repeat(self.width));

        match outcome {
            Ok(reply) => {
                println!("{}", self.wrapped(&reply).cyan());
                println!();
            }
            Err(e) => {
                println!("{}", self.wrapped(&format!("Error: {}", e)).red());
                println!();
            }
        }
        io::stdout().flush()?;

        Ok(())
    }
}
