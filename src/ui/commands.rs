/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Clear,
    /// Drop the retained exchanges, keeping the constraints.
    New,
    Message(String),
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            Command::Exit
        } else if line.eq_ignore_ascii_case("clear") {
            Command::Clear
        } else if line.eq_ignore_ascii_case("new") {
            Command::New
        } else {
            Command::Message(line.to_string())
        }
    }
}

pub const COMMAND_BOX: &str = "\
┌──────────────────────────────────────┐\n\
│          Available Commands          │\n\
├──────────────────────────────────────┤\n\
│    `exit`  - Quit                    │\n\
│    `clear` - Clear the screen        │\n\
│    `new`   - Forget the history      │\n\
└──────────────────────────────────────┘";
