/// A command the shell understands. Every argument is gathered through
/// prompts during execution, never parsed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    CreateTable,
    DropTable,
    AddColumn,
    DropColumn,
    SetConnection,
    Tables,
    Columns,
    Help,
    Quit,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "create-table" | "create" => Some(Self::CreateTable),
            "drop-table" | "drop" => Some(Self::DropTable),
            "add-column" | "add" => Some(Self::AddColumn),
            "drop-column" => Some(Self::DropColumn),
            "set-connection" | "connect" => Some(Self::SetConnection),
            "tables" | "list-tables" => Some(Self::Tables),
            "columns" | "list-columns" => Some(Self::Columns),
            "help" | "?" => Some(Self::Help),
            "quit" | "exit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }

    pub fn help() -> &'static str {
        "Commands:\n\
         \x20 create-table    Create a table with a generated Id key\n\
         \x20 drop-table      Drop a table\n\
         \x20 add-column      Add a column to a table\n\
         \x20 drop-column     Drop a column from a table\n\
         \x20 set-connection  Enter new connection parameters and reconnect\n\
         \x20 tables          List user tables\n\
         \x20 columns         List columns of a table\n\
         \x20 help            Show this help\n\
         \x20 quit            Leave the shell"
    }
}
