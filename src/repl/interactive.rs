use super::commands::ReplCommand;
use crate::commands;
use crate::error::{PgChiselError, Result};
use crate::executor::SqlExecutor;
use crate::prompt::TerminalPrompter;
use crate::schema::TableRef;
use crate::session::{SessionFactory, SessionManager};
use crate::settings::SettingsStore;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// The interactive shell. Keeps the session manager and the last-used-table
/// memo alive across commands; one command runs to completion before the
/// next line is read.
pub struct InteractiveRepl<F: SessionFactory, S> {
    manager: SessionManager<F, S>,
    prompter: TerminalPrompter,
    editor: DefaultEditor,
    last_table: Option<TableRef>,
}

impl<F, S> InteractiveRepl<F, S>
where
    F: SessionFactory,
    F::Session: SqlExecutor,
    S: SettingsStore,
{
    pub fn new(manager: SessionManager<F, S>) -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| PgChiselError::Prompt(e.to_string()))?;
        Ok(Self {
            manager,
            prompter: TerminalPrompter::new()?,
            editor,
            last_table: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!(
            "pgchisel {} (type 'help' for commands)",
            env!("CARGO_PKG_VERSION")
        );
        loop {
            match self.editor.readline("pgchisel> ") {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(&line);
                    let Some(command) = ReplCommand::parse(&line) else {
                        println!(
                            "{}",
                            format!("unknown command: {} (try 'help')", line).yellow()
                        );
                        continue;
                    };
                    if command == ReplCommand::Quit {
                        break;
                    }
                    match self.dispatch(command).await {
                        Ok(Some(message)) => println!("{}", message.green()),
                        Ok(None) => {} // cancelled; stay silent
                        Err(e) => eprintln!("{}", e.to_string().red()),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(PgChiselError::Prompt(e.to_string())),
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, command: ReplCommand) -> Result<Option<String>> {
        match command {
            ReplCommand::CreateTable => {
                commands::create_table(&self.manager, &mut self.prompter, &mut self.last_table)
                    .await
            }
            ReplCommand::DropTable => {
                commands::drop_table(&self.manager, &mut self.prompter, &mut self.last_table).await
            }
            ReplCommand::AddColumn => {
                commands::add_column(&self.manager, &mut self.prompter, &mut self.last_table).await
            }
            ReplCommand::DropColumn => {
                commands::drop_column(&self.manager, &mut self.prompter, &mut self.last_table)
                    .await
            }
            ReplCommand::SetConnection => {
                commands::set_connection(&self.manager, &mut self.prompter).await
            }
            ReplCommand::Tables => commands::list_tables(&self.manager, &mut self.prompter).await,
            ReplCommand::Columns => {
                commands::list_columns(&self.manager, &mut self.prompter, &mut self.last_table)
                    .await
            }
            ReplCommand::Help => Ok(Some(ReplCommand::help().to_string())),
            ReplCommand::Quit => Ok(None),
        }
    }
}
