// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use studybuddy_core::{StudyBuddy, TodoDraft, TodoId, TodoPatch};

use crate::todo_formatter::TodoFormatter;
use crate::util::{ArgOutputFormat, parse_date, today};

#[derive(Debug, Clone, Copy)]
pub struct CmdTodoList {
    pub all: bool,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List open to-dos")
            .arg(arg!(-a --all "Include completed to-dos"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            all: matches.get_flag("all"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing todos...");
        let todos = app.todos(self.all).await?;
        let formatter = TodoFormatter::new(today()).with_output_format(self.output_format);
        print!("{}", formatter.format(&todos));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoNew {
    pub title: String,
    pub description: Option<String>,
    pub due: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a to-do")
            .arg(arg!(<TITLE> "What needs doing"))
            .arg(arg_description())
            .arg(arg_due())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: matches.get_one::<String>("TITLE").cloned().unwrap_or_default(),
            description: matches.get_one("description").cloned(),
            due: matches.get_one("due").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding todo...");
        let today = today();
        let due = match self.due {
            Some(d) => parse_date(&d, today)?,
            None => None,
        };
        let draft = TodoDraft {
            title: self.title,
            description: self.description,
            due,
        };
        let todo = app.new_todo(&draft).await?;

        let formatter = TodoFormatter::new(today).with_output_format(self.output_format);
        print!("{}", formatter.format(&[todo]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoEdit {
    pub id: TodoId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a to-do")
            .arg(arg_id())
            .arg(arg!(-t --title <TITLE> "New title"))
            .arg(arg_description().help("Details, empty to clear"))
            .arg(arg_due().help("Due date, YYYY-MM-DD, today or tomorrow; empty to clear"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_ids(matches).first().copied().unwrap_or_default(),
            title: matches.get_one("title").cloned(),
            description: matches.get_one("description").cloned(),
            due: matches.get_one("due").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing todo...");
        let today = today();
        let patch = TodoPatch {
            title: self.title,
            description: self.description.map(|d| (!d.is_empty()).then_some(d)),
            due: self.due.map(|d| parse_date(&d, today)).transpose()?,
            done: None,
        };
        let todo = app.update_todo(self.id, &patch).await?;

        let formatter = TodoFormatter::new(today).with_output_format(self.output_format);
        print!("{}", formatter.format(&[todo]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoDone {
    pub ids: Vec<TodoId>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoDone {
    pub const NAME: &str = "done";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark to-dos as done")
            .arg(arg_id().num_args(1..))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "marking todos as done...");
        set_done(app, &self.ids, true, self.output_format).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoUndo {
    pub ids: Vec<TodoId>,
    pub output_format: ArgOutputFormat,
}

impl CmdTodoUndo {
    pub const NAME: &str = "undo";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark to-dos as not done")
            .arg(arg_id().num_args(1..))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "marking todos as not done...");
        set_done(app, &self.ids, false, self.output_format).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdTodoDelete {
    pub ids: Vec<TodoId>,
}

impl CmdTodoDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete to-dos")
            .arg(arg_id().num_args(1..))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(id, "deleting todo...");
            app.delete_todo(id).await?;
            println!("Deleted to-do {id}");
        }
        Ok(())
    }
}

async fn set_done(
    app: &StudyBuddy,
    ids: &[TodoId],
    done: bool,
    output_format: ArgOutputFormat,
) -> Result<(), Box<dyn Error>> {
    let mut todos = Vec::with_capacity(ids.len());
    for &id in ids {
        todos.push(app.set_todo_done(id, done).await?);
    }

    let formatter = TodoFormatter::new(today()).with_output_format(output_format);
    print!("{}", formatter.format(&todos));
    Ok(())
}

fn arg_id() -> Arg {
    arg!(id: <ID> "Id of the to-do").value_parser(value_parser!(TodoId))
}

fn get_ids(matches: &ArgMatches) -> Vec<TodoId> {
    matches
        .get_many::<TodoId>("id")
        .map(|ids| ids.copied().collect())
        .unwrap_or_default()
}

fn arg_description() -> Arg {
    arg!(-d --description <DESCRIPTION> "Details of the to-do")
}

fn arg_due() -> Arg {
    arg!(--due <DATE> "Due date, YYYY-MM-DD, today or tomorrow")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        Command::new("test")
            .subcommand(CmdTodoList::command())
            .subcommand(CmdTodoNew::command())
            .subcommand(CmdTodoEdit::command())
            .subcommand(CmdTodoDone::command())
            .subcommand(CmdTodoUndo::command())
            .subcommand(CmdTodoDelete::command())
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn test_parse_list() {
        let matches = parse(&["test", "ls", "--all", "--output-format", "json"]);
        let cmd = CmdTodoList::from(matches.subcommand_matches("list").unwrap());
        assert!(cmd.all);
        assert_eq!(cmd.output_format, ArgOutputFormat::Json);
    }

    #[test]
    fn test_parse_new() {
        let matches = parse(&["test", "add", "Stampare appunti", "--due", "tomorrow"]);
        let cmd = CmdTodoNew::from(matches.subcommand_matches("new").unwrap());
        assert_eq!(cmd.title, "Stampare appunti");
        assert_eq!(cmd.due.as_deref(), Some("tomorrow"));
        assert_eq!(cmd.description, None);
    }

    #[test]
    fn test_parse_edit() {
        let matches = parse(&["test", "edit", "5", "-t", "Nuovo titolo", "-d", ""]);
        let cmd = CmdTodoEdit::from(matches.subcommand_matches("edit").unwrap());
        assert_eq!(cmd.id, 5);
        assert_eq!(cmd.title.as_deref(), Some("Nuovo titolo"));
        assert_eq!(cmd.description.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_done_and_undo() {
        let matches = parse(&["test", "done", "1", "2"]);
        let cmd = CmdTodoDone::from(matches.subcommand_matches("done").unwrap());
        assert_eq!(cmd.ids, vec![1, 2]);

        let matches = parse(&["test", "undo", "3"]);
        let cmd = CmdTodoUndo::from(matches.subcommand_matches("undo").unwrap());
        assert_eq!(cmd.ids, vec![3]);
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        let cmd = Command::new("test").subcommand(CmdTodoDelete::command());
        assert!(cmd.try_get_matches_from(["test", "delete", "abc"]).is_err());
    }
}
