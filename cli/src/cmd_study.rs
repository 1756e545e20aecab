// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use jiff::Timestamp;
use studybuddy_core::{ExamId, Pager, StudyBuddy, total_duration};

use crate::session_formatter::{SessionEntry, SessionFormatter};
use crate::util::{ArgOutputFormat, format_duration};

#[derive(Debug, Clone)]
pub struct CmdStudyStart {
    pub exam: Option<ExamId>,
    pub note: Option<String>,
}

impl CmdStudyStart {
    pub const NAME: &str = "start";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Start a study session")
            .arg(arg_exam())
            .arg(arg!(--note <NOTE> "What you are working on"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            exam: matches.get_one("exam").copied(),
            note: matches.get_one("note").cloned(),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "starting study session...");
        let session = app.start_session(self.exam, self.note.as_deref()).await?;
        let exam = match session.exam_id {
            Some(id) => format!(" for {}", app.exam(id).await?.name.as_str().bold()),
            None => String::new(),
        };
        println!("Study session {} started{exam}", session.id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdStudyStop;

impl CmdStudyStop {
    pub const NAME: &str = "stop";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Stop the running study session")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdStudyStop
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!("stopping study session...");
        let session = app.stop_session().await?;
        let elapsed = session.duration(Timestamp::now());
        println!(
            "Study session {} stopped after {}",
            session.id,
            format_duration(elapsed).as_str().bold()
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdStudyList {
    pub limit: i64,
    pub output_format: ArgOutputFormat,
}

impl CmdStudyList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List recent study sessions")
            .arg(
                arg!(-n --limit <N> "Number of sessions to show")
                    .value_parser(value_parser!(i64).range(1..))
                    .default_value("20"),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            limit: matches.get_one("limit").copied().unwrap_or(20),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing study sessions...");
        let pager: Pager = (self.limit, 0).into();
        let sessions = app.list_sessions(&pager).await?;
        let exams = app.exams().await?;

        let now = Timestamp::now();
        let entries = SessionEntry::collect(&sessions, &exams);
        let formatter = SessionFormatter::new(now).with_output_format(self.output_format);
        print!("{}", formatter.format(&entries));

        if self.output_format == ArgOutputFormat::Table && !sessions.is_empty() {
            let total = total_duration(&sessions, now);
            println!("{} {}", "Total".bold(), format_duration(total));
        }
        Ok(())
    }
}

fn arg_exam() -> Arg {
    arg!(--exam <ID> "Exam you are studying for").value_parser(value_parser!(ExamId))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start() {
        let cmd = Command::new("test").subcommand(CmdStudyStart::command());
        let matches = cmd
            .try_get_matches_from(["test", "start", "--exam", "3", "--note", "esercizi"])
            .unwrap();
        let parsed = CmdStudyStart::from(matches.subcommand_matches("start").unwrap());
        assert_eq!(parsed.exam, Some(3));
        assert_eq!(parsed.note.as_deref(), Some("esercizi"));
    }

    #[test]
    fn test_parse_list_limit() {
        let cmd = Command::new("test").subcommand(CmdStudyList::command());
        let matches = cmd.clone().try_get_matches_from(["test", "list"]).unwrap();
        let parsed = CmdStudyList::from(matches.subcommand_matches("list").unwrap());
        assert_eq!(parsed.limit, 20);

        let args = ["test", "list", "-n", "0"];
        assert!(cmd.try_get_matches_from(args).is_err());
    }
}
