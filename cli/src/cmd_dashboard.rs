// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use jiff::Timestamp;
use jiff::civil::Date;
use studybuddy_core::{Exam, StudyBuddy};

use crate::exam_formatter::ExamFormatter;
use crate::session_formatter::{SessionEntry, SessionFormatter};
use crate::todo_formatter::TodoFormatter;
use crate::util::today;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdDashboard;

impl CmdDashboard {
    pub const NAME: &str = "dashboard";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the dashboard: upcoming exams, open to-dos and the running study session")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdDashboard
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating dashboard...");
        let today = today();
        let exams = app.exams().await?;

        Self::list_exams(&exams, today);
        println!();

        Self::list_todos(app, today).await?;
        println!();

        Self::show_session(app, &exams).await
    }

    fn list_exams(exams: &[Exam], today: Date) {
        const MAX: usize = 5;

        println!("🎓 {}", "Upcoming exams".bold());
        let upcoming: Vec<Exam> = exams
            .iter()
            .filter(|e| !e.is_passed() && e.date.is_some_and(|d| d >= today))
            .take(MAX)
            .cloned()
            .collect();
        if upcoming.is_empty() {
            println!("{}", "Nothing scheduled".italic());
        } else {
            print!("{}", ExamFormatter::new(today).format(&upcoming));
        }
    }

    async fn list_todos(app: &StudyBuddy, today: Date) -> Result<(), Box<dyn Error>> {
        const MAX: usize = 10;

        println!("✅ {}", "To-dos".bold());
        let mut todos = app.todos(false).await?;
        if todos.is_empty() {
            println!("{}", "All done".italic());
            return Ok(());
        }

        // undated ones last
        todos.sort_by_key(|t| (t.due.is_none(), t.due));
        let hidden = todos.len().saturating_sub(MAX);
        todos.truncate(MAX);
        print!("{}", TodoFormatter::new(today).format(&todos));
        if hidden > 0 {
            println!("{}", format!("... and {hidden} more").as_str().italic());
        }
        Ok(())
    }

    async fn show_session(app: &StudyBuddy, exams: &[Exam]) -> Result<(), Box<dyn Error>> {
        println!("📚 {}", "Study session".bold());
        match app.running_session().await? {
            Some(session) => {
                let sessions = [session];
                let entries = SessionEntry::collect(&sessions, exams);
                let formatter = SessionFormatter::new(Timestamp::now());
                print!("{}", formatter.format(&entries));
            }
            None => println!("{}", "Not studying right now".italic()),
        }
        Ok(())
    }
}
