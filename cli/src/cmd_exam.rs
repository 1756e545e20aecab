// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use studybuddy_core::{ExamDraft, ExamId, ExamPatch, ExamStats, Grade, StudyBuddy};

use crate::exam_formatter::ExamFormatter;
use crate::util::{ArgOutputFormat, parse_date, today};

#[derive(Debug, Clone, Copy)]
pub struct CmdExamList {
    pub output_format: ArgOutputFormat,
}

impl CmdExamList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List your exams")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing exams...");
        let exams = app.exams().await?;
        let formatter = ExamFormatter::new(today()).with_output_format(self.output_format);
        print!("{}", formatter.format(&exams));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdExamNew {
    pub name: String,
    pub credits: u32,
    pub date: Option<String>,
    pub grade: Option<Grade>,
    pub output_format: ArgOutputFormat,
}

impl CmdExamNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add an exam")
            .arg(arg!(<NAME> "Name of the course"))
            .arg(arg_credits().required(true))
            .arg(arg_date())
            .arg(arg_grade())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: matches.get_one::<String>("NAME").cloned().unwrap_or_default(),
            credits: matches.get_one("credits").copied().unwrap_or_default(),
            date: matches.get_one("date").cloned(),
            grade: matches.get_one("grade").copied(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding exam...");
        let today = today();
        let date = match self.date {
            Some(d) => parse_date(&d, today)?,
            None => None,
        };
        let draft = ExamDraft {
            name: self.name,
            credits: self.credits,
            date,
            grade: self.grade,
        };
        let exam = app.new_exam(&draft).await?;

        let formatter = ExamFormatter::new(today).with_output_format(self.output_format);
        print!("{}", formatter.format(&[exam]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdExamEdit {
    pub id: ExamId,
    pub name: Option<String>,
    pub credits: Option<u32>,
    pub date: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdExamEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an exam")
            .arg(arg_id())
            .arg(arg!(--name <NAME> "Name of the course"))
            .arg(arg_credits())
            .arg(arg_date().help("Exam date, YYYY-MM-DD, today or tomorrow; empty to clear"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            name: matches.get_one("name").cloned(),
            credits: matches.get_one("credits").copied(),
            date: matches.get_one("date").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing exam...");
        let today = today();
        let patch = ExamPatch {
            name: self.name,
            credits: self.credits,
            date: self.date.map(|d| parse_date(&d, today)).transpose()?,
            grade: None,
        };
        let exam = app.update_exam(self.id, &patch).await?;

        let formatter = ExamFormatter::new(today).with_output_format(self.output_format);
        print!("{}", formatter.format(&[exam]));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdExamGrade {
    pub id: ExamId,
    /// `None` clears the grade.
    pub grade: Option<Grade>,
    pub output_format: ArgOutputFormat,
}

impl CmdExamGrade {
    pub const NAME: &str = "grade";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Record the grade of a passed exam")
            .arg(arg_id())
            .arg(
                arg!(grade: [GRADE] "18 to 30, `30L` for honours; omit with --clear")
                    .value_parser(value_parser!(Grade))
                    .required_unless_present("clear"),
            )
            .arg(arg!(--clear "Remove the recorded grade").conflicts_with("grade"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            grade: matches.get_one("grade").copied(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "grading exam...");
        let patch = ExamPatch {
            grade: Some(self.grade),
            ..Default::default()
        };
        let exam = app.update_exam(self.id, &patch).await?;

        let formatter = ExamFormatter::new(today()).with_output_format(self.output_format);
        print!("{}", formatter.format(&[exam]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdExamDelete {
    pub ids: Vec<ExamId>,
}

impl CmdExamDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete exams")
            .arg(arg_id().num_args(1..))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: matches
                .get_many::<ExamId>("id")
                .map(|ids| ids.copied().collect())
                .unwrap_or_default(),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(id, "deleting exam...");
            app.delete_exam(id).await?;
            println!("Deleted exam {id}");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdExamStats {
    pub output_format: ArgOutputFormat,
}

impl CmdExamStats {
    pub const NAME: &str = "stats";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show averages and earned credits")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        let stats = app.exam_stats().await?;
        match self.output_format {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
            ArgOutputFormat::Table => print!("{}", format_stats(&stats)),
        }
        Ok(())
    }
}

fn format_stats(stats: &ExamStats) -> String {
    let avg = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
    format!(
        "{:<18} {}\n{:<18} {}\n{:<18} {}\n{:<18} {}\n{:<18} {}\n{:<18} {}\n",
        "Passed",
        stats.passed,
        "Upcoming",
        stats.upcoming,
        "Credits",
        stats.earned_credits.to_string().as_str().bold(),
        "Average",
        avg(stats.average),
        "Weighted average",
        avg(stats.weighted_average).as_str().bold(),
        "Graduation base",
        avg(stats.graduation_base),
    )
}

fn arg_id() -> Arg {
    arg!(id: <ID> "Id of the exam").value_parser(value_parser!(ExamId))
}

fn get_id(matches: &ArgMatches) -> ExamId {
    matches.get_one("id").copied().unwrap_or_default()
}

fn arg_credits() -> Arg {
    arg!(--credits <CFU> "Credits (CFU) of the course")
        .value_parser(value_parser!(u32).range(1..=30))
}

fn arg_date() -> Arg {
    arg!(--date <DATE> "Exam date, YYYY-MM-DD, today or tomorrow")
}

fn arg_grade() -> Arg {
    arg!(--grade <GRADE> "Grade, 18 to 30, `30L` for honours").value_parser(value_parser!(Grade))
}
