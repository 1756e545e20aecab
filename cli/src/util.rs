// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, arg, value_parser};
use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp, ToSpan, Zoned};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

/// Today in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

const DATE_HINT: &str = "Expected YYYY-MM-DD, today or tomorrow";

/// Parses `today`, `tomorrow` or `YYYY-MM-DD`. An empty string clears the
/// date.
pub fn parse_date(s: &str, today: Date) -> Result<Option<Date>, Box<dyn Error>> {
    match s.trim() {
        "" => Ok(None),
        "today" => Ok(Some(today)),
        "tomorrow" => Ok(Some(today.checked_add(1.day())?)),
        s => match s.parse::<Date>() {
            Ok(date) => Ok(Some(date)),
            Err(_) => Err(format!("Invalid date `{s}`. {DATE_HINT}").into()),
        },
    }
}

pub fn format_date(date: Option<Date>) -> String {
    date.map_or_else(String::new, |d| d.strftime("%Y-%m-%d").to_string())
}

pub fn format_timestamp(t: Timestamp) -> String {
    t.to_zoned(TimeZone::system())
        .strftime("%Y-%m-%d %H:%M")
        .to_string()
}

/// Renders a duration as `1h 05m`, or `12m` below one hour.
pub fn format_duration(d: SignedDuration) -> String {
    let minutes = d.as_secs().max(0) / 60;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m:02}m"),
    }
}
