// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Career statistics over the exam plan. Laude counts as 30.

use serde::Serialize;

use crate::exam::Exam;

/// Graduation scores are expressed out of this value.
const GRADUATION_SCALE: f64 = 110.0;

fn passed(exams: &[Exam]) -> impl Iterator<Item = (f64, u32)> + '_ {
    exams
        .iter()
        .filter_map(|e| e.grade.map(|g| (f64::from(g.score()), e.credits)))
}

/// Arithmetic mean of the passed grades.
pub fn average(exams: &[Exam]) -> Option<f64> {
    let (sum, count) = passed(exams).fold((0.0, 0u32), |(sum, n), (g, _)| (sum + g, n + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Credit-weighted mean of the passed grades.
pub fn weighted_average(exams: &[Exam]) -> Option<f64> {
    let (sum, credits) = passed(exams).fold((0.0, 0u32), |(sum, total), (g, c)| {
        (sum + g * f64::from(c), total + c)
    });
    (credits > 0).then(|| sum / f64::from(credits))
}

/// Weighted average scaled to 110, the base score for graduation.
pub fn graduation_base(exams: &[Exam]) -> Option<f64> {
    weighted_average(exams).map(|w| w * GRADUATION_SCALE / 30.0)
}

/// Credits of the passed exams.
pub fn earned_credits(exams: &[Exam]) -> u32 {
    passed(exams).map(|(_, c)| c).sum()
}

/// Summary shown by `exam stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamStats {
    pub passed: usize,
    pub upcoming: usize,
    pub earned_credits: u32,
    pub average: Option<f64>,
    pub weighted_average: Option<f64>,
    pub graduation_base: Option<f64>,
}

impl ExamStats {
    pub fn from_exams(exams: &[Exam]) -> Self {
        let passed = exams.iter().filter(|e| e.is_passed()).count();
        ExamStats {
            passed,
            upcoming: exams.len() - passed,
            earned_credits: earned_credits(exams),
            average: average(exams),
            weighted_average: weighted_average(exams),
            graduation_base: graduation_base(exams),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::exam::Grade;

    fn exam(credits: u32, grade: Option<(u8, bool)>) -> Exam {
        Exam {
            id: 0,
            user_id: Uuid::nil(),
            name: "x".to_string(),
            credits,
            date: None,
            grade: grade.map(|(s, l)| Grade::new(s, l).unwrap()),
        }
    }

    #[test]
    fn no_passed_exams() {
        let exams = [exam(6, None)];
        assert_eq!(average(&exams), None);
        assert_eq!(weighted_average(&exams), None);
        assert_eq!(graduation_base(&exams), None);
        assert_eq!(earned_credits(&exams), 0);
    }

    #[test]
    fn averages() {
        let exams = [
            exam(12, Some((30, true))),
            exam(6, Some((24, false))),
            exam(9, None),
        ];
        assert_eq!(average(&exams), Some(27.0));
        // (30 * 12 + 24 * 6) / 18 = 28
        assert_eq!(weighted_average(&exams), Some(28.0));
        let base = graduation_base(&exams).unwrap();
        assert!((base - 102.666_666).abs() < 1e-3);
        assert_eq!(earned_credits(&exams), 18);

        let stats = ExamStats::from_exams(&exams);
        assert_eq!(stats.passed, 2);
        assert_eq!(stats.upcoming, 1);
    }
}
