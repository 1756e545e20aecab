// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use cliclack::password;

const MIN_PASSWORD_LEN: usize = 6;

pub fn prompt_password() -> Result<String, Box<dyn Error>> {
    Ok(password("Password").mask('▪').interact()?)
}

/// Asks for a new password twice.
pub fn prompt_new_password() -> Result<String, Box<dyn Error>> {
    let first: String = password("Choose a password")
        .mask('▪')
        .validate(|p: &String| {
            if p.chars().count() < MIN_PASSWORD_LEN {
                Err(format!("At least {MIN_PASSWORD_LEN} characters"))
            } else {
                Ok(())
            }
        })
        .interact()?;
    let second: String = password("Repeat the password").mask('▪').interact()?;
    if first != second {
        return Err("Passwords do not match".into());
    }
    Ok(first)
}
