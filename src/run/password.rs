use anyhow::Result;
use std::io::{BufRead, Write};

use super::Console;
use crate::password::check_strength;
use crate::ui::theme;

/// Keep asking until a strong password is entered or input runs out.
/// Returns whether a password was accepted.
pub(crate) fn run<I: BufRead, W: Write>(console: &mut Console<I, W>) -> Result<bool> {
    loop {
        console.say("")?;
        let Some(password) = console.ask("Enter your password: ")? else {
            return Ok(false);
        };
        let strength = check_strength(&password);

        console.say(theme::heading("\nPassword Check Results:"))?;
        for message in strength.messages() {
            console.say(format!(" - {message}"))?;
        }

        if strength.is_strong() {
            console.say(theme::success("\n✅ Password accepted!"))?;
            return Ok(true);
        }
        console.say(theme::error(
            "\n❌ Please try again and fix the above issues.",
        ))?;
    }
}
