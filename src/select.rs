use std::io::{BufRead, Write};

use crate::catalog::{Catalog, GuiOption};
use crate::error::SelectError;

/// Label of the synthetic last menu entry.
pub const NONE_LABEL: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<'a> {
    Gui(&'a GuiOption),
    None,
}

impl Choice<'_> {
    pub fn label(&self) -> &str {
        match self {
            Choice::Gui(opt) => &opt.name,
            Choice::None => NONE_LABEL,
        }
    }
}

/// How many invalid answers to tolerate. `None` re-prompts forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
}

/// Show the numbered menu and read choices until one is in range.
pub fn select<'a>(
    catalog: &'a Catalog,
    input: &mut impl BufRead,
    out: &mut impl Write,
    policy: RetryPolicy,
) -> Result<Choice<'a>, SelectError> {
    let total = catalog.len() + 1;
    let mut attempts = 0u32;
    loop {
        print_menu(catalog, out)?;
        write!(out, "Enter the number corresponding to your choice: ")?;
        out.flush()?;

        let choice = loop {
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(SelectError::InputClosed);
            }
            // Blank lines keep waiting for an answer
            if let Some(choice) = parse_choice(&line) {
                log::debug!("menu input {:?} -> {}", line.trim_end(), choice);
                break choice;
            }
        };
        attempts += 1;

        if (1..=total).contains(&choice) {
            return Ok(match catalog.nth(choice) {
                Some(opt) => Choice::Gui(opt),
                None => Choice::None,
            });
        }

        writeln!(out, "Invalid choice. Please try again.")?;
        if let Some(max) = policy.max_attempts {
            if attempts >= max {
                return Err(SelectError::TooManyAttempts(max));
            }
        }
    }
}

fn print_menu(catalog: &Catalog, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Choose an optional GUI to install:")?;
    for (i, name) in catalog.names().chain(std::iter::once(NONE_LABEL)).enumerate() {
        writeln!(out, "{}) {}", i + 1, name)?;
    }
    Ok(())
}

/// First token of the line as a number; an unparsable token counts as 0.
/// `None` when the line has no token at all.
fn parse_choice(line: &str) -> Option<usize> {
    line.split_whitespace().next().map(|t| t.parse().unwrap_or(0))
}
