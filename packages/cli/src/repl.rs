use crate::commands::{execute, Flow};
use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::debug;

fn prompt(ctx: &Context) -> String {
    match ctx.manager.active_name() {
        Some(name) => format!("htmled [{}]> ", name),
        None => "htmled> ".to_string(),
    }
}

/// Read one line, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Ask before quitting with unsaved documents. End of input counts as yes.
fn confirm_quit<R: BufRead, W: Write>(ctx: &Context, input: &mut R, out: &mut W) -> Result<bool> {
    let unsaved = ctx.manager.unsaved();
    if unsaved.is_empty() {
        return Ok(true);
    }

    writeln!(out, "{}", "Unsaved changes in:".yellow().bold())?;
    for name in &unsaved {
        writeln!(out, "  {}", name)?;
    }
    write!(out, "Quit anyway? [y/N] ")?;
    out.flush()?;

    Ok(match read_line(input)? {
        Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        None => true,
    })
}

/// Run the shell until `quit` or end of input. Command errors are printed
/// and the loop carries on; only I/O failures on `input`/`out` end it early.
pub fn run<R: BufRead, W: Write>(ctx: &mut Context, mut input: R, mut out: W) -> Result<()> {
    loop {
        write!(out, "{}", prompt(ctx))?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            writeln!(out)?;
            debug!("end of input");
            return Ok(());
        };

        match execute(ctx, &line, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => {
                if confirm_quit(ctx, &mut input, &mut out)? {
                    return Ok(());
                }
            }
            Err(err) => writeln!(out, "{} {}", "Error:".red().bold(), err)?,
        }
    }
}
