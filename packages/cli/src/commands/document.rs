use crate::context::Context;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use htmled_editor::{Document, EditorError};
use htmled_parser::format_error;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Document file
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Save under this name instead of the document's own
    pub file: Option<PathBuf>,
}

pub fn init(args: FileArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let doc = Document::new_empty(&args.file).with_options(&ctx.config.document_options());
    ctx.manager.open(doc)?;

    writeln!(out, "{} {}", "Created".green(), args.file.display())?;
    Ok(())
}

pub fn load(args: FileArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let name = args.file.display().to_string();

    if ctx.manager.contains(&name) {
        ctx.manager.set_active(&name)?;
        writeln!(out, "{} is already open, now editing it", name)?;
        return Ok(());
    }

    let doc = match Document::load(&args.file) {
        Ok(doc) => doc,
        Err(EditorError::Parse(err)) => {
            let source = std::fs::read_to_string(&args.file).unwrap_or_default();
            bail!("{}", format_error(&source, &name, &err));
        }
        Err(err) => return Err(err.into()),
    };
    let doc = ctx.manager.open(doc.with_options(&ctx.config.document_options()))?;

    writeln!(
        out,
        "{} {} ({} elements)",
        "Loaded".green(),
        name,
        doc.tree().len()
    )?;
    Ok(())
}

pub fn save(args: SaveArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let path = ctx.manager.save_active(args.file.as_deref())?;
    writeln!(out, "{} {}", "Saved to".green(), path.display())?;
    Ok(())
}

pub fn close(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let doc = ctx.manager.close_active()?;

    if doc.is_dirty() {
        writeln!(
            out,
            "{} unsaved changes to {} were discarded",
            "Warning:".yellow().bold(),
            doc.name()
        )?;
    }
    writeln!(out, "Closed {}", doc.name())?;
    if let Some(active) = ctx.manager.active_name() {
        writeln!(out, "Now editing {}", active)?;
    }
    Ok(())
}

pub fn edit(args: FileArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let name = args.file.display().to_string();
    ctx.manager.set_active(&name)?;
    writeln!(out, "Now editing {}", name)?;
    Ok(())
}

pub fn editor_list(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    if ctx.manager.is_empty() {
        writeln!(out, "No open documents")?;
        return Ok(());
    }

    for doc in ctx.manager.documents() {
        let name = doc.name();
        let marker = if ctx.manager.is_active(&name) { "> " } else { "  " };
        let dirty = if doc.is_dirty() { " *" } else { "" };
        writeln!(out, "{}{}{}", marker, name, dirty)?;
    }
    Ok(())
}
