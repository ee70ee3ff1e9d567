use crate::context::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Args)]
pub struct InsertArgs {
    /// Tag of the new element
    pub tag: String,

    /// Id of the new element
    pub id: String,

    /// Id of the element to insert before
    pub before: String,

    /// Text of the new element
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

#[derive(Debug, Args)]
pub struct AppendArgs {
    /// Tag of the new element
    pub tag: String,

    /// Id of the new element
    pub id: String,

    /// Id of the parent element
    pub parent: String,

    /// Text of the new element
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the element to delete
    pub id: String,
}

#[derive(Debug, Args)]
pub struct EditIdArgs {
    pub old_id: String,
    pub new_id: String,
}

#[derive(Debug, Args)]
pub struct EditTextArgs {
    pub id: String,

    /// New text; omit to clear
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

/// Words of a trailing text argument joined back together
fn joined(words: &[String]) -> Option<String> {
    let text = words.join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn insert(args: InsertArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let text = joined(&args.text);
    ctx.manager
        .active_mut()?
        .insert_before(&args.tag, &args.id, &args.before, text.as_deref())?;

    writeln!(
        out,
        "{} <{}> #{} before #{}",
        "Inserted".green(),
        args.tag.to_lowercase(),
        args.id,
        args.before
    )?;
    Ok(())
}

pub fn append(args: AppendArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let text = joined(&args.text);
    ctx.manager
        .active_mut()?
        .append_child(&args.tag, &args.id, &args.parent, text.as_deref())?;

    writeln!(
        out,
        "{} <{}> #{} to #{}",
        "Appended".green(),
        args.tag.to_lowercase(),
        args.id,
        args.parent
    )?;
    Ok(())
}

pub fn delete(args: DeleteArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    ctx.manager.active_mut()?.delete(&args.id)?;
    writeln!(out, "{} #{}", "Deleted".green(), args.id)?;
    Ok(())
}

pub fn edit_id(args: EditIdArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    ctx.manager.active_mut()?.rename_id(&args.old_id, &args.new_id)?;
    writeln!(out, "{} #{} to #{}", "Renamed".green(), args.old_id, args.new_id)?;
    Ok(())
}

pub fn edit_text(args: EditTextArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let text = joined(&args.text);
    ctx.manager.active_mut()?.set_text(&args.id, text.as_deref())?;

    match text {
        Some(_) => writeln!(out, "{} text of #{}", "Updated".green(), args.id)?,
        None => writeln!(out, "{} text of #{}", "Cleared".green(), args.id)?,
    }
    Ok(())
}

pub fn undo(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let label = ctx.manager.active_mut()?.undo()?;
    writeln!(out, "{} {}", "Undid".green(), label)?;
    Ok(())
}

pub fn redo(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let label = ctx.manager.active_mut()?.redo()?;
    writeln!(out, "{} {}", "Redid".green(), label)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::joined;
    use crate::commands::execute;
    use crate::config::Config;
    use crate::context::Context;

    fn run(ctx: &mut Context, line: &str) -> anyhow::Result<String> {
        let mut out = Vec::new();
        execute(ctx, line, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn context_with_doc() -> (tempfile::TempDir, Context) {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = Context::new(Config::default(), dir.path().to_path_buf());
        run(&mut ctx, "init page.html").unwrap();
        (dir, ctx)
    }

    fn text_of(ctx: &Context, id: &str) -> Option<String> {
        let doc = ctx.manager.active().unwrap();
        doc.tree().get(id).unwrap().text().map(str::to_string)
    }

    #[test]
    fn test_joined() {
        assert_eq!(joined(&[]), None);
        assert_eq!(joined(&["".to_string()]), None);
        assert_eq!(joined(&["a".to_string(), "b".to_string()]), Some("a b".to_string()));
    }

    #[test]
    fn test_text_arguments() {
        let (_dir, mut ctx) = context_with_doc();
        run(&mut ctx, "append p intro body Welcome to  the -site-").unwrap();
        assert_eq!(text_of(&ctx, "intro").as_deref(), Some("Welcome to the -site-"));

        run(&mut ctx, "edit-text intro \"Spaced  out\"").unwrap();
        assert_eq!(text_of(&ctx, "intro").as_deref(), Some("Spaced  out"));

        run(&mut ctx, "edit-text intro").unwrap();
        assert_eq!(text_of(&ctx, "intro"), None);
    }

    #[test]
    fn test_errors_are_reported() {
        let (_dir, mut ctx) = context_with_doc();
        run(&mut ctx, "append div main body").unwrap();

        let err = run(&mut ctx, "append div main body").unwrap_err();
        assert_eq!(err.to_string(), "Duplicate id: main");

        let err = run(&mut ctx, "insert p x ghost").unwrap_err();
        assert_eq!(err.to_string(), "Unknown id: ghost");

        let err = run(&mut ctx, "delete body").unwrap_err();
        assert!(err.to_string().starts_with("Invalid operation"));

        let err = run(&mut ctx, "redo").unwrap_err();
        assert_eq!(err.to_string(), "Nothing to redo");
    }

    #[test]
    fn test_undo_redo_output() {
        let (_dir, mut ctx) = context_with_doc();
        run(&mut ctx, "append div main body").unwrap();
        run(&mut ctx, "edit-id main content").unwrap();

        let out = run(&mut ctx, "undo").unwrap();
        assert_eq!(out, "Undid rename 'main' to 'content'\n");
        let out = run(&mut ctx, "redo").unwrap();
        assert_eq!(out, "Redid rename 'main' to 'content'\n");
    }
}
