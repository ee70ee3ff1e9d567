pub mod document;
pub mod edit;
pub mod view;

use crate::context::Context;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use document::{FileArgs, SaveArgs};
use edit::{AppendArgs, DeleteArgs, EditIdArgs, EditTextArgs, InsertArgs};
use std::io::Write;
use thiserror::Error;
use tracing::debug;
use view::{PrintIndentArgs, ShowIdArgs};

/// One shell input line
#[derive(Parser, Debug)]
#[command(multicall = true, name = "htmled")]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReplCommand {
    /// Create a new empty document and make it active
    Init(FileArgs),

    /// Load a document from disk and make it active
    #[command(alias = "read")]
    Load(FileArgs),

    /// Save the active document, optionally under a new name
    Save(SaveArgs),

    /// Close the active document without saving
    Close,

    /// Switch the active document
    Edit(FileArgs),

    /// List open documents
    EditorList,

    /// Insert an element before another element
    Insert(InsertArgs),

    /// Append an element as the last child of another element
    Append(AppendArgs),

    /// Delete an element and everything inside it
    Delete(DeleteArgs),

    /// Change an element's id
    EditId(EditIdArgs),

    /// Replace an element's text
    EditText(EditTextArgs),

    /// Undo the last edit
    Undo,

    /// Redo the last undone edit
    Redo,

    /// Show the active document as a tree
    PrintTree,

    /// Show the active document as indented markup
    PrintIndent(PrintIndentArgs),

    /// Check the spelling of every element's text
    SpellCheck,

    /// Show or hide ids in print-tree
    Showid(ShowIdArgs),

    /// Show the working directory as a tree
    DirTree,

    /// Show the working directory as an indented list
    DirIndent,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What the shell should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LineError {
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
}

/// Split a line into words. `"..."` and `'...'` group words and may be
/// empty; `\` escapes the next character outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, LineError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(LineError::UnterminatedQuote(q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Run one input line
pub fn execute(ctx: &mut Context, line: &str, out: &mut dyn Write) -> Result<Flow> {
    let words = split_line(line)?;
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    let command = match ReplLine::try_parse_from(&words) {
        Ok(parsed) => parsed.command,
        Err(err) => {
            // Help output and usage errors are both just printed
            if !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                debug!(kind = ?err.kind(), "rejected command line");
            }
            write!(out, "{}", err.render())?;
            return Ok(Flow::Continue);
        }
    };

    debug!(command = %words[0], "executing");
    match command {
        ReplCommand::Init(args) => document::init(args, ctx, out)?,
        ReplCommand::Load(args) => document::load(args, ctx, out)?,
        ReplCommand::Save(args) => document::save(args, ctx, out)?,
        ReplCommand::Close => document::close(ctx, out)?,
        ReplCommand::Edit(args) => document::edit(args, ctx, out)?,
        ReplCommand::EditorList => document::editor_list(ctx, out)?,

        ReplCommand::Insert(args) => edit::insert(args, ctx, out)?,
        ReplCommand::Append(args) => edit::append(args, ctx, out)?,
        ReplCommand::Delete(args) => edit::delete(args, ctx, out)?,
        ReplCommand::EditId(args) => edit::edit_id(args, ctx, out)?,
        ReplCommand::EditText(args) => edit::edit_text(args, ctx, out)?,
        ReplCommand::Undo => edit::undo(ctx, out)?,
        ReplCommand::Redo => edit::redo(ctx, out)?,

        ReplCommand::PrintTree => view::print_tree(ctx, out)?,
        ReplCommand::PrintIndent(args) => view::print_indent(args, ctx, out)?,
        ReplCommand::SpellCheck => view::spell_check(ctx, out)?,
        ReplCommand::Showid(args) => view::showid(args, ctx, out)?,
        ReplCommand::DirTree => view::dir_tree(ctx, out)?,
        ReplCommand::DirIndent => view::dir_indent(ctx, out)?,

        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn context() -> (tempfile::TempDir, Context) {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Config::default(), dir.path().to_path_buf());
        (dir, ctx)
    }

    fn run(ctx: &mut Context, line: &str) -> Result<String> {
        let mut out = Vec::new();
        execute(ctx, line, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("  insert p  para1 main ").unwrap(), vec!["insert", "p", "para1", "main"]);
        assert_eq!(
            split_line(r#"edit-text para1 "Hello,  world" it's"#).unwrap_err(),
            LineError::UnterminatedQuote('\'')
        );
        assert_eq!(
            split_line(r#"edit-text para1 "Hello,  world" 'a "b"' x\ y"#).unwrap(),
            vec!["edit-text", "para1", "Hello,  world", "a \"b\"", "x y"]
        );
        assert_eq!(split_line(r#"edit-text a """#).unwrap(), vec!["edit-text", "a", ""]);
        assert!(split_line("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_aliases_and_names() {
        let parsed = ReplLine::try_parse_from(["read", "a.html"]).unwrap();
        assert!(matches!(parsed.command, ReplCommand::Load(_)));

        let parsed = ReplLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(parsed.command, ReplCommand::Quit));

        let parsed = ReplLine::try_parse_from(["editor-list"]).unwrap();
        assert!(matches!(parsed.command, ReplCommand::EditorList));

        let parsed = ReplLine::try_parse_from(["showid", "false"]).unwrap();
        assert!(matches!(parsed.command, ReplCommand::Showid(ShowIdArgs { value: false })));
    }

    #[test]
    fn test_scenario_through_shell() {
        let (dir, mut ctx) = context();
        let file = dir.path().join("a.html");
        let file = file.display();

        run(&mut ctx, &format!("init {}", file)).unwrap();
        run(&mut ctx, "append div main body").unwrap();
        run(&mut ctx, "insert p para1 main Hello there").unwrap();

        let doc = ctx.manager.active().unwrap();
        assert_eq!(doc.tree().child_ids("body").unwrap(), vec!["para1", "main"]);
        assert_eq!(doc.tree().get("para1").unwrap().text(), Some("Hello there"));

        run(&mut ctx, "undo").unwrap();
        run(&mut ctx, "undo").unwrap();
        let doc = ctx.manager.active().unwrap();
        assert!(doc.tree().child_ids("body").unwrap().is_empty());
    }

    #[test]
    fn test_commands_need_active_document() {
        let (_dir, mut ctx) = context();
        for line in ["append div main body", "undo", "print-tree", "save", "close", "spell-check"] {
            let err = run(&mut ctx, line).unwrap_err();
            assert_eq!(err.to_string(), "No active document", "{}", line);
        }
        // These work without one
        run(&mut ctx, "dir-tree").unwrap();
        run(&mut ctx, "editor-list").unwrap();
    }

    #[test]
    fn test_unknown_command_is_reported_not_fatal() {
        let (_dir, mut ctx) = context();
        let out = run(&mut ctx, "frobnicate now").unwrap();
        assert!(out.contains("frobnicate"));

        let out = run(&mut ctx, "help").unwrap();
        assert!(out.contains("print-tree"));
        assert!(out.contains("spell-check"));
    }

    #[test]
    fn test_quit_flow() {
        let (_dir, mut ctx) = context();
        let mut out = Vec::new();
        assert_eq!(execute(&mut ctx, "quit", &mut out).unwrap(), Flow::Quit);
        assert_eq!(execute(&mut ctx, "", &mut out).unwrap(), Flow::Continue);
    }
}
