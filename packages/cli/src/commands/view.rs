use crate::context::Context;
use crate::dirview::DirectoryTree;
use anyhow::Result;
use clap::{ArgAction, Args};
use colored::Colorize;
use htmled_editor::{check_spelling, indent_view, tree_view};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Args)]
pub struct PrintIndentArgs {
    /// Spaces per level (defaults to the configured indent)
    pub width: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ShowIdArgs {
    /// `true` or `false`
    #[arg(action = ArgAction::Set)]
    pub value: bool,
}

pub fn print_tree(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let doc = ctx.manager.active()?;
    let flagged = check_spelling(doc.tree(), ctx.lexicon()).flagged_ids();
    write!(out, "{}", doc.render_tree(Some(&flagged)))?;
    Ok(())
}

pub fn print_indent(args: PrintIndentArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let doc = ctx.manager.active()?;
    write!(out, "{}", doc.render_indent(args.width))?;
    Ok(())
}

pub fn spell_check(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    let doc = ctx.manager.active()?;
    let report = check_spelling(doc.tree(), ctx.lexicon());

    if report.is_clean() {
        writeln!(
            out,
            "{} ({} words checked)",
            "No spelling errors found".green(),
            report.words_checked
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "{} {} of {} words:",
        "Spelling errors:".yellow().bold(),
        report.misspellings.len(),
        report.words_checked
    )?;
    for misspelling in &report.misspellings {
        write!(out, "  {} in #{}", misspelling.word.red(), misspelling.node_id)?;
        if !misspelling.suggestions.is_empty() {
            write!(out, " (did you mean: {})", misspelling.suggestions.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn showid(args: ShowIdArgs, ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    ctx.manager.active_mut()?.show_id = args.value;
    writeln!(out, "showid {}", if args.value { "on" } else { "off" })?;
    Ok(())
}

pub fn dir_tree(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", tree_view(&directory(ctx)))?;
    Ok(())
}

pub fn dir_indent(ctx: &mut Context, out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", indent_view(&directory(ctx), ctx.config.indent))?;
    Ok(())
}

fn directory(ctx: &Context) -> DirectoryTree {
    let session_file = Path::new(&ctx.config.session_file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let open = ctx
        .manager
        .documents()
        .map(|doc| ctx.cwd.join(&doc.path))
        .collect::<Vec<_>>();
    let active = ctx.manager.active().ok().map(|doc| ctx.cwd.join(&doc.path));

    DirectoryTree::scan(&ctx.cwd, &[session_file]).with_documents(open, active)
}

#[cfg(test)]
mod tests {
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

    #[test]
    fn test_print_tree_marks_misspelled() {
        let (_dir, mut ctx) = context_with_doc();
        run(&mut ctx, "append div main body").unwrap();
        run(&mut ctx, "append p para1 main Hello wrold").unwrap();
        run(&mut ctx, "append p para2 main Hello world").unwrap();

        let out = run(&mut ctx, "print-tree").unwrap();
        let expected = "\
html
├── head
│   └── title
└── body
    └── div#main
        ├── [X] p#para1
        │   └── Hello wrold
        └── p#para2
            └── Hello world
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_showid_toggles_ids() {
        let (_dir, mut ctx) = context_with_doc();
        run(&mut ctx, "append div main body").unwrap();

        assert_eq!(run(&mut ctx, "showid false").unwrap(), "showid off\n");
        let out = run(&mut ctx, "print-tree").unwrap();
        assert!(out.ends_with("└── body\n    └── div\n"));

        assert!(run(&mut ctx, "showid maybe").unwrap().contains("invalid value"));
    }

    #[test]
    fn test_print_indent_width() {
        let (_dir, mut ctx) = context_with_doc();
        let out = run(&mut ctx, "print-indent").unwrap();
        assert!(out.contains("\n  <body></body>\n"));

        let out = run(&mut ctx, "print-indent 4").unwrap();
        assert!(out.contains("\n    <body></body>\n"));
    }

    #[test]
    fn test_spell_check_report() {
        let (_dir, mut ctx) = context_with_doc();
        let out = run(&mut ctx, "spell-check").unwrap();
        assert!(out.contains("No spelling errors found"));

        run(&mut ctx, "append p para1 body helo world").unwrap();
        let out = run(&mut ctx, "spell-check").unwrap();
        assert!(out.contains("1 of 2 words"));
        assert!(out.contains("helo in #para1 (did you mean: hello"));
    }

    #[test]
    fn test_ignored_words_are_accepted() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            ignored_words: vec!["Htmled".to_string()],
            ..Config::default()
        };
        let mut ctx = Context::new(config, dir.path().to_path_buf());
        run(&mut ctx, "init page.html").unwrap();
        run(&mut ctx, "append p intro body htmled rocks").unwrap();

        let out = run(&mut ctx, "spell-check").unwrap();
        assert!(!out.contains("htmled in"));
    }

    #[test]
    fn test_dir_views() {
        let (dir, mut ctx) = context_with_doc();
        std::fs::write(dir.path().join("page.html"), "").unwrap();
        std::fs::write(dir.path().join("other.html"), "").unwrap();
        std::fs::write(dir.path().join("session.json"), "{}").unwrap();

        let out = run(&mut ctx, "dir-tree").unwrap();
        let lines: Vec<_> = out.lines().skip(1).collect();
        assert_eq!(lines, vec!["├── other.html", "└── > page.html *"]);

        let out = run(&mut ctx, "dir-indent").unwrap();
        assert!(out.ends_with("\n  other.html\n  > page.html *\n"));
    }
}
