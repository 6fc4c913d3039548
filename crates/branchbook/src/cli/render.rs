//! # Rendering Module
//!
//! Turns library types into terminal text. Every function here returns a
//! `String`; handlers decide where it goes. Nothing in this module touches the
//! store.
//!
//! ## Layout
//!
//! Book lists are one line per book, led by the full id so it can be pasted
//! into other commands:
//!
//! ```text
//! 3f2c8a1e-5b7d-4c09-9e21-6d4f0b8a7c13  The Cave                          public    2 days ago
//! ```
//!
//! Titles are padded and truncated by display width (`unicode-width`), so
//! wide characters do not break the time column.

use super::styles::{ENDED, ID, LABEL, MUTED, SUCCESS, TIME, TITLE, WARNING};
use branchbookapp::commands::navigate::PathOption;
use branchbookapp::commands::{Navigation, OutlineNode, TreeOutcome};
use branchbookapp::model::{Book, Page, Path};
use branchbookapp::store::DoctorReport;
use branchbookapp::tree::Removed;
use chrono::{DateTime, Utc};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TITLE_COLUMN: usize = 32;

/// Serializes any result for `--json`.
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn book_list(books: &[Book]) -> String {
    if books.is_empty() {
        return format!("{}\n", MUTED.apply_to("No books found."));
    }
    books.iter().map(book_line).collect()
}

fn book_line(book: &Book) -> String {
    format!(
        "{}  {}  {:<8}  {}\n",
        ID.apply_to(book.id),
        TITLE.apply_to(pad_to_width(&book.title, TITLE_COLUMN)),
        book.visibility.to_string(),
        TIME.apply_to(format_time_ago(book.created_at)),
    )
}

pub fn book_detail(book: &Book) -> String {
    format!(
        concat!(
            "{}\n",
            "  id:         {}\n",
            "  owner:      {}\n",
            "  visibility: {}\n",
            "  root path:  {}\n",
            "  created:    {}\n",
        ),
        TITLE.apply_to(&book.title),
        ID.apply_to(book.id),
        book.owner,
        book.visibility,
        ID.apply_to(book.root_path_id),
        TIME.apply_to(format_time_ago(book.created_at)),
    )
}

pub fn page_detail(page: &Page) -> String {
    let mut out = format!(
        "{} {}\n",
        TITLE.apply_to(&page.title),
        MUTED.apply_to(format!("#{}", page.ordinal)),
    );
    out.push_str(&format!("{}\n", ID.apply_to(page.id)));
    if let Some(date) = page.publish_date {
        out.push_str(&format!("{}\n", TIME.apply_to(date.format("%Y-%m-%d"))));
    }
    if !page.content.trim().is_empty() {
        out.push('\n');
        out.push_str(page.content.trim_end());
        out.push('\n');
    }
    out
}

pub fn page_list(pages: &[Page]) -> String {
    if pages.is_empty() {
        return format!("{}\n", MUTED.apply_to("This path has no pages yet."));
    }
    pages
        .iter()
        .map(|page| {
            format!(
                "{:>4}. {}  {}\n",
                page.ordinal,
                ID.apply_to(page.id),
                TITLE.apply_to(&page.title),
            )
        })
        .collect()
}

pub fn saved_page(page: &Page) -> String {
    format!(
        "{} {} {}\n",
        SUCCESS.apply_to("Saved page"),
        ID.apply_to(page.id),
        TITLE.apply_to(&page.title),
    )
}

pub fn navigation(nav: &Navigation) -> String {
    match nav {
        Navigation::Page { page, book_title } => {
            format!("{}\n\n{}", MUTED.apply_to(book_title), page_detail(page))
        }
        Navigation::Options {
            options,
            prev_page_id,
        } => {
            let mut out = String::new();
            if options.is_empty() {
                out.push_str(&format!("{}\n", ENDED.apply_to("The End.")));
            } else {
                out.push_str("Where next?\n");
                for option in options {
                    out.push_str(&path_option(option));
                }
            }
            out.push_str(&format!(
                "{} {}\n",
                MUTED.apply_to("back:"),
                ID.apply_to(prev_page_id)
            ));
            out
        }
        Navigation::NoOp => format!("{}\n", MUTED.apply_to("Already at the first page.")),
        Navigation::Empty => format!("{}\n", MUTED.apply_to("This path has no pages yet.")),
    }
}

fn path_option(option: &PathOption) -> String {
    let mut line = format!(
        "  {}  {}",
        ID.apply_to(option.id),
        LABEL.apply_to(&option.label)
    );
    if option.ended {
        line.push_str(&format!(" {}", ENDED.apply_to("(ended)")));
    }
    line.push('\n');
    if let Some(first) = &option.first_page {
        line.push_str(&format!("      {}\n", MUTED.apply_to(&first.preview)));
    }
    line
}

pub fn path_line(path: &Path) -> String {
    let mut line = format!("{}  {}", ID.apply_to(path.id), LABEL.apply_to(&path.label));
    if path.ended {
        line.push_str(&format!(" {}", ENDED.apply_to("(ended)")));
    }
    line.push('\n');
    line
}

pub fn tree_outcome(outcome: &TreeOutcome) -> String {
    match outcome {
        TreeOutcome::Added { path } => format!("{} {}", SUCCESS.apply_to("Added"), path_line(path)),
        TreeOutcome::Renamed { path } => {
            format!("{} {}", SUCCESS.apply_to("Renamed"), path_line(path))
        }
        TreeOutcome::Ended { path } => format!("{} {}", SUCCESS.apply_to("Ended"), path_line(path)),
        TreeOutcome::Deleted { removed } => self::removed("path", removed),
    }
}

pub fn removed(what: &str, removed: &Removed) -> String {
    format!(
        "{} {} ({} {}, {} {})\n",
        SUCCESS.apply_to("Deleted"),
        what,
        removed.paths,
        plural(removed.paths, "path", "paths"),
        removed.pages,
        plural(removed.pages, "page", "pages"),
    )
}

/// Draws the outline as an indented tree:
///
/// ```text
/// The Cave
/// │   1. Entrance
/// ├── Left
/// │       1. Dark hall
/// └── Right (ended)
/// ```
pub fn outline(node: &OutlineNode) -> String {
    let mut out = String::new();
    out.push_str(&outline_header(node));
    outline_body(node, "", &mut out);
    out
}

fn outline_header(node: &OutlineNode) -> String {
    let mut line = format!("{}  {}", LABEL.apply_to(&node.label), ID.apply_to(node.id));
    if node.ended {
        line.push_str(&format!(" {}", ENDED.apply_to("(ended)")));
    }
    line.push('\n');
    line
}

fn outline_body(node: &OutlineNode, prefix: &str, out: &mut String) {
    let page_prefix = if node.children.is_empty() {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };
    for page in &node.pages {
        out.push_str(&format!(
            "{}{:>3}. {}\n",
            page_prefix,
            page.ordinal,
            TITLE.apply_to(&page.title)
        ));
    }

    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, indent) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push_str(&format!("{}{}{}", prefix, branch, outline_header(child)));
        outline_body(child, &format!("{}{}", prefix, indent), out);
    }
}

pub fn doctor(report: &DoctorReport) -> String {
    if report.is_clean() {
        return format!("{}\n", SUCCESS.apply_to("Library is consistent."));
    }
    let mut out = format!("{}\n", WARNING.apply_to("Repaired the library:"));
    let lines = [
        (report.restored_roots, "root paths restored"),
        (report.repaired_child_links, "child links repaired"),
        (report.removed_paths, "orphan paths removed"),
        (report.removed_pages, "orphan pages removed"),
        (report.fixed_pages, "pages re-attached to their book"),
    ];
    for (count, what) in lines.into_iter().filter(|(count, _)| *count > 0) {
        out.push_str(&format!("  {:>4} {}\n", count, what));
    }
    out
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Pads `s` with spaces to exactly `width` columns, truncating with `…`.
fn pad_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }

    let mut result = String::new();
    let mut current = 0;
    let limit = width.saturating_sub(1);
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > limit {
            break;
        }
        result.push(c);
        current += w;
    }
    result.push('…');
    current += 1;
    result.push_str(&" ".repeat(width.saturating_sub(current)));
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
