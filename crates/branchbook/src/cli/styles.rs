//! Styles for the branchbook CLI.
//!
//! Render code refers to styles by what the text *is* (a title, an id, a
//! timestamp), never by color. Changing the look means editing this file only.
//!
//! `console` drops the escape codes by itself when stdout is not a terminal,
//! so piped output and tests see plain text.

use console::Style;
use once_cell::sync::Lazy;

/// Book and page titles.
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());

/// Record ids, printed so they can be pasted into the next command.
pub static ID: Lazy<Style> = Lazy::new(|| Style::new().yellow());

/// Path labels and branch options.
pub static LABEL: Lazy<Style> = Lazy::new(|| Style::new().cyan());

/// Timestamps and other metadata.
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());

pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());

/// Ended paths and dead ends.
pub static ENDED: Lazy<Style> = Lazy::new(|| Style::new().red());

pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());

pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());
