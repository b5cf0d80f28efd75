use crate::app::{Category, Pagination, View};
use crate::outputs::card::render_card;
use itertools::Itertools;
use std::fmt::Write;

pub const ERROR_MESSAGE: &str = "Something went wrong";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No articles found";
pub const HEADING: &str = "Stay Updated with Latest News";

/// Render a full page for `view`.
///
/// Only the populated view carries the navbar and controls; the other views
/// render their message alone.
pub fn render_page(view: &View, search_input: &str, notice: Option<&str>) -> String {
    let mut md = String::new();
    if let Some(notice) = notice {
        writeln!(md, "> {notice}\n").unwrap();
    }

    let (articles, pagination) = match view {
        View::Error => return message(md, ERROR_MESSAGE),
        View::Loading => return message(md, LOADING_MESSAGE),
        View::Empty => return message(md, EMPTY_MESSAGE),
        View::Populated {
            articles,
            pagination,
        } => (articles, pagination),
    };

    writeln!(md, "# NewsApp\n").unwrap();
    writeln!(
        md,
        "[All News] · [{}] · Search Favourite News: `{}` [Search]\n",
        Category::Trending,
        search_input
    ).unwrap();
    writeln!(
        md,
        "{}\n",
        Category::BUTTONS.iter().map(|c| format!("[{c}]")).join(" ")
    ).unwrap();
    writeln!(md, "## {HEADING}\n").unwrap();

    let grid = articles.iter().map(render_card).join("\n---\n\n");
    md.push_str(&grid);
    writeln!(md, "\n{}", pagination_line(pagination)).unwrap();
    md
}

/// `[Previous] Page N [Next]`, with disabled controls struck through.
pub fn pagination_line(p: &Pagination) -> String {
    let button = |label: &str, enabled: bool| {
        if enabled {
            format!("[{label}]")
        } else {
            format!("~~{label}~~")
        }
    };
    format!(
        "{} Page {} {}",
        button("Previous", p.previous_enabled),
        p.page,
        button("Next", p.next_enabled)
    )
}

fn message(mut md: String, text: &str) -> String {
    writeln!(md, "# {text}").unwrap();
    md
}
