//! Implementation of `quill ls`.

use std::{cmp::Ordering, collections::BTreeMap, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use quill_document::{SearchDocument, newest_first};

use crate::cli::{
    args::LsCommand,
    context::CommandContext,
    output::{dim, display_date, display_title, header},
};

/// Lists posts newest first, or categories with post counts.
pub fn run(ctx: &CommandContext, cmd: &LsCommand) -> ExitCode {
    let docs = match ctx.documents() {
        Ok(docs) => docs,
        Err(code) => return code,
    };

    if cmd.categories {
        print_categories(&docs);
    } else {
        print_posts(&docs, cmd.category.as_deref(), cmd.long);
    }
    ExitCode::SUCCESS
}

/// Per-category listing row.
#[derive(Debug, PartialEq, Eq)]
struct CategoryInfo<'a> {
    /// Category name.
    name: &'a str,
    /// Number of posts.
    posts: usize,
    /// Date of the newest post, by the listing order.
    latest: &'a str,
}

/// Orders documents newest first, breaking ties by corpus order.
fn listing_order(a: &SearchDocument, b: &SearchDocument) -> Ordering {
    newest_first(&a.date, &b.date).then(a.id.cmp(&b.id))
}

/// Documents in listing order, optionally restricted to one category.
fn sorted_posts<'a>(docs: &'a [SearchDocument], category: Option<&str>) -> Vec<&'a SearchDocument> {
    let mut posts: Vec<&SearchDocument> = docs
        .iter()
        .filter(|doc| category.is_none_or(|c| doc.category == c))
        .collect();
    posts.sort_by(|a, b| listing_order(a, b));
    posts
}

/// Categories in name order with their post counts.
fn categories(docs: &[SearchDocument]) -> Vec<CategoryInfo<'_>> {
    let mut by_name: BTreeMap<&str, CategoryInfo<'_>> = BTreeMap::new();
    for doc in sorted_posts(docs, None) {
        by_name
            .entry(doc.category.as_str())
            .or_insert(CategoryInfo {
                name: &doc.category,
                posts: 0,
                latest: &doc.date,
            })
            .posts += 1;
    }
    by_name.into_values().collect()
}

/// Prints one line per post, plus metadata with `--long`.
fn print_posts(docs: &[SearchDocument], category: Option<&str>, long: bool) {
    let posts = sorted_posts(docs, category);
    if posts.is_empty() {
        match category {
            Some(c) => println!("{}", dim(&format!("No posts in category '{c}'."))),
            None => println!("{}", dim("No posts found.")),
        }
        return;
    }

    for doc in posts {
        println!(
            "{} {} {}",
            header(&format!("{}/{}", doc.category, doc.slug)),
            dim("—"),
            display_title(&doc.title)
        );
        if long {
            let mut meta = vec![
                display_date(&doc.date).to_string(),
                format!("{} min read", doc.min_read),
            ];
            if !doc.tags.is_empty() {
                meta.push(format!("tags: {}", doc.tags.join(", ")));
            }
            println!("  {}", dim(&meta.join(" · ")));
            println!();
        }
    }
}

/// Prints the category table.
fn print_categories(docs: &[SearchDocument]) {
    let rows = categories(docs);
    if rows.is_empty() {
        println!("{}", dim("No categories found."));
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Category", "Posts", "Latest"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.name),
            Cell::new(row.posts.to_string()),
            Cell::new(display_date(row.latest)),
        ]);
    }
    println!("{table}");
}
