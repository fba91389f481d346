use clap::ValueEnum;
use tabled::{
    Table,
    builder::Builder,
    settings::{Panel, Style, object::Rows, style::LineText},
};

use super::Preview;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum TabStyle {
    Rounded,
    Modern,
    ModernRounded,
    Ascii,
    AsciiRounded,
    Psql,
    Markdown,
    Sharp,
    Blank,
}

#[must_use]
pub fn format_tab(preview: &Preview, style: TabStyle) -> String {
    if preview.commits.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["(none)"]);
        let mut table = builder.build();
        apply_style(&mut table, style);
        table.with(Panel::header(format!(" {} ", preview.title)));
        return table.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Hash", "Date", "Message"]);
    for commit in &preview.commits {
        builder.push_record([
            commit.short_hash().to_string(),
            commit.date.format("%Y-%m-%d %H:%M %:z").to_string(),
            commit.message.clone(),
        ]);
    }
    let mut table = builder.build();
    apply_style(&mut table, style);
    apply_title_line(&mut table, &preview.title);
    table.to_string()
}

fn apply_style(table: &mut Table, style: TabStyle) {
    match style {
        TabStyle::Rounded => table.with(Style::rounded()),
        TabStyle::Modern => table.with(Style::modern()),
        TabStyle::ModernRounded => table.with(Style::modern_rounded()),
        TabStyle::Ascii => table.with(Style::ascii()),
        TabStyle::AsciiRounded => table.with(Style::ascii_rounded()),
        TabStyle::Psql => table.with(Style::psql()),
        TabStyle::Markdown => table.with(Style::markdown()),
        TabStyle::Sharp => table.with(Style::sharp()),
        TabStyle::Blank => table.with(Style::blank()),
    };
}

fn apply_title_line(table: &mut Table, title: &str) {
    table.with(LineText::new(format!(" {title} "), Rows::first()).offset(1));
}
