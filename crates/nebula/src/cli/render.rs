//! # Rendering
//!
//! Turns a [`CmdResult`] into terminal text. Every function here returns a
//! `String`; printing happens in `commands.rs`. Styles come from [`super::styles`]
//! and are dropped automatically by `console` when stdout is not a terminal.
//!
//! Layout math (column widths, truncation) is Unicode-aware: card names are
//! frequently Japanese.

use super::styles;
use nebulaapp::checklist::{Checklist, ChecklistEntry, SetGroup, Summary};
use nebulaapp::commands::{CmdMessage, CmdResult, MessageLevel, OwnedCard};
use nebulaapp::model::Stats;
use std::collections::BTreeMap;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const NUMBER_WIDTH: usize = 22;
const RARITY_WIDTH: usize = 6;
const COUNT_WIDTH: usize = 7;
const INDENT: &str = "  ";

/// What to show for `result.cards`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    List,
    Detail,
}

pub fn render_result(result: &CmdResult, view: CardView) -> String {
    let mut out = String::new();
    if let Some(summary) = &result.summary {
        out.push_str(&render_summary(summary));
    }
    if let Some(checklist) = &result.checklist {
        out.push_str(&render_checklist(checklist));
    }
    if !result.cards.is_empty() {
        match view {
            CardView::List => out.push_str(&render_card_list(&result.cards)),
            CardView::Detail => {
                for card in &result.cards {
                    out.push_str(&render_card_detail(card));
                }
            }
        }
    }
    if let Some(stats) = &result.stats {
        out.push_str(&render_stats(stats));
    }
    if !result.config.is_empty() {
        out.push_str(&render_config(&result.config));
    }
    out.push_str(&render_messages(&result.messages));
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &*styles::INFO,
            MessageLevel::Success => &*styles::SUCCESS,
            MessageLevel::Warning => &*styles::WARNING,
            MessageLevel::Error => &*styles::ERROR,
        };
        let _ = writeln!(out, "{}", style.apply_to(&message.content));
    }
    out
}

pub fn render_summary(summary: &Summary) -> String {
    if summary.card_count == 0 {
        return format!(
            "{} cards owned, {} copies in total\n",
            summary.owned_cards, summary.owned_copies
        );
    }
    format!(
        "{} of {} cards owned ({}%), {} of {} copies\n",
        summary.owned_cards,
        summary.card_count,
        percent(summary.owned_cards as u64, summary.card_count as u64),
        summary.owned_copies,
        summary.max_copies
    )
}

fn percent(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        0
    } else {
        part * 100 / whole
    }
}

pub fn render_checklist(checklist: &Checklist) -> String {
    let mut out = String::new();
    for (i, group) in checklist.groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_group_heading(group));
        for entry in &group.entries {
            out.push_str(&render_entry(entry));
        }
    }
    out
}

fn render_group_heading(group: &SetGroup) -> String {
    let totals = format!(
        "{}/{} cards  {}/{} copies",
        group.owned_cards, group.card_count, group.owned_copies, group.max_copies
    );
    if group.complete() {
        format!(
            "{}  {}  {}\n",
            styles::HEADING.apply_to(&group.label),
            totals,
            styles::COMPLETE.apply_to("complete")
        )
    } else {
        format!("{}  {}\n", styles::HEADING.apply_to(&group.label), totals)
    }
}

fn render_entry(entry: &ChecklistEntry) -> String {
    let name_width =
        LINE_WIDTH - INDENT.len() - NUMBER_WIDTH - RARITY_WIDTH - COUNT_WIDTH - 3;
    let number = pad_to_width(&truncate_to_width(&entry.number, NUMBER_WIDTH), NUMBER_WIDTH);
    let name = pad_to_width(&truncate_to_width(&entry.name, name_width), name_width);
    let rarity = pad_to_width(entry.rarity.as_deref().unwrap_or(""), RARITY_WIDTH);
    let count = format!("{}/{}", entry.owned, entry.cap);

    let count = if entry.owned == 0 {
        styles::DIM.apply_to(count).to_string()
    } else if entry.owned >= entry.cap {
        styles::COMPLETE.apply_to(count).to_string()
    } else {
        count
    };
    format!(
        "{INDENT}{} {} {} {}\n",
        styles::NUMBER.apply_to(number),
        name,
        styles::DIM.apply_to(rarity),
        count
    )
}

pub fn render_card_list(cards: &[OwnedCard]) -> String {
    let mut out = String::new();
    for owned in cards {
        let card = &owned.card;
        let number = pad_to_width(card.display_number(), NUMBER_WIDTH);
        let badges: Vec<&str> = card.badges().iter().map(|b| b.label()).collect();
        let tail = format!(
            "{} {}/{}",
            pad_to_width(card.rarity.as_deref().unwrap_or(""), RARITY_WIDTH),
            owned.owned,
            owned.cap
        );
        let fixed = NUMBER_WIDTH + 1 + tail.width() + 1;
        let name = truncate_to_width(card.display_name(), LINE_WIDTH.saturating_sub(fixed));
        let padding = LINE_WIDTH.saturating_sub(fixed + name.width());

        let _ = write!(
            out,
            "{} {}{} {}",
            styles::NUMBER.apply_to(number),
            styles::NAME.apply_to(name),
            " ".repeat(padding),
            tail
        );
        if !badges.is_empty() {
            let _ = write!(out, " {}", styles::BADGE.apply_to(badges.join(", ")));
        }
        out.push('\n');
    }
    out
}

pub fn render_card_detail(owned: &OwnedCard) -> String {
    let card = &owned.card;
    let mut out = String::new();
    let _ = write!(
        out,
        "{} {}",
        styles::NUMBER.apply_to(card.display_number()),
        styles::NAME.apply_to(card.display_name())
    );
    for badge in card.badges() {
        let _ = write!(out, "  {}", styles::BADGE.apply_to(badge.label()));
    }
    out.push('\n');

    let fields = [
        ("Rarity", card.rarity.as_deref()),
        ("Feature", card.feature.as_deref()),
        ("Type", card.card_type.as_deref()),
        ("Character", card.character_name.as_deref()),
        ("Bundles", card.display_card_bundle_names.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "{:<10} {}", styles::DIM.apply_to(format!("{label}:")), value);
        }
    }
    let _ = writeln!(out, "{:<10} {}", styles::DIM.apply_to("Set:"), card.set_label());
    let _ = writeln!(
        out,
        "{:<10} {}/{}",
        styles::DIM.apply_to("Owned:"),
        owned.owned,
        owned.cap
    );

    if let Some(effect) = card.effect.as_deref().filter(|e| !e.is_empty()) {
        let _ = write!(out, "\n{effect}\n");
    }
    if let Some(flavor) = card.flavor_text.as_deref().filter(|f| !f.is_empty()) {
        let _ = write!(out, "\n{}\n", styles::DIM.apply_to(flavor));
    }
    if let Some(url) = card.errata_url.as_deref().filter(|u| !u.is_empty()) {
        let _ = write!(out, "\nErrata: {url}\n");
    }
    if let Some(url) = card.image_url.as_deref().filter(|u| !u.is_empty()) {
        let _ = writeln!(out, "Image: {url}");
    }
    out
}

pub fn render_stats(stats: &Stats) -> String {
    let mut out = format!("Total cards: {}\n", stats.total_cards);
    let sections = [
        ("Rarity", &stats.rarity_distribution),
        ("Feature", &stats.feature_distribution),
        ("Publication year", &stats.publication_year_distribution),
        ("Top Ultras", &stats.top_25_ultras),
        ("Top Kaiju", &stats.top_25_kaiju),
    ];
    for (title, counts) in sections {
        out.push_str(&render_distribution(title, counts));
    }
    out
}

fn render_distribution(title: &str, counts: &BTreeMap<String, u64>) -> String {
    if counts.is_empty() {
        return String::new();
    }
    let width = counts.keys().map(|k| k.width()).max().unwrap_or(0);
    let mut out = format!("\n{}\n", styles::HEADING.apply_to(title));
    for (key, count) in counts {
        let _ = writeln!(out, "{INDENT}{} {count}", pad_to_width(key, width));
    }
    out
}

pub fn render_config(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        let _ = writeln!(out, "{key} = {value}");
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebulaapp::model::Card;

    fn plain(s: String) -> String {
        console::strip_ansi_codes(&s).into_owned()
    }

    fn owned(number: &str, name: &str, owned: u32, cap: u32) -> OwnedCard {
        OwnedCard {
            card: Card {
                number: Some(number.to_string()),
                name: Some(name.to_string()),
                rarity: Some("RRR".to_string()),
                ..Default::default()
            },
            owned,
            cap,
        }
    }

    #[test]
    fn truncates_wide_text() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abc", 4), "abc");
        // Each kana is two columns wide.
        assert_eq!(truncate_to_width("ウルトラマン", 5), "ウル…");
    }

    #[test]
    fn summary_with_and_without_catalog() {
        let full = Summary {
            owned_cards: 3,
            card_count: 12,
            owned_copies: 5,
            max_copies: 48,
        };
        assert_eq!(
            render_summary(&full),
            "3 of 12 cards owned (25%), 5 of 48 copies\n"
        );

        let ledger_only = Summary {
            owned_cards: 2,
            owned_copies: 3,
            ..Default::default()
        };
        assert_eq!(
            render_summary(&ledger_only),
            "2 cards owned, 3 copies in total\n"
        );
    }

    #[test]
    fn card_list_lines_fit_the_width() {
        let long_name = "Ultraman ".repeat(20);
        let text = plain(render_card_list(&[owned("BP01-001", &long_name, 2, 4)]));
        let line = text.lines().next().unwrap();
        assert!(line.starts_with("BP01-001"));
        assert!(line.ends_with("2/4"));
        assert_eq!(line.width(), LINE_WIDTH);
    }

    #[test]
    fn card_list_shows_badges() {
        let text = plain(render_card_list(&[owned("PR-107", "Ultraman Belial", 0, 8)]));
        assert!(text.trim_end().ends_with("Semi-Transcendent"));
    }

    #[test]
    fn checklist_groups_and_entries() {
        let checklist = Checklist {
            groups: vec![SetGroup {
                label: "BP01".to_string(),
                entries: vec![ChecklistEntry {
                    number: "BP01-001".to_string(),
                    name: "Ultraman Tiga".to_string(),
                    rarity: Some("RRR".to_string()),
                    owned: 4,
                    cap: 4,
                }],
                owned_cards: 1,
                card_count: 1,
                owned_copies: 4,
                max_copies: 4,
            }],
        };
        let text = plain(render_checklist(&checklist));
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "BP01  1/1 cards  4/4 copies  complete"
        );
        let entry = lines.next().unwrap();
        assert!(entry.starts_with("  BP01-001"));
        assert!(entry.contains("Ultraman Tiga"));
        assert!(entry.ends_with("4/4"));
    }

    #[test]
    fn detail_lists_known_fields_only() {
        let mut card = owned("BP01-022", "Ultraman Zero", 1, 4);
        card.card.effect = Some("Draw 2 cards.".to_string());
        let text = plain(render_card_detail(&card));
        assert!(text.starts_with("BP01-022 Ultraman Zero  Transcendent\n"));
        assert!(text.contains("Rarity:"));
        assert!(!text.contains("Feature:"));
        assert!(text.contains("Owned:     1/4"));
        assert!(text.contains("\nDraw 2 cards.\n"));
    }

    #[test]
    fn stats_skip_empty_sections() {
        let mut stats = Stats {
            total_cards: 3,
            ..Default::default()
        };
        stats.rarity_distribution.insert("C".to_string(), 2);
        stats.rarity_distribution.insert("RRR".to_string(), 1);
        let text = plain(render_stats(&stats));
        assert!(text.starts_with("Total cards: 3\n"));
        assert!(text.contains("Rarity\n  C   2\n  RRR 1\n"));
        assert!(!text.contains("Feature"));
    }

    #[test]
    fn messages_in_order() {
        let text = plain(render_messages(&[
            CmdMessage::success("Saved"),
            CmdMessage::warning("Careful"),
        ]));
        assert_eq!(text, "Saved\nCareful\n");
    }

    #[test]
    fn result_renders_config_pairs() {
        let mut result = CmdResult::default();
        result.config = vec![("api_base_url".to_string(), "http://localhost:8000".to_string())];
        assert_eq!(
            plain(render_result(&result, CardView::List)),
            "api_base_url = http://localhost:8000\n"
        );
    }
}
