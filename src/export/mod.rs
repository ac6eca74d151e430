//! Binder exports: the raw binder as JSON and a printable slot listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::binders::Binder;
use crate::slots::Slot;

/// Lines that fit under the page header on an A4 page at 14pt leading.
pub const LINES_PER_PAGE: usize = 50;

const PAGE_BREAK: char = '\u{000C}';

#[derive(Debug, Serialize)]
pub struct BinderExport<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub cards: &'a [Slot],
    pub readonly: bool,
    pub favorite: bool,
}

pub fn binder_json<'a>(id: &'a str, binder: &'a Binder) -> BinderExport<'a> {
    BinderExport {
        id,
        name: &binder.name,
        cards: binder.slots.slots(),
        readonly: binder.readonly,
        favorite: binder.favorite,
    }
}

/// Paginated plain-text listing with one line per slot index, vacant slots
/// included so line numbers match binder positions.
pub fn binder_document(binder: &Binder, generated_at: DateTime<Utc>) -> String {
    let lines: Vec<String> = binder
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| slot_line(i + 1, slot))
        .collect();

    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![lines.as_slice()]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    let mut out = String::new();
    for (n, page) in pages.iter().enumerate() {
        if n > 0 {
            out.push(PAGE_BREAK);
        }
        out.push_str(&page_header(binder, n + 1, pages.len(), generated_at));
        for line in page.iter() {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn page_header(binder: &Binder, page: usize, total: usize, generated_at: DateTime<Utc>) -> String {
    format!(
        "{}{:>width$}\nCards: {}  |  Read-only: {}  |  Favorite: {}  |  Generated: {}\n\n",
        binder.name,
        format!("Page {}/{}", page, total),
        binder.slots.len(),
        binder.readonly,
        binder.favorite,
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        width = 72usize.saturating_sub(binder.name.chars().count()),
    )
}

fn slot_line(position: usize, slot: &Slot) -> String {
    match slot {
        Some(card) => format!(
            "{:04}  {}  |  {}  |  #{}",
            position,
            card.name,
            card.set,
            card.number.as_deref().unwrap_or("")
        ),
        None => format!("{:04}  (empty)", position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::{card, SlotSequence};
    use chrono::TimeZone;

    fn binder_with(slots: usize) -> Binder {
        let mut binder = Binder::new("Vintage");
        binder.slots = SlotSequence::from(
            (0..slots)
                .map(|i| (i % 3 != 1).then(|| card(&format!("c{i}"))))
                .collect::<Vec<Slot>>(),
        );
        binder
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn lists_every_slot_with_gaps() {
        let doc = binder_document(&binder_with(3), at());
        let body: Vec<&str> = doc.lines().skip(3).collect();
        assert_eq!(
            body,
            vec![
                "0001  Card c0  |  Base Set  |  #1",
                "0002  (empty)",
                "0003  Card c2  |  Base Set  |  #1",
            ]
        );
        assert!(doc.starts_with("Vintage"));
        assert!(doc.contains("Page 1/1"));
        assert!(doc.contains("Cards: 3  |  Read-only: false  |  Favorite: false"));
        assert!(doc.contains("Generated: 2026-10-18 12:00 UTC"));
    }

    #[test]
    fn breaks_pages_when_full() {
        let doc = binder_document(&binder_with(LINES_PER_PAGE * 2 + 1), at());
        let pages: Vec<&str> = doc.split(PAGE_BREAK).collect();
        assert_eq!(pages.len(), 3);
        assert!(pages[1].contains("Page 2/3"));
        assert!(pages[1].contains(&format!("{:04}  ", LINES_PER_PAGE + 1)));
        assert_eq!(pages[2].lines().count(), 3 + 1);
    }

    #[test]
    fn empty_binder_still_has_a_page() {
        let doc = binder_document(&Binder::new("Empty"), at());
        assert!(!doc.contains(PAGE_BREAK));
        assert!(doc.contains("Page 1/1"));
        assert!(doc.contains("Cards: 0"));
    }

    #[test]
    fn json_export_flattens_id() {
        let binder = binder_with(2);
        let json = serde_json::to_value(binder_json("ab12cd34", &binder)).unwrap();
        assert_eq!(json["id"], "ab12cd34");
        assert_eq!(json["name"], "Vintage");
        assert!(json["cards"][1].is_null());
        assert_eq!(json["favorite"], false);
    }
}
