use crate::rules::RulesIndex;
use crate::selectors::{CHECKLIST_GROUP_SELECTOR, CHECKLIST_ROW_SELECTOR, GROUP_SELECTOR};
use crate::tools::header::{extract_header, infer_rarity, SUBSET_SEPARATOR};
use crate::tools::row::{extract_checklist_row, extract_row, find_anchors, RowFields};
use crate::tools::tokenize::{joined_text, tokenize};
use crate::types::{CardRecord, ExtractOptions, GroupHeader, Mode};
use scraper::{ElementRef, Html};
use std::collections::{HashMap, HashSet};

/// A checklist group must hold more than this many text lines.
const CHECKLIST_MIN_GROUP_LINES: usize = 10;

/// A checklist row's text must be longer than this many characters.
const CHECKLIST_MIN_ROW_CHARS: usize = 10;

/// Record Assembler: turns a parsed inventory page into card records.
///
/// Holds the run's rules index by reference; extraction itself is pure and
/// performs no I/O.
pub struct Engine<'a> {
    pub rules: &'a RulesIndex,
    pub opts: ExtractOptions,
}

impl<'a> Engine<'a> {
    pub fn new(rules: &'a RulesIndex, opts: ExtractOptions) -> Self {
        Self { rules, opts }
    }

    /// Parse `html` and build its records.
    pub fn build_records_from_html(&self, html: &str) -> Vec<CardRecord> {
        let doc = Html::parse_document(html);
        self.build_records(&doc)
    }

    /// Records in document order: groups, then rows within each group.
    pub fn build_records(&self, doc: &Html) -> Vec<CardRecord> {
        let records = match self.opts.mode {
            Mode::Collection => self.collection_records(doc),
            Mode::Checklist => self.checklist_records(doc),
        };
        tracing::info!(mode = %self.opts.mode, records = records.len(), "records built");
        records
    }

    fn collection_records(&self, doc: &Html) -> Vec<CardRecord> {
        let mut out = Vec::new();
        for group in doc.select(&GROUP_SELECTOR) {
            let header = extract_header(&tokenize(group));
            let mut seen = HashSet::new();
            let before = out.len();

            for anchor in find_anchors(group) {
                let Some(row) = extract_row(anchor, group, &self.opts) else {
                    continue;
                };
                if !seen.insert(row.row.id()) {
                    continue;
                }
                let rarity = infer_rarity(&header.set, &header.subset_or_insert, &row.title);
                out.push(self.assemble(&header, row, rarity));
            }
            tracing::debug!(set = %header.set, rows = out.len() - before, "collection group");
        }
        out
    }

    fn checklist_records(&self, doc: &Html) -> Vec<CardRecord> {
        let candidates: Vec<ElementRef<'_>> = doc
            .select(&CHECKLIST_GROUP_SELECTOR)
            .filter(|el| tokenize(*el).len() > CHECKLIST_MIN_GROUP_LINES)
            .collect();
        let ids: HashSet<_> = candidates.iter().map(|el| el.id()).collect();
        let mut headers = HashMap::new();

        let mut out = Vec::new();
        for &group in &candidates {
            // A row belongs to its nearest candidate group; nested groups
            // emit their own rows.
            let belongs = |row: ElementRef<'_>| {
                let nearest = row.ancestors().map(|a| a.id()).find(|id| ids.contains(id));
                nearest == Some(group.id())
                    && !ids.contains(&row.id())
                    && !row.descendants().skip(1).any(|n| ids.contains(&n.id()))
            };
            let before = out.len();

            for row in checklist_rows(group, belongs) {
                let Some(fields) = extract_checklist_row(row) else {
                    continue;
                };
                // Small sections inside a group keep their own header.
                let section = row
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|a| CHECKLIST_GROUP_SELECTOR.matches(a))
                    .unwrap_or(group);
                let header = headers
                    .entry(section.id())
                    .or_insert_with(|| extract_header(&tokenize(section)))
                    .clone();
                let rarity = header.rarity.clone();
                out.push(self.assemble(&header, fields, rarity));
            }
            tracing::debug!(rows = out.len() - before, "checklist group");
        }
        out
    }

    fn assemble(&self, header: &GroupHeader, row: RowFields<'_>, rarity: String) -> CardRecord {
        let serial = if row.serial.is_empty() {
            self.rules.serial_for(&header.set, &rarity)
        } else {
            row.serial
        };

        CardRecord {
            title: row.title,
            set: header.set.clone(),
            subset_or_insert: header.subset_or_insert.clone(),
            card_number: row.card_number,
            year: header.year.clone(),
            rarity,
            quantity_owned: row.quantity_owned,
            subject_points: row.subject_points,
            combine_needed: row.combine_needed,
            physical: row.physical,
            locked: row.locked,
            wishlist: row.wishlist,
            serial,
            raw_text: format!("{} | {}", header_label(header), row.raw_text),
        }
    }
}

/// `set - subset`, or just the set.
fn header_label(header: &GroupHeader) -> String {
    if header.subset_or_insert.is_empty() {
        header.set.clone()
    } else {
        format!("{}{}{}", header.set, SUBSET_SEPARATOR, header.subset_or_insert)
    }
}

/// Drop every element that contains another element of the list.
fn innermost<'a>(elements: Vec<ElementRef<'a>>) -> Vec<ElementRef<'a>> {
    let ids: HashSet<_> = elements.iter().map(|el| el.id()).collect();
    let mut outer = HashSet::new();
    for el in &elements {
        for ancestor in el.ancestors() {
            if ids.contains(&ancestor.id()) {
                outer.insert(ancestor.id());
            }
        }
    }
    elements
        .into_iter()
        .filter(|el| !outer.contains(&el.id()))
        .collect()
}

fn has_row_text(el: &ElementRef<'_>) -> bool {
    joined_text(*el).chars().count() > CHECKLIST_MIN_ROW_CHARS
}

/// Checklist row candidates accepted by `belongs`: row-like descendants with
/// enough text, else the group's element children.
fn checklist_rows<'a>(group: ElementRef<'a>, belongs: impl Fn(ElementRef<'a>) -> bool) -> Vec<ElementRef<'a>> {
    let rows: Vec<ElementRef<'a>> = group
        .select(&CHECKLIST_ROW_SELECTOR)
        .filter(|el| el.id() != group.id() && belongs(*el))
        .filter(has_row_text)
        .collect();
    if !rows.is_empty() {
        return innermost(rows);
    }
    group
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| belongs(*el))
        .filter(has_row_text)
        .collect()
}
