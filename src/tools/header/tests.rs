#[cfg(test)]
mod tests {
    use crate::tools::header::*;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_header_splits_set_and_subset() {
        let header = extract_header(&toks(&[
            "2024-25 SP Game Used Hockey Gold Parallel - Legends",
            "12",
            "Connor Bedard",
        ]));
        assert_eq!(header.set, "2024-25 SP Game Used Hockey Gold Parallel");
        assert_eq!(header.subset_or_insert, "Legends");
        assert_eq!(header.year, "2024-25");
        assert_eq!(header.rarity, "Gold");
    }

    #[test]
    fn test_extract_header_joins_leading_tokens() {
        let header = extract_header(&toks(&["2023-24", "Upper Deck Series 1", "- Young Guns", "201", "Adam Fantilli"]));
        assert_eq!(header.set, "2023-24 Upper Deck Series 1");
        assert_eq!(header.subset_or_insert, "Young Guns");
        assert_eq!(header.year, "2023-24");
    }

    #[test]
    fn test_extract_header_rejoins_extra_separators_into_subset() {
        let (set, subset) = split_header("2024 Set - Insert - Die-Cut");
        assert_eq!(set, "2024 Set");
        assert_eq!(subset, "Insert - Die-Cut");
    }

    #[test]
    fn test_extract_header_without_separator() {
        let header = extract_header(&toks(&["1991-92 Upper Deck Hockey", "1", "Checklist card"]));
        assert_eq!(header.set, "1991-92 Upper Deck Hockey");
        assert_eq!(header.subset_or_insert, "");
        assert_eq!(header.year, "1991-92");
    }

    #[test]
    fn test_extract_header_without_card_number_uses_all_tokens() {
        assert_eq!(raw_header(&toks(&["Only", "Header"])), "Only Header");
        assert_eq!(raw_header(&toks(&["7", "Title"])), "");
    }

    #[test]
    fn test_find_year() {
        assert_eq!(find_year("2024 Marvel Annual"), "2024");
        assert_eq!(find_year("1999-00 Retro"), "1999-00");
        assert_eq!(find_year("Series 1 2023-24 then 2025"), "2023-24");
        assert_eq!(find_year("Set 12345"), "");
        assert_eq!(find_year("Legends"), "");
    }

    #[test]
    fn test_infer_rarity_specific_beats_parallel() {
        assert_eq!(infer_rarity("Series One Blue Parallel", "", ""), "Blue");
        assert_eq!(infer_rarity("Series One parallel", "", "purple"), "Purple");
        assert_eq!(infer_rarity("Series One Parallel", "", ""), "Parallel");
    }

    #[test]
    fn test_infer_rarity_term_order_beats_field_order() {
        // Ranking is by term list, so a color in the title outranks an
        // insert family in the subset.
        assert_eq!(infer_rarity("2023-24 Upper Deck Series 1", "Canvas", "Detroit Red Wings"), "Red");
        assert_eq!(infer_rarity("2023-24 Upper Deck Series 1", "Canvas", "Moritz Seider"), "Canvas");
    }

    #[test]
    fn test_infer_rarity_tolerates_whitespace() {
        assert_eq!(infer_rarity("", "Young   Guns", ""), "Young Guns");
        assert_eq!(infer_rarity("", "YoungGuns", ""), "Young Guns");
        assert_eq!(infer_rarity("", "authentic\u{00A0}rookies", ""), "Authentic Rookies");
    }

    #[test]
    fn test_infer_rarity_whole_words_only() {
        assert_eq!(infer_rarity("", "", "Fred Goldberg"), "");
        assert_eq!(infer_rarity("", "", "Ice Cream"), "Ice");
    }

    #[test]
    fn test_infer_rarity_empty() {
        assert_eq!(infer_rarity("", "", ""), "");
    }

    #[test]
    fn test_canonical_rarity_folds_colors() {
        assert_eq!(canonical_rarity("GOLD").as_deref(), Some("Gold"));
        assert_eq!(canonical_rarity("tEaL").as_deref(), Some("Teal"));
        assert_eq!(canonical_rarity("Exclusive Parallel").as_deref(), Some("Parallel"));
        assert_eq!(canonical_rarity("young guns").as_deref(), Some("Young Guns"));
        assert_eq!(canonical_rarity("Mystery"), None);
        assert_eq!(normalize_rarity(" Mystery  Foil "), "Mystery Foil");
    }

    #[test]
    fn test_term_pattern() {
        let re = term_regex("Net Cord").unwrap();
        assert!(re.is_match("a NET   cord b"));
        assert!(re.is_match("netcord"));
        assert!(!re.is_match("networked"));
    }
}
