#[cfg(test)]
mod tests {
    use crate::tools::clean::*;

    #[test]
    fn test_clean_cell_trims() {
        assert_eq!(clean_cell("  Gold  "), "Gold");
        assert_eq!(clean_cell(""), "");
        assert_eq!(clean_cell("   "), "");
    }

    #[test]
    fn test_clean_cell_collapses_crlf_mixture() {
        assert_eq!(clean_cell("First\r\nSecond\rThird\nFourth"), "First Second Third Fourth");
    }

    #[test]
    fn test_clean_cell_keeps_interior_spacing() {
        assert_eq!(clean_cell("a  b"), "a  b");
    }

    #[test]
    fn test_clean_row() {
        let row = vec![" 12 ".to_string(), "Connor\nBedard".to_string()];
        assert_eq!(clean_row(&row), vec!["12", "Connor Bedard"]);
    }
}
