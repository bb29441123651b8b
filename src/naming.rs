//! The child-naming scheme shared by every ordered composite record
//! (cell items, structures/objects array elements): each element's
//! child group is named `"element {1-based index}"`, matching
//! `original_source/python/sdafile/utils.py`'s
//! `CELL_LABEL_TEMPLATE = "element {}"`.
//!
//! Because the index is not zero-padded, lexicographic sort of the
//! child group names does not recover element order once a record has
//! ten or more elements (`"element 10"` sorts before `"element 2"`);
//! [`sorted_element_names`] parses the trailing index back out instead.

/// The on-disk child group name for the element at `index` (0-based).
pub(crate) fn element_label(index: usize) -> String {
    format!("element {}", index + 1)
}

/// Parses the 0-based element index back out of a child group name
/// produced by [`element_label`], or `None` if `name` doesn't match the
/// template.
pub(crate) fn element_index(name: &str) -> Option<usize> {
    name.strip_prefix("element ")?
        .parse::<usize>()
        .ok()?
        .checked_sub(1)
}

/// Sorts `names` by the element index embedded in each name (unparsable
/// names sort last, stably among themselves), recovering insertion
/// order regardless of HDF5's member-name enumeration order.
pub(crate) fn sorted_element_names(mut names: Vec<String>) -> Vec<String> {
    names.sort_by_key(|name| element_index(name).unwrap_or(usize::MAX));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_label_is_one_based_and_unpadded() {
        assert_eq!(element_label(0), "element 1");
        assert_eq!(element_label(9), "element 10");
    }

    #[test]
    fn sorted_element_names_recovers_numeric_order() {
        let names = vec![
            "element 10".to_string(),
            "element 2".to_string(),
            "element 1".to_string(),
        ];
        assert_eq!(
            sorted_element_names(names),
            vec!["element 1".to_string(), "element 2".to_string(), "element 10".to_string()]
        );
    }
}
