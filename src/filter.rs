//! Client-side row filtering
//!
//! Every list page narrows the rows it fetched with the same two kinds of
//! predicate: a case-insensitive substring match over some text fields and
//! an exact match on a key. `RowFilter` composes them; a predicate whose
//! input is empty is skipped.

/// Predicate applied to one row
type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + Send + Sync + 'a>;

/// Conjunction of row predicates
pub struct RowFilter<'a, T> {
    predicates: Vec<Predicate<'a, T>>,
}

impl<'a, T> Default for RowFilter<'a, T> {
    fn default() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<'a, T> RowFilter<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows where any selected field contains `needle`, ignoring case
    ///
    /// A blank needle matches everything.
    pub fn matching<F>(mut self, needle: &str, fields: F) -> Self
    where
        F: Fn(&T) -> Vec<String> + Send + Sync + 'a,
    {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return self;
        }

        self.predicates.push(Box::new(move |row| {
            fields(row)
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        }));
        self
    }

    /// Keep rows whose key equals `expected`; `None` matches everything
    pub fn equal<K, F>(mut self, expected: Option<K>, key: F) -> Self
    where
        K: PartialEq + Send + Sync + 'a,
        F: Fn(&T) -> K + Send + Sync + 'a,
    {
        if let Some(expected) = expected {
            self.predicates.push(Box::new(move |row| key(row) == expected));
        }
        self
    }

    pub fn matches(&self, row: &T) -> bool {
        self.predicates.iter().all(|p| p(row))
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Rows that pass every predicate, in their original order
    pub fn apply(&self, rows: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        nombre: &'static str,
        lugar: &'static str,
        categoria: Option<i64>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { nombre: "Festival ABC", lugar: "Centro", categoria: Some(1) },
            Row { nombre: "Charla", lugar: "Aula abcd", categoria: Some(2) },
            Row { nombre: "Feria", lugar: "Plaza", categoria: None },
        ]
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let filter = RowFilter::new()
            .matching("abc", |r: &Row| vec![r.nombre.to_string(), r.lugar.to_string()]);

        let kept = filter.apply(&rows());
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| {
            r.nombre.to_lowercase().contains("abc") || r.lugar.to_lowercase().contains("abc")
        }));
    }

    #[test]
    fn test_blank_inputs_keep_everything() {
        let filter = RowFilter::new()
            .matching("  ", |r: &Row| vec![r.nombre.to_string()])
            .equal(None::<Option<i64>>, |r: &Row| r.categoria);

        assert!(filter.is_empty());
        assert_eq!(filter.apply(&rows()), rows());
    }

    #[test]
    fn test_predicates_combine() {
        let filter = RowFilter::new()
            .matching("a", |r: &Row| vec![r.nombre.to_string()])
            .equal(Some(Some(2)), |r: &Row| r.categoria);

        let kept = filter.apply(&rows());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].nombre, "Charla");
    }
}
