//! Text rendering of tables, forms and dashboard cards

use std::fmt;

/// A list view: column headers plus one row of cells per record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, header: &str) -> Vec<&str> {
        match self.headers.iter().position(|h| *h == header) {
            Some(i) => self
                .rows
                .iter()
                .map(|row| row.get(i).map(String::as_str).unwrap_or(""))
                .collect(),
            None => Vec::new(),
        }
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }
        widths
    }
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        let header: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect();
        writeln!(f, "{}", header.join("  ").trim_end())?;

        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(total))?;

        if self.rows.is_empty() {
            return writeln!(f, "(sin resultados)");
        }

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| pad(cell, *w))
                .collect();
            writeln!(f, "{}", cells.join("  ").trim_end())?;
        }
        Ok(())
    }
}

/// Kind of input a form field accepts
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Password,
    Number,
    Date,
    /// One of `(value, label)`
    Select(Vec<(String, String)>),
}

/// One field of an open dialog
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub kind: FieldKind,
    pub disabled: bool,
}

impl FieldView {
    pub fn text(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            label,
            value: value.into(),
            kind: FieldKind::Text,
            disabled: false,
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Value as shown: passwords masked, selects by label
    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Password => "*".repeat(self.value.chars().count()),
            FieldKind::Select(options) => options
                .iter()
                .find(|(value, _)| *value == self.value)
                .map(|(_, label)| label.clone())
                .unwrap_or_else(|| self.value.clone()),
            _ => self.value.clone(),
        }
    }
}

/// An open create/edit dialog
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    /// Error shown inside the dialog
    pub error: Option<String>,
}

impl FormView {
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        if let Some(error) = &self.error {
            writeln!(f, "! {}", error)?;
        }

        let width = self
            .fields
            .iter()
            .map(|field| field.label.chars().count())
            .max()
            .unwrap_or(0);

        for field in &self.fields {
            let lock = if field.disabled { " (bloqueado)" } else { "" };
            writeln!(
                f,
                "  {} [{}]: {}{}",
                pad(field.label, width),
                field.name,
                field.display_value(),
                lock
            )?;
            if let FieldKind::Select(options) = &field.kind {
                if !field.disabled {
                    let choices: Vec<String> = options
                        .iter()
                        .map(|(value, label)| format!("{}={}", value, label))
                        .collect();
                    writeln!(f, "  {}   opciones: {}", " ".repeat(width), choices.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

/// Render label/value cards in a grid of `per_row` columns
pub fn render_cards(cards: &[(String, String)], per_row: usize) -> String {
    let per_row = per_row.max(1);
    let width = cards
        .iter()
        .map(|(label, value)| label.chars().count().max(value.chars().count()))
        .max()
        .unwrap_or(0)
        + 2;

    let mut out = String::new();
    for chunk in cards.chunks(per_row) {
        let border: Vec<String> = chunk
            .iter()
            .map(|_| format!("+{}+", "-".repeat(width)))
            .collect();
        let labels: Vec<String> = chunk
            .iter()
            .map(|(label, _)| format!("| {} |", pad(label, width - 2)))
            .collect();
        let values: Vec<String> = chunk
            .iter()
            .map(|(_, value)| format!("| {} |", pad(value, width - 2)))
            .collect();

        out.push_str(&border.join(" "));
        out.push('\n');
        out.push_str(&labels.join(" "));
        out.push('\n');
        out.push_str(&values.join(" "));
        out.push('\n');
        out.push_str(&border.join(" "));
        out.push('\n');
    }
    out
}
