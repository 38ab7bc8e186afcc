//! Maps source identifiers onto output labels.
//!
//! A label is the identifier uppercased, so `count` and `COUNT` share the
//! storage cell `COUNT`. The table remembers the first spelling behind each
//! label so that a later, different spelling can be reported, once.
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Label(String);

impl Label {
    pub fn from_identifier(name: &str) -> Self {
        Label(name.to_uppercase())
    }

    /// The label every conditional block jumps to.
    pub fn end_if() -> Self {
        Label("END_IF".to_owned())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default, Debug)]
pub struct LabelTable {
    spellings: HashMap<Label, String>,
    reported:  HashSet<String>,
}

impl LabelTable {
    pub fn new() -> Self {
        LabelTable::default()
    }

    /// Returns the label for `name`, along with the earlier spelling it
    /// collides with if `name` folds onto a label first seen under
    /// different text. Each colliding spelling is reported only the first
    /// time it is interned.
    pub fn intern(&mut self, name: &str) -> (Label, Option<String>) {
        let label = Label::from_identifier(name);
        match self.spellings.get(&label) {
            Some(first) if first != name => {
                let collision = if self.reported.insert(name.to_owned()) {
                    Some(first.clone())
                } else {
                    None
                };
                (label, collision)
            },
            Some(_) => (label, None),
            None => {
                self.spellings.insert(label.clone(), name.to_owned());
                (label, None)
            },
        }
    }

    pub fn len(&self) -> usize {
        self.spellings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_identifier() {
        assert_eq!(Label::from_identifier("a").to_string(), "A");
        assert_eq!(Label::from_identifier("Total_2").to_string(), "TOTAL_2");
        assert_eq!(Label::from_identifier("ABC").to_string(), "ABC");
        assert_eq!(Label::end_if().to_string(), "END_IF");
    }

    #[test]
    fn test_intern() {
        let mut table = LabelTable::new();
        assert_eq!(table.intern("count"), (Label::from_identifier("count"), None));
        assert_eq!(table.intern("count"), (Label::from_identifier("count"), None));
        assert_eq!(table.intern("other"), (Label::from_identifier("other"), None));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_intern_case_collision() {
        let mut table = LabelTable::new();
        table.intern("count");

        let (label, collision) = table.intern("Count");
        assert_eq!(label.to_string(), "COUNT");
        assert_eq!(collision, Some("count".to_owned()));

        // The first spelling stays the reference point.
        assert_eq!(table.intern("COUNT").1, Some("count".to_owned()));
        assert_eq!(table.intern("count").1, None);

        // Later uses of an already reported spelling stay quiet.
        assert_eq!(table.intern("Count").1, None);
        assert_eq!(table.intern("COUNT").1, None);
        assert_eq!(table.len(), 1);
    }
}
