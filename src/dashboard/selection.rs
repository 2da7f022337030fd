// Which sites the user has ticked. Empty means "show everything loaded".

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    names: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the site if absent, removes it if present.
    pub fn toggle(&mut self, name: &str) {
        if let Some(idx) = self.names.iter().position(|n| n == name) {
            self.names.remove(idx);
        } else {
            self.names.push(name.to_string());
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelectionState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = SelectionState::new();
        for name in iter {
            if !selection.is_selected(name.as_ref()) {
                selection.toggle(name.as_ref());
            }
        }
        selection
    }
}
