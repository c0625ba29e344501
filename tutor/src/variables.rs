/// The free variables of a system, in the order they were first seen.
///
/// The order is fixed once a variable is added: it is the order the solver binds the variables
/// in, and the order they are displayed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    names: Vec<String>,
}

impl VariableSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the variables that are not in the set yet, keeping their relative order.
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, names: I) {
        for name in names {
            if !self.names.contains(&name) {
                self.names.push(name);
            }
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn first_encounter_order() {
        let mut vars = VariableSet::new();
        vars.extend(["y".to_string(), "x".to_string()]);
        vars.extend(["x".to_string(), "z".to_string(), "y".to_string()]);
        assert_eq!(vars.iter().collect::<Vec<_>>(), vec!["y", "x", "z"]);
        assert_eq!(vars.len(), 3);
    }
}
