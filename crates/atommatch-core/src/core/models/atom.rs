use serde::{Deserialize, Serialize};

/// Identity attributes of a single atom in a molecular topology.
///
/// Only the attributes used to look atoms up are carried here; coordinates
/// and force-field parameters belong to the property layer of whatever
/// molecule representation owns the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "C1", "HO2").
    pub name: String,
    /// The serial number of the atom as given by the source file, if any.
    #[serde(default)]
    pub number: Option<i64>,
    /// The element symbol (e.g., "C", "H"), if known.
    #[serde(default)]
    pub element: Option<String>,
}

impl Atom {
    /// Creates a new `Atom` with only a name set.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            number: None,
            element: None,
        }
    }

    pub fn with_number(mut self, number: i64) -> Self {
        self.number = Some(number);
        self
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    /// Returns `true` if this is a light atom (hydrogen or deuterium).
    ///
    /// The element symbol is used when present. Otherwise the first letter of
    /// the atom name decides, which is the usual convention in topology files
    /// that do not carry elements.
    pub fn is_light(&self) -> bool {
        match &self.element {
            Some(element) => matches!(element.trim().to_ascii_uppercase().as_str(), "H" | "D"),
            None => {
                let first_char = self
                    .name
                    .trim()
                    .chars()
                    .next()
                    .map(|c| c.to_ascii_uppercase());
                matches!(first_char, Some('H') | Some('D'))
            }
        }
    }
}
