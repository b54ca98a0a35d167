/// One reconstructed paragraph of body text.
///
/// Units are already-escaped HTML fragments. A block always holds at least
/// one unit, and no unit contains a run of more than one whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphBlock {
    units: Vec<String>,
}

impl ParagraphBlock {
    /// Returns `None` when every unit is blank.
    pub fn new<I, S>(units: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let units: Vec<String> = units
            .into_iter()
            .map(|unit| unit.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|unit| !unit.is_empty())
            .collect();

        if units.is_empty() {
            None
        } else {
            Some(Self { units })
        }
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn to_html(&self) -> String {
        format!("<p>{}</p>", self.units.join(" "))
    }
}
