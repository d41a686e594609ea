//! Command signatures: the declared input schema of each command.

use serde::Serialize;

/// Constraint on the value of one input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConstraint {
    /// String matching an anchored regular expression.
    Pattern { regex: &'static str },
    /// Integer (or number) within inclusive bounds.
    Range { min: f64, max: f64 },
    /// String equal to one of the listed values.
    OneOf { values: &'static [&'static str] },
    /// Any value of the right JSON shape.
    Free,
}

impl FieldConstraint {
    pub const fn pattern(regex: &'static str) -> Self {
        FieldConstraint::Pattern { regex }
    }

    pub const fn range(min: f64, max: f64) -> Self {
        FieldConstraint::Range { min, max }
    }

    pub const fn one_of(values: &'static [&'static str]) -> Self {
        FieldConstraint::OneOf { values }
    }

    /// Short human-readable form, used in listings.
    pub fn describe(&self) -> String {
        match self {
            FieldConstraint::Pattern { regex } => format!("matches {regex}"),
            FieldConstraint::Range { min, max } => format!("between {min} and {max}"),
            FieldConstraint::OneOf { values } => format!("one of {}", values.join(", ")),
            FieldConstraint::Free => "free".to_string(),
        }
    }
}

/// One input field of a command.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub constraint: FieldConstraint,
    /// Whether the field may be omitted or given as the not-found sentinel.
    pub optional: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<&'static str>,
    /// Where upstream steps usually find this value.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available_from: Vec<&'static str>,
}

impl FieldSpec {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            constraint: FieldConstraint::Free,
            optional: true,
            examples: Vec::new(),
            available_from: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: FieldConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn required(mut self) -> Self {
        self.optional = false;
        self
    }

    pub fn with_examples(mut self, examples: &[&'static str]) -> Self {
        self.examples = examples.to_vec();
        self
    }

    pub fn available_from(mut self, sources: &[&'static str]) -> Self {
        self.available_from = sources.to_vec();
        self
    }
}

/// Declared interface of a command: inputs, output field, and example
/// utterances that should trigger it.
#[derive(Debug, Clone, Serialize)]
pub struct CommandSignature {
    pub name: &'static str,
    pub description: &'static str,
    pub inputs: Vec<FieldSpec>,
    pub output: &'static str,
    pub utterances: Vec<&'static str>,
}

impl CommandSignature {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            inputs: Vec::new(),
            output: "response",
            utterances: Vec::new(),
        }
    }

    pub fn with_input(mut self, field: FieldSpec) -> Self {
        self.inputs.push(field);
        self
    }

    pub fn with_output(mut self, output: &'static str) -> Self {
        self.output = output;
        self
    }

    pub fn with_utterances(mut self, utterances: &[&'static str]) -> Self {
        self.utterances = utterances.to_vec();
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.inputs.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_builder() {
        let signature = CommandSignature::new("cancel_reservation", "Cancel a reservation")
            .with_input(
                FieldSpec::new("reservation_id", "Reservation to cancel")
                    .with_constraint(FieldConstraint::pattern("^[A-Z0-9]{6}$"))
                    .with_examples(&["4WQ150"]),
            )
            .with_utterances(&["Cancel my booking 4WQ150"]);

        assert_eq!(signature.output, "response");
        let field = signature.field("reservation_id").unwrap();
        assert!(field.optional);
        assert_eq!(field.examples, vec!["4WQ150"]);
        assert!(signature.field("user_id").is_none());
    }

    #[test]
    fn test_constraint_describe() {
        assert_eq!(FieldConstraint::range(0.0, 20.0).describe(), "between 0 and 20");
        assert_eq!(
            FieldConstraint::one_of(&["yes", "no"]).describe(),
            "one of yes, no"
        );
    }

    #[test]
    fn test_signature_serializes_constraint_kind() {
        let field = FieldSpec::new("insurance", "Buy insurance")
            .with_constraint(FieldConstraint::one_of(&["yes", "no"]));
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["constraint"]["kind"], "one_of");
        assert_eq!(value["constraint"]["values"][1], "no");
    }
}
