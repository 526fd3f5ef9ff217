use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Prompt {
    pub(crate) role: String,
    pub(crate) title: String,
    pub(crate) prompt: String,
    pub(crate) author: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Variable {
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) default_value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Substitution(String),
}

impl Segment {
    pub(crate) fn text(&self) -> &str {
        match self {
            Segment::Literal(text) | Segment::Substitution(text) => text,
        }
    }

    pub(crate) fn is_substitution(&self) -> bool {
        matches!(self, Segment::Substitution(_))
    }
}

/// Building blocks of the concept builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Concept {
    Persona,
    Task,
    Context,
    Format,
    Example,
    Tone,
}

impl Concept {
    /// Selector order.
    pub(crate) const ALL: [Concept; 6] = [
        Concept::Persona,
        Concept::Task,
        Concept::Context,
        Concept::Format,
        Concept::Example,
        Concept::Tone,
    ];

    /// Order in which selected concepts are joined into a prompt.
    pub(crate) const ASSEMBLY: [Concept; 6] = [
        Concept::Persona,
        Concept::Task,
        Concept::Context,
        Concept::Format,
        Concept::Tone,
        Concept::Example,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Concept::Persona => "Persona",
            Concept::Task => "Task",
            Concept::Context => "Context",
            Concept::Format => "Format",
            Concept::Example => "Example",
            Concept::Tone => "Tone",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|concept| concept.name() == name.trim())
    }

    pub(crate) fn is_multiline(self) -> bool {
        matches!(self, Concept::Task | Concept::Context | Concept::Example)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ConceptExample {
    pub(crate) concept: Concept,
    pub(crate) example: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ConceptPart {
    pub(crate) concept: Concept,
    pub(crate) text: String,
}
