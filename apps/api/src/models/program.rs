//! Questionnaire field enumerations and request validation.
//!
//! Every field of a generation request is a closed enumeration. Values outside
//! the enumeration are rejected at the boundary with a typed error; they never
//! reach the prompt builder, so a prompt can never contain an unexpanded code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Field enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Where the child stands in the CP school year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// September–October: numbers up to 30, simple syllables.
    #[serde(rename = "1")]
    StartOfYear,
    /// November–March: numbers up to 50–60, simple documentary texts.
    #[serde(rename = "2")]
    MidYear,
    /// April–June: numbers up to 100, CE1 preparation.
    #[serde(rename = "3")]
    EndOfYear,
}

impl Level {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Level::StartOfYear),
            "2" => Some(Level::MidYear),
            "3" => Some(Level::EndOfYear),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Level::StartOfYear => "1",
            Level::MidYear => "2",
            Level::EndOfYear => "3",
        }
    }

    /// Natural-language expansion interpolated into the prompt.
    pub fn expansion(&self) -> &'static str {
        match self {
            Level::StartOfYear => {
                "début d'année (septembre-octobre), nombres jusqu'à 30, syllabes simples"
            }
            Level::MidYear => {
                "milieu d'année (novembre-mars), nombres jusqu'à 50-60, textes documentaires simples"
            }
            Level::EndOfYear => "fin d'année (avril-juin), nombres jusqu'à 100, préparation CE1",
        }
    }
}

/// How long the child can stay focused on one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttentionSpan {
    #[serde(rename = "15")]
    Minutes15,
    #[serde(rename = "30")]
    Minutes30,
    #[serde(rename = "45")]
    Minutes45,
}

impl AttentionSpan {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "15" => Some(AttentionSpan::Minutes15),
            "30" => Some(AttentionSpan::Minutes30),
            "45" => Some(AttentionSpan::Minutes45),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AttentionSpan::Minutes15 => "15",
            AttentionSpan::Minutes30 => "30",
            AttentionSpan::Minutes45 => "45",
        }
    }

    pub fn expansion(&self) -> &'static str {
        match self {
            AttentionSpan::Minutes15 => "15 minutes maximum par activité",
            AttentionSpan::Minutes30 => "30 minutes maximum (15 min lecture + 15 min maths)",
            AttentionSpan::Minutes45 => "45 minutes maximum (20 min lecture + 25 min maths)",
        }
    }
}

/// Subject emphasis. Interpolated verbatim into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "lecture")]
    Lecture,
    #[serde(rename = "maths")]
    Maths,
    #[serde(rename = "equilibre")]
    Equilibre,
}

impl Subject {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "lecture" => Some(Subject::Lecture),
            "maths" => Some(Subject::Maths),
            "equilibre" => Some(Subject::Equilibre),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Subject::Lecture => "lecture",
            Subject::Maths => "maths",
            Subject::Equilibre => "equilibre",
        }
    }
}

/// The child's favorite theme, used to dress up every exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "animaux")]
    Animaux,
    #[serde(rename = "superheros")]
    Superheros,
    #[serde(rename = "princesses")]
    Princesses,
    #[serde(rename = "voitures")]
    Voitures,
    #[serde(rename = "sport")]
    Sport,
}

impl Theme {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "animaux" => Some(Theme::Animaux),
            "superheros" => Some(Theme::Superheros),
            "princesses" => Some(Theme::Princesses),
            "voitures" => Some(Theme::Voitures),
            "sport" => Some(Theme::Sport),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Theme::Animaux => "animaux",
            Theme::Superheros => "superheros",
            Theme::Princesses => "princesses",
            Theme::Voitures => "voitures",
            Theme::Sport => "sport",
        }
    }

    pub fn expansion(&self) -> &'static str {
        match self {
            Theme::Animaux => "les animaux (ferme, savane, océan, forêt)",
            Theme::Superheros => "les super-héros et aventures",
            Theme::Princesses => "les princesses et châteaux",
            Theme::Voitures => "les voitures et transports",
            Theme::Sport => "le sport et les jeux",
        }
    }
}

/// How long the revision program should run. Interpolated verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionDuration {
    #[serde(rename = "1 semaine")]
    OneWeek,
    #[serde(rename = "2 semaines")]
    TwoWeeks,
    #[serde(rename = "vacances")]
    Vacances,
}

impl SessionDuration {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1 semaine" => Some(SessionDuration::OneWeek),
            "2 semaines" => Some(SessionDuration::TwoWeeks),
            "vacances" => Some(SessionDuration::Vacances),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SessionDuration::OneWeek => "1 semaine",
            SessionDuration::TwoWeeks => "2 semaines",
            SessionDuration::Vacances => "vacances",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire form and validated request
// ────────────────────────────────────────────────────────────────────────────

/// Raw questionnaire submission, exactly as it arrives on the wire.
///
/// All fields are optional here so that the handler can report which ones are
/// missing instead of failing deserialization wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateForm {
    pub niveau: Option<String>,
    pub attention: Option<String>,
    pub matiere: Option<String>,
    pub passion: Option<String>,
    pub duree: Option<String>,
}

/// A fully validated generation request. Can only be constructed through
/// [`GenerateForm::validate`], so every field is guaranteed in-enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRequest {
    pub niveau: Level,
    pub attention: AttentionSpan,
    pub matiere: Subject,
    pub passion: Theme,
    pub duree: SessionDuration,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Données manquantes: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Valeur invalide pour '{field}': '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

impl GenerateForm {
    /// Validates presence and enumeration membership of all five fields.
    ///
    /// Missing fields are reported together; the first out-of-enumeration
    /// value is reported on its own. Empty strings count as missing.
    pub fn validate(&self) -> Result<ProgramRequest, ValidationError> {
        let fields: [(&'static str, Option<&str>); 5] = [
            ("niveau", non_empty(&self.niveau)),
            ("attention", non_empty(&self.attention)),
            ("matiere", non_empty(&self.matiere)),
            ("passion", non_empty(&self.passion)),
            ("duree", non_empty(&self.duree)),
        ];

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        // Presence is established above; each lookup now only checks membership.
        let niveau = parse_field("niveau", fields[0].1, Level::from_code)?;
        let attention = parse_field("attention", fields[1].1, AttentionSpan::from_code)?;
        let matiere = parse_field("matiere", fields[2].1, Subject::from_code)?;
        let passion = parse_field("passion", fields[3].1, Theme::from_code)?;
        let duree = parse_field("duree", fields[4].1, SessionDuration::from_code)?;

        Ok(ProgramRequest {
            niveau,
            attention,
            matiere,
            passion,
            duree,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn parse_field<T>(
    field: &'static str,
    value: Option<&str>,
    from_code: fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    let value = value.unwrap_or_default();
    from_code(value).ok_or_else(|| ValidationError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Generated document
// ────────────────────────────────────────────────────────────────────────────

/// The markdown text returned by the generation API.
///
/// Held in memory for a single display/export cycle, never cached or stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub content: String,
}

impl GeneratedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
