//! Instrument identifiers and construction-time selection.

use std::fmt;

use serde::Deserialize;

/// An independently toggleable category of measurement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Instrument {
    /// Process resident memory.
    Memory,
    /// Per-request instantiation counts from the data-mapping layer.
    InstanceTracking,
    /// Identifier outside the known universe. Accepted, never matches.
    Unknown(String),
}

impl Instrument {
    /// Parse an identifier. Never fails: unrecognized names become `Unknown`.
    pub fn parse(name: &str) -> Self {
        match name {
            "memory" => Instrument::Memory,
            "instance_tracking" | "instance-tracking" | "activerecord" => {
                Instrument::InstanceTracking
            }
            other => Instrument::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Instrument::Memory => "memory",
            Instrument::InstanceTracking => "instance_tracking",
            Instrument::Unknown(name) => name,
        }
    }
}

impl From<String> for Instrument {
    fn from(s: String) -> Self {
        Instrument::parse(&s)
    }
}

impl From<&str> for Instrument {
    fn from(s: &str) -> Self {
        Instrument::parse(s)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable set of enabled instruments, fixed at orchestrator construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentSet {
    items: Vec<Instrument>,
}

impl InstrumentSet {
    /// Both known instruments.
    pub fn all() -> Self {
        Self {
            items: vec![Instrument::Memory, Instrument::InstanceTracking],
        }
    }

    /// No instruments; only the routing line and completion marker are written.
    pub fn none() -> Self {
        Self { items: Vec::new() }
    }

    /// Resolve an optional explicit selection. `None` means the full universe.
    pub fn resolve<I, T>(selected: Option<I>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Instrument>,
    {
        match selected {
            None => Self::all(),
            Some(items) => items.into_iter().collect(),
        }
    }

    pub fn contains(&self, instrument: &Instrument) -> bool {
        self.items.contains(instrument)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.items.iter()
    }
}

impl Default for InstrumentSet {
    fn default() -> Self {
        Self::all()
    }
}

impl<T: Into<Instrument>> FromIterator<T> for InstrumentSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items: Vec<Instrument> = Vec::new();
        for instrument in iter.into_iter().map(Into::into) {
            if let Instrument::Unknown(name) = &instrument {
                tracing::debug!(instrument = %name, "unknown instrument identifier ignored");
            }
            if !items.contains(&instrument) {
                items.push(instrument);
            }
        }
        Self { items }
    }
}
