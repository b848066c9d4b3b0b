//! Field paths such as `assessmentAndGradingPolicy.assessmentMethods[2]`.

use serde::{Serialize, Serializer};
use std::fmt;

/// One step into a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a record. The empty path is the record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Child path for an object key
    pub fn key(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(name.to_string()));
        Self { segments }
    }

    /// Child path for a sequence element
    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(idx));
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parse the dotted form produced by `Display`
    pub fn parse(text: &str) -> Option<Self> {
        let mut segments = Vec::new();
        if text.is_empty() {
            return Some(Self { segments });
        }

        for part in text.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if name.is_empty() && segments.is_empty() {
                return None;
            }
            if !name.is_empty() {
                segments.push(Segment::Key(name.to_string()));
            }
            while !rest.is_empty() {
                let close = rest.find(']')?;
                let idx: usize = rest.get(1..close)?.parse().ok()?;
                segments.push(Segment::Index(idx));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return None;
                }
            }
        }

        Some(Self { segments })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Key(name) => write!(f, ".{}", name)?,
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
