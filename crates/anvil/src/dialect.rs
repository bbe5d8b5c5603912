//! Dialect tag.
//!
//! Presently metadata-only: selected by a leading shebang or the source's
//! file extension and carried on the resulting [`Module`](crate::Module),
//! but it does not alter grammar or recovery behavior in this core.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `.aml` — strict dialect.
    Aml,
    /// `.asl` — permissive dialect. Also the default when neither a shebang
    /// nor a recognized extension is present.
    Asl,
}

impl Dialect {
    pub fn from_extension(source_id: &str) -> Option<Dialect> {
        if source_id.ends_with(".aml") {
            Some(Dialect::Aml)
        } else if source_id.ends_with(".asl") {
            Some(Dialect::Asl)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Aml => write!(f, "aml"),
            Dialect::Asl => write!(f, "asl"),
        }
    }
}
