use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
}

/// One line on the diagnostic side channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Info => write!(f, "[Service] {}", self.message),
            Level::Warning => write!(f, "[Service] [WARNING] {}", self.message),
        }
    }
}

/// Append-only record of what resolution reported, in order.
///
/// Every line is also forwarded to `tracing`, which the plugin binary routes
/// to stderr. The record itself is never read back by the generator.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            level: Level::Info,
            message: message.into(),
        };
        tracing::info!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            level: Level::Warning,
            message: message.into(),
        };
        tracing::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.level == Level::Warning)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
