use serde::Serialize;

use crate::{ArchiveReader, ByteCursor, Diagnostic, Error, Result, StringPolicy};

/// Represents the current position in the property hierarchy as a stack of names.
/// Used to label diagnostics.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    components: Vec<String>,
}

impl Scope {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    fn path(&self) -> String {
        self.components.join(".")
    }

    fn push(&mut self, name: &str) {
        self.components.push(name.to_string());
    }

    fn pop(&mut self) {
        self.components.pop();
    }
}

/// How far decoding got through the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub consumed: usize,
    pub total: usize,
    pub remaining: usize,
}
impl Progress {
    pub(crate) fn new(consumed: usize, total: usize) -> Self {
        Self {
            consumed,
            total,
            remaining: total.saturating_sub(consumed),
        }
    }
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.consumed as f64 / self.total as f64
        }
    }
}
impl Serialize for Progress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Progress", 4)?;
        s.serialize_field("consumed", &self.consumed)?;
        s.serialize_field("total", &self.total)?;
        s.serialize_field("remaining", &self.remaining)?;
        s.serialize_field("percent", &self.percent())?;
        s.end()
    }
}

#[derive(Debug)]
pub(crate) struct Context<'a> {
    pub(crate) stream: ByteCursor<'a>,
    pub(crate) state: ContextState,
}
#[derive(Debug)]
pub(crate) struct ContextState {
    pub(crate) scope: Scope,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
    pub(crate) strings: StringPolicy,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(data: &'a [u8], max_depth: usize, strings: StringPolicy) -> Self {
        Context {
            stream: ByteCursor::new(data),
            state: ContextState {
                scope: Scope::root(),
                depth: 0,
                max_depth,
                strings,
                diagnostics: vec![],
            },
        }
    }
    pub(crate) fn with_scope<F, T>(&mut self, name: &str, f: F) -> T
    where
        F: FnOnce(&mut Context<'a>) -> T,
    {
        self.state.scope.push(name);
        let result = f(self);
        self.state.scope.pop();
        result
    }
    /// Runs `f` one nesting level deeper, or returns `None` without running it
    /// when the depth ceiling has been reached.
    pub(crate) fn nested<F, T>(&mut self, f: F) -> Option<T>
    where
        F: FnOnce(&mut Context<'a>) -> T,
    {
        if self.state.depth >= self.state.max_depth {
            let offset = self.stream.position();
            tracing::debug!(offset, depth = self.state.depth, "depth ceiling reached");
            self.record(
                offset,
                Error::DepthExceeded {
                    depth: self.state.max_depth,
                },
            );
            return None;
        }
        self.state.depth += 1;
        let result = f(self);
        self.state.depth -= 1;
        Some(result)
    }
    pub(crate) fn path(&self) -> String {
        self.state.scope.path()
    }
    pub(crate) fn record(&mut self, offset: usize, error: Error) {
        let diagnostic = Diagnostic {
            offset,
            path: self.path(),
            error,
        };
        tracing::warn!("{diagnostic}");
        self.state.diagnostics.push(diagnostic);
    }
    pub(crate) fn progress(&self) -> Progress {
        Progress::new(self.stream.position(), self.stream.len())
    }
    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.state.diagnostics
    }
}

impl ArchiveReader for Context<'_> {
    fn read_bytes(&mut self, n: usize) -> Result<&[u8]> {
        self.stream.read(n)
    }
    fn peek_bytes(&self, n: usize) -> Option<&[u8]> {
        self.stream.peek(n)
    }
    fn position(&self) -> usize {
        self.stream.position()
    }
    fn remaining(&self) -> usize {
        self.stream.remaining()
    }
    fn read_string(&mut self) -> Result<String> {
        self.stream.read_fstring(self.state.strings)
    }
}
