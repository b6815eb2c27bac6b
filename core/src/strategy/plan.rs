use std::fmt;

/// An immutable description of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Human readable step name shown while the command runs (e.g. "Building QIR").
    pub title: Option<String>,
    pub program: String,
    pub args: Vec<String>,
}

impl ExecutionPlan {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: None,
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Arguments joined by single spaces.
    pub fn args_line(&self) -> String {
        self.args.join(" ")
    }
}

impl fmt::Display for ExecutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How the output of a delegated run is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegatedFormat {
    /// A JSON `{"Histogram": [...]}` payload inside log text.
    Histogram,
    /// One result line per shot between `METADATA`/`START`/`END` markers.
    Annotated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Invoke the program `shots` times and tally each run's last line.
    Local { shots: u32 },
    /// Invoke once; the program performs the shots itself.
    Delegated(DelegatedFormat),
}
