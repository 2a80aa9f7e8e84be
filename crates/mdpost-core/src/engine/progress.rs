/// Progress events emitted by the workflows.
///
/// A phase groups related work under a name; a task inside it reports a known
/// number of steps (atoms assigned, frames processed).
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// A reporter without a callback drops every event, which is what library
/// callers and tests get from [`ProgressReporter::new`].
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `step` once per item inside a task of `items.len()` steps.
    pub fn for_each_step<T, E>(
        &self,
        items: impl ExactSizeIterator<Item = T>,
        mut step: impl FnMut(T) -> Result<(), E>,
    ) -> Result<(), E> {
        self.report(Progress::TaskStart {
            total_steps: items.len() as u64,
        });
        for item in items {
            step(item)?;
            self.report(Progress::TaskIncrement);
        }
        self.report(Progress::TaskFinish);
        Ok(())
    }
}
