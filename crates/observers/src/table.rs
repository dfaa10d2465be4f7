use std::io::{self, Write};

use twine_core::Observer;
use twine_solvers::lbfgsb::Event;

use crate::traits::CanAbort;

const HEADER: &str = "iter, f(x), step, df(x) <1?, ||f'(x)|| <1?, #f(), #g()";

/// Writes one table row per iterate to any [`io::Write`].
///
/// The header is written before the first row. Each row holds the iteration,
/// the objective, the step length, the relative reduction with its ratio to
/// the tolerance (`T` once below 1), the projected-gradient norm with its
/// ratio, and the objective and gradient evaluation counts for the iteration.
///
/// A write failure aborts the run; the error is kept for inspection.
///
/// # Example
///
/// ```
/// use twine_core::Functions;
/// use twine_observers::ProgressTable;
/// use twine_solvers::lbfgsb::{Parameters, minimize};
///
/// let sphere = Functions::new(
///     |x: &[f64]| x.iter().map(|v| v * v).sum(),
///     |x: &[f64]| x.iter().map(|v| 2.0 * v).collect(),
/// );
///
/// let mut table = ProgressTable::new(Vec::new());
/// minimize(&sphere, &[1.0, 2.0], None, &Parameters::new(), &mut table);
///
/// let text = String::from_utf8(table.into_inner()).unwrap();
/// assert!(text.starts_with("iter, f(x)"));
/// ```
#[derive(Debug)]
pub struct ProgressTable<W> {
    writer: W,
    header_written: bool,
    error: Option<io::Error>,
}

impl<W: Write> ProgressTable<W> {
    /// Creates a table that writes to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            error: None,
        }
    }

    /// Returns the write error that aborted the run, if any.
    #[must_use]
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Consumes the table and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row(&mut self, event: &Event<'_>) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{HEADER}")?;
            self.header_written = true;
        }

        let f_ratio = event.f_ratio();
        let g_ratio = event.g_ratio();
        writeln!(
            self.writer,
            "{} {:e} {:e} {:e} {:.1e}{} {:e} {:.1e}{} {} {}",
            event.iteration,
            event.f,
            event.step_length,
            event.f_delta,
            f_ratio,
            indicator(f_ratio),
            event.g_norm,
            g_ratio,
            indicator(g_ratio),
            event.evaluations,
            event.evaluations,
        )
    }
}

fn indicator(ratio: f64) -> char {
    if ratio < 1.0 { 'T' } else { 'F' }
}

impl<W: Write, A: CanAbort> Observer<Event<'_>, A> for ProgressTable<W> {
    fn observe(&mut self, event: &Event<'_>) -> Option<A> {
        match self.write_row(event) {
            Ok(()) => None,
            Err(error) => {
                self.error = Some(error);
                Some(A::abort())
            }
        }
    }
}

/// Lets a borrowed table observe a run, so it can be inspected afterwards.
impl<W: Write, A: CanAbort> Observer<Event<'_>, A> for &mut ProgressTable<W> {
    fn observe(&mut self, event: &Event<'_>) -> Option<A> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use twine_solvers::lbfgsb::Action;

    fn event(iteration: usize, f_delta: f64, g_norm: f64) -> Event<'static> {
        Event {
            iteration,
            evaluations: 2,
            total_evaluations: 2 * iteration,
            step_length: 0.5,
            x: &[1.0],
            f: 4.0,
            g: &[2.0],
            f_delta,
            f_delta_bound: 1e-2,
            g_norm,
            g_norm_bound: 1.0,
        }
    }

    #[test]
    fn writes_header_then_rows() {
        let mut table = ProgressTable::new(Vec::new());

        let action: Option<Action> = table.observe(&event(1, 0.5, 2.0));
        assert!(action.is_none());
        let action: Option<Action> = table.observe(&event(2, 1e-3, 0.5));
        assert!(action.is_none());

        let text = String::from_utf8(table.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "1 4e0 5e-1 5e-1 5.0e1F 2e0 2.0e0F 2 2");
        assert_eq!(lines[2], "2 4e0 5e-1 1e-3 1.0e-1T 5e-1 5.0e-1T 2 2");
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_aborts() {
        let mut table = ProgressTable::new(Broken);

        let action: Option<Action> = table.observe(&event(1, 0.5, 2.0));

        assert_eq!(action, Some(Action::Abort));
        assert_eq!(table.error().map(ToString::to_string).as_deref(), Some("disk full"));
    }
}
