//! Scoped ownership of the graphics context

use std::ops::{Deref, DerefMut};

use log::trace;
use plotview_core::{Error, Result};

use crate::canvas::Canvas;
use crate::painter::Painter;

/// Holds the graphics context current for as long as it lives.
///
/// The context is released when the guard drops, so early returns, `?`
/// and unwinding all give it back.
pub struct CurrentContext<'p> {
    painter: &'p mut dyn Painter,
}

impl<'p> CurrentContext<'p> {
    /// Make the context for `canvas` current.
    ///
    /// Fails without touching the painter when the canvas has no drawable
    /// area.
    pub fn acquire(painter: &'p mut dyn Painter, canvas: &dyn Canvas) -> Result<Self> {
        let (width, height) = (canvas.renderer_width(), canvas.renderer_height());
        if width == 0 || height == 0 {
            return Err(Error::ContextUnavailable(format!(
                "canvas has no drawable area ({width}x{height})"
            )));
        }

        painter.make_current(canvas)?;
        trace!("graphics context acquired");
        Ok(Self { painter })
    }
}

impl<'p> Deref for CurrentContext<'p> {
    type Target = dyn Painter + 'p;

    fn deref(&self) -> &Self::Target {
        self.painter
    }
}

impl<'p> DerefMut for CurrentContext<'p> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.painter
    }
}

impl Drop for CurrentContext<'_> {
    fn drop(&mut self) {
        self.painter.release();
        trace!("graphics context released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{Event, EventLog, MockCanvas, RecordingPainter};

    #[test]
    fn test_guard_releases_on_drop() {
        let log = EventLog::new();
        let mut painter = RecordingPainter::new(log.clone());
        let canvas = MockCanvas::new(10, 10);
        {
            let _ctx = CurrentContext::acquire(&mut painter, &canvas).unwrap();
            assert_eq!(log.count(|e| *e == Event::Release), 0);
        }
        assert_eq!(log.count(|e| *e == Event::Acquire), 1);
        assert_eq!(log.count(|e| *e == Event::Release), 1);
    }

    #[test]
    fn test_zero_area_canvas_is_fatal() {
        let log = EventLog::new();
        let mut painter = RecordingPainter::new(log.clone());
        let canvas = MockCanvas::new(0, 480);
        let result = CurrentContext::acquire(&mut painter, &canvas);
        assert!(matches!(result, Err(Error::ContextUnavailable(_))));
        assert!(log.is_empty());
    }

    #[test]
    fn test_driver_failure_does_not_release() {
        let log = EventLog::new();
        let mut painter = RecordingPainter::new(log.clone());
        painter.fail_acquire = true;
        let canvas = MockCanvas::new(10, 10);
        assert!(CurrentContext::acquire(&mut painter, &canvas).is_err());
        assert_eq!(log.count(|e| *e == Event::Release), 0);
    }
}
