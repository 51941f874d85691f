//! In-place picker redraw.

use std::{
    borrow::Cow,
    io::{self, Write},
};

use crossterm::{
    cursor::MoveToPreviousLine,
    queue,
    style::{Print, PrintStyledContent, StyledContent, Stylize},
    terminal::{self, Clear, ClearType},
};
use tubetoonie_select::{LineStyle, RenderedLine};

/// Column budget for frame lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWidth {
    /// Lines are written as they are.
    Unbounded,
    /// A fixed number of columns.
    Fixed(u16),
    /// The terminal's current width, read on every draw.
    Terminal,
}

/// Draws picker frames, replacing the previous frame of the same
/// interaction instead of scrolling.
///
/// Lines longer than the [`LineWidth`] are cut with `…` so every line takes
/// exactly one screen row; a wrapped line would throw off the rewind to the
/// previous frame. Columns are counted per `char`, so double-width glyphs
/// can still wrap.
pub struct FrameSurface<W: Write> {
    out: W,
    /// Rows of the frame currently on screen.
    drawn: u16,
    styled: bool,
    width: LineWidth,
}

impl<W: Write> FrameSurface<W> {
    /// Surface writing to `out` without a width limit; `styled` enables bold
    /// and color.
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, drawn: 0, styled, width: LineWidth::Unbounded }
    }

    /// Limit lines to `width`.
    pub fn with_width(mut self, width: LineWidth) -> Self {
        self.width = width;
        self
    }

    /// Replace the current frame with `lines`.
    pub fn draw(&mut self, lines: &[RenderedLine]) -> io::Result<()> {
        if self.drawn > 0 {
            queue!(self.out, MoveToPreviousLine(self.drawn), Clear(ClearType::FromCursorDown))?;
        }

        let columns = self.columns();
        for line in lines {
            let text = fit(&line.text, columns);
            if self.styled {
                queue!(self.out, PrintStyledContent(styled(&text, line.style)), Print('\n'))?;
            } else {
                queue!(self.out, Print(&text), Print('\n'))?;
            }
        }

        self.drawn = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        self.out.flush()
    }

    /// Leave the last frame on screen; the next draw starts below it.
    pub fn finish(&mut self) -> io::Result<()> {
        self.drawn = 0;
        self.out.flush()
    }

    /// Underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn columns(&self) -> Option<usize> {
        match self.width {
            LineWidth::Unbounded => None,
            LineWidth::Fixed(columns) => Some(usize::from(columns)),
            LineWidth::Terminal => match terminal::size() {
                Ok((columns, _)) if columns > 0 => Some(usize::from(columns)),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(error = %e, "terminal width unavailable");
                    None
                },
            },
        }
    }
}

/// `text` cut to stay clear of the last column, which some terminals wrap
/// on immediately.
fn fit(text: &str, columns: Option<usize>) -> Cow<'_, str> {
    let Some(limit) = columns.map(|c| c.saturating_sub(1)) else {
        return Cow::Borrowed(text);
    };
    if text.chars().count() <= limit {
        return Cow::Borrowed(text);
    }

    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    if limit > 0 {
        cut.push('…');
    }
    Cow::Owned(cut)
}

fn styled(text: &str, style: LineStyle) -> StyledContent<&str> {
    match style {
        LineStyle::Title => text.bold(),
        LineStyle::Active => text.cyan().bold(),
        LineStyle::Option => text.stylize(),
        LineStyle::Hint => text.dim(),
    }
}
