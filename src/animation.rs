//! Non-blocking animation and scrolling
//!
//! The [`Animator`] never sleeps. The caller polls it from its main loop and
//! it works out from the clock which frame should be on screen, sending a
//! frame only when it changes. A late poll skips straight to the current
//! frame.
//!
//! ## Example
//!
//! ```no_run
//! # use tm1637_tiny::{Animator, Display4, DisplayInterface, Error};
//! # fn run<I: DisplayInterface>(display: &mut Display4<I>, millis: impl Fn() -> u32) -> Result<(), Error<I>> {
//! let mut animator = Animator::new(millis);
//! animator.start_string_scroll(display, "HELLO WORLD", 200)?;
//! while animator.poll(display, false)? {
//!     // other work
//! }
//! # Ok(())
//! # }
//! ```

use log::{debug, trace};

use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::segment::encode_char;
use crate::time::Clock;

/// Where the animation data lives
///
/// Only informational on targets with a unified address space: `ReadOnly`
/// marks data started through a `_static` method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Storage {
    /// Data borrowed from RAM
    Ram,
    /// `'static` data, typically placed in flash
    ReadOnly,
}

/// What the animator is currently playing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// Nothing is playing
    Inactive,
    /// A table of raw frames
    Frames(Storage),
    /// A scrolling string
    Scroll(Storage),
}

#[derive(Clone, Copy)]
enum State<'a, const N: usize> {
    Inactive,
    Frames {
        table: &'a [[u8; N]],
        storage: Storage,
    },
    Scroll {
        text: &'a str,
        storage: Storage,
    },
}

/// Time-driven frame scheduler for a `N` digit display
pub struct Animator<'a, C, const N: usize>
where
    C: Clock,
{
    clock: C,
    state: State<'a, N>,
    started_ms: u32,
    frame_ms: u32,
    total_frames: usize,
    last_frame: Option<usize>,
}

impl<'a, C, const N: usize> Animator<'a, C, N>
where
    C: Clock,
{
    /// Create an inactive animator reading time from `clock`
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: State::Inactive,
            started_ms: 0,
            frame_ms: 1,
            total_frames: 0,
            last_frame: None,
        }
    }

    /// Play a table of raw frames, `frame_ms` milliseconds each
    ///
    /// Nothing is sent until the next [`poll`](Self::poll).
    pub fn start_animation(&mut self, frames: &'a [[u8; N]], frame_ms: u32) {
        self.start(
            State::Frames {
                table: frames,
                storage: Storage::Ram,
            },
            frames.len(),
            frame_ms,
        );
    }

    /// Play a table of raw frames from read-only storage
    pub fn start_animation_static(&mut self, frames: &'static [[u8; N]], frame_ms: u32) {
        self.start(
            State::Frames {
                table: frames,
                storage: Storage::ReadOnly,
            },
            frames.len(),
            frame_ms,
        );
    }

    /// Scroll `text` across the display, one step every `frame_ms`
    ///
    /// Text that fits is drawn right away and the animator stays inactive.
    /// Otherwise the text scrolls in from the right and out to the left,
    /// taking `len + 2 * N` frames.
    pub fn start_string_scroll<I>(
        &mut self,
        display: &mut Display<I, N>,
        text: &'a str,
        frame_ms: u32,
    ) -> Result<(), Error<I>>
    where
        I: DisplayInterface,
    {
        self.start_scroll(display, text, Storage::Ram, frame_ms)
    }

    /// Scroll text from read-only storage
    pub fn start_string_scroll_static<I>(
        &mut self,
        display: &mut Display<I, N>,
        text: &'static str,
        frame_ms: u32,
    ) -> Result<(), Error<I>>
    where
        I: DisplayInterface,
    {
        self.start_scroll(display, text, Storage::ReadOnly, frame_ms)
    }

    fn start_scroll<I>(
        &mut self,
        display: &mut Display<I, N>,
        text: &'a str,
        storage: Storage,
        frame_ms: u32,
    ) -> Result<(), Error<I>>
    where
        I: DisplayInterface,
    {
        let len = text.chars().count();
        if len <= N {
            self.stop();
            return display.render_text(text, len, 0, 0);
        }
        self.start(State::Scroll { text, storage }, len + 2 * N, frame_ms);
        Ok(())
    }

    fn start(&mut self, state: State<'a, N>, total_frames: usize, frame_ms: u32) {
        debug!("tm1637: animation start ({total_frames} frames, {frame_ms} ms)");
        self.state = state;
        self.total_frames = total_frames;
        self.frame_ms = frame_ms.max(1);
        self.started_ms = self.clock.now_ms();
        self.last_frame = None;
    }

    /// Cancel the running animation, leaving the display as it is
    pub fn stop(&mut self) {
        if self.is_active() {
            debug!("tm1637: animation stop");
        }
        self.state = State::Inactive;
        self.last_frame = None;
    }

    /// Whether an animation is running
    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Inactive)
    }

    /// What is currently playing
    pub fn kind(&self) -> AnimationKind {
        match self.state {
            State::Inactive => AnimationKind::Inactive,
            State::Frames { storage, .. } => AnimationKind::Frames(storage),
            State::Scroll { storage, .. } => AnimationKind::Scroll(storage),
        }
    }

    /// Index of the frame last sent to the display
    pub fn frame(&self) -> Option<usize> {
        self.last_frame
    }

    /// Bring the display up to date with the clock
    ///
    /// Returns `false` once nothing is playing. A finished animation goes
    /// inactive unless `looping` is set, in which case it starts over from
    /// the first frame. The bus is only used when the frame changes.
    pub fn poll<I>(&mut self, display: &mut Display<I, N>, looping: bool) -> Result<bool, Error<I>>
    where
        I: DisplayInterface,
    {
        if !self.is_active() {
            return Ok(false);
        }

        let now = self.clock.now_ms();
        let mut frame = (now.wrapping_sub(self.started_ms) / self.frame_ms) as usize;
        if frame >= self.total_frames {
            if !looping || self.total_frames == 0 {
                self.stop();
                return Ok(false);
            }
            self.started_ms = now;
            self.last_frame = None;
            frame = 0;
        }

        if self.last_frame == Some(frame) {
            return Ok(true);
        }

        trace!("tm1637: frame {frame}/{}", self.total_frames);
        match self.state {
            State::Inactive => return Ok(false),
            State::Frames { table, .. } => {
                display.render_frame(|cells| *cells = table[frame])?;
            }
            State::Scroll { text, .. } => {
                display.render_frame(|cells| scroll_window(cells, text, frame))?;
            }
        }
        self.last_frame = Some(frame);
        Ok(true)
    }
}

/// Fill `cells` with the view of `text` at scroll step `frame`
///
/// Cell `x` shows character `frame + x - N`; positions before the start or
/// past the end of the text stay blank.
fn scroll_window<const N: usize>(cells: &mut [u8; N], text: &str, frame: usize) {
    let lead = N.saturating_sub(frame);
    let chars = text.chars().skip(frame.saturating_sub(N));
    for (cell, c) in cells[lead..].iter_mut().zip(chars) {
        *cell = encode_char(c);
    }
}
