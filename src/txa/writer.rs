//! Write caption files.

use std::{fmt, io};

use crate::{content::Caption, time::Seconds, track::CaptionTrack};

/// Display a `CaptionTrack` as the content of a caption file.
#[repr(transparent)]
pub struct TxaTrack<'a>(pub &'a CaptionTrack);

impl fmt::Display for TxaTrack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let captions = self.0.captions();
        captions
            .iter()
            .enumerate()
            .try_for_each(|(idx, caption)| {
                write_caption_line(f, caption)?;
                // A blank line closes each block of captions sharing a begin time.
                match captions.get(idx + 1) {
                    Some(next) if next.begin != caption.begin => writeln!(f),
                    _ => Ok(()),
                }
            })
    }
}

/// Write a caption line
fn write_caption_line(f: &mut fmt::Formatter<'_>, caption: &Caption) -> fmt::Result {
    let x = caption.position.x;
    let y = caption.position.y;
    let begin = Seconds(caption.begin);
    let end = Seconds(caption.end);
    let text = &caption.text;
    writeln!(f, "{x}\t{y}\t\t{begin}\t{end}\t_(\"{text}\")")
}

/// Write the captions of `track` in caption file format.
///
/// # Errors
///
/// Will return `Err` if writing in `writer` return an `Err`.
pub fn write_track(track: &CaptionTrack, writer: &mut impl io::Write) -> Result<(), io::Error> {
    write!(writer, "{}", TxaTrack(track))
}
