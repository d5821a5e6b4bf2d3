/*! Block reading facilities

[BlockReader] implements [Iterator] over blank-line separated groups of lines,
which is how CoNLL-U delimits sentences.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines, Read},
    path::Path,
};

use crate::error::Error;
use crate::segment::Segmenter;

/// Reader that yields sequences of lines
/// that are blank-line separated.
///
/// Lines made only of whitespace count as blank.
/// Trailing `\r` is removed so CRLF files read like LF ones,
/// and so is a byte order mark at the start of the stream.
#[derive(Debug)]
pub struct BlockReader<T> {
    lines: Lines<BufReader<T>>,
    done: bool,
    started: bool,
}

impl BlockReader<File> {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let f = File::open(src)?;
        Ok(Self::new(f))
    }
}

impl<T: Read> BlockReader<T> {
    pub fn new(inner: T) -> Self {
        Self {
            lines: BufReader::new(inner).lines(),
            done: false,
            started: false,
        }
    }
}

impl<T: Read> Iterator for BlockReader<T> {
    type Item = Result<Vec<String>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut block = Segmenter::new();
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    // invalid UTF-8 and the like: the rest of the stream is unusable
                    self.done = true;
                    return Some(Err(Error::Io(e)));
                }
            };
            let mut line = line.strip_suffix('\r').unwrap_or(&line);
            if !self.started {
                self.started = true;
                line = line.strip_prefix('\u{feff}').unwrap_or(line);
            }

            //cut at empty line
            if line.trim().is_empty() {
                match block.close() {
                    Some(lines) => return Some(Ok(lines)),
                    None => continue,
                }
            }
            block.push(line.to_string());
        }

        // close eventual last block
        self.done = true;
        block.finish().map(Ok)
    }
}
