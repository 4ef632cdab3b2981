//! The interactive console flow of one N3 run.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::classify::{classify_emotions, classify_polarity, TextClassifier};
use crate::document;
use crate::error::N3Error;
use crate::prompt::{self, Answer};
use crate::report::format_profile;

pub const BANNER: &str = "─•~❉᯽ No Nonsense Nuance ᯽❉~•─";
pub const FILENAME_PROMPT: &str = "Paste your .txt file name: ";
pub const FAREWELL: &str = "Thank you for using N3 <3";
const FRAME_TOP: &str = "╔════════ ≪ °❈° ≫ ════════╗";
const FRAME_BOTTOM: &str = "╚════════ ≪ °❈° ≫ ════════╝";

/// Console input and output for one run.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn welcome(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", BANNER.cyan().bold().underline())?;
        writeln!(
            self.output,
            "\nWelcome to N3: your reading comprehension assistant.\n\
             N3 will read and analyse the semantics of your text for you. \
             Simply upload your text file and N3 will tell you the overall tone of the text, \
             the top emotions within the text, and more information if you wish.\n"
        )?;
        writeln!(
            self.output,
            "Rules and requirements:\n\
             ✅Ensure your file is in .txt format\n\
             ✅Ensure your text file is in the same folder as this program\n\
             ✅Maximum passage length is {} words\n",
            document::MAX_WORDS
        )
    }

    /// Read one filename, without its line ending.
    pub fn ask_filename(&mut self) -> io::Result<String> {
        write!(self.output, "{FILENAME_PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no filename was entered",
            ));
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    pub fn summary(&mut self, polarity: &str, emotion: &str) -> io::Result<()> {
        let line = format!(
            "\nYour text is overall {polarity}, with it's top emotional hit being {emotion}.\n"
        );
        writeln!(self.output, "{}", line.cyan())
    }

    pub fn ask_for_details(&mut self) -> io::Result<Answer> {
        prompt::ask_for_details(&mut self.input, &mut self.output)
    }

    pub fn breakdown(&mut self, lines: &[String]) -> io::Result<()> {
        writeln!(
            self.output,
            "{}",
            "\nHere is a breakdown of the emotions in your text: \n".cyan()
        )?;
        writeln!(self.output, "{FRAME_TOP}")?;
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        writeln!(self.output, "{FRAME_BOTTOM}\n")
    }

    pub fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output, "{FAREWELL}")?;
        self.output.flush()
    }
}

/// Run one full session: welcome, validate, classify, summarise, and
/// optionally show the emotion breakdown.
///
/// The classifiers are only built once the file has passed validation, since
/// loading them is the slow part of a run.
pub fn run<R, W, P, E>(
    session: &mut Session<R, W>,
    polarity_classifier: impl FnOnce() -> crate::error::Result<P>,
    emotion_classifier: impl FnOnce() -> crate::error::Result<E>,
) -> Result<Answer, N3Error>
where
    R: BufRead,
    W: Write,
    P: TextClassifier,
    E: TextClassifier,
{
    session.welcome()?;

    let filename = session.ask_filename()?;
    let document = document::validate(&filename)?;
    tracing::info!(file = %document.path().display(), words = document.word_count(), "document accepted");

    let polarity = classify_polarity(document.path(), &polarity_classifier()?)?;
    let (emotion, profile) = classify_emotions(document.path(), &emotion_classifier()?)?;

    session.summary(&polarity, &emotion)?;

    let answer = session.ask_for_details()?;
    if answer == Answer::Detailed {
        let lines = format_profile(&profile)?;
        session.breakdown(&lines)?;
    }
    session.farewell()?;

    Ok(answer)
}
