//! The "Want more specifics?" yes/no exchange.

use std::io::{self, BufRead, Write};

use crate::report::capitalize;

pub const DETAILS_PROMPT: &str = "Want more specifics? (Y/N): ";

/// Where the yes/no exchange stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Asking,
    Detailed,
    Declined,
}

/// How the exchange ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Detailed,
    Declined,
}

impl PromptState {
    /// Feed one response. Only `Asking` reacts; the other states are final.
    pub fn next(self, response: &str) -> PromptState {
        match self {
            PromptState::Asking => match normalize(response).as_str() {
                "Y" => PromptState::Detailed,
                "N" => PromptState::Declined,
                _ => PromptState::Asking,
            },
            done => done,
        }
    }

    pub fn answer(self) -> Option<Answer> {
        match self {
            PromptState::Asking => None,
            PromptState::Detailed => Some(Answer::Detailed),
            PromptState::Declined => Some(Answer::Declined),
        }
    }
}

/// Trim surrounding whitespace, then capitalize.
pub fn normalize(response: &str) -> String {
    capitalize(response.trim())
}

/// Ask until the user answers Y or N (any case).
///
/// End of input counts as declining; there is nobody left to show details to.
pub fn ask_for_details<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Answer> {
    let mut state = PromptState::Asking;
    let mut line = String::new();

    loop {
        if let Some(answer) = state.answer() {
            tracing::debug!(?answer, "details prompt answered");
            return Ok(answer);
        }

        write!(output, "{DETAILS_PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!("input closed at details prompt");
            return Ok(Answer::Declined);
        }
        state = state.next(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(responses: &str) -> (Answer, String) {
        let mut input = Cursor::new(responses.as_bytes().to_vec());
        let mut output = Vec::new();
        let answer = ask_for_details(&mut input, &mut output).unwrap();
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn accepts_either_case() {
        assert_eq!(PromptState::Asking.next("y"), PromptState::Detailed);
        assert_eq!(PromptState::Asking.next("Y"), PromptState::Detailed);
        assert_eq!(PromptState::Asking.next("n"), PromptState::Declined);
        assert_eq!(PromptState::Asking.next("N"), PromptState::Declined);
    }

    #[test]
    fn accepts_padded_answers() {
        assert_eq!(PromptState::Asking.next("  y \n"), PromptState::Detailed);
        assert_eq!(PromptState::Asking.next("\tN\r\n"), PromptState::Declined);
    }

    #[test]
    fn anything_else_keeps_asking() {
        for response in ["", "yes", "no", "maybe", "yn", "1", "\n"] {
            assert_eq!(PromptState::Asking.next(response), PromptState::Asking, "{response:?}");
        }
    }

    #[test]
    fn final_states_ignore_further_input() {
        assert_eq!(PromptState::Detailed.next("n"), PromptState::Detailed);
        assert_eq!(PromptState::Declined.next("y"), PromptState::Declined);
        assert_eq!(PromptState::Asking.answer(), None);
    }

    #[test]
    fn reprompts_until_valid() {
        let (answer, output) = ask("what\nyes please\n\ny\n");
        assert_eq!(answer, Answer::Detailed);
        assert_eq!(output.matches(DETAILS_PROMPT).count(), 4);
    }

    #[test]
    fn declines_on_n() {
        let (answer, output) = ask("N\n");
        assert_eq!(answer, Answer::Declined);
        assert_eq!(output, DETAILS_PROMPT);
    }

    #[test]
    fn closed_input_declines() {
        let (answer, _) = ask("hmm\n");
        assert_eq!(answer, Answer::Declined);
    }
}
