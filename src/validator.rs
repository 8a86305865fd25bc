use crate::error::FastqDefect;
use crate::policy::{Mode, StreamOptions};
use crate::record::{FastqRecord, normalize_description};
use crate::tokenizer::RecordCandidate;

/// Classifies a [`RecordCandidate`] as a record or a [`FastqDefect`].
///
/// Validation is pure: the same candidate always yields the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    /// Strict-mode validation; the alphabet check only runs when set.
    pub strict: bool,
    pub validate_alphabet: bool,
    pub allow_lowercase: bool,
    pub validate_quality: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            strict: true,
            validate_alphabet: true,
            allow_lowercase: true,
            validate_quality: false,
        }
    }
}

impl From<&StreamOptions> for Validator {
    fn from(opts: &StreamOptions) -> Self {
        Self {
            strict: opts.mode == Mode::Strict,
            validate_alphabet: opts.validate_alphabet,
            allow_lowercase: opts.allow_lowercase,
            validate_quality: opts.validate_quality,
        }
    }
}

impl Validator {
    pub fn validate(&self, cand: &RecordCandidate) -> Result<FastqRecord, FastqDefect> {
        let (read_id, description) = self.check(cand)?;
        Ok(FastqRecord::from_parts(
            read_id,
            description,
            cand.sequence.clone(),
            cand.quality.clone(),
        ))
    }

    /// Like [`validate`](Self::validate), moving the payload into the record.
    pub fn validate_owned(&self, cand: RecordCandidate) -> Result<FastqRecord, FastqDefect> {
        let (read_id, description) = self.check(&cand)?;
        Ok(FastqRecord::from_parts(
            read_id,
            description,
            cand.sequence,
            cand.quality,
        ))
    }

    fn check(&self, cand: &RecordCandidate) -> Result<(String, Option<String>), FastqDefect> {
        let line = cand.line;

        let Some(header) = cand.header.strip_prefix(b"@") else {
            return Err(sigil_mismatch(line, '@', &cand.header));
        };
        let Some(second_header) = cand.separator.strip_prefix(b"+") else {
            return Err(sigil_mismatch(line, '+', &cand.separator));
        };

        let header_text = String::from_utf8_lossy(header);
        let (read_id, description) = match header_text.split_once(char::is_whitespace) {
            Some((id, desc)) => (id, Some(desc)),
            None => (&*header_text, None),
        };
        if read_id.is_empty() {
            return Err(FastqDefect::MissingReadId { line });
        }

        if !second_header.is_empty() && second_header != header {
            return Err(FastqDefect::SecondHeaderMismatch {
                line,
                expected: header_text.into_owned(),
                found: String::from_utf8_lossy(second_header).into_owned(),
            });
        }

        if cand.sequence.len() != cand.quality.len() {
            return Err(FastqDefect::SequenceQualityLengthMismatch {
                line,
                seq: cand.sequence.len(),
                qual: cand.quality.len(),
            });
        }

        if self.strict && self.validate_alphabet {
            if let Some(position) = cand
                .sequence
                .iter()
                .position(|&b| !is_valid_base(b, self.allow_lowercase))
            {
                return Err(FastqDefect::InvalidAlphabet {
                    line,
                    position,
                    base: cand.sequence[position] as char,
                });
            }
        }

        if self.validate_quality {
            if let Some(position) = cand.quality.iter().position(|b| !(b'!'..=b'~').contains(b)) {
                return Err(FastqDefect::InvalidQuality {
                    line,
                    position,
                    byte: cand.quality[position],
                });
            }
        }

        Ok((read_id.to_string(), normalize_description(description)))
    }
}

#[inline]
fn is_valid_base(b: u8, allow_lowercase: bool) -> bool {
    match b {
        b'A' | b'C' | b'G' | b'T' | b'N' => true,
        b'a' | b'c' | b'g' | b't' | b'n' => allow_lowercase,
        _ => false,
    }
}

fn sigil_mismatch(line: u64, expected: char, found: &[u8]) -> FastqDefect {
    FastqDefect::HeaderSigilMismatch {
        line,
        expected,
        found: found.first().map(|&b| b as char),
    }
}
